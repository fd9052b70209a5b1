//! Quote database entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub quote: String,
    pub author_id: i32,
    pub created_by: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

/// Many-to-many through `quote_tags`
impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::quote_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::quote_tag::Relation::Quote.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
