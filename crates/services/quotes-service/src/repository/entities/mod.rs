//! SeaORM entity definitions

pub mod author;
pub mod quote;
pub mod quote_tag;
pub mod tag;
