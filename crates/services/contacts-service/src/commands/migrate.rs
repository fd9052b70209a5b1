//! `migrate` command.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::infra::Database;
use crate::AppResult;

pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config).await?;
    tracing::info!(action = ?args.action, "Running migrations");

    match args.action {
        MigrateAction::Up => db.run_migrations().await?,
        MigrateAction::Down => db.rollback_migration().await?,
        MigrateAction::Fresh => {
            tracing::warn!("Dropping users and contacts before re-running migrations");
            db.fresh_migrations().await?;
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                println!("[{}] {}", if applied { "x" } else { " " }, name);
            }
        }
    }

    tracing::info!(action = ?args.action, "Migration command finished");
    Ok(())
}
