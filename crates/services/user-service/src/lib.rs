//! User Service Library
//!
//! User store, registration and credential verification. The HTTP gateway
//! links this crate directly and drives it through [`Services`].

pub mod infra;
pub mod repository;
pub mod service;

use tracing::info;

use common::DatabaseConfig;

pub use crate::infra::Database;
pub use crate::service::Services;

/// Connect to the configured database, apply migrations and build services.
pub async fn connect(config: &DatabaseConfig) -> Result<Services, sea_orm::DbErr> {
    let database = Database::connect(config).await?;
    Ok(Services::from_database(database))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &DatabaseConfig,
    action: MigrateAction,
) -> Result<(), sea_orm::DbErr> {
    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                info!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
