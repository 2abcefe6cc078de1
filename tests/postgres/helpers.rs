//! Shared helpers for `PostgreSQL` integration tests.

use diesel::prelude::*;
use pg_embedded_setup_unpriv::TestCluster;
use task_manager::task::adapters::postgres::{PostgresTaskRepository, apply_migrations, build_pool};
use tokio::runtime::Runtime;

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "task_manager_test_template";

/// Boxed error used by setup helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates a tokio runtime for driving the async repository.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the task schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            apply_migrations(&mut conn).map_err(|e| eyre::eyre!("{e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Returns a fresh database name with the given prefix.
pub fn unique_db_name(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

/// Creates a database from the template and returns a repository over it.
///
/// # Errors
///
/// Returns an error if database creation or pool setup fails.
pub fn setup_repository(
    cluster: &TestCluster,
    db_name: &str,
) -> Result<PostgresTaskRepository, BoxError> {
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let url = cluster.connection().database_url(db_name);
    let pool = build_pool(&url, 1).map_err(|e| Box::new(e) as BoxError)?;
    Ok(PostgresTaskRepository::new(pool))
}

/// Opens a direct connection for raw SQL checks.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub fn connect(cluster: &TestCluster, db_name: &str) -> Result<PgConnection, BoxError> {
    let url = cluster.connection().database_url(db_name);
    PgConnection::establish(&url).map_err(|e| Box::new(e) as BoxError)
}

/// Guard that drops the test database even if the test panics.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    pub const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(&*self.db_name) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}
