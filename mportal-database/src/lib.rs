pub mod config;
pub mod database;
pub mod models;

pub use sea_orm;

use crate::config::get_env_or_throw;
use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, Schema};
use std::sync::Mutex;

/**
 * The global database connection
 */
static DB_CONN: Lazy<Mutex<Option<DatabaseConnection>>> = Lazy::new(|| Mutex::new(None));

/**
 * Initialize the environment (Just for testing purposes, not used in the actual application, as dotenv is called in the main function of the application)
 *
 * # Returns
 * @return () - The result of the operation
 */
pub fn init() {
    dotenv::dotenv().ok();
}

/**
 * Establish a connection to the database
 *
 * # Returns
 * @return Result<(), sea_orm::DbErr> - The result of the operation
 */
pub async fn setup() -> Result<(), DbErr> {
    let database_url = get_env_or_throw("DB_URL");
    let db_conn = Database::connect(&database_url).await?;
    let mut db_conn_global = DB_CONN.lock().unwrap();
    *db_conn_global = Some(db_conn);
    Ok(())
}

/**
 * Get a reference to the established database connection
 *
 * # Returns
 * @return Result<DatabaseConnection, sea_orm::DbErr> - The database connection or an error
 */
pub async fn get_database_connection() -> Result<DatabaseConnection, DbErr> {
    let db_conn = DB_CONN.lock().unwrap();
    if let Some(ref conn) = *db_conn {
        Ok(conn.clone())
    } else {
        Err(DbErr::Custom(
            "Database connection is not established".into(),
        ))
    }
}

/**
 * Create the schema for all entities on the given connection. Used by the
 * test environment; production schemas are managed by external migrations.
 *
 * # Arguments
 * @param conn: &DatabaseConnection - The connection to create the schema on
 *
 * # Returns
 * @return Result<(), sea_orm::DbErr> - The result of the operation
 */
pub async fn create_schema(conn: &DatabaseConnection) -> Result<(), DbErr> {
    use sea_orm::ConnectionTrait;

    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    let statements = [
        schema.create_table_from_entity(models::users::Entity),
        schema.create_table_from_entity(models::projects::Entity),
        schema.create_table_from_entity(models::preferences::Entity),
        schema.create_table_from_entity(models::rankings::Entity),
    ];
    for mut statement in statements {
        conn.execute(backend.build(statement.if_not_exists()))
            .await?;
    }
    Ok(())
}

/**
 * Sets up a fresh in-memory SQLite database as the global connection and
 * creates the schema. Each call replaces the previous database, so tests
 * start from a clean state.
 */
pub async fn setup_test_environment() {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    // A single pooled connection keeps every handle on the same in-memory db.
    options.max_connections(1);
    let db_conn = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory database.");
    create_schema(&db_conn)
        .await
        .expect("Failed to create schema.");
    let mut db_conn_global = DB_CONN.lock().unwrap();
    *db_conn_global = Some(db_conn);
}
