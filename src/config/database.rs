//! Database configuration module for the bank model.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so every `belongs_to` relation becomes a `FOREIGN KEY` constraint and every
//! `indexed` column gets a secondary index for reverse lookups.

use crate::entities::{
    Account, Branch, Business, Customer, Department, Employee, Individual, Officer, Product,
    ProductType, Transaction,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityName, EntityTrait, Schema};
use tracing::{debug, info, instrument};

/// Default database location used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/bank.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates one table and its foreign-key indexes, skipping anything that already exists.
async fn create_entity_table<C, E>(db: &C, schema: &Schema, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let builder = db.get_database_backend();

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }

    debug!("Ensured table {}", entity.table_name());
    Ok(())
}

/// Creates all bank tables using `SeaORM`'s schema generation from entity definitions.
///
/// Referenced tables are created before the tables that reference them. Calling this
/// against a database that already has the schema is a no-op.
#[instrument(skip(db))]
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_entity_table(db, &schema, Branch).await?;
    create_entity_table(db, &schema, Department).await?;
    create_entity_table(db, &schema, Employee).await?;
    create_entity_table(db, &schema, ProductType).await?;
    create_entity_table(db, &schema, Product).await?;
    create_entity_table(db, &schema, Customer).await?;
    create_entity_table(db, &schema, Individual).await?;
    create_entity_table(db, &schema, Business).await?;
    create_entity_table(db, &schema, Officer).await?;
    create_entity_table(db, &schema, Account).await?;
    create_entity_table(db, &schema, Transaction).await?;

    info!("Database tables ensured.");
    Ok(())
}
