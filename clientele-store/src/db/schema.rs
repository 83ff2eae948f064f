//! Schema lifecycle for the customer directory.
//!
//! The rebuild is destructive: any prior data is lost. Dropping `phones`
//! before `customers` satisfies the foreign key, and two successive
//! rebuilds both leave a fresh, empty pair of tables.

use sqlx::PgPool;
use tracing::info;

use super::repos::DbError;

pub async fn rebuild_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("DROP TABLE IF EXISTS phones")
        .execute(pool)
        .await?;

    sqlx::query("DROP TABLE IF EXISTS customers")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE customers (
            customer_id SERIAL       PRIMARY KEY,
            name        VARCHAR(40)  NOT NULL,
            surname     VARCHAR(100) NOT NULL,
            email       VARCHAR(255) NOT NULL UNIQUE,
            created_at  TIMESTAMPTZ  NOT NULL DEFAULT now()
        )
    "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE phones (
            phone_number VARCHAR(11) PRIMARY KEY,
            customer_id  INTEGER     NOT NULL
                         REFERENCES customers(customer_id)
                         ON DELETE CASCADE ON UPDATE CASCADE
        )
    "#,
    )
    .execute(pool)
    .await?;

    info!("schema rebuilt");
    Ok(())
}
