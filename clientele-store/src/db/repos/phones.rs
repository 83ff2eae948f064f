//! Phone repository.
//!
//! Phones are owned rows: inserts must reference an existing customer and
//! deletes match on both the owner and the number.

use sqlx::PgPool;
use tracing::debug;

use super::{CustomerRepo, DbError};
use crate::models::{CustomerWithPhones, PhoneNumber};

/// Phone repository
pub struct PhoneRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PhoneRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Attach a phone number to an existing customer.
    ///
    /// A number already in the store surfaces as [`DbError::Conflict`];
    /// an unknown customer id as [`DbError::ForeignKey`]. Returns the
    /// owner's joined record.
    pub async fn add(
        &self,
        customer_id: i32,
        phone_number: PhoneNumber,
    ) -> Result<CustomerWithPhones, DbError> {
        sqlx::query("INSERT INTO phones (phone_number, customer_id) VALUES ($1, $2)")
            .bind(phone_number.as_str())
            .bind(customer_id)
            .execute(self.pool)
            .await?;

        debug!(customer_id, phone = phone_number.as_str(), "phone added");
        CustomerRepo::new(self.pool).get(customer_id).await
    }

    /// Delete one phone row matching both fields; no-op when absent.
    ///
    /// Returns the customer's remaining joined record - the phone list
    /// may come back empty if this was the only number.
    pub async fn delete(
        &self,
        customer_id: i32,
        phone_number: &str,
    ) -> Result<CustomerWithPhones, DbError> {
        let result = sqlx::query(
            r#"
            DELETE FROM phones
             WHERE customer_id = $1
               AND phone_number = $2
            "#,
        )
        .bind(customer_id)
        .bind(phone_number)
        .execute(self.pool)
        .await?;

        debug!(
            customer_id,
            phone = phone_number,
            rows = result.rows_affected(),
            "phone delete"
        );
        CustomerRepo::new(self.pool).get(customer_id).await
    }
}
