//! Customer repository.
//!
//! Write operations return the affected customer's joined record so the
//! caller never has to re-query. Search has two mutually exclusive modes:
//! a phone-number lookup that resolves the owning customer, and an OR
//! filter built dynamically from whichever profile criteria were actually
//! supplied.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

use super::DbError;
use crate::models::{
    Customer, CustomerName, CustomerWithPhones, Email, PhoneNumber, Surname,
};

/// Shared SELECT for the joined row set. LEFT JOIN keeps customers with
/// no phones in the result.
const JOINED_SELECT: &str = "\
    SELECT c.customer_id, c.name, c.surname, c.email, c.created_at, p.phone_number \
      FROM customers c \
      LEFT JOIN phones p ON p.customer_id = c.customer_id";

/// Optional per-field changes for one customer.
///
/// Each provided field issues its own UPDATE restricted to the customer
/// id; there is no atomic multi-field guarantee beyond per-statement
/// semantics.
#[derive(Debug, Default, Clone)]
pub struct CustomerUpdate {
    pub name: Option<CustomerName>,
    pub surname: Option<Surname>,
    pub email: Option<Email>,
    pub phone_change: Option<PhoneChange>,
}

/// Replace `old` with `new` among a customer's phones.
///
/// A silent no-op when the customer does not currently own `old`.
#[derive(Debug, Clone)]
pub struct PhoneChange {
    pub old: PhoneNumber,
    pub new: PhoneNumber,
}

/// Search criteria. Phone mode wins when `phone_number` is set; otherwise
/// the supplied profile fields are OR-combined and absent ones are
/// excluded from the filter entirely.
#[derive(Debug, Default, Clone)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// Customer repository
pub struct CustomerRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a customer with zero or more phone numbers.
    ///
    /// The generated id comes back from `INSERT ... RETURNING`, so the
    /// phoneless path is as valid as any other. Duplicate email or phone
    /// number surfaces as [`DbError::Conflict`].
    pub async fn create(
        &self,
        name: CustomerName,
        surname: Surname,
        email: Email,
        phones: &[PhoneNumber],
    ) -> Result<CustomerWithPhones, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO customers (name, surname, email)
            VALUES ($1, $2, $3)
            RETURNING customer_id
            "#,
        )
        .bind(name.as_str())
        .bind(surname.as_str())
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await?;

        let customer_id: i32 = row.get("customer_id");
        debug!(customer_id, "customer inserted");

        for phone in phones {
            sqlx::query("INSERT INTO phones (phone_number, customer_id) VALUES ($1, $2)")
                .bind(phone.as_str())
                .bind(customer_id)
                .execute(self.pool)
                .await?;
        }

        self.get(customer_id).await
    }

    /// Get a customer's joined record by id.
    pub async fn get(&self, customer_id: i32) -> Result<CustomerWithPhones, DbError> {
        let sql = format!("{JOINED_SELECT} WHERE c.customer_id = $1 ORDER BY p.phone_number");
        let rows = sqlx::query(&sql)
            .bind(customer_id)
            .fetch_all(self.pool)
            .await?;

        group_joined(rows.iter().map(joined_row).collect())
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                resource: "customer",
                id: customer_id.to_string(),
            })
    }

    /// Apply per-field updates to one customer and return its record.
    pub async fn update(
        &self,
        customer_id: i32,
        update: CustomerUpdate,
    ) -> Result<CustomerWithPhones, DbError> {
        if let Some(name) = &update.name {
            sqlx::query("UPDATE customers SET name = $1 WHERE customer_id = $2")
                .bind(name.as_str())
                .bind(customer_id)
                .execute(self.pool)
                .await?;
        }

        if let Some(surname) = &update.surname {
            sqlx::query("UPDATE customers SET surname = $1 WHERE customer_id = $2")
                .bind(surname.as_str())
                .bind(customer_id)
                .execute(self.pool)
                .await?;
        }

        if let Some(email) = &update.email {
            sqlx::query("UPDATE customers SET email = $1 WHERE customer_id = $2")
                .bind(email.as_str())
                .bind(customer_id)
                .execute(self.pool)
                .await?;
        }

        if let Some(change) = &update.phone_change {
            // Constrained on the old number as well: changing a phone the
            // customer does not own is a no-op.
            let result = sqlx::query(
                r#"
                UPDATE phones
                   SET phone_number = $1
                 WHERE customer_id = $2
                   AND phone_number = $3
                "#,
            )
            .bind(change.new.as_str())
            .bind(customer_id)
            .bind(change.old.as_str())
            .execute(self.pool)
            .await?;

            debug!(
                customer_id,
                rows = result.rows_affected(),
                "phone number change"
            );
        }

        self.get(customer_id).await
    }

    /// Delete a customer; the store cascades the phone rows away.
    ///
    /// Returns the number of rows deleted (0 when the id does not exist).
    pub async fn delete(&self, customer_id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(customer_id)
            .execute(self.pool)
            .await?;

        debug!(customer_id, rows = result.rows_affected(), "customer delete");
        Ok(result.rows_affected())
    }

    /// Search the directory.
    ///
    /// Phone mode resolves the owning customer id first and reports
    /// [`DbError::NotFound`] when the number is unknown. Profile mode
    /// OR-combines only the supplied criteria; with none supplied the
    /// result is empty and no query is issued.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<CustomerWithPhones>, DbError> {
        if let Some(phone) = criteria.phone_number.as_deref() {
            let row = sqlx::query("SELECT customer_id FROM phones WHERE phone_number = $1")
                .bind(phone)
                .fetch_optional(self.pool)
                .await?
                .ok_or_else(|| DbError::NotFound {
                    resource: "phone",
                    id: phone.to_owned(),
                })?;

            let customer_id: i32 = row.get("customer_id");
            return Ok(vec![self.get(customer_id).await?]);
        }

        let (filter, binds) = build_profile_filter(criteria);
        if binds.is_empty() {
            debug!("search with no criteria, returning nothing");
            return Ok(Vec::new());
        }

        let sql = format!("{JOINED_SELECT} WHERE {filter} ORDER BY c.customer_id, p.phone_number");
        let mut query = sqlx::query(&sql);
        for value in &binds {
            query = query.bind(*value);
        }

        let rows = query.fetch_all(self.pool).await?;
        Ok(group_joined(rows.iter().map(joined_row).collect()))
    }
}

/// Build the OR filter for profile mode with numbered binds, covering
/// only the criteria actually supplied.
fn build_profile_filter(criteria: &SearchCriteria) -> (String, Vec<&str>) {
    let mut predicates = Vec::new();
    let mut binds = Vec::new();

    for (column, value) in [
        ("c.name", criteria.name.as_deref()),
        ("c.surname", criteria.surname.as_deref()),
        ("c.email", criteria.email.as_deref()),
    ] {
        if let Some(value) = value {
            predicates.push(format!("{} = ${}", column, binds.len() + 1));
            binds.push(value);
        }
    }

    (predicates.join(" OR "), binds)
}

fn joined_row(row: &PgRow) -> (Customer, Option<String>) {
    (
        Customer {
            customer_id: row.get("customer_id"),
            name: row.get("name"),
            surname: row.get("surname"),
            email: row.get("email"),
            created_at: row.get("created_at"),
        },
        row.get("phone_number"),
    )
}

/// Collapse joined rows (ordered by customer id) into one record per
/// customer. A NULL phone from the LEFT JOIN becomes an empty list.
fn group_joined(rows: Vec<(Customer, Option<String>)>) -> Vec<CustomerWithPhones> {
    let mut records: Vec<CustomerWithPhones> = Vec::new();

    for (customer, phone) in rows {
        match records.last_mut() {
            Some(record) if record.customer.customer_id == customer.customer_id => {
                if let Some(phone) = phone {
                    record.phones.push(phone);
                }
            }
            _ => records.push(CustomerWithPhones {
                phones: phone.into_iter().collect(),
                customer,
            }),
        }
    }

    records
}
