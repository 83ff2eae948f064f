//! Repositories for customers and phones.

mod customers;
mod phones;

pub use customers::{CustomerRepo, CustomerUpdate, PhoneChange, SearchCriteria};
pub use phones::PhoneRepo;

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database error type shared by the repositories.
///
/// Constraint violations are classified from the driver error kind so
/// callers can tell a duplicate email or phone number from a broken
/// reference without parsing messages.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("missing reference: {0}")]
    ForeignKey(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return DbError::Conflict(db_err.message().to_owned())
                }
                ErrorKind::ForeignKeyViolation => {
                    return DbError::ForeignKey(db_err.message().to_owned())
                }
                _ => {}
            }
        }

        DbError::Sqlx(err)
    }
}
