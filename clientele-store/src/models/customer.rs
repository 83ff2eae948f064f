//! Customer field newtypes and the customer row record.
//!
//! Bounds mirror the column constraints: VARCHAR(40) name,
//! VARCHAR(100) surname, VARCHAR(255) unique email. Nothing beyond the
//! schema is validated here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for customer first names
const MAX_NAME_LEN: usize = 40;

/// Maximum length for surnames
const MAX_SURNAME_LEN: usize = 100;

/// Maximum length for email addresses
const MAX_EMAIL_LEN: usize = 255;

/// Validated customer first name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerName(String);

impl CustomerName {
    /// Create a customer name, enforcing the column bound.
    ///
    /// # Rules
    /// - Non-empty
    /// - Max 40 characters
    ///
    /// # Example
    /// ```
    /// use clientele_store::models::CustomerName;
    ///
    /// assert!(CustomerName::new("Dmitry").is_ok());
    /// assert!(CustomerName::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if s.len() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CustomerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated surname (max 100 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surname(String);

impl Surname {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "surname" });
        }

        if s.len() > MAX_SURNAME_LEN {
            return Err(ValidationError::TooLong {
                field: "surname",
                max: MAX_SURNAME_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Surname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated email address (max 255 characters).
///
/// Uniqueness is enforced by the store, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if s.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Customer row from the database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Customer {
    pub customer_id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_within_bound() {
        assert!(CustomerName::new("Dmitry").is_ok());
        assert!(CustomerName::new(&"a".repeat(40)).is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let err = CustomerName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn rejects_long_name() {
        let err = CustomerName::new(&"a".repeat(41)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 40, .. }));
    }

    #[test]
    fn surname_bound_is_100() {
        assert!(Surname::new(&"a".repeat(100)).is_ok());
        let err = Surname::new(&"a".repeat(101)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 100, .. }));
    }

    #[test]
    fn email_bound_is_255() {
        assert!(Email::new("dmitry.popov@example.com").is_ok());
        let err = Email::new(&"a".repeat(256)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 255, .. }));
    }
}
