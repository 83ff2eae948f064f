//! Phone number newtype and row record.

use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for phone numbers, per the VARCHAR(11) column.
const MAX_PHONE_LEN: usize = 11;

/// Validated phone number.
///
/// Globally unique in the store - a number belongs to exactly one
/// customer at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty {
                field: "phone number",
            });
        }

        if s.len() > MAX_PHONE_LEN {
            return Err(ValidationError::TooLong {
                field: "phone number",
                max: MAX_PHONE_LEN,
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

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Phone row from the database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Phone {
    pub phone_number: String,
    pub customer_id: i32,
}
