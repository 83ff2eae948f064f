//! The joined customer+phone record returned by repository operations.

use std::fmt;

use serde::Serialize;

use super::Customer;

/// A customer joined with its phone numbers.
///
/// The phone list may be empty - customers without phones are still
/// returned by the repositories, unlike a plain inner join would allow.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerWithPhones {
    #[serde(flatten)]
    pub customer: Customer,
    pub phones: Vec<String>,
}

impl fmt::Display for CustomerWithPhones {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} <{}>",
            self.customer.customer_id, self.customer.name, self.customer.surname,
            self.customer.email
        )?;

        if self.phones.is_empty() {
            write!(f, " (no phones)")
        } else {
            write!(f, " [{}]", self.phones.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample(phones: Vec<String>) -> CustomerWithPhones {
        CustomerWithPhones {
            customer: Customer {
                customer_id: 7,
                name: "Dmitry".into(),
                surname: "Sidorov".into(),
                email: "dmitry.sidorov@example.com".into(),
                created_at: Utc::now(),
            },
            phones,
        }
    }

    #[test]
    fn displays_phones() {
        let record = sample(vec!["89000000000".into(), "89999999999".into()]);
        assert_eq!(
            record.to_string(),
            "#7 Dmitry Sidorov <dmitry.sidorov@example.com> [89000000000, 89999999999]"
        );
    }

    #[test]
    fn displays_phoneless_customer() {
        let record = sample(Vec::new());
        assert_eq!(
            record.to_string(),
            "#7 Dmitry Sidorov <dmitry.sidorov@example.com> (no phones)"
        );
    }
}
