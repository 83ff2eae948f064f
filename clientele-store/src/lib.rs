//! clientele-store: PostgreSQL persistence for the customer directory
//!
//! Two related entities - customers and the phone numbers they own -
//! managed through a pair of repositories over a shared `sqlx` pool.
//! Every operation is a single request/response cycle against the store;
//! no session state is retained between calls.

pub mod db;
pub mod models;

pub use db::pool::{connect, create_pool};
pub use db::repos::{
    CustomerRepo, CustomerUpdate, DbError, PhoneChange, PhoneRepo, SearchCriteria,
};
pub use db::schema::rebuild_schema;
pub use models::{Customer, CustomerName, CustomerWithPhones, Email, PhoneNumber, Surname};
