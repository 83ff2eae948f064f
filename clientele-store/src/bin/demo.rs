//! Scripted demo session for the customer directory.
//!
//! Reads database credentials from `settings.toml` in the working
//! directory, rebuilds the schema (destructive!), loads a handful of
//! customers, mutates them, and exercises both search modes. Each
//! operation's typed result is printed as it completes.

use anyhow::{Context, Result};
use clientele_core::config::DEFAULT_SETTINGS_FILE;
use clientele_core::DbSettings;
use clientele_store::db::repos::{
    CustomerRepo, CustomerUpdate, DbError, PhoneChange, PhoneRepo, SearchCriteria,
};
use clientele_store::db::{pool, schema};
use clientele_store::models::{CustomerName, CustomerWithPhones, Email, PhoneNumber, Surname};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_records(records: &[CustomerWithPhones]) {
    if records.is_empty() {
        println!("  (no matches)");
    }
    for record in records {
        println!("  {record}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();

    let settings =
        DbSettings::load(DEFAULT_SETTINGS_FILE).context("failed to load database settings")?;
    let pool = pool::connect(&settings)
        .await
        .context("failed to connect to postgres")?;
    info!(database = %settings.database, "connected");

    schema::rebuild_schema(&pool).await?;

    let customers = CustomerRepo::new(&pool);
    let phones = PhoneRepo::new(&pool);

    println!("adding customers:");
    let first = customers
        .create(
            CustomerName::new("Victor")?,
            Surname::new("Ivanov")?,
            Email::new("victor.ivanov@example.com")?,
            &[PhoneNumber::new("89111111111")?],
        )
        .await?;
    println!("  {first}");

    let record = customers
        .create(
            CustomerName::new("Dmitry")?,
            Surname::new("Popov")?,
            Email::new("dmitry.popov@example.com")?,
            &[PhoneNumber::new("89774526485")?],
        )
        .await?;
    println!("  {record}");

    let record = customers
        .create(
            CustomerName::new("Evgeny")?,
            Surname::new("Popov")?,
            Email::new("evgeny.popov@example.com")?,
            &[PhoneNumber::new("89036986542")?],
        )
        .await?;
    println!("  {record}");

    let record = customers
        .create(
            CustomerName::new("Dmitry")?,
            Surname::new("Sidorov")?,
            Email::new("dmitry.sidorov@example.com")?,
            &[
                PhoneNumber::new("89000000000")?,
                PhoneNumber::new("89999999999")?,
            ],
        )
        .await?;
    println!("  {record}");

    let first_id = first.customer.customer_id;

    println!("adding a second phone to customer {first_id}:");
    let record = phones.add(first_id, PhoneNumber::new("89222222222")?).await?;
    println!("  {record}");

    println!("renaming customer {first_id} and swapping a phone:");
    let record = customers
        .update(
            first_id,
            CustomerUpdate {
                name: Some(CustomerName::new("Stepan")?),
                surname: Some(Surname::new("Petrov")?),
                email: None,
                phone_change: Some(PhoneChange {
                    old: PhoneNumber::new("89111111111")?,
                    new: PhoneNumber::new("89333333333")?,
                }),
            },
        )
        .await?;
    println!("  {record}");

    println!("removing the second phone again:");
    let record = phones.delete(first_id, "89222222222").await?;
    println!("  {record}");

    let deleted = customers.delete(first_id).await?;
    println!("customer with id {first_id} removed from the database ({deleted} row)");

    println!("search by name 'Dmitry':");
    print_records(
        &customers
            .search(&SearchCriteria {
                name: Some("Dmitry".into()),
                ..Default::default()
            })
            .await?,
    );

    println!("search by surname 'Popov':");
    print_records(
        &customers
            .search(&SearchCriteria {
                surname: Some("Popov".into()),
                ..Default::default()
            })
            .await?,
    );

    println!("search by email 'dmitry.sidorov@example.com':");
    print_records(
        &customers
            .search(&SearchCriteria {
                email: Some("dmitry.sidorov@example.com".into()),
                ..Default::default()
            })
            .await?,
    );

    println!("search by phone '89999999999':");
    print_records(
        &customers
            .search(&SearchCriteria {
                phone_number: Some("89999999999".into()),
                ..Default::default()
            })
            .await?,
    );

    // This number went away with its owner; the miss is reported, not a
    // crash.
    println!("search by phone '89333333333':");
    match customers
        .search(&SearchCriteria {
            phone_number: Some("89333333333".into()),
            ..Default::default()
        })
        .await
    {
        Ok(records) => print_records(&records),
        Err(DbError::NotFound { resource, id }) => println!("  {resource} '{id}' not found"),
        Err(err) => return Err(err.into()),
    }

    pool.close().await;
    info!("connection closed");
    Ok(())
}
