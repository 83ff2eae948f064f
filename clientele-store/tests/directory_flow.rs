//! End-to-end repository tests against a live PostgreSQL instance.
//!
//! Every test rebuilds the schema, so they must not interleave:
//!
//!   DATABASE_URL=postgres://... cargo test -p clientele-store -- --ignored --test-threads=1

use clientele_store::db::pool::create_pool;
use clientele_store::db::repos::{
    CustomerRepo, CustomerUpdate, DbError, PhoneRepo, SearchCriteria,
};
use clientele_store::db::schema::rebuild_schema;
use clientele_store::models::{CustomerName, CustomerWithPhones, Email, Phone, PhoneNumber, Surname};
use sqlx::{PgPool, Row};

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    rebuild_schema(&pool).await.expect("schema rebuild failed");
    pool
}

async fn add_customer(
    pool: &PgPool,
    name: &str,
    surname: &str,
    email: &str,
    phones: &[&str],
) -> CustomerWithPhones {
    let phones: Vec<PhoneNumber> = phones
        .iter()
        .map(|p| PhoneNumber::new(p).expect("valid phone"))
        .collect();

    CustomerRepo::new(pool)
        .create(
            CustomerName::new(name).expect("valid name"),
            Surname::new(surname).expect("valid surname"),
            Email::new(email).expect("valid email"),
            &phones,
        )
        .await
        .expect("customer create failed")
}

async fn row_count(pool: &PgPool, table: &str) -> i64 {
    // table is always a literal from the test body
    let row = sqlx::query(&format!("SELECT COUNT(*) AS n FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count query failed");
    row.get("n")
}

#[tokio::test]
#[ignore = "requires database"]
async fn round_trip_create_then_search_by_phone() {
    let pool = test_pool().await;
    add_customer(&pool, "A", "B", "a@b.com", &["123"]).await;

    let records = CustomerRepo::new(&pool)
        .search(&SearchCriteria {
            phone_number: Some("123".into()),
            ..Default::default()
        })
        .await
        .expect("search failed");

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.customer.name, "A");
    assert_eq!(record.customer.surname, "B");
    assert_eq!(record.customer.email, "a@b.com");
    assert_eq!(record.phones, vec!["123"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_email_is_rejected_and_rows_unchanged() {
    let pool = test_pool().await;
    add_customer(&pool, "A", "B", "a@b.com", &[]).await;
    assert_eq!(row_count(&pool, "customers").await, 1);

    let err = CustomerRepo::new(&pool)
        .create(
            CustomerName::new("C").unwrap(),
            Surname::new("D").unwrap(),
            Email::new("a@b.com").unwrap(),
            &[],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Conflict(_)));
    assert_eq!(row_count(&pool, "customers").await, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn phone_keeps_its_owner_on_conflicting_add() {
    let pool = test_pool().await;
    let owner = add_customer(&pool, "A", "B", "a@b.com", &["111"]).await;
    let other = add_customer(&pool, "C", "D", "c@d.com", &[]).await;

    let err = PhoneRepo::new(&pool)
        .add(other.customer.customer_id, PhoneNumber::new("111").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Conflict(_)));

    let records = CustomerRepo::new(&pool)
        .search(&SearchCriteria {
            phone_number: Some("111".into()),
            ..Default::default()
        })
        .await
        .expect("search failed");
    assert_eq!(
        records[0].customer.customer_id,
        owner.customer.customer_id
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn adding_phone_for_unknown_customer_is_foreign_key_error() {
    let pool = test_pool().await;

    let err = PhoneRepo::new(&pool)
        .add(4242, PhoneNumber::new("555").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::ForeignKey(_)));
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleting_customer_cascades_to_phones() {
    let pool = test_pool().await;
    let record = add_customer(&pool, "A", "B", "a@b.com", &["111", "222"]).await;

    let phones: Vec<Phone> = sqlx::query_as("SELECT phone_number, customer_id FROM phones")
        .fetch_all(&pool)
        .await
        .expect("phone rows");
    assert_eq!(phones.len(), 2);
    assert!(phones
        .iter()
        .all(|p| p.customer_id == record.customer.customer_id));

    let deleted = CustomerRepo::new(&pool)
        .delete(record.customer.customer_id)
        .await
        .expect("delete failed");

    assert_eq!(deleted, 1);
    assert_eq!(row_count(&pool, "phones").await, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleting_unknown_customer_is_a_noop() {
    let pool = test_pool().await;

    let deleted = CustomerRepo::new(&pool).delete(4242).await.expect("delete");
    assert_eq!(deleted, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn updating_only_email_leaves_everything_else() {
    let pool = test_pool().await;
    let record = add_customer(&pool, "A", "B", "a@b.com", &["111"]).await;

    let updated = CustomerRepo::new(&pool)
        .update(
            record.customer.customer_id,
            CustomerUpdate {
                email: Some(Email::new("new@b.com").unwrap()),
                ..Default::default()
            },
        )
        .await
        .expect("update failed");

    assert_eq!(updated.customer.email, "new@b.com");
    assert_eq!(updated.customer.name, "A");
    assert_eq!(updated.customer.surname, "B");
    assert_eq!(updated.phones, vec!["111"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn phone_change_requires_matching_old_number() {
    let pool = test_pool().await;
    let record = add_customer(&pool, "A", "B", "a@b.com", &["111"]).await;

    let updated = CustomerRepo::new(&pool)
        .update(
            record.customer.customer_id,
            CustomerUpdate {
                phone_change: Some(clientele_store::db::repos::PhoneChange {
                    old: PhoneNumber::new("999").unwrap(),
                    new: PhoneNumber::new("222").unwrap(),
                }),
                ..Default::default()
            },
        )
        .await
        .expect("update failed");

    // Mismatched old number: nothing changed.
    assert_eq!(updated.phones, vec!["111"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_phone_search_reports_not_found() {
    let pool = test_pool().await;
    add_customer(&pool, "A", "B", "a@b.com", &["111"]).await;

    let err = CustomerRepo::new(&pool)
        .search(&SearchCriteria {
            phone_number: Some("000".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DbError::NotFound {
            resource: "phone",
            ..
        }
    ));
}

#[tokio::test]
#[ignore = "requires database"]
async fn schema_rebuild_is_idempotent() {
    let pool = test_pool().await;
    add_customer(&pool, "A", "B", "a@b.com", &["111"]).await;

    // Second rebuild drops the data and leaves working empty tables.
    rebuild_schema(&pool).await.expect("second rebuild failed");
    assert_eq!(row_count(&pool, "customers").await, 0);
    assert_eq!(row_count(&pool, "phones").await, 0);

    add_customer(&pool, "C", "D", "c@d.com", &["222"]).await;
    assert_eq!(row_count(&pool, "customers").await, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_without_phones_returns_empty_list() {
    let pool = test_pool().await;
    let record = add_customer(&pool, "A", "B", "a@b.com", &[]).await;

    assert!(record.phones.is_empty());

    let fetched = CustomerRepo::new(&pool)
        .get(record.customer.customer_id)
        .await
        .expect("get failed");
    assert!(fetched.phones.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn profile_search_or_combines_supplied_criteria() {
    let pool = test_pool().await;
    add_customer(&pool, "Dmitry", "Popov", "dmitry.popov@example.com", &[]).await;
    add_customer(&pool, "Evgeny", "Popov", "evgeny.popov@example.com", &[]).await;
    add_customer(&pool, "Dmitry", "Sidorov", "dmitry.sidorov@example.com", &[]).await;

    let records = CustomerRepo::new(&pool)
        .search(&SearchCriteria {
            name: Some("Evgeny".into()),
            surname: Some("Sidorov".into()),
            ..Default::default()
        })
        .await
        .expect("search failed");

    let emails: Vec<&str> = records.iter().map(|r| r.customer.email.as_str()).collect();
    assert_eq!(
        emails,
        vec!["evgeny.popov@example.com", "dmitry.sidorov@example.com"]
    );
}
