//! Store tests against a private in-memory database.

use fincheck_core::NewAnalysis;
use fincheck_db::{connect_ephemeral, insert_analysis, list_analyses};

fn analysis(company: &str, verdict: &str, date: &str) -> NewAnalysis {
    NewAnalysis {
        company_name: company.to_string(),
        description: format!("{company} quarterly filing summary."),
        verdict: verdict.to_string(),
        date: date.to_string(),
    }
}

#[tokio::test]
async fn insert_then_list_round_trips_every_field() {
    let pool = connect_ephemeral().await.expect("pool");
    let new = NewAnalysis {
        company_name: "Acme Corp".to_string(),
        description: "Record profits reported.".to_string(),
        verdict: "Positive".to_string(),
        date: "2024-01-15".to_string(),
    };

    let stored = insert_analysis(&pool, &new).await.expect("insert");
    let listed = list_analyses(&pool).await.expect("list");

    assert_eq!(listed.len(), 1);
    let got = &listed[0];
    assert_eq!(got.id, stored.id);
    assert_eq!(got.company_name, "Acme Corp");
    assert_eq!(got.description, "Record profits reported.");
    assert_eq!(got.verdict, "Positive");
    assert_eq!(got.date, "2024-01-15");
    assert_eq!(got.created_at, stored.created_at);
    assert_eq!(got.timestamp(), stored.created_at.format("%Y-%m-%d %H:%M:%S").to_string());
}

#[tokio::test]
async fn fields_are_stored_verbatim() {
    let pool = connect_ephemeral().await.expect("pool");
    let new = NewAnalysis {
        company_name: "  Ünïcode & Sons, Ltd.  ".to_string(),
        description: "Line one\nLine two \"quoted\"".to_string(),
        verdict: "positive-ish".to_string(),
        date: "sometime in Q3".to_string(),
    };

    insert_analysis(&pool, &new).await.expect("insert");
    let listed = list_analyses(&pool).await.expect("list");

    assert_eq!(listed[0].company_name, new.company_name);
    assert_eq!(listed[0].description, new.description);
    assert_eq!(listed[0].verdict, new.verdict);
    assert_eq!(listed[0].date, new.date);
}

#[tokio::test]
async fn list_is_newest_first() {
    let pool = connect_ephemeral().await.expect("pool");

    let first = insert_analysis(&pool, &analysis("First", "Positive", "2024-01-01"))
        .await
        .expect("insert first");
    let second = insert_analysis(&pool, &analysis("Second", "Negative", "2024-01-02"))
        .await
        .expect("insert second");
    let third = insert_analysis(&pool, &analysis("Third", "Positive", "2024-01-03"))
        .await
        .expect("insert third");

    let listed = list_analyses(&pool).await.expect("list");
    let ids: Vec<i64> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);

    for pair in listed.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "created_at must be non-increasing: {:?} then {:?}",
            pair[0].created_at,
            pair[1].created_at
        );
    }
}

#[tokio::test]
async fn ids_are_assigned_and_unique() {
    let pool = connect_ephemeral().await.expect("pool");
    let same = analysis("Duplicate Inc", "Negative", "2024-05-05");

    let a = insert_analysis(&pool, &same).await.expect("insert a");
    let b = insert_analysis(&pool, &same).await.expect("insert b");

    assert_ne!(a.id, b.id, "identical submissions are not deduplicated");
    assert_eq!(list_analyses(&pool).await.expect("list").len(), 2);
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let pool = connect_ephemeral().await.expect("pool");
    assert!(list_analyses(&pool).await.expect("list").is_empty());
}

#[tokio::test]
async fn created_at_has_no_database_default() {
    let pool = connect_ephemeral().await.expect("pool");

    let result = sqlx::query(
        "INSERT INTO analyses (company_name, description, verdict, date) \
         VALUES ('Acme Corp', 'Record profits reported.', 'Positive', '2024-01-15')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "insert without created_at must be rejected");
    assert!(list_analyses(&pool).await.expect("list").is_empty());
}

#[tokio::test]
async fn stored_created_at_is_rfc3339_text() {
    let pool = connect_ephemeral().await.expect("pool");
    let stored = insert_analysis(&pool, &analysis("Acme Corp", "Positive", "2024-01-15"))
        .await
        .expect("insert");

    let raw: String = sqlx::query_scalar("SELECT created_at FROM analyses WHERE id = ?1")
        .bind(stored.id)
        .fetch_one(&pool)
        .await
        .expect("raw created_at");

    let parsed = chrono::DateTime::parse_from_rfc3339(&raw).expect("rfc3339 text");
    assert_eq!(parsed.offset().local_minus_utc(), 0, "got {raw}");
}
