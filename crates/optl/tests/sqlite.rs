//! `sqlx` round trips against an in-memory SQLite database.

#![cfg(feature = "sqlite")]

use optl::Optional;
use sqlx::{Connection, SqliteConnection};

async fn connect() -> SqliteConnection {
    let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
    sqlx::query("CREATE TABLE profiles (id INTEGER PRIMARY KEY, nickname TEXT, age INTEGER)")
        .execute(&mut conn)
        .await
        .unwrap();
    conn
}

#[tokio::test]
async fn present_values_bind_and_decode() {
    let mut conn = connect().await;

    sqlx::query("INSERT INTO profiles (id, nickname, age) VALUES (?, ?, ?)")
        .bind(1_i64)
        .bind(Optional::of("neb".to_string()))
        .bind(Optional::of(33_i64))
        .execute(&mut conn)
        .await
        .unwrap();

    let (nickname, age): (Optional<String>, Optional<i64>) =
        sqlx::query_as("SELECT nickname, age FROM profiles WHERE id = 1")
            .fetch_one(&mut conn)
            .await
            .unwrap();

    assert_eq!(nickname, Optional::of("neb".to_string()));
    assert_eq!(age, Optional::of(33));
}

#[tokio::test]
async fn absent_values_bind_as_null() {
    let mut conn = connect().await;

    sqlx::query("INSERT INTO profiles (id, nickname, age) VALUES (?, ?, ?)")
        .bind(2_i64)
        .bind(Optional::<String>::empty())
        .bind(Optional::<i64>::empty())
        .execute(&mut conn)
        .await
        .unwrap();

    let nulls: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM profiles WHERE id = 2 AND nickname IS NULL AND age IS NULL",
    )
    .fetch_one(&mut conn)
    .await
    .unwrap();
    assert_eq!(nulls, 1);

    let (nickname, age): (Optional<String>, Optional<i64>) =
        sqlx::query_as("SELECT nickname, age FROM profiles WHERE id = 2")
            .fetch_one(&mut conn)
            .await
            .unwrap();

    assert!(nickname.is_empty());
    assert!(age.is_empty());
}
