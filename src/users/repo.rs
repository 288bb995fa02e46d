use sqlx::{Any, Executor};
use tokio::task;
use tracing::{debug, info, instrument, warn};

use super::password::{hash_password, verify_against_dummy, verify_password};
use super::repo_types::{PublicUser, User};
use crate::db::{inserted_id, Database};
use crate::error::{StoreError, StoreResult};

async fn fetch_by_id<'e, E>(executor: E, uid: i64) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Any>,
{
    sqlx::query_as::<_, User>(
        r#"
        SELECT uid, username, email, password
        FROM users
        WHERE uid = ?
        "#,
    )
    .bind(uid)
    .fetch_optional(executor)
    .await
}

/// Every user, in whatever order the store returns them.
#[instrument(skip(db))]
pub async fn list_users(db: &Database) -> StoreResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT uid, username, email, password
        FROM users
        "#,
    )
    .fetch_all(db.pool())
    .await?;
    debug!(count = users.len(), "users listed");
    Ok(users)
}

#[instrument(skip(db))]
pub async fn get_user_by_id(db: &Database, uid: i64) -> StoreResult<Option<User>> {
    Ok(fetch_by_id(db.pool(), uid).await?)
}

/// First user with this username. Uniqueness is a convention, not a constraint.
#[instrument(skip(db))]
pub async fn get_user_by_username(db: &Database, username: &str) -> StoreResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT uid, username, email, password
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(db.pool())
    .await?;
    Ok(user)
}

/// Hashes `password`, stores the user and returns the stored row.
#[instrument(skip(db, password))]
pub async fn create_user(
    db: &Database,
    username: &str,
    email: &str,
    password: &str,
) -> StoreResult<User> {
    let plain = password.to_owned();
    let hash = task::spawn_blocking(move || hash_password(&plain)).await??;

    let mut tx = db.pool().begin().await?;
    let result = sqlx::query(
        r#"
        INSERT INTO users (username, email, password)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(hash.as_str())
    .execute(&mut *tx)
    .await?;
    let uid = inserted_id(&mut tx, &result, "users").await?;

    let user = fetch_by_id(&mut *tx, uid)
        .await?
        .ok_or(StoreError::Vanished {
            table: "users",
            id: uid,
        })?;
    tx.commit().await?;

    info!(uid = user.uid, username = %user.username, "user created");
    Ok(user)
}

/// Checks a username/password pair. Unknown users and wrong passwords both
/// come back as `Ok(None)` so callers cannot tell them apart.
#[instrument(skip(db, password))]
pub async fn verify_user(
    db: &Database,
    username: &str,
    password: &str,
) -> StoreResult<Option<PublicUser>> {
    let plain = password.to_owned();
    let Some(user) = get_user_by_username(db, username).await? else {
        task::spawn_blocking(move || verify_against_dummy(&plain)).await?;
        warn!(%username, "login unknown username");
        return Ok(None);
    };

    let hash = user.password.clone();
    let ok = task::spawn_blocking(move || verify_password(&plain, &hash)).await??;
    if !ok {
        warn!(%username, uid = user.uid, "login invalid password");
        return Ok(None);
    }

    debug!(uid = user.uid, "credentials verified");
    Ok(Some(PublicUser::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_db;

    const INJECTION: &str = "' OR '1'='1";

    #[tokio::test]
    async fn create_then_get_by_id_roundtrips() {
        let db = memory_db().await;
        let created = create_user(&db, "ana", "ana@example.com", "hunter22")
            .await
            .expect("create user");

        let fetched = get_user_by_id(&db, created.uid)
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(fetched.uid, created.uid);
        assert_eq!(fetched.username, "ana");
        assert_eq!(fetched.email, "ana@example.com");
        assert_ne!(fetched.password, "hunter22");
        assert_eq!(created.password, fetched.password);
        assert!(verify_password("hunter22", &fetched.password).unwrap());
    }

    #[tokio::test]
    async fn generated_ids_are_distinct() {
        let db = memory_db().await;
        let a = create_user(&db, "a", "a@example.com", "pw-a").await.unwrap();
        let b = create_user(&db, "b", "b@example.com", "pw-b").await.unwrap();
        assert_ne!(a.uid, b.uid);
    }

    #[tokio::test]
    async fn missing_user_is_absent_not_error() {
        let db = memory_db().await;
        assert!(get_user_by_id(&db, 404).await.unwrap().is_none());
        assert!(get_user_by_username(&db, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_users_returns_every_row() {
        let db = memory_db().await;
        assert!(list_users(&db).await.unwrap().is_empty());

        create_user(&db, "a", "a@example.com", "pw").await.unwrap();
        create_user(&db, "b", "b@example.com", "pw").await.unwrap();

        let mut names: Vec<String> = list_users(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn verify_user_accepts_correct_password() {
        let db = memory_db().await;
        let created = create_user(&db, "chef", "chef@example.com", "s3cret!")
            .await
            .unwrap();

        let verified = verify_user(&db, "chef", "s3cret!")
            .await
            .unwrap()
            .expect("credentials should match");
        assert_eq!(
            verified,
            PublicUser {
                uid: created.uid,
                username: "chef".into(),
                email: "chef@example.com".into(),
            }
        );
        let json = serde_json::to_string(&verified).unwrap();
        assert!(!json.contains("password"));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let db = memory_db().await;
        create_user(&db, "chef", "chef@example.com", "s3cret!")
            .await
            .unwrap();

        let wrong = verify_user(&db, "chef", "guess").await.unwrap();
        let unknown = verify_user(&db, "ghost", "s3cret!").await.unwrap();
        assert_eq!(wrong, None);
        assert_eq!(unknown, None);
    }

    #[tokio::test]
    async fn metacharacters_are_literal_values() {
        let db = memory_db().await;
        create_user(&db, "chef", "chef@example.com", "pw").await.unwrap();

        assert!(get_user_by_username(&db, INJECTION).await.unwrap().is_none());
        assert!(verify_user(&db, INJECTION, "pw").await.unwrap().is_none());
        assert!(verify_user(&db, "chef", INJECTION).await.unwrap().is_none());

        let odd = create_user(&db, INJECTION, "x@example.com", INJECTION)
            .await
            .unwrap();
        let fetched = get_user_by_id(&db, odd.uid).await.unwrap().unwrap();
        assert_eq!(fetched.username, INJECTION);
        assert_eq!(list_users(&db).await.unwrap().len(), 2);

        let verified = verify_user(&db, INJECTION, INJECTION)
            .await
            .unwrap()
            .expect("literal username and password should match");
        assert_eq!(verified.uid, odd.uid);
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_an_error() {
        let db = memory_db().await;
        sqlx::query("INSERT INTO users (username, email, password) VALUES (?, ?, ?)")
            .bind("legacy")
            .bind("legacy@example.com")
            .bind("plaintext")
            .execute(db.pool())
            .await
            .unwrap();

        let err = verify_user(&db, "legacy", "plaintext").await.unwrap_err();
        assert!(matches!(err, StoreError::Hash(_)));
    }
}
