use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub uid: i64,         // generated id
    pub username: String, // unique by convention only
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String, // bcrypt hash, never plaintext
}

/// A user as handed to callers after a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub uid: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            uid: user.uid,
            username: user.username,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_never_serialized() {
        let user = User {
            uid: 7,
            username: "ana".into(),
            email: "ana@example.com".into(),
            password: "$2b$10$abcdefghijklmnopqrstuv".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("ana@example.com"));
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$"));
    }

    #[test]
    fn public_user_drops_password() {
        let user = User {
            uid: 1,
            username: "bo".into(),
            email: "bo@example.com".into(),
            password: "hash".into(),
        };
        let public = PublicUser::from(user);
        assert_eq!(public.uid, 1);
        assert_eq!(public.username, "bo");
        let json = serde_json::to_value(&public).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 3);
    }
}
