//! Shared data models.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Result;

/// Length of generated display names.
pub const DISPLAY_NAME_LEN: usize = 8;

/// A user account row.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub is_host: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account creation payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 4, max = 128))]
    pub username: String,
    #[validate(email, length(max = 128))]
    pub email: String,
    #[validate(length(min = 4, max = 40))]
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_host: bool,
}

/// A validated account ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub is_host: bool,
}

impl NewUser {
    /// Fill an unset or empty display name, then validate.
    ///
    /// `generate` is only called when a display name is needed.
    pub fn into_create<F>(mut self, generate: F) -> Result<CreateUser>
    where
        F: FnOnce() -> String,
    {
        let display_name = match self.display_name.take().filter(|name| !name.is_empty()) {
            Some(name) => name,
            None => generate(),
        };
        self.display_name = Some(display_name.clone());
        self.validate()?;

        Ok(CreateUser {
            username: self.username,
            email: self.email,
            display_name,
            is_host: self.is_host,
        })
    }
}

/// Random `[A-Za-z0-9]` display name of [`DISPLAY_NAME_LEN`] characters.
pub fn random_display_name() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DISPLAY_NAME_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn new_user(display_name: Option<&str>) -> NewUser {
        NewUser {
            username: "test-host".to_string(),
            email: "test-host@example.com".to_string(),
            display_name: display_name.map(String::from),
            is_host: true,
        }
    }

    #[test]
    fn test_random_display_name_shape() {
        let name = random_display_name();
        assert_eq!(name.len(), DISPLAY_NAME_LEN);
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_explicit_display_name_is_kept() {
        let user = new_user(Some("Host Person"))
            .into_create(|| panic!("generator must not run"))
            .unwrap();
        assert_eq!(user.display_name, "Host Person");
        assert!(user.is_host);
    }

    #[test]
    fn test_missing_or_empty_display_name_is_generated() {
        for display_name in [None, Some("")] {
            let user = new_user(display_name)
                .into_create(|| "Gen3rat3".to_string())
                .unwrap();
            assert_eq!(user.display_name, "Gen3rat3");
        }
    }

    #[test]
    fn test_validation_rejects_bad_fields() {
        let mut short = new_user(Some("Host Person"));
        short.username = "abc".to_string();
        assert!(matches!(short.into_create(random_display_name), Err(Error::Validation(_))));

        let mut bad_email = new_user(None);
        bad_email.email = "not-an-email".to_string();
        assert!(matches!(bad_email.into_create(random_display_name), Err(Error::Validation(_))));

        let long_name = "x".repeat(41);
        let user = new_user(Some(&long_name));
        assert!(matches!(user.into_create(random_display_name), Err(Error::Validation(_))));
    }

    #[test]
    fn test_new_user_deserialize_defaults() {
        let user: NewUser =
            serde_json::from_str(r#"{"username":"guest","email":"guest@example.com"}"#).unwrap();
        assert_eq!(user.display_name, None);
        assert!(!user.is_host);
    }

    #[test]
    fn test_user_serializes_all_fields() {
        let now = Utc::now();
        let user = User {
            id: 1,
            username: "test".to_string(),
            email: "test@example.com".to_string(),
            display_name: "test".to_string(),
            is_host: true,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["username"], "test");
        assert_eq!(json["is_host"], true);
        assert!(json["created_at"].is_string());
        assert!(json["updated_at"].is_string());
    }
}
