use lazy_static::lazy_static;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::repo_types::User;
use crate::{error::ApiError, extract::RequestBody};

pub const IS_ADMIN_NOT_BOOLEAN: &str = "ERROR: isAdmin must be boolean";
pub const INVALID_EMAIL: &str = "ERROR: Invalid email";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::bad_request(INVALID_EMAIL));
    }
    Ok(email)
}

/// Request body for user registration.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub is_admin: bool,
}

impl RequestBody for RegisterRequest {
    fn precheck(raw: &Value) -> Result<(), ApiError> {
        match raw.get("isAdmin") {
            Some(Value::Bool(_)) => Ok(()),
            _ => Err(ApiError::bad_request(IS_ADMIN_NOT_BOOLEAN)),
        }
    }

    fn validate(mut self) -> Result<Self, ApiError> {
        self.email = normalize_email(&self.email)?;
        Ok(self)
    }
}

/// Request body for login.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl RequestBody for LoginRequest {
    fn validate(mut self) -> Result<Self, ApiError> {
        self.email = normalize_email(&self.email)?;
        Ok(self)
    }
}

/// Response returned after register or login.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned alongside a token.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub is_admin: bool,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            is_admin: u.is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("no-at.example.com"));
        assert!(!is_valid_email("sp ace@example.com"));
    }

    #[test]
    fn is_admin_must_be_a_boolean() {
        for raw in [
            json!({"email": "a@b.co", "password": "p", "username": "u"}),
            json!({"email": "a@b.co", "password": "p", "username": "u", "isAdmin": "true"}),
            json!({"email": "a@b.co", "password": "p", "username": "u", "isAdmin": 1}),
            json!({"isAdmin": null}),
            json!([true]),
        ] {
            let err = RegisterRequest::precheck(&raw).unwrap_err();
            assert_eq!(err.to_string(), IS_ADMIN_NOT_BOOLEAN, "raw = {raw}");
        }
        assert!(RegisterRequest::precheck(&json!({"isAdmin": false})).is_ok());
    }

    #[test]
    fn register_email_is_normalized() {
        let req: RegisterRequest = serde_json::from_value(json!({
            "email": "  Player@Example.COM ",
            "password": "pw",
            "username": "player",
            "isAdmin": false
        }))
        .unwrap();
        let req = req.validate().unwrap();
        assert_eq!(req.email, "player@example.com");
    }

    #[test]
    fn login_rejects_malformed_email() {
        let req = LoginRequest {
            email: "nope".into(),
            password: "pw".into(),
        };
        assert_eq!(req.validate().unwrap_err().to_string(), INVALID_EMAIL);
    }

    #[test]
    fn public_user_uses_camel_case() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            email: "a@b.co".into(),
            username: "a".into(),
            is_admin: true,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["isAdmin"], json!(true));
        assert!(json.get("is_admin").is_none());
    }
}
