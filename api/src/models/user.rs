use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::{lenient_number, StringList};
use crate::validation::{
    is_valid_email, normalize_email, present, ValidationError, MIN_PASSWORD_LENGTH,
};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: String,
    pub profile_image: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub year_of_passing: Option<i64>,
    pub cgpa: Option<f64>,
    pub batch: Option<String>,
    pub course: Option<String>,
    pub degree: Option<String>,
    pub department: Option<String>,
    pub current_company: Option<String>,
    pub position: Option<String>,
    pub achievements: Json<Vec<String>>,
    pub linked_in: Option<String>,
    pub github: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a successful login reveals about the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A registration that passed validation. Email is normalized.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterPayload {
    pub fn validate(&self) -> Result<NewUser, ValidationError> {
        let (Some(name), Some(email), Some(password)) = (
            present(&self.name),
            present(&self.email),
            self.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(ValidationError::new("Missing Detail"));
        };

        if !is_valid_email(email) {
            return Err(ValidationError::new("Enter a valid email"));
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::new("Password length should be atleast 8"));
        }

        Ok(NewUser {
            name: name.to_string(),
            email: normalize_email(email),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginPayload {
    /// Normalized email and raw password.
    pub fn validate(&self) -> Result<(String, &str), ValidationError> {
        match (
            present(&self.email),
            self.password.as_deref().filter(|p| !p.is_empty()),
        ) {
            (Some(email), Some(password)) => Ok((normalize_email(email), password)),
            _ => Err(ValidationError::new("Missing details")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub year_of_passing: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cgpa: Option<f64>,
    pub batch: Option<String>,
    pub course: Option<String>,
    pub degree: Option<String>,
    pub department: Option<String>,
    pub current_company: Option<String>,
    pub position: Option<String>,
    pub achievements: Option<StringList>,
    pub linked_in: Option<String>,
    pub github: Option<String>,
    /// A `data:image/...` URI is uploaded; anything else is ignored.
    pub profile_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterPayload {
        RegisterPayload {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    #[test]
    fn registration_checks_run_in_order() {
        let missing = RegisterPayload {
            name: Some("A".into()),
            email: Some("not-an-email".into()),
            password: None,
        };
        assert_eq!(missing.validate().unwrap_err().0, "Missing Detail");

        assert_eq!(
            register("A", "not-an-email", "short").validate().unwrap_err().0,
            "Enter a valid email"
        );
        assert_eq!(
            register("A", "a@x.com", "short").validate().unwrap_err().0,
            "Password length should be atleast 8"
        );
    }

    #[test]
    fn password_length_boundary() {
        assert!(register("A", "a@x.com", "passwor").validate().is_err());
        assert!(register("A", "a@x.com", "password").validate().is_ok());
    }

    #[test]
    fn registration_normalizes_email() {
        let user = register(" A ", " A@X.com", "password1").validate().unwrap();
        assert_eq!(user.name, "A");
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn login_requires_both_fields() {
        let payload = LoginPayload {
            email: Some("a@x.com".into()),
            password: Some(String::new()),
        };
        assert_eq!(payload.validate().unwrap_err().0, "Missing details");
    }

    #[test]
    fn profile_update_accepts_form_shapes() {
        let update: ProfileUpdate = serde_json::from_str(
            r#"{"yearOfPassing": "2022", "achievements": "GSoC, ICPC", "linkedIn": "in/a"}"#,
        )
        .unwrap();
        assert_eq!(update.year_of_passing, Some(2022));
        assert_eq!(update.achievements.unwrap().into_vec(), vec!["GSoC", "ICPC"]);
        assert_eq!(update.linked_in.as_deref(), Some("in/a"));
    }
}
