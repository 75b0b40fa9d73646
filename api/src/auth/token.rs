use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub const ADMIN_TOKEN_TTL_DAYS: i64 = 1;
pub const USER_TOKEN_TTL_DAYS: i64 = 28;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub id: String,
    pub iat: i64,
    pub exp: i64,
}

/// Payload of a bearer token. Admin tokens are keyed by email, user tokens by
/// record id; the guards tell them apart by shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenClaims {
    Admin(AdminClaims),
    User(UserClaims),
}

/// Signs and verifies HS256 tokens with the process-wide secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &SecretString) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn issue_admin_token(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let (iat, exp) = lifetime(ADMIN_TOKEN_TTL_DAYS);
        self.sign(&TokenClaims::Admin(AdminClaims {
            email: email.to_string(),
            iat,
            exp,
        }))
    }

    pub fn issue_user_token(&self, id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let (iat, exp) = lifetime(USER_TOKEN_TTL_DAYS);
        self.sign(&TokenClaims::User(UserClaims {
            id: id.to_string(),
            iat,
            exp,
        }))
    }

    pub(crate) fn sign(&self, claims: &TokenClaims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
    }

    /// Verify signature and expiry.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        Ok(decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?.claims)
    }
}

fn lifetime(days: i64) -> (i64, i64) {
    let now = chrono::Utc::now();
    (now.timestamp(), (now + chrono::Duration::days(days)).timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: &str) -> TokenIssuer {
        TokenIssuer::new(&SecretString::from(secret.to_string()))
    }

    #[test]
    fn admin_token_carries_email_for_one_day() {
        let tokens = issuer("test-secret");
        let token = tokens.issue_admin_token("admin@alumease.dev").unwrap();

        match tokens.decode(&token).unwrap() {
            TokenClaims::Admin(claims) => {
                assert_eq!(claims.email, "admin@alumease.dev");
                assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
            }
            other => panic!("expected admin claims, got {other:?}"),
        }
    }

    #[test]
    fn user_token_carries_id_for_28_days() {
        let tokens = issuer("test-secret");
        let token = tokens.issue_user_token("0b6d").unwrap();

        match tokens.decode(&token).unwrap() {
            TokenClaims::User(claims) => {
                assert_eq!(claims.id, "0b6d");
                assert_eq!(claims.exp - claims.iat, 28 * 24 * 60 * 60);
            }
            other => panic!("expected user claims, got {other:?}"),
        }
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = issuer("one").issue_user_token("abc").unwrap();
        assert!(issuer("two").decode(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = issuer("test-secret");
        let past = chrono::Utc::now().timestamp() - 3600;
        let token = tokens
            .sign(&TokenClaims::User(UserClaims {
                id: "abc".into(),
                iat: past - 3600,
                exp: past,
            }))
            .unwrap();
        assert!(tokens.decode(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let tokens = issuer("test-secret");
        let mut token = tokens.issue_admin_token("admin@alumease.dev").unwrap();
        token.push('x');
        assert!(tokens.decode(&token).is_err());
    }
}
