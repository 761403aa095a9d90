//! Bearer token validation

use std::collections::HashSet;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

/// Validates HMAC-signed bearer tokens against a shared secret.
///
/// `exp` and `nbf` are enforced when present but not required.
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims = HashSet::new();
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn is_valid(&self, token: &str) -> bool {
        match decode::<serde_json::Value>(token, &self.key, &self.validation) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Bearer token rejected");
                false
            }
        }
    }
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        exp: Option<u64>,
    }

    fn mint(secret: &str, exp: Option<u64>) -> String {
        encode(
            &Header::default(),
            &Claims {
                sub: "dropdown".to_string(),
                exp,
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn now() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn test_valid_token_without_exp() {
        let validator = TokenValidator::new("s3cret");
        assert!(validator.is_valid(&mint("s3cret", None)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let validator = TokenValidator::new("s3cret");
        assert!(!validator.is_valid(&mint("other", None)));
    }

    #[test]
    fn test_expired_rejected() {
        let validator = TokenValidator::new("s3cret");
        assert!(!validator.is_valid(&mint("s3cret", Some(now() - 120))));
        assert!(validator.is_valid(&mint("s3cret", Some(now() + 3600))));
    }

    #[test]
    fn test_garbage_rejected() {
        let validator = TokenValidator::new("s3cret");
        assert!(!validator.is_valid("not.a.token"));
        assert!(!validator.is_valid(""));
    }

    #[test]
    fn test_hs512_accepted() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &Claims {
                sub: "x".to_string(),
                exp: None,
            },
            &EncodingKey::from_secret(b"s3cret"),
        )
        .unwrap();
        assert!(TokenValidator::new("s3cret").is_valid(&token));
    }
}
