use async_trait::async_trait;

use crate::{
    auth::jwt::{JwtKeys, decode_token},
    error::AppError,
};

use super::{TokenVerifier, VerifierId, rejected};

/// Verifies HS256 bearer tokens locally with a shared secret.
#[derive(Clone)]
pub struct JwtVerifier {
    keys: JwtKeys,
}

impl JwtVerifier {
    pub fn new(keys: JwtKeys) -> Self {
        Self { keys }
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    fn id(&self) -> VerifierId {
        VerifierId::Jwt
    }

    async fn verify(&self, authorization: &str) -> Result<i64, AppError> {
        let token = authorization.strip_prefix("Bearer ").ok_or_else(|| {
            tracing::debug!("authorization header is not a bearer token");
            rejected()
        })?;

        let claims = decode_token(&self.keys, token.trim()).map_err(|err| {
            tracing::debug!(error = %err, "bearer token rejected");
            rejected()
        })?;

        claims.user_id().ok_or_else(|| {
            tracing::debug!(sub = %claims.sub, "token subject is not a user id");
            rejected()
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        auth::{
            Claims,
            jwt::{JwtKeys, encode_token, make_claims, now_unix},
            providers::TokenVerifier,
        },
        error::AppError,
    };

    use super::JwtVerifier;

    const SECRET: &[u8] = b"jwt-verifier-secret";

    fn verifier() -> JwtVerifier {
        JwtVerifier::new(JwtKeys::from_secret(SECRET))
    }

    fn bearer(claims: &Claims) -> String {
        let token = encode_token(&JwtKeys::from_secret(SECRET), claims).expect("encode token");
        format!("Bearer {token}")
    }

    #[tokio::test]
    async fn resolves_subject_of_valid_token() {
        let user_id = verifier()
            .verify(&bearer(&make_claims(12345, 3600)))
            .await
            .expect("token should verify");
        assert_eq!(user_id, 12345);
    }

    #[tokio::test]
    async fn rejects_missing_bearer_prefix() {
        let token = encode_token(&JwtKeys::from_secret(SECRET), &make_claims(1, 3600))
            .expect("encode token");
        let err = verifier().verify(&token).await.expect_err("raw token should fail");
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let now = now_unix();
        let claims = Claims {
            sub: "5".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let err = verifier()
            .verify(&bearer(&claims))
            .await
            .expect_err("expired token should fail");
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn rejects_non_numeric_subject() {
        let mut claims = make_claims(1, 3600);
        claims.sub = "someone@example.com".to_string();
        let err = verifier()
            .verify(&bearer(&claims))
            .await
            .expect_err("non numeric subject should fail");
        assert_eq!(err.message(), "User verification failed");
    }
}
