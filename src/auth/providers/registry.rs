use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifierId {
    Remote,
    Jwt,
}

impl VerifierId {
    pub fn as_str(self) -> &'static str {
        match self {
            VerifierId::Remote => "remote",
            VerifierId::Jwt => "jwt",
        }
    }
}

impl std::str::FromStr for VerifierId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "remote" => Ok(VerifierId::Remote),
            "jwt" => Ok(VerifierId::Jwt),
            other => Err(format!("unsupported token verifier: {}", other)),
        }
    }
}

/// Turns the raw `Authorization` header value into the caller's user id.
///
/// Any failure (bad token, unreachable identity service, non-positive id)
/// is reported as `AppError::Unauthorized`.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    fn id(&self) -> VerifierId;

    async fn verify(&self, authorization: &str) -> Result<i64, AppError>;
}

#[derive(Clone)]
pub struct TokenVerifiers {
    active_id: VerifierId,
    verifiers: HashMap<VerifierId, Arc<dyn TokenVerifier>>,
}

impl std::fmt::Debug for TokenVerifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifiers")
            .field("active_id", &self.active_id)
            .field("verifiers", &self.verifiers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TokenVerifiers {
    pub fn new(active_id: VerifierId) -> Self {
        Self {
            active_id,
            verifiers: HashMap::new(),
        }
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn TokenVerifier>) -> Result<Self, AppError> {
        self.add(verifier)?;
        Ok(self)
    }

    pub fn add(&mut self, verifier: Arc<dyn TokenVerifier>) -> Result<(), AppError> {
        let id = verifier.id();
        if self.verifiers.contains_key(&id) {
            return Err(AppError::conflict(format!(
                "Token verifier already registered: {}",
                id.as_str()
            )));
        }
        self.verifiers.insert(id, verifier);
        Ok(())
    }

    pub fn set_active(&mut self, id: VerifierId) -> Result<(), AppError> {
        if self.verifiers.contains_key(&id) {
            self.active_id = id;
            Ok(())
        } else {
            Err(AppError::bad_request(format!(
                "Token verifier not configured: {}",
                id.as_str()
            )))
        }
    }

    pub fn active_id(&self) -> VerifierId {
        self.active_id
    }

    pub fn active(&self) -> Result<&dyn TokenVerifier, AppError> {
        self.verifiers
            .get(&self.active_id)
            .map(|verifier| verifier.as_ref())
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Token verifier not configured: {}",
                    self.active_id.as_str()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::error::AppError;

    use super::{TokenVerifier, TokenVerifiers, VerifierId};

    struct FixedVerifier {
        id: VerifierId,
        user_id: i64,
    }

    #[async_trait]
    impl TokenVerifier for FixedVerifier {
        fn id(&self) -> VerifierId {
            self.id
        }

        async fn verify(&self, _authorization: &str) -> Result<i64, AppError> {
            Ok(self.user_id)
        }
    }

    #[test]
    fn verifier_id_parser_is_case_insensitive() {
        assert_eq!("remote".parse::<VerifierId>(), Ok(VerifierId::Remote));
        assert_eq!("JWT".parse::<VerifierId>(), Ok(VerifierId::Jwt));
        assert!("oauth".parse::<VerifierId>().is_err());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let verifier = Arc::new(FixedVerifier {
            id: VerifierId::Jwt,
            user_id: 1,
        });
        let mut verifiers = TokenVerifiers::new(VerifierId::Jwt);
        verifiers
            .add(verifier.clone())
            .expect("first registration should succeed");

        let err = verifiers
            .add(verifier)
            .expect_err("duplicate registration should fail");
        assert_eq!(err.message(), "Token verifier already registered: jwt");
    }

    #[test]
    fn active_verifier_must_be_configured() {
        let verifiers = TokenVerifiers::new(VerifierId::Remote);
        let err = match verifiers.active() {
            Ok(_) => panic!("missing verifier should fail"),
            Err(err) => err,
        };
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.message(), "Token verifier not configured: remote");
    }

    #[tokio::test]
    async fn set_active_switches_to_a_registered_verifier() {
        let mut verifiers = TokenVerifiers::new(VerifierId::Remote)
            .with_verifier(Arc::new(FixedVerifier {
                id: VerifierId::Jwt,
                user_id: 99,
            }))
            .expect("registration should succeed");

        assert!(verifiers.set_active(VerifierId::Remote).is_err());
        verifiers
            .set_active(VerifierId::Jwt)
            .expect("registered verifier should activate");

        assert_eq!(verifiers.active_id(), VerifierId::Jwt);
        let user_id = verifiers
            .active()
            .expect("active verifier")
            .verify("Bearer anything")
            .await
            .expect("verification should succeed");
        assert_eq!(user_id, 99);
    }
}
