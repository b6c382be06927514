use std::{sync::Arc, time::Duration};

use crate::{config::AuthConfig, error::AppError};

use super::{
    jwt::JwtKeys,
    providers::{JwtVerifier, RemoteVerifier, TokenVerifiers},
};

pub fn build_verifiers(cfg: &AuthConfig) -> Result<TokenVerifiers, AppError> {
    let mut verifiers = TokenVerifiers::new(cfg.provider);

    if let Some(url) = cfg.verify_url.as_deref().filter(|url| !url.trim().is_empty()) {
        let timeout = Duration::from_secs(cfg.verify_timeout_secs);
        verifiers.add(Arc::new(RemoteVerifier::new(url.trim(), timeout)?))?;
    }

    if let Some(secret) = cfg.jwt_secret.as_deref().filter(|secret| !secret.is_empty()) {
        let keys = JwtKeys::from_secret(secret.as_bytes());
        verifiers.add(Arc::new(JwtVerifier::new(keys)))?;
    }

    verifiers.set_active(cfg.provider).map_err(|_| {
        AppError::internal(format!(
            "Token verifier {} is missing its settings",
            cfg.provider.as_str()
        ))
    })?;

    tracing::info!(provider = cfg.provider.as_str(), "token verifier ready");
    Ok(verifiers)
}

#[cfg(test)]
mod tests {
    use crate::{auth::providers::VerifierId, config::AuthConfig, error::AppError};

    use super::build_verifiers;

    #[test]
    fn registers_both_verifiers_when_configured() {
        let cfg = AuthConfig {
            provider: VerifierId::Jwt,
            verify_url: Some("http://127.0.0.1:9/verify".to_string()),
            jwt_secret: Some("secret".to_string()),
            ..AuthConfig::default()
        };
        let mut verifiers = build_verifiers(&cfg).expect("verifiers should build");
        assert_eq!(verifiers.active_id(), VerifierId::Jwt);
        verifiers
            .set_active(VerifierId::Remote)
            .expect("remote verifier should be registered too");
    }

    #[test]
    fn fails_when_active_provider_has_no_settings() {
        let cfg = AuthConfig {
            provider: VerifierId::Jwt,
            ..AuthConfig::default()
        };
        let err = build_verifiers(&cfg).expect_err("jwt without secret should fail");
        assert!(matches!(err, AppError::Internal(_)));
    }
}
