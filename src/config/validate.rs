use anyhow::{Result, bail};

use crate::{auth::providers::VerifierId, db::dao::DaoBase, db::dao::TodoDao};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if let Some(database) = cfg.database.as_ref() {
        if database.url.trim().is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if database.min_idle > database.max_connections {
            errors.push(format!(
                "database.min_idle ({}) must be <= database.max_connections ({})",
                database.min_idle, database.max_connections
            ));
        }
    }

    match cfg.auth.provider {
        VerifierId::Remote => {
            let url = cfg.auth.verify_url.as_deref().unwrap_or("").trim();
            if url.is_empty() {
                errors.push("auth.verify_url is required for the remote provider".to_string());
            } else if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(format!("auth.verify_url must be an http(s) URL: {url}"));
            }
        }
        VerifierId::Jwt => {
            let secret = cfg.auth.jwt_secret.as_deref().unwrap_or("");
            if secret.trim().is_empty() {
                errors.push("auth.jwt_secret is required for the jwt provider".to_string());
            }
        }
    }

    if cfg.auth.verify_timeout_secs == 0 {
        errors.push("auth.verify_timeout_secs must be > 0".to_string());
    }

    if cfg.todo.max_limit == 0 || cfg.todo.max_limit > TodoDao::MAX_WINDOW {
        errors.push(format!(
            "todo.max_limit must be between 1 and {}",
            TodoDao::MAX_WINDOW
        ));
    }

    if cfg.todo.default_limit == 0 || cfg.todo.default_limit > cfg.todo.max_limit {
        errors.push(format!(
            "todo.default_limit ({}) must be between 1 and todo.max_limit ({})",
            cfg.todo.default_limit, cfg.todo.max_limit
        ));
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use crate::{
        auth::providers::VerifierId,
        config::{AppConfig, AuthConfig, DatabaseConfig},
    };

    use super::validate;

    fn remote_config() -> AppConfig {
        AppConfig {
            auth: AuthConfig {
                verify_url: Some("http://identity.local/verify".to_string()),
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn accepts_remote_provider_with_url() {
        validate(&remote_config()).expect("config should be valid");
    }

    #[test]
    fn remote_provider_requires_verify_url() {
        let err = validate(&AppConfig::default()).expect_err("missing url should fail");
        assert!(err.to_string().contains("auth.verify_url is required"));
    }

    #[test]
    fn jwt_provider_requires_secret() {
        let cfg = AppConfig {
            auth: AuthConfig {
                provider: VerifierId::Jwt,
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        };
        let err = validate(&cfg).expect_err("missing secret should fail");
        assert!(err.to_string().contains("auth.jwt_secret is required"));
    }

    #[test]
    fn reports_every_problem_at_once() {
        let mut cfg = remote_config();
        cfg.general.host = " ".to_string();
        cfg.database = Some(DatabaseConfig {
            url: "postgres://localhost/todos".to_string(),
            max_connections: 1,
            min_idle: 4,
            connect_timeout_secs: 5,
        });
        cfg.todo.default_limit = 50;

        let message = validate(&cfg).expect_err("config should be invalid").to_string();
        assert!(message.contains("general.host must not be empty"));
        assert!(message.contains("database.min_idle (4) must be <= database.max_connections (1)"));
        assert!(message.contains("todo.default_limit (50)"));
    }
}
