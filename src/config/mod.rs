use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub gateway: GatewayConfig,
    pub secrets: SecretsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub bind_host: String,
    pub region: String,
    pub account_id: String,
    pub stage: String,
    pub get_api: RestApiConfig,
    pub any_api: RestApiConfig,
}

/// One REST API fronted by the local gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestApiConfig {
    pub name: String,
    pub api_id: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsConfig {
    /// Identifier of the secret holding the API token (SECRET_ARN)
    pub secret_id: String,
    pub secrets_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl GatewayConfig {
    /// Prefix every method ARN of `api` starts with
    pub fn arn_prefix(&self, api: &RestApiConfig) -> String {
        format!(
            "arn:aws:execute-api:{}:{}:{}/{}",
            self.region, self.account_id, api.api_id, self.stage
        )
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Gateway overrides
        if let Ok(v) = env::var("GATEWAY_BIND_HOST") {
            self.gateway.bind_host = v;
        }
        if let Ok(v) = env::var("AWS_REGION") {
            self.gateway.region = v;
        }
        if let Ok(v) = env::var("GATEWAY_ACCOUNT_ID") {
            self.gateway.account_id = v;
        }
        if let Ok(v) = env::var("GATEWAY_STAGE") {
            self.gateway.stage = v;
        }
        if let Ok(v) = env::var("GET_API_ID") {
            self.gateway.get_api.api_id = v;
        }
        if let Ok(v) = env::var("GET_API_PORT") {
            self.gateway.get_api.port = v.parse().unwrap_or(self.gateway.get_api.port);
        }
        if let Ok(v) = env::var("ANY_API_ID") {
            self.gateway.any_api.api_id = v;
        }
        if let Ok(v) = env::var("ANY_API_PORT") {
            self.gateway.any_api.port = v.parse().unwrap_or(self.gateway.any_api.port);
        }

        // Secret overrides
        if let Ok(v) = env::var("SECRET_ARN") {
            self.secrets.secret_id = v;
        }
        if let Ok(v) = env::var("SECRETS_FILE") {
            self.secrets.secrets_file = PathBuf::from(v);
        }

        if let Ok(v) = env::var("LOG_LEVEL") {
            self.logging.level = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            gateway: GatewayConfig {
                bind_host: "127.0.0.1".to_string(),
                region: "us-east-1".to_string(),
                account_id: "000000000000".to_string(),
                stage: "dev".to_string(),
                get_api: RestApiConfig::get_api(3000),
                any_api: RestApiConfig::any_api(3001),
            },
            secrets: SecretsConfig::local(),
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            gateway: GatewayConfig {
                bind_host: "0.0.0.0".to_string(),
                region: "us-east-1".to_string(),
                account_id: "000000000000".to_string(),
                stage: "dev".to_string(),
                get_api: RestApiConfig::get_api(8080),
                any_api: RestApiConfig::any_api(8081),
            },
            secrets: SecretsConfig::local(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            gateway: GatewayConfig {
                bind_host: "0.0.0.0".to_string(),
                region: "us-east-1".to_string(),
                account_id: "000000000000".to_string(),
                stage: "dev".to_string(),
                get_api: RestApiConfig::get_api(8080),
                any_api: RestApiConfig::any_api(8081),
            },
            secrets: SecretsConfig::local(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl RestApiConfig {
    fn get_api(port: u16) -> Self {
        Self {
            name: "Alumnus GET API Example".to_string(),
            api_id: "alumnusget".to_string(),
            port,
        }
    }

    fn any_api(port: u16) -> Self {
        Self {
            name: "Alumnus ANY API Example".to_string(),
            api_id: "alumnusany".to_string(),
            port,
        }
    }
}

impl SecretsConfig {
    fn local() -> Self {
        Self {
            secret_id: "alumnus-api-token".to_string(),
            secrets_file: PathBuf::from(".alumnus/secrets.json"),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.gateway.stage, "dev");
        assert_eq!(config.gateway.get_api.port, 3000);
        assert_eq!(config.gateway.any_api.port, 3001);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.gateway.bind_host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn arn_prefix_includes_api_and_stage() {
        let config = AppConfig::development();
        assert_eq!(
            config.gateway.arn_prefix(&config.gateway.get_api),
            "arn:aws:execute-api:us-east-1:000000000000:alumnusget/dev"
        );
    }
}
