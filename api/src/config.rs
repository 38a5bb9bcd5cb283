use um_shared::config::{AppConfig, AuthConfig, Environment, ServerConfig};

/// Runtime configuration of the API binary
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
}

impl Config {
    /// Load from the process environment; call after `.env` is loaded
    pub fn from_env() -> Self {
        Self {
            app: AppConfig::from_env(),
        }
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.app.auth
    }

    pub fn server(&self) -> &ServerConfig {
        &self.app.server
    }

    pub fn environment(&self) -> Environment {
        self.app.environment
    }

    pub fn is_production(&self) -> bool {
        self.app.environment.is_production()
    }

    /// Settings that must not reach production unchanged
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.auth().jwt.is_using_default_secret() {
            warnings.push("JWT_SECRET is not set; using the development secret".to_string());
        }
        if self.auth().password.bcrypt_cost < 10 {
            warnings.push(format!(
                "BCRYPT_COST {} is below the recommended minimum of 10",
                self.auth().password.bcrypt_cost
            ));
        }
        warnings
    }
}
