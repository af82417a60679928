//! Typed view of the `ENVIRONMENT` variable the lambda is deployed with

use std::str::FromStr;
use thiserror::Error;

/// The name of the environment variable holding the deployment environment
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// The current environment the lambda is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// The lambda is running on a developer machine, e.g. through `cargo lambda watch`
    Local,
}

impl Environment {
    /// Reads [ENVIRONMENT_VAR], falling back to production when it is unset or unrecognized
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(ENVIRONMENT_VAR).ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(Environment::Production)
    }

    /// The short name used in the variable, e.g. `prod`
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "prod",
            Environment::Develop => "dev",
            Environment::Local => "local",
        }
    }
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error)]
#[error("Could not convert {0} into an environment value")]
pub struct UnknownValue(String);

impl FromStr for Environment {
    type Err = UnknownValue;

    fn from_str(environment: &str) -> Result<Self, UnknownValue> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownValue(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_known_values() {
        for env in [
            Environment::Production,
            Environment::Develop,
            Environment::Local,
        ] {
            assert_eq!(env.as_str().parse::<Environment>().unwrap(), env);
        }
    }

    #[test]
    fn it_rejects_unknown_values() {
        let err = "staging".parse::<Environment>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not convert staging into an environment value"
        );
    }

    #[test]
    fn it_falls_back_to_production() {
        assert_eq!(Environment::from_value(None), Environment::Production);
        assert_eq!(Environment::from_value(Some("staging")), Environment::Production);
        assert_eq!(Environment::from_value(Some("local")), Environment::Local);
    }
}
