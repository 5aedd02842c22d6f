use crate::error::ConfigError;

/// Environment variable naming the SageMaker endpoint to invoke
pub const ENDPOINT_NAME_VAR: &str = "SAGEMAKER_ENDPOINT_NAME";

/// Environment variable naming the SSM parameter with knowledge base entries
pub const KB_PARAMETER_VAR: &str = "KB_IDS_PARAMETER_NAME";

/// Parameter name used when `KB_IDS_PARAMETER_NAME` is unset
pub const DEFAULT_KB_PARAMETER: &str = "/bedrock/kb/autosync/ids";

/// Settings for the inference proxy Lambda
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub endpoint_name: String,
}

impl ProxyConfig {
    /// Reads the proxy settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the proxy settings through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint_name = lookup(ENDPOINT_NAME_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(ENDPOINT_NAME_VAR))?;

        Ok(Self { endpoint_name })
    }
}

/// Settings for the knowledge base sync Lambda
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub parameter_name: String,
}

impl SyncConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parameter_name = lookup(KB_PARAMETER_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_KB_PARAMETER.to_string());

        Self { parameter_name }
    }
}
