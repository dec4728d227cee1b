// self
use crate::{config::RefresherConfig, error::ConfigError};

/// Overrides the token endpoint.
pub const ENV_TOKEN_ENDPOINT: &str = "LWA_TOKEN_ENDPOINT";
/// Overrides the client secret parameter name.
pub const ENV_CLIENT_SECRET_PARAMETER: &str = "LWA_CLIENT_SECRET_PARAMETER";
/// Overrides the client identifier parameter name.
pub const ENV_CLIENT_ID_PARAMETER: &str = "LWA_CLIENT_ID_PARAMETER";
/// Overrides the refresh token parameter name.
pub const ENV_REFRESH_TOKEN_PARAMETER: &str = "LWA_REFRESH_TOKEN_PARAMETER";
/// Overrides the secrets store region.
pub const ENV_SECRETS_REGION: &str = "LWA_SECRETS_REGION";

impl RefresherConfig {
	/// Builds a config from the process environment, falling back to the defaults for every
	/// variable that is unset.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Builds a config from an arbitrary key lookup; empty values count as unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
		let mut builder = Self::builder();

		if let Some(endpoint) = read(ENV_TOKEN_ENDPOINT) {
			builder = builder.token_endpoint_str(endpoint.trim())?;
		}
		if let Some(name) = read(ENV_CLIENT_SECRET_PARAMETER) {
			builder = builder.client_secret_name(name);
		}
		if let Some(name) = read(ENV_CLIENT_ID_PARAMETER) {
			builder = builder.client_id_name(name);
		}
		if let Some(name) = read(ENV_REFRESH_TOKEN_PARAMETER) {
			builder = builder.refresh_token_name(name);
		}
		if let Some(region) = read(ENV_SECRETS_REGION) {
			builder = builder.secrets_region(region);
		}

		builder.build()
	}
}
