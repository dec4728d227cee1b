//! Refresher configuration: token endpoint, secrets-store parameter names, and region.
//!
//! Defaults reproduce the fixed deployment (Login with Amazon token endpoint, the `/my-erp/...`
//! parameters in `us-east-2`). [`RefresherConfig::from_env`] lets a deployment override any of
//! them without recompiling.

/// Builder API for assembling validated configs.
pub mod builder;
/// Environment-variable overrides.
pub mod env;

pub use builder::*;
pub use env::*;

// self
use crate::_prelude::*;

/// Login with Amazon token endpoint.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://api.amazon.com/auth/o2/token";
/// Parameter holding the OAuth client secret.
pub const DEFAULT_CLIENT_SECRET_NAME: &str = "/my-erp/lwa/cliensecret";
/// Parameter holding the OAuth client identifier.
pub const DEFAULT_CLIENT_ID_NAME: &str = "/my-erp/lwa/clientidentifier";
/// Parameter holding the long-lived refresh token.
pub const DEFAULT_REFRESH_TOKEN_NAME: &str = "/my-erp/refreshToken";
/// Region hosting the parameters.
pub const DEFAULT_SECRETS_REGION: &str = "us-east-2";

/// Secrets-store parameter names for each credential role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretNames {
	/// Name of the OAuth client secret parameter.
	pub client_secret: String,
	/// Name of the OAuth client identifier parameter.
	pub client_id: String,
	/// Name of the refresh token parameter.
	pub refresh_token: String,
}
impl SecretNames {
	/// Names in the order they are requested from the store.
	pub fn requested(&self) -> [&str; 3] {
		[self.client_secret.as_str(), self.client_id.as_str(), self.refresh_token.as_str()]
	}
}
impl Default for SecretNames {
	fn default() -> Self {
		Self {
			client_secret: DEFAULT_CLIENT_SECRET_NAME.into(),
			client_id: DEFAULT_CLIENT_ID_NAME.into(),
			refresh_token: DEFAULT_REFRESH_TOKEN_NAME.into(),
		}
	}
}

/// Immutable, validated configuration consumed by the refresher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefresherConfig {
	/// Token endpoint receiving the `grant_type=refresh_token` POST.
	pub token_endpoint: Url,
	/// Parameter names resolved on every invocation.
	pub secret_names: SecretNames,
	/// Region of the secrets store.
	pub secrets_region: String,
}
impl RefresherConfig {
	/// Creates a builder seeded with the defaults.
	pub fn builder() -> RefresherConfigBuilder {
		RefresherConfigBuilder::default()
	}
}
impl Default for RefresherConfig {
	fn default() -> Self {
		Self {
			token_endpoint: default_token_endpoint(),
			secret_names: SecretNames::default(),
			secrets_region: DEFAULT_SECRETS_REGION.into(),
		}
	}
}

pub(crate) fn default_token_endpoint() -> Url {
	Url::parse(DEFAULT_TOKEN_ENDPOINT).expect("Default token endpoint is a valid URL.")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_match_deployed_parameters() {
		let config = RefresherConfig::default();

		assert_eq!(config.token_endpoint.as_str(), "https://api.amazon.com/auth/o2/token");
		assert_eq!(
			config.secret_names.requested(),
			["/my-erp/lwa/cliensecret", "/my-erp/lwa/clientidentifier", "/my-erp/refreshToken"],
		);
		assert_eq!(config.secrets_region, "us-east-2");
	}

	#[test]
	fn default_config_passes_builder_validation() {
		let built = RefresherConfig::builder().build().expect("Defaults should validate.");

		assert_eq!(built, RefresherConfig::default());
	}
}
