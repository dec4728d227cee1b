// std
use std::net::IpAddr;
// self
use crate::{
	_prelude::*,
	config::{DEFAULT_SECRETS_REGION, RefresherConfig, SecretNames, default_token_endpoint},
	error::ConfigError,
};

/// Builder for [`RefresherConfig`] values.
#[derive(Debug)]
pub struct RefresherConfigBuilder {
	/// Token endpoint receiving refresh requests.
	pub token_endpoint: Url,
	/// Parameter names for each credential role.
	pub secret_names: SecretNames,
	/// Region of the secrets store.
	pub secrets_region: String,
}
impl RefresherConfigBuilder {
	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = url;

		self
	}

	/// Parses and sets the token endpoint.
	pub fn token_endpoint_str(self, value: &str) -> Result<Self, ConfigError> {
		let url = Url::parse(value)
			.map_err(|source| ConfigError::InvalidEndpoint { value: value.into(), source })?;

		Ok(self.token_endpoint(url))
	}

	/// Sets the client secret parameter name.
	pub fn client_secret_name(mut self, name: impl Into<String>) -> Self {
		self.secret_names.client_secret = name.into();

		self
	}

	/// Sets the client identifier parameter name.
	pub fn client_id_name(mut self, name: impl Into<String>) -> Self {
		self.secret_names.client_id = name.into();

		self
	}

	/// Sets the refresh token parameter name.
	pub fn refresh_token_name(mut self, name: impl Into<String>) -> Self {
		self.secret_names.refresh_token = name.into();

		self
	}

	/// Sets the secrets store region.
	pub fn secrets_region(mut self, region: impl Into<String>) -> Self {
		self.secrets_region = region.into();

		self
	}

	/// Consumes the builder and validates the resulting config.
	pub fn build(self) -> Result<RefresherConfig, ConfigError> {
		let config = RefresherConfig {
			token_endpoint: self.token_endpoint,
			secret_names: self.secret_names,
			secrets_region: self.secrets_region,
		};

		config.validate()?;

		Ok(config)
	}
}
impl Default for RefresherConfigBuilder {
	fn default() -> Self {
		Self {
			token_endpoint: default_token_endpoint(),
			secret_names: SecretNames::default(),
			secrets_region: DEFAULT_SECRETS_REGION.into(),
		}
	}
}

impl RefresherConfig {
	fn validate(&self) -> Result<(), ConfigError> {
		validate_endpoint(&self.token_endpoint)?;
		validate_secret_names(&self.secret_names)?;

		if self.secrets_region.trim().is_empty() {
			return Err(ConfigError::EmptyRegion);
		}

		Ok(())
	}
}

fn validate_endpoint(url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ConfigError::InsecureEndpoint { url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host_str() {
		Some("localhost") => true,
		Some(host) => host
			.trim_start_matches('[')
			.trim_end_matches(']')
			.parse::<IpAddr>()
			.is_ok_and(|ip| ip.is_loopback()),
		None => false,
	}
}

fn validate_secret_names(names: &SecretNames) -> Result<(), ConfigError> {
	let roles = [
		("client secret", names.client_secret.as_str()),
		("client identifier", names.client_id.as_str()),
		("refresh token", names.refresh_token.as_str()),
	];

	for (role, name) in roles {
		if name.trim().is_empty() {
			return Err(ConfigError::EmptySecretName { role });
		}
	}
	for (idx, (_, name)) in roles.iter().enumerate() {
		if roles[idx + 1..].iter().any(|(_, other)| other == name) {
			return Err(ConfigError::DuplicateSecretName { name: (*name).to_owned() });
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rejects_insecure_remote_endpoints() {
		let err = RefresherConfig::builder()
			.token_endpoint_str("http://api.amazon.com/auth/o2/token")
			.expect("Endpoint should parse.")
			.build()
			.expect_err("Plain HTTP to a remote host should be rejected.");

		assert!(matches!(err, ConfigError::InsecureEndpoint { .. }));
	}

	#[test]
	fn accepts_plain_http_on_loopback() {
		for endpoint in
			["http://127.0.0.1:8080/token", "http://localhost/token", "http://[::1]:9000/token"]
		{
			RefresherConfig::builder()
				.token_endpoint_str(endpoint)
				.expect("Endpoint should parse.")
				.build()
				.unwrap_or_else(|err| panic!("Loopback endpoint {endpoint} should validate: {err}"));
		}
	}

	#[test]
	fn rejects_unparsable_endpoints() {
		let err = RefresherConfig::builder()
			.token_endpoint_str("not a url")
			.expect_err("Garbage should not parse as an endpoint.");

		assert!(matches!(err, ConfigError::InvalidEndpoint { ref value, .. } if value == "not a url"));
	}

	#[test]
	fn rejects_empty_and_duplicate_names() {
		let err = RefresherConfig::builder()
			.client_id_name("  ")
			.build()
			.expect_err("Blank names should be rejected.");

		assert!(matches!(err, ConfigError::EmptySecretName { role: "client identifier" }));

		let err = RefresherConfig::builder()
			.refresh_token_name("/my-erp/lwa/cliensecret")
			.build()
			.expect_err("Shared names should be rejected.");

		assert!(matches!(
			err,
			ConfigError::DuplicateSecretName { ref name } if name == "/my-erp/lwa/cliensecret"
		));
	}

	#[test]
	fn rejects_empty_region() {
		let err = RefresherConfig::builder()
			.secrets_region("")
			.build()
			.expect_err("Empty region should be rejected.");

		assert!(matches!(err, ConfigError::EmptyRegion));
	}
}
