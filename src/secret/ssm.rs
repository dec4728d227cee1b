//! AWS Systems Manager Parameter Store backend.
//!
//! Parameters are fetched with `GetParameters` and `WithDecryption = true`, so `SecureString`
//! values come back in plaintext. The response is keyed by parameter name; AWS does not promise
//! that `Parameters` follows the order of `Names`. Requested names may carry a `:version` or
//! `:label` selector, which SSM echoes back in `Selector` next to the bare `Name`.

// crates.io
use aws_config::BehaviorVersion;
use aws_sdk_ssm::{Client as SsmClient, config::Region, types::Parameter};
// self
use crate::{
	_prelude::*,
	secret::{ResolvedSecrets, SecretFuture, SecretStore, SecretStoreError, SecretValue},
};

/// [`SecretStore`] backed by an explicitly constructed SSM client.
#[derive(Clone, Debug)]
pub struct SsmSecretStore {
	client: SsmClient,
}
impl SsmSecretStore {
	/// Wraps an existing SSM client.
	pub fn new(client: SsmClient) -> Self {
		Self { client }
	}

	/// Loads the default AWS credential chain for `region` and builds a client from it.
	pub async fn from_region(region: impl Into<String>) -> Self {
		let sdk_config = aws_config::defaults(BehaviorVersion::latest())
			.region(Region::new(region.into()))
			.load()
			.await;

		Self::new(SsmClient::new(&sdk_config))
	}
}
impl SecretStore for SsmSecretStore {
	fn get_secrets<'a>(&'a self, names: &'a [&'a str]) -> SecretFuture<'a, ResolvedSecrets> {
		Box::pin(async move {
			let output = self
				.client
				.get_parameters()
				.set_names(Some(names.iter().map(|name| (*name).to_owned()).collect()))
				.with_decryption(true)
				.send()
				.await
				.map_err(SecretStoreError::backend)?;

			resolve_parameters(names, output.parameters(), output.invalid_parameters())
		})
	}
}

/// Maps a `GetParameters` response onto the requested names.
///
/// A parameter answers the requested name `Name` + `Selector` (e.g. `/my-erp/refreshToken:3`),
/// or the bare `Name` when no selector was requested. Names listed in `invalid` or absent from
/// `parameters` are reported together as [`SecretStoreError::Missing`]. Parameters the caller did
/// not ask for are ignored.
pub(crate) fn resolve_parameters(
	requested: &[&str],
	parameters: &[Parameter],
	invalid: &[String],
) -> Result<ResolvedSecrets, SecretStoreError> {
	let mut resolved = ResolvedSecrets::default();

	for parameter in parameters {
		let (Some(name), Some(value)) = (parameter.name(), parameter.value()) else {
			continue;
		};

		let selected = parameter.selector().map(|selector| format!("{name}{selector}"));
		let Some(key) = selected
			.as_deref()
			.into_iter()
			.chain([name])
			.find(|key| requested.contains(key))
		else {
			continue;
		};

		if !invalid.iter().any(|bad| bad == key) {
			resolved.insert(key, SecretValue::new(value));
		}
	}

	let missing = resolved.missing(requested);

	if missing.is_empty() {
		Ok(resolved)
	} else {
		#[cfg(feature = "tracing")]
		tracing::warn!(missing = ?missing, "SSM did not resolve every requested parameter.");

		Err(SecretStoreError::Missing { names: missing.into_iter().map(str::to_owned).collect() })
	}
}
