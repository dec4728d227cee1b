//! Secrets-store contracts, the redacted [`SecretValue`] wrapper, and built-in store backends.
//!
//! The refresher only ever reads from a store, in a single batched call per invocation. Stores
//! answer with a [`ResolvedSecrets`] mapping keyed by the requested name, so callers look each
//! credential up explicitly instead of trusting the backend to preserve request order.

pub mod memory;
#[cfg(feature = "ssm")] pub mod ssm;

pub use memory::MemorySecretStore;
#[cfg(feature = "ssm")] pub use ssm::SsmSecretStore;

// self
use crate::{_prelude::*, error::BoxError};

/// Boxed future returned by [`SecretStore`] implementations.
pub type SecretFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, SecretStoreError>> + 'a + Send>>;

/// Read-only contract implemented by secrets stores consumed by the refresher.
pub trait SecretStore
where
	Self: Send + Sync,
{
	/// Resolves every name in `names` with a single backend round trip, decrypting encrypted
	/// values.
	///
	/// Implementations must fail with [`SecretStoreError::Missing`] when any requested name cannot
	/// be resolved rather than returning a partial mapping.
	fn get_secrets<'a>(&'a self, names: &'a [&'a str]) -> SecretFuture<'a, ResolvedSecrets>;
}

/// Error type produced by [`SecretStore`] implementations.
#[derive(Debug, ThisError)]
pub enum SecretStoreError {
	/// One or more requested names do not exist (or were not returned) in the store.
	#[error("Secrets store could not resolve: {}.", .names.join(", "))]
	Missing {
		/// Names the store failed to resolve, in request order.
		names: Vec<String>,
	},
	/// Backend-level failure (access denied, throttling, network).
	#[error("Secrets store request failed.")]
	Backend {
		/// Underlying backend failure.
		#[source]
		source: BoxError,
	},
}
impl SecretStoreError {
	/// Wraps a backend-specific failure.
	pub fn backend(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Backend { source: Box::new(src) }
	}
}

/// Redacted secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);
impl SecretValue {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for SecretValue {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SecretValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SecretValue").field(&"<redacted>").finish()
	}
}
impl Display for SecretValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Name-to-value mapping returned by a batched [`SecretStore::get_secrets`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedSecrets(BTreeMap<String, SecretValue>);
impl ResolvedSecrets {
	/// Records a resolved value, replacing any previous value for `name`.
	pub fn insert(&mut self, name: impl Into<String>, value: SecretValue) {
		self.0.insert(name.into(), value);
	}

	/// Returns the value resolved for `name`, if any.
	pub fn get(&self, name: &str) -> Option<&SecretValue> {
		self.0.get(name)
	}

	/// Returns the value resolved for `name` or a [`SecretStoreError::Missing`] naming it.
	pub fn require(&self, name: &str) -> Result<&SecretValue, SecretStoreError> {
		self.get(name).ok_or_else(|| SecretStoreError::Missing { names: vec![name.to_owned()] })
	}

	/// Lists requested names absent from the mapping, preserving request order.
	pub fn missing<'a>(&self, requested: &[&'a str]) -> Vec<&'a str> {
		requested.iter().copied().filter(|name| !self.0.contains_key(*name)).collect()
	}

	/// Number of resolved names.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when nothing was resolved.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl<N, V> FromIterator<(N, V)> for ResolvedSecrets
where
	N: Into<String>,
	V: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (N, V)>,
	{
		Self(iter.into_iter().map(|(name, value)| (name.into(), SecretValue::new(value))).collect())
	}
}
