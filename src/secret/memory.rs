//! Thread-safe in-memory [`SecretStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	secret::{ResolvedSecrets, SecretFuture, SecretStore, SecretStoreError, SecretValue},
};

type SecretMap = Arc<RwLock<HashMap<String, SecretValue>>>;

/// Simulated backend failure raised once [`MemorySecretStore::deny_access`] is called.
#[derive(Debug, ThisError)]
#[error("Access denied to the in-memory secrets store.")]
pub struct AccessDenied;

/// Storage backend that keeps secrets in-process and records every batched lookup.
#[derive(Clone, Debug, Default)]
pub struct MemorySecretStore {
	secrets: SecretMap,
	lookups: Arc<Mutex<Vec<Vec<String>>>>,
	denied: Arc<RwLock<bool>>,
}
impl MemorySecretStore {
	/// Seeds a secret and returns the store for chaining.
	pub fn with_secret(self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(name, value);

		self
	}

	/// Inserts or replaces a secret.
	pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
		self.secrets.write().insert(name.into(), SecretValue::new(value));
	}

	/// Makes every subsequent lookup fail with [`SecretStoreError::Backend`].
	pub fn deny_access(&self) {
		*self.denied.write() = true;
	}

	/// Returns the name batches requested so far, one entry per [`SecretStore::get_secrets`] call.
	pub fn lookups(&self) -> Vec<Vec<String>> {
		self.lookups.lock().clone()
	}

	fn resolve_now(&self, names: &[&str]) -> Result<ResolvedSecrets, SecretStoreError> {
		self.lookups.lock().push(names.iter().map(|name| (*name).to_owned()).collect());

		if *self.denied.read() {
			return Err(SecretStoreError::backend(AccessDenied));
		}

		let guard = self.secrets.read();
		let mut resolved = ResolvedSecrets::default();

		for name in names {
			if let Some(value) = guard.get(*name) {
				resolved.insert(*name, value.clone());
			}
		}

		let missing = resolved.missing(names);

		if missing.is_empty() {
			Ok(resolved)
		} else {
			Err(SecretStoreError::Missing {
				names: missing.into_iter().map(str::to_owned).collect(),
			})
		}
	}
}
impl SecretStore for MemorySecretStore {
	fn get_secrets<'a>(&'a self, names: &'a [&'a str]) -> SecretFuture<'a, ResolvedSecrets> {
		Box::pin(async move { self.resolve_now(names) })
	}
}
