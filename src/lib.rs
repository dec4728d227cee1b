//! Serverless Login with Amazon token refresher: resolve client credentials from a secrets store,
//! exchange the refresh token at the token endpoint, and hand the raw response back to the caller.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod http;
#[cfg(feature = "lambda")] pub mod lambda;
pub mod obs;
pub mod refresher;
pub mod secret;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::RefresherConfig,
		http::ReqwestHttpClient,
		obs::{DiagnosticSink, MemoryDiagnostics},
		refresher::TokenRefresher,
		secret::{MemorySecretStore, SecretStore},
	};

	/// Refresher type alias used by reqwest-backed integration tests.
	pub type ReqwestTestRefresher = TokenRefresher<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a config whose token endpoint points at `token_endpoint` and keeps the default
	/// parameter names.
	pub fn test_config(token_endpoint: &str) -> RefresherConfig {
		RefresherConfig::builder()
			.token_endpoint(Url::parse(token_endpoint).expect("Mock token endpoint should parse."))
			.build()
			.expect("Test refresher config should validate.")
	}

	/// Constructs a [`TokenRefresher`] backed by the provided in-memory store, the reqwest
	/// transport used across integration tests, and a capturing diagnostic sink.
	pub fn build_reqwest_test_refresher(
		token_endpoint: &str,
		store: Arc<MemorySecretStore>,
	) -> (ReqwestTestRefresher, MemoryDiagnostics) {
		let secrets: Arc<dyn SecretStore> = store;
		let diagnostics = MemoryDiagnostics::default();
		let sink: Arc<dyn DiagnosticSink> = Arc::new(diagnostics.clone());
		let refresher = ReqwestTestRefresher::with_http_client(
			secrets,
			test_config(token_endpoint),
			test_reqwest_http_client(),
		)
		.with_diagnostics(sink);

		(refresher, diagnostics)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::Result;
}

#[cfg(feature = "ssm")] pub use aws_sdk_ssm;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
#[cfg(feature = "lambda")] use tokio as _;
