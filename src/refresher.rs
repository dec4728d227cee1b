//! Refresh-token exchange against the token endpoint.
//!
//! [`TokenRefresher::refresh`] reads the three configured credentials from the secrets store in
//! one batched call, posts `grant_type=refresh_token` to the token endpoint, reports the response
//! through the [`DiagnosticSink`], and returns the body exactly as received. Upstream rejections
//! (4xx/5xx) are not errors: their bodies are returned like any other. Every other failure aborts
//! the invocation without retrying.

pub mod form;

pub use form::*;

// self
use crate::{
	_prelude::*,
	config::RefresherConfig,
	http::TokenTransport,
	obs::{self, DiagnosticSink, RefreshOutcome, RefreshSpan, TracingDiagnostics},
	secret::SecretStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Refresher specialized for the crate's default reqwest transport.
pub type ReqwestTokenRefresher = TokenRefresher<ReqwestHttpClient>;

/// Host-provided metadata for one invocation. Only used to tag logs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvocationContext {
	/// Host request identifier.
	pub request_id: Option<String>,
	/// ARN (or other identifier) of the invoked function.
	pub function_arn: Option<String>,
}
impl InvocationContext {
	/// Creates a context carrying the host request identifier.
	pub fn new(request_id: impl Into<String>) -> Self {
		Self { request_id: Some(request_id.into()), function_arn: None }
	}

	/// Attaches the invoked function identifier.
	pub fn with_function_arn(mut self, arn: impl Into<String>) -> Self {
		self.function_arn = Some(arn.into());

		self
	}
}

/// Exchanges the stored refresh token for a fresh access-token response.
///
/// The refresher owns explicitly constructed collaborators: the secrets store, the HTTP
/// transport, and the diagnostic sink. It holds no mutable state, so one instance can serve
/// concurrent invocations.
#[derive(Clone)]
pub struct TokenRefresher<C>
where
	C: ?Sized + TokenTransport,
{
	/// HTTP transport used for the token endpoint call.
	pub http_client: Arc<C>,
	/// Secrets store holding the client credentials and refresh token.
	pub secrets: Arc<dyn SecretStore>,
	/// Endpoint and parameter names.
	pub config: RefresherConfig,
	/// Receives the diagnostic line emitted before returning.
	pub diagnostics: Arc<dyn DiagnosticSink>,
}
impl<C> TokenRefresher<C>
where
	C: ?Sized + TokenTransport,
{
	/// Creates a refresher that reuses the caller-provided transport.
	pub fn with_http_client(
		secrets: Arc<dyn SecretStore>,
		config: RefresherConfig,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			secrets,
			config,
			diagnostics: Arc::new(TracingDiagnostics),
		}
	}

	/// Replaces the diagnostic sink.
	pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
		self.diagnostics = diagnostics;

		self
	}

	/// Invocation entrypoint: accepts the host event and context, neither of which affects the
	/// exchange, and returns the token endpoint response body.
	pub async fn handle(
		&self,
		event: serde_json::Value,
		context: InvocationContext,
	) -> Result<String> {
		let _ = event;
		let span = RefreshSpan::new("handle", context.request_id.as_deref());

		span.instrument(self.refresh()).await
	}

	/// Performs one refresh-token exchange and returns the raw response body.
	pub async fn refresh(&self) -> Result<String> {
		let span = RefreshSpan::new("refresh", None);

		obs::record_refresh_outcome(RefreshOutcome::Attempt);

		let result = span.instrument(self.exchange()).await;

		match &result {
			Ok(_) => obs::record_refresh_outcome(RefreshOutcome::Success),
			Err(_e) => {
				#[cfg(feature = "tracing")]
				tracing::error!(error = %_e, "Token refresh failed.");

				obs::record_refresh_outcome(RefreshOutcome::Failure);
			},
		}

		result
	}

	async fn exchange(&self) -> Result<String> {
		let names = &self.config.secret_names;
		let requested = names.requested();
		let secrets = self.secrets.get_secrets(&requested).await?;
		let form = TokenRequestForm::from_secrets(names, &secrets)?;

		#[cfg(feature = "tracing")]
		tracing::debug!(endpoint = %self.config.token_endpoint, "Posting refresh token grant.");

		let response =
			self.http_client.post_form(&self.config.token_endpoint, form.encode()).await?;

		obs::record_token_status(response.status);

		if !response.is_success() {
			#[cfg(feature = "tracing")]
			tracing::warn!(
				status = response.status,
				"Token endpoint returned a non-success status; passing the body through."
			);
		}

		let body = response.into_body();

		self.diagnostics.emit(&format!("lwa value =  {body}"));

		Ok(body)
	}
}
#[cfg(feature = "reqwest")]
impl TokenRefresher<ReqwestHttpClient> {
	/// Creates a refresher with its own reqwest-backed transport.
	pub fn new(secrets: Arc<dyn SecretStore>, config: RefresherConfig) -> Self {
		Self::with_http_client(secrets, config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for TokenRefresher<C>
where
	C: ?Sized + TokenTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRefresher").field("config", &self.config).finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use httpmock::prelude::*;
	// self
	use super::*;
	use crate::{
		_preludet::*,
		error::{Error, TransportError},
		secret::{MemorySecretStore, SecretStoreError},
	};

	const TOKEN_PATH: &str = "/auth/o2/token";
	const TOKEN_BODY: &str =
		"{\"access_token\":\"Atza|IwEB\",\"token_type\":\"bearer\",\"expires_in\":3600}";

	fn seeded_store() -> Arc<MemorySecretStore> {
		Arc::new(
			MemorySecretStore::default()
				.with_secret("/my-erp/lwa/cliensecret", "sek_abc")
				.with_secret("/my-erp/lwa/clientidentifier", "amzn1.app.123")
				.with_secret("/my-erp/refreshToken", "Atzr|token_xyz"),
		)
	}

	#[tokio::test]
	async fn refresh_posts_form_and_returns_body_verbatim() {
		let server = MockServer::start_async().await;
		let store = seeded_store();
		let (refresher, diagnostics) =
			build_reqwest_test_refresher(&server.url(TOKEN_PATH), store.clone());
		let mock = server
			.mock_async(|when, then| {
				when.method(POST)
					.path(TOKEN_PATH)
					.header("content-type", "application/x-www-form-urlencoded")
					.body(
						"grant_type=refresh_token&client_secret=sek_abc&client_id=amzn1.app.123&refresh_token=Atzr%7Ctoken_xyz",
					);
				then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
			})
			.await;
		let body = refresher.refresh().await.expect("Refresh should succeed.");

		mock.assert_async().await;

		assert_eq!(body, TOKEN_BODY);
		assert_eq!(store.lookups(), vec![vec![
			"/my-erp/lwa/cliensecret".to_owned(),
			"/my-erp/lwa/clientidentifier".to_owned(),
			"/my-erp/refreshToken".to_owned(),
		]]);
		assert_eq!(diagnostics.messages(), vec![format!("lwa value =  {TOKEN_BODY}")]);
	}

	#[tokio::test]
	async fn non_success_status_still_returns_body() {
		let server = MockServer::start_async().await;
		let (refresher, diagnostics) =
			build_reqwest_test_refresher(&server.url(TOKEN_PATH), seeded_store());
		let rejection = "{\"error_description\":\"The request has an invalid grant parameter : refresh_token\",\"error\":\"invalid_grant\"}";
		let mock = server
			.mock_async(|when, then| {
				when.method(POST).path(TOKEN_PATH);
				then.status(400).header("content-type", "application/json").body(rejection);
			})
			.await;
		let body = refresher.refresh().await.expect("A 400 response is not an error.");

		mock.assert_async().await;

		assert_eq!(body, rejection);
		assert_eq!(diagnostics.messages().len(), 1);
	}

	#[tokio::test]
	async fn server_error_body_is_passed_through() {
		let server = MockServer::start_async().await;
		let (refresher, _) = build_reqwest_test_refresher(&server.url(TOKEN_PATH), seeded_store());
		let mock = server
			.mock_async(|when, then| {
				when.method(POST).path(TOKEN_PATH);
				then.status(503).body("Service Unavailable");
			})
			.await;
		let body = refresher.refresh().await.expect("A 503 response is not an error.");

		mock.assert_async().await;

		assert_eq!(body, "Service Unavailable");
	}

	#[tokio::test]
	async fn missing_secret_fails_before_any_http_call() {
		let server = MockServer::start_async().await;
		let store = Arc::new(
			MemorySecretStore::default()
				.with_secret("/my-erp/lwa/cliensecret", "sek_abc")
				.with_secret("/my-erp/refreshToken", "Atzr|token_xyz"),
		);
		let (refresher, diagnostics) =
			build_reqwest_test_refresher(&server.url(TOKEN_PATH), store.clone());
		let mock = server
			.mock_async(|when, then| {
				when.method(POST).path(TOKEN_PATH);
				then.status(200).body(TOKEN_BODY);
			})
			.await;
		let err = refresher.refresh().await.expect_err("Missing secret should fail the refresh.");

		assert!(matches!(
			err,
			Error::SecretStore(SecretStoreError::Missing { ref names })
				if names == &["/my-erp/lwa/clientidentifier"]
		));
		assert_eq!(store.lookups().len(), 1);
		assert!(diagnostics.messages().is_empty());

		mock.assert_calls_async(0).await;
	}

	#[tokio::test]
	async fn denied_store_fails_before_any_http_call() {
		let server = MockServer::start_async().await;
		let store = seeded_store();

		store.deny_access();

		let (refresher, _) = build_reqwest_test_refresher(&server.url(TOKEN_PATH), store);
		let mock = server
			.mock_async(|when, then| {
				when.method(POST).path(TOKEN_PATH);
				then.status(200).body(TOKEN_BODY);
			})
			.await;
		let err = refresher.refresh().await.expect_err("Denied store should fail the refresh.");

		assert!(matches!(err, Error::SecretStore(SecretStoreError::Backend { .. })));

		mock.assert_calls_async(0).await;
	}

	#[tokio::test]
	async fn unreachable_endpoint_surfaces_transport_error() {
		let (refresher, diagnostics) =
			build_reqwest_test_refresher("http://127.0.0.1:9/auth/o2/token", seeded_store());
		let err = refresher.refresh().await.expect_err("Connection refused should fail.");

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
		assert!(diagnostics.messages().is_empty());
	}

	#[tokio::test]
	async fn handle_ignores_event_and_context() {
		let server = MockServer::start_async().await;
		let (refresher, _) = build_reqwest_test_refresher(&server.url(TOKEN_PATH), seeded_store());
		let mock = server
			.mock_async(|when, then| {
				when.method(POST).path(TOKEN_PATH);
				then.status(200).body(TOKEN_BODY);
			})
			.await;
		let event = serde_json::json!({ "source": "aws.events", "detail": { "anything": [1, 2] } });
		let context = InvocationContext::new("8f5a1c2e")
			.with_function_arn("arn:aws:lambda:us-east-2:123456789012:function:lwa");
		let first = refresher.handle(event, context).await.expect("Handle should succeed.");
		let second = refresher
			.handle(serde_json::Value::Null, InvocationContext::default())
			.await
			.expect("Handle should succeed with an empty event.");

		assert_eq!(first, TOKEN_BODY);
		assert_eq!(second, TOKEN_BODY);

		mock.assert_calls_async(2).await;
	}
}
