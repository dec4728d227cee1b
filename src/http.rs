//! Transport primitives for the refresh-token exchange.
//!
//! [`TokenTransport`] is the refresher's only dependency on an HTTP stack. It posts an already
//! form-encoded body and hands back the status plus the unparsed body text; it never turns
//! a status code into an error, so callers see upstream rejections verbatim.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{CONTENT_TYPE, HeaderValue};
// self
use crate::{_prelude::*, error::TransportError};

/// Media type used for token endpoint request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Boxed future returned by [`TokenTransport::post_form`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TokenResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to POST a form to the token endpoint.
///
/// Implementations must be `Send + Sync + 'static` so a single instance can be shared by
/// concurrent invocations behind an `Arc`.
pub trait TokenTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `body` to `endpoint` as `application/x-www-form-urlencoded` and returns the response.
	fn post_form<'a>(&'a self, endpoint: &'a Url, body: String) -> TransportFuture<'a>;
}

/// Raw token endpoint response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenResponse {
	/// HTTP status code returned by the token endpoint.
	pub status: u16,
	/// Response body text, unparsed.
	pub body: String,
}
impl TokenResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Consumes the response and returns its body.
	pub fn into_body(self) -> String {
		self.body
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenTransport for ReqwestHttpClient {
	fn post_form<'a>(&'a self, endpoint: &'a Url, body: String) -> TransportFuture<'a> {
		Box::pin(async move {
			let response = self
				.0
				.post(endpoint.clone())
				.header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
				.body(body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.text().await?;

			Ok(TokenResponse { status, body })
		})
	}
}
