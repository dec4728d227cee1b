//! AWS Lambda adapter: wires [`TokenRefresher::handle`] to `lambda_runtime`.

// crates.io
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use tracing_subscriber::EnvFilter;
// self
use crate::{
	_prelude::*,
	config::RefresherConfig,
	http::TokenTransport,
	refresher::{InvocationContext, ReqwestTokenRefresher, TokenRefresher},
	secret::{SecretStore, SsmSecretStore},
};

/// Serves invocations until the runtime shuts down.
///
/// Each event is handed to [`TokenRefresher::handle`]; the returned body becomes the function's
/// JSON string result and any error fails the invocation.
pub async fn run<C>(refresher: TokenRefresher<C>) -> Result<(), LambdaError>
where
	C: TokenTransport,
{
	let refresher = Arc::new(refresher);

	lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
		let refresher = refresher.clone();

		async move {
			let (payload, context) = event.into_parts();
			let context = InvocationContext::new(context.request_id)
				.with_function_arn(context.invoked_function_arn);

			refresher.handle(payload, context).await.map_err(LambdaError::from)
		}
	}))
	.await
}

/// Installs a `RUST_LOG`-driven fmt subscriber without timestamps (CloudWatch adds its own).
pub fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.with_target(false)
		.without_time()
		.init();
}

/// Process entrypoint: logging, environment config, SSM client, then [`run`].
pub async fn bootstrap() -> Result<(), LambdaError> {
	init_tracing();

	let config = RefresherConfig::from_env()?;

	tracing::info!(
		endpoint = %config.token_endpoint,
		region = %config.secrets_region,
		"Starting LWA token refresher."
	);

	let secrets: Arc<dyn SecretStore> =
		Arc::new(SsmSecretStore::from_region(config.secrets_region.clone()).await);

	run(ReqwestTokenRefresher::new(secrets, config)).await
}
