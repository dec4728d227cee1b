//! Runs one refresh against a local mock token endpoint, with the credentials held in the
//! in-memory secrets store instead of SSM.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use lwa_token_refresher::{
	config::RefresherConfig,
	refresher::{InvocationContext, ReqwestTokenRefresher},
	secret::{MemorySecretStore, SecretStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/o2/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"Atza|demo\",\"refresh_token\":\"Atzr|demo\",\"token_type\":\"bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let secrets: Arc<dyn SecretStore> = Arc::new(
		MemorySecretStore::default()
			.with_secret("/my-erp/lwa/cliensecret", "demo-secret")
			.with_secret("/my-erp/lwa/clientidentifier", "amzn1.application-oa2-client.demo")
			.with_secret("/my-erp/refreshToken", "Atzr|demo"),
	);
	let config = RefresherConfig::builder()
		.token_endpoint_str(&server.url("/auth/o2/token"))?
		.build()?;
	let refresher = ReqwestTokenRefresher::new(secrets, config);
	let body = refresher
		.handle(serde_json::json!({ "source": "demo" }), InvocationContext::new("demo-invocation"))
		.await?;

	println!("Token endpoint answered: {body}");

	token_mock.assert_async().await;

	Ok(())
}
