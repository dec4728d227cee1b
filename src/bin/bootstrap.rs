//! AWS Lambda custom-runtime entrypoint.

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
	lwa_token_refresher::lambda::bootstrap().await
}
