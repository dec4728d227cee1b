//! Form payload posted to the token endpoint.

// crates.io
use url::form_urlencoded::Serializer;
// self
use crate::{
	config::SecretNames,
	secret::{ResolvedSecrets, SecretStoreError, SecretValue},
};

/// `grant_type` value for refresh-token exchanges.
pub const REFRESH_TOKEN_GRANT: &str = "refresh_token";

/// `grant_type=refresh_token` request built fresh for every invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRequestForm {
	/// OAuth client secret.
	pub client_secret: SecretValue,
	/// OAuth client identifier.
	pub client_id: SecretValue,
	/// Long-lived refresh token.
	pub refresh_token: SecretValue,
}
impl TokenRequestForm {
	/// Picks each credential out of `secrets` by its configured parameter name.
	pub fn from_secrets(
		names: &SecretNames,
		secrets: &ResolvedSecrets,
	) -> Result<Self, SecretStoreError> {
		Ok(Self {
			client_secret: secrets.require(&names.client_secret)?.clone(),
			client_id: secrets.require(&names.client_id)?.clone(),
			refresh_token: secrets.require(&names.refresh_token)?.clone(),
		})
	}

	/// Key/value pairs in wire order.
	pub fn pairs(&self) -> [(&'static str, &str); 4] {
		[
			("grant_type", REFRESH_TOKEN_GRANT),
			("client_secret", self.client_secret.expose()),
			("client_id", self.client_id.expose()),
			("refresh_token", self.refresh_token.expose()),
		]
	}

	/// Encodes the payload as `application/x-www-form-urlencoded`.
	pub fn encode(&self) -> String {
		Serializer::new(String::new()).extend_pairs(self.pairs()).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn form(secret: &str, id: &str, token: &str) -> TokenRequestForm {
		TokenRequestForm {
			client_secret: SecretValue::new(secret),
			client_id: SecretValue::new(id),
			refresh_token: SecretValue::new(token),
		}
	}

	#[test]
	fn encodes_fields_in_wire_order() {
		assert_eq!(
			form("S", "C", "R").encode(),
			"grant_type=refresh_token&client_secret=S&client_id=C&refresh_token=R",
		);
	}

	#[test]
	fn escapes_reserved_characters() {
		let encoded = form("sek_abc", "amzn1.app.123", "Atzr|token_xyz").encode();

		assert_eq!(
			encoded,
			"grant_type=refresh_token&client_secret=sek_abc&client_id=amzn1.app.123&refresh_token=Atzr%7Ctoken_xyz",
		);

		let decoded: Vec<(String, String)> = url::form_urlencoded::parse(encoded.as_bytes())
			.map(|(k, v)| (k.into_owned(), v.into_owned()))
			.collect();

		assert_eq!(decoded[3], ("refresh_token".to_owned(), "Atzr|token_xyz".to_owned()));
	}

	#[test]
	fn picks_credentials_by_name() {
		let names = SecretNames::default();
		let secrets: ResolvedSecrets = [
			("/my-erp/refreshToken", "R"),
			("/my-erp/lwa/clientidentifier", "C"),
			("/my-erp/lwa/cliensecret", "S"),
		]
		.into_iter()
		.collect();
		let built = TokenRequestForm::from_secrets(&names, &secrets)
			.expect("All configured names are present.");

		assert_eq!(built, form("S", "C", "R"));
	}

	#[test]
	fn missing_credential_is_reported_by_name() {
		let names = SecretNames::default();
		let secrets: ResolvedSecrets =
			[("/my-erp/lwa/cliensecret", "S"), ("/my-erp/refreshToken", "R")].into_iter().collect();
		let err = TokenRequestForm::from_secrets(&names, &secrets)
			.expect_err("Client identifier is absent.");

		assert!(matches!(
			err,
			SecretStoreError::Missing { ref names } if names == &["/my-erp/lwa/clientidentifier"]
		));
	}

	#[test]
	fn debug_output_redacts_credentials() {
		let rendered = format!("{:?}", form("sek_abc", "amzn1.app.123", "Atzr|token_xyz"));

		assert!(!rendered.contains("sek_abc"));
		assert!(!rendered.contains("Atzr|token_xyz"));
	}
}
