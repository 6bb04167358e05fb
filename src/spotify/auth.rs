use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use crate::{
    errors::{Error, Result},
    types::{Credentials, Token},
};

/// Performs the OAuth 2.0 client-credentials grant.
///
/// Posts `grant_type=client_credentials` to `token_url`, authenticating with
/// the client id and secret as HTTP basic credentials. The returned token is
/// stamped with the current time so expiry can be checked later.
///
/// # Errors
///
/// - [`Error::Api`] when the token endpoint answers with a non-success status,
///   using its `error_description` as message
/// - [`Error::Http`] on network or decoding failures
pub async fn request_token(
    client: &Client,
    token_url: &str,
    credentials: &Credentials,
) -> Result<Token> {
    let res = client
        .post(token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let json: Value = res.json().await.unwrap_or(Value::Null);
        let message = json["error_description"]
            .as_str()
            .or_else(|| json["error"].as_str())
            .unwrap_or("token request rejected")
            .to_string();
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    let mut token: Token = res.json().await?;
    token.obtained_at = Utc::now().timestamp() as u64;
    log::debug!("obtained {} token valid for {}s", token.token_type, token.expires_in);

    Ok(token)
}
