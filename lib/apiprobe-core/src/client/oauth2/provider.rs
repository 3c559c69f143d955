//! Client-credentials token exchange.

use oauth2::basic::{BasicClient, BasicErrorResponse};
use oauth2::{ClientId, ClientSecret, RequestTokenError, TokenResponse, TokenUrl};

use crate::client::auth::SecureString;

use super::error::AuthError;
use super::options::ClientOptions;
use super::params::OAuth2Params;

type ExchangeError =
    RequestTokenError<oauth2::HttpClientError<oauth2::reqwest::Error>, BasicErrorResponse>;

impl OAuth2Params {
    /// Performs a client-credentials token exchange and stores the returned
    /// access token.
    ///
    /// The call is synchronous and blocking; the calling thread is suspended
    /// for the duration of the round trip to the authorization server. No
    /// retry is attempted. On success the token is stored and the configured
    /// token type is left unchanged; on failure the provider is left exactly
    /// as it was before the call.
    ///
    /// # Errors
    ///
    /// Fails with [`AuthError`] when the authorization server is unreachable,
    /// rejects the request, or returns a response without a usable token.
    pub fn fetch_from(
        &mut self,
        id: impl Into<String>,
        secret: impl Into<SecureString>,
        options: &ClientOptions,
    ) -> Result<(), AuthError> {
        let token_url = TokenUrl::from_url(options.token_url()?);
        let client = BasicClient::new(ClientId::new(id.into()))
            .set_client_secret(ClientSecret::new(secret.into().into_string()))
            .set_token_uri(token_url);

        let http_client = options.http_client()?;

        let response = client
            .exchange_client_credentials()
            .request(&http_client)
            .map_err(map_exchange_error)?;

        let access_token = response.access_token().secret();
        if access_token.is_empty() {
            return Err(AuthError::InvalidTokenResponse {
                reason: "empty access token".to_string(),
            });
        }

        self.token = Some(SecureString::from(access_token.as_str()));
        Ok(())
    }
}

fn map_exchange_error(error: ExchangeError) -> AuthError {
    match error {
        RequestTokenError::ServerResponse(response) => AuthError::ServerRejected {
            reason: response.to_string(),
        },
        RequestTokenError::Request(source) => AuthError::NetworkError {
            reason: source.to_string(),
        },
        RequestTokenError::Parse(source, _body) => AuthError::InvalidTokenResponse {
            reason: source.to_string(),
        },
        RequestTokenError::Other(reason) => AuthError::TokenAcquisitionFailed { reason },
    }
}
