// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::Result;
use crate::errors::Error;
use crate::token::{AccessToken, RefreshToken, expires_on};
use crate::transport::{SharedTransport, Transport, default_transport};
use std::sync::Arc;
use std::time::Duration;

const EXCHANGE_PATH: &str = "/oauth2/exchange";
const TOKEN_PATH: &str = "/oauth2/token";

/// The grant types accepted by the registry token endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum GrantType {
    /// Exchange an identity-provider access token for a refresh token.
    #[serde(rename = "access_token")]
    AccessToken,
    /// Exchange a refresh token for an access token.
    #[serde(rename = "refresh_token")]
    RefreshToken,
    /// Request an anonymous access token. The refresh token is empty.
    #[serde(rename = "password")]
    Password,
}

/// A client for the registry token exchange endpoints.
///
/// Registries expose two endpoints under the `/oauth2` path:
/// - `/oauth2/exchange` trades an identity-provider access token for a
///   registry refresh token.
/// - `/oauth2/token` trades a refresh token for an access token limited to a
///   scope.
///
/// Most applications use these endpoints through the
/// [AuthenticationPolicy][crate::policy::AuthenticationPolicy]. The client is
/// public for applications that need registry tokens for other tools.
///
/// The client does not retry. Any error from the transport or the endpoints
/// is returned to the caller.
#[derive(Clone, Debug)]
pub struct AuthenticationClient {
    // Only used to build requests, the transport sends them.
    builder: reqwest::Client,
    transport: SharedTransport,
    endpoint: String,
}

impl AuthenticationClient {
    /// Creates a client for the registry at `endpoint`, for example
    /// `https://myregistry.azurecr.io`.
    pub fn new<T: Into<String>>(endpoint: T) -> Self {
        Self::with_shared_transport(endpoint, default_transport())
    }

    /// Creates a client that sends its requests using `transport`.
    pub fn with_transport<E, T>(endpoint: E, transport: T) -> Self
    where
        E: Into<String>,
        T: Transport + 'static,
    {
        Self::with_shared_transport(endpoint, Arc::new(transport))
    }

    pub(crate) fn with_shared_transport<T: Into<String>>(
        endpoint: T,
        transport: SharedTransport,
    ) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            builder: reqwest::Client::new(),
            transport,
            endpoint,
        }
    }

    /// The registry endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Exchanges an identity-provider access token for a registry refresh
    /// token.
    ///
    /// # Arguments
    /// * `service` - the registry service name, as returned in the challenge.
    /// * `scope` - an optional scope to include in the request.
    /// * `aad_token` - the identity-provider access token.
    /// * `timeout` - the timeout for the request, if any.
    pub async fn exchange_aad_access_token_for_refresh_token(
        &self,
        service: &str,
        scope: Option<&str>,
        aad_token: &str,
        timeout: Option<Duration>,
    ) -> Result<RefreshToken> {
        let form = RefreshTokenRequest {
            grant_type: GrantType::AccessToken,
            service,
            scope,
            access_token: aad_token,
        };
        tracing::debug!(service, "exchanging access token for a registry refresh token");
        let response = self
            .execute::<_, RefreshTokenResponse>(EXCHANGE_PATH, &form, timeout)
            .await?;
        let expires_on = expires_on(&response.refresh_token)?;
        Ok(RefreshToken {
            token: response.refresh_token,
            expires_on,
        })
    }

    /// Exchanges a registry refresh token for an access token limited to
    /// `scope`.
    ///
    /// Use [GrantType::RefreshToken] with a valid refresh token, or
    /// [GrantType::Password] with an empty refresh token for anonymous
    /// access.
    pub async fn exchange_refresh_token_for_access_token(
        &self,
        service: &str,
        scope: &str,
        refresh_token: &str,
        grant_type: GrantType,
        timeout: Option<Duration>,
    ) -> Result<AccessToken> {
        let form = AccessTokenRequest {
            grant_type,
            service,
            scope,
            refresh_token,
        };
        tracing::debug!(service, scope, ?grant_type, "requesting a registry access token");
        let response = self
            .execute::<_, AccessTokenResponse>(TOKEN_PATH, &form, timeout)
            .await?;
        let expires_on = expires_on(&response.access_token)?;
        Ok(AccessToken {
            token: response.access_token,
            expires_on,
        })
    }

    async fn execute<I, O>(&self, path: &str, form: &I, timeout: Option<Duration>) -> Result<O>
    where
        I: serde::Serialize + ?Sized,
        O: serde::de::DeserializeOwned,
    {
        let mut builder = self
            .builder
            .post(format!("{}{path}", self.endpoint))
            .form(form);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let request = builder.build().map_err(Error::exchange)?;
        let response = self.transport.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(Error::exchange)?;
            return Err(Error::exchange_status(status, body));
        }
        response.json::<O>().await.map_err(Error::exchange)
    }
}

#[derive(serde::Serialize)]
struct RefreshTokenRequest<'a> {
    grant_type: GrantType,
    service: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
    access_token: &'a str,
}

#[derive(serde::Deserialize)]
struct RefreshTokenResponse {
    refresh_token: String,
}

#[derive(serde::Serialize)]
struct AccessTokenRequest<'a> {
    grant_type: GrantType,
    service: &'a str,
    scope: &'a str,
    refresh_token: &'a str,
}

#[derive(serde::Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}
