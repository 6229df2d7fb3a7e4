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
use crate::build_errors::Error as BuildError;
use crate::challenge::{Challenge, probe_request};
use crate::cloud::{CloudConfiguration, CloudEnvironment, ServiceConfiguration};
use crate::credentials::Credentials;
use crate::errors::Error;
use crate::exchange::AuthenticationClient;
use crate::token_cache::TokenCache;
use crate::transport::{SharedTransport, Transport, default_transport, remaining};
use http::HeaderValue;
use http::header::AUTHORIZATION;
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::time::Instant;

/// Sends requests to a container registry, answering authentication
/// challenges.
///
/// Each request goes through these steps:
///
/// 1. If the request already has an `Authorization` header it is sent as-is.
///    Otherwise, if the policy holds an access token from a previous request,
///    the policy attaches it and sends the request. Otherwise, the policy
///    sends a *probe*: the same request without a body.
/// 2. Any response other than `401 Unauthorized` is returned unchanged.
/// 3. On `401`, the policy parses the `WWW-Authenticate` challenge, acquires
///    an access token for the challenge scope, and sends the original
///    request once more with the new token. The response to this second
///    attempt is returned, even if it is another `401`.
///
/// Policies are cheap to clone and safe to share across tasks. All clones
/// share the same token cache.
///
/// # Example
/// ```no_run
/// # use containerregistry_auth::policy::Builder;
/// # async fn sample() -> Result<(), Box<dyn std::error::Error>> {
/// let policy = Builder::new("https://myregistry.azurecr.io").build()?;
/// let request = reqwest::Client::new()
///     .get("https://myregistry.azurecr.io/v2/hello-world/tags/list")
///     .build()?;
/// let response = policy.send(request).await?;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct AuthenticationPolicy {
    cache: Arc<TokenCache>,
    transport: SharedTransport,
}

impl AuthenticationPolicy {
    /// Sends `request`, authenticating with the registry if required.
    ///
    /// The request timeout, if any, is a deadline for the whole call,
    /// including the token exchanges and the retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails, if the registry challenge
    /// cannot be parsed, if a token cannot be acquired, or if the request
    /// must be resent but its body is a stream that cannot be replayed. If
    /// the deadline passes the error is [is_cancelled][Error::is_cancelled].
    pub async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        match request.timeout().map(|t| Instant::now() + *t) {
            None => self.authenticate(request, None).await,
            Some(deadline) => {
                tokio::time::timeout_at(deadline, self.authenticate(request, Some(deadline)))
                    .await
                    .map_err(Error::cancelled)?
            }
        }
    }

    /// The access token attached to new requests, if any.
    pub fn cached_access_token(&self) -> Option<String> {
        self.cache.access_token().load()
    }

    /// The registry endpoint, for example `https://myregistry.azurecr.io`.
    pub fn endpoint(&self) -> &str {
        self.cache.endpoint()
    }

    async fn authenticate(
        &self,
        mut request: reqwest::Request,
        deadline: Option<Instant>,
    ) -> Result<reqwest::Response> {
        if request.headers().contains_key(AUTHORIZATION) {
            tracing::trace!(url = %request.url(), "sending request with caller authorization");
            let retry = request.try_clone();
            let response = self.send_before(request, deadline).await?;
            return self.on_response(response, retry, deadline).await;
        }

        if let Some(token) = self.cache.access_token().load() {
            tracing::trace!(url = %request.url(), "sending request with cached access token");
            set_bearer(&mut request, &token)?;
            let retry = request.try_clone();
            let response = self.send_before(request, deadline).await?;
            return self.on_response(response, retry, deadline).await;
        }

        tracing::trace!(url = %request.url(), "sending probe request");
        let probe = probe_request(&request);
        let response = self.send_before(probe, deadline).await?;
        self.on_response(response, Some(request), deadline).await
    }

    // `retry` is `None` when the request body cannot be replayed.
    async fn on_response(
        &self,
        response: reqwest::Response,
        retry: Option<reqwest::Request>,
        deadline: Option<Instant>,
    ) -> Result<reqwest::Response> {
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let challenge = Challenge::from_response(&response)?;
        tracing::debug!(
            service = %challenge.service,
            scope = %challenge.scope,
            "received authentication challenge"
        );
        let token = self
            .cache
            .acquire_access_token(&challenge.service, &challenge.scope, deadline)
            .await?;

        let mut request = retry.ok_or_else(Error::body_rewind)?;
        set_bearer(&mut request, &token)?;
        tracing::debug!(url = %request.url(), "resending request with new access token");
        self.send_before(request, deadline).await
    }

    // Limits the request to the time left before `deadline`.
    async fn send_before(
        &self,
        mut request: reqwest::Request,
        deadline: Option<Instant>,
    ) -> Result<reqwest::Response> {
        *request.timeout_mut() = remaining(deadline)?;
        self.transport.send(request).await
    }
}

#[async_trait::async_trait]
impl Transport for AuthenticationPolicy {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        AuthenticationPolicy::send(self, request).await
    }
}

fn set_bearer(request: &mut reqwest::Request, token: &str) -> Result<()> {
    let mut value =
        HeaderValue::from_str(&format!("Bearer {token}")).map_err(Error::token_decode)?;
    value.set_sensitive(true);
    request.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}

/// A builder for [AuthenticationPolicy].
///
/// Without credentials, the policy requests anonymous access tokens. This
/// works for registries that allow anonymous pulls.
///
/// # Example
/// ```
/// # use containerregistry_auth::policy::Builder;
/// # use containerregistry_auth::cloud::CloudEnvironment;
/// let policy = Builder::new("https://myregistry.azurecr.cn")
///     .with_cloud_environment(CloudEnvironment::China)
///     .build();
/// assert!(policy.is_ok());
/// ```
#[derive(Debug)]
pub struct Builder {
    endpoint: Endpoint,
    credentials: Option<Credentials>,
    environment: CloudEnvironment,
    configuration: CloudConfiguration,
    audience: Option<String>,
    transport: Option<SharedTransport>,
}

#[derive(Debug)]
enum Endpoint {
    Url(String),
    // Resolved with the endpoint suffix of the cloud environment.
    RegistryName(String),
}

impl Builder {
    /// Creates a builder for the registry at `endpoint`.
    pub fn new<T: Into<String>>(endpoint: T) -> Self {
        Self::with_endpoint(Endpoint::Url(endpoint.into()))
    }

    /// Creates a builder for the registry named `name`.
    ///
    /// The endpoint depends on the cloud environment. For example, the
    /// registry `myregistry` in the public cloud is at
    /// `https://myregistry.azurecr.io`.
    ///
    /// # Example
    /// ```
    /// # use containerregistry_auth::policy::Builder;
    /// # use containerregistry_auth::cloud::CloudEnvironment;
    /// let policy = Builder::for_registry("myregistry")
    ///     .with_cloud_environment(CloudEnvironment::Government)
    ///     .build()?;
    /// assert_eq!(policy.endpoint(), "https://myregistry.azurecr.us");
    /// # Ok::<(), containerregistry_auth::build_errors::Error>(())
    /// ```
    pub fn for_registry<T: Into<String>>(name: T) -> Self {
        Self::with_endpoint(Endpoint::RegistryName(name.into()))
    }

    fn with_endpoint(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            credentials: None,
            environment: CloudEnvironment::default(),
            configuration: CloudConfiguration::default(),
            audience: None,
            transport: None,
        }
    }

    /// Sets the credentials used to get identity-provider tokens.
    pub fn with_credentials<T: Into<Credentials>>(mut self, v: T) -> Self {
        self.credentials = Some(v.into());
        self
    }

    /// Sets the cloud environment. Defaults to [CloudEnvironment::Public].
    pub fn with_cloud_environment(mut self, v: CloudEnvironment) -> Self {
        self.environment = v;
        self
    }

    /// Replaces the configuration for all cloud environments.
    pub fn with_cloud_configuration(mut self, v: CloudConfiguration) -> Self {
        self.configuration = v;
        self
    }

    /// Overrides the audience of the cloud environment.
    ///
    /// The policy requests identity-provider tokens for `<audience>/.default`.
    pub fn with_audience<T: Into<String>>(mut self, v: T) -> Self {
        self.audience = Some(v.into());
        self
    }

    /// Sets the transport used to send requests and token exchanges.
    /// Defaults to a [reqwest::Client].
    pub fn with_transport<T: Transport + 'static>(mut self, v: T) -> Self {
        self.transport = Some(Arc::new(v));
        self
    }

    /// Returns an [AuthenticationPolicy] with the configured settings.
    ///
    /// # Errors
    ///
    /// Fails if the cloud environment is missing from the configuration, if
    /// the endpoint is not an absolute `http` or `https` URL, or if the
    /// resulting audience is empty.
    pub fn build(self) -> std::result::Result<AuthenticationPolicy, BuildError> {
        let service = self.configuration.service(self.environment)?;
        let endpoint = match self.endpoint {
            Endpoint::Url(url) => url,
            Endpoint::RegistryName(name) => service.registry_url(&name),
        };
        let url = url::Url::parse(&endpoint).map_err(BuildError::invalid_endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BuildError::invalid_endpoint(format!(
                "unsupported scheme `{}` in {endpoint}",
                url.scheme(),
            )));
        }

        let audience = self
            .audience
            .unwrap_or_else(|| service.audience().to_string());
        if audience.is_empty() {
            return Err(BuildError::missing_field("audience"));
        }
        let scopes = ServiceConfiguration::new(audience, service.endpoint()).scopes();

        let transport = self.transport.unwrap_or_else(default_transport);
        let client = AuthenticationClient::with_shared_transport(endpoint, transport.clone());
        tracing::debug!(
            endpoint = client.endpoint(),
            environment = %self.environment,
            anonymous = self.credentials.is_none(),
            "creating authentication policy"
        );
        Ok(AuthenticationPolicy {
            cache: Arc::new(TokenCache::new(client, self.credentials, scopes)),
            transport,
        })
    }
}
