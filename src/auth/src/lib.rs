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

//! Container Registry Client Libraries for Rust - Authentication Components
//!
//! Container registries do not accept identity-provider tokens directly.
//! Instead, a registry answers unauthenticated requests with a `401` status
//! and a `WWW-Authenticate` challenge naming the `service` and the `scope`
//! the request needs. The client exchanges an identity-provider token for a
//! registry *refresh token*, exchanges the refresh token for an *access
//! token* limited to the requested scope, and resends the request.
//!
//! This crate implements that handshake once, as a request policy:
//!
//! - [policy::AuthenticationPolicy] sends requests, answers challenges, and
//!   retries each request at most once with a fresh token.
//! - [exchange::AuthenticationClient] calls the registry token exchange
//!   endpoints.
//! - [credentials::Credentials] wraps the application supplied
//!   [credentials::TokenSource] that produces identity-provider tokens.
//! - [cloud::CloudConfiguration] describes the audiences and endpoints of each
//!   supported cloud environment.
//!
//! # Example
//! ```no_run
//! # use containerregistry_auth::policy::Builder;
//! # use containerregistry_auth::cloud::CloudEnvironment;
//! # async fn sample() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = Builder::new("https://myregistry.azurecr.io")
//!     .with_cloud_environment(CloudEnvironment::Public)
//!     .build()?;
//! let request = reqwest::Client::new()
//!     .get("https://myregistry.azurecr.io/v2/_catalog")
//!     .build()?;
//! let response = policy.send(request).await?;
//! println!("status = {}", response.status());
//! # Ok(()) }
//! ```

pub mod build_errors;
pub mod errors;

/// Cloud environments and the service configuration for each one.
pub mod cloud;

/// The interface to obtain identity-provider tokens.
pub mod credentials;

/// Types and functions to work with registry tokens.
pub mod token;

/// Parse `WWW-Authenticate` challenges and build probe requests.
pub mod challenge;

/// The registry token exchange client.
pub mod exchange;

/// The pluggable transport used to send requests.
pub mod transport;

/// The authenticating request policy.
pub mod policy;

/// The token cache
pub(crate) mod token_cache;

/// A `Result` alias where the `Err` case is
/// `containerregistry_auth::errors::Error`.
pub type Result<T> = std::result::Result<T, crate::errors::Error>;
