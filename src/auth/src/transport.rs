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
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Sends HTTP requests on behalf of the authentication components.
///
/// The policy uses a transport to send the probe and the authenticated
/// requests, and the [AuthenticationClient] uses it to call the token exchange
/// endpoints. The transport does not need to handle authentication.
///
/// This trait is implemented for [reqwest::Client]. Applications may wrap
/// another transport to add their own behavior, such as logging or retries.
/// The [AuthenticationPolicy] also implements this trait, so policies compose
/// with other transports.
///
/// [AuthenticationClient]: crate::exchange::AuthenticationClient
/// [AuthenticationPolicy]: crate::policy::AuthenticationPolicy
#[async_trait::async_trait]
pub trait Transport: std::fmt::Debug + Send + Sync {
    /// Sends `request` and returns the response.
    ///
    /// Responses with error status codes are not errors at this level.
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response>;
}

#[async_trait::async_trait]
impl Transport for reqwest::Client {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        self.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                Error::cancelled(e)
            } else {
                Error::transport(e)
            }
        })
    }
}

pub(crate) type SharedTransport = Arc<dyn Transport>;

pub(crate) fn default_transport() -> SharedTransport {
    Arc::new(reqwest::Client::new())
}

/// Returns the time left before `deadline`, or `None` if there is no
/// deadline.
///
/// Fails with a cancellation error once the deadline has passed.
pub(crate) fn remaining(deadline: Option<Instant>) -> Result<Option<Duration>> {
    let Some(deadline) = deadline else {
        return Ok(None);
    };
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        return Err(Error::cancelled("the request deadline has expired"));
    }
    Ok(Some(left))
}
