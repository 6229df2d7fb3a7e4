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

//! Errors raised while authenticating requests.

use http::StatusCode;
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for the authentication policy and its components.
///
/// The error is cheap to clone. Concurrent requests waiting on the same token
/// exchange all receive a copy of the same error.
///
/// The policy never retries on its own beyond the single retry after a `401`
/// response. Use [Error::is_retryable] to decide if a higher-level retry loop
/// may succeed.
#[derive(thiserror::Error, Clone, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// The `401` response did not include a `WWW-Authenticate` header.
    pub fn is_challenge_missing(&self) -> bool {
        matches!(self.0, ErrorKind::ChallengeMissing)
    }

    /// The `WWW-Authenticate` header could not be parsed, or it lacked the
    /// `service` or `scope` parameters.
    pub fn is_challenge_malformed(&self) -> bool {
        matches!(self.0, ErrorKind::ChallengeMalformed { .. })
    }

    /// A token could not be decoded, typically because its embedded claims do
    /// not contain a valid expiration time.
    pub fn is_token_decode(&self) -> bool {
        matches!(self.0, ErrorKind::TokenDecode(_))
    }

    /// A token exchange endpoint failed or returned an unexpected response.
    pub fn is_exchange(&self) -> bool {
        matches!(
            self.0,
            ErrorKind::ExchangeStatus { .. } | ErrorKind::Exchange(_)
        )
    }

    /// The request body could not be replayed for the authenticated retry.
    pub fn is_body_rewind(&self) -> bool {
        matches!(self.0, ErrorKind::BodyRewind)
    }

    /// The credentials could not produce an identity-provider token.
    pub fn is_credentials(&self) -> bool {
        matches!(self.0, ErrorKind::Credentials(_))
    }

    /// The request timeout elapsed while acquiring a token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.0, ErrorKind::Cancelled(_))
    }

    /// The transport could not send a request.
    pub fn is_transport(&self) -> bool {
        matches!(self.0, ErrorKind::Transport(_))
    }

    /// Returns `true` if a new attempt of the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match &self.0 {
            ErrorKind::ExchangeStatus { status, .. } => is_retryable(*status),
            ErrorKind::Transport(_) | ErrorKind::Cancelled(_) => true,
            _ => false,
        }
    }

    /// The HTTP status returned by a token exchange endpoint, if any.
    pub fn http_status(&self) -> Option<StatusCode> {
        match &self.0 {
            ErrorKind::ExchangeStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Creates an error representing a failure to fetch a token from a
    /// [TokenSource][crate::credentials::TokenSource].
    ///
    /// Applications implementing their own token sources use this function
    /// to report errors.
    ///
    /// # Example
    /// ```
    /// # use containerregistry_auth::errors::Error;
    /// let err = Error::credentials("simulated identity provider outage");
    /// assert!(err.is_credentials());
    /// assert!(err.to_string().contains("simulated identity provider outage"));
    /// ```
    pub fn credentials<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Credentials(shared(source)))
    }

    /// Creates an error representing a failure to send a request.
    ///
    /// Applications implementing their own
    /// [Transport][crate::transport::Transport] use this function to report
    /// errors.
    pub fn transport<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Transport(shared(source)))
    }

    pub(crate) fn challenge_missing() -> Error {
        Error(ErrorKind::ChallengeMissing)
    }

    pub(crate) fn challenge_malformed<T: Into<String>>(header: T, reason: &'static str) -> Error {
        Error(ErrorKind::ChallengeMalformed {
            header: header.into(),
            reason,
        })
    }

    pub(crate) fn token_decode<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::TokenDecode(shared(source)))
    }

    pub(crate) fn exchange_status<T: Into<String>>(status: StatusCode, body: T) -> Error {
        Error(ErrorKind::ExchangeStatus {
            status,
            body: body.into(),
        })
    }

    pub(crate) fn exchange<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Exchange(shared(source)))
    }

    pub(crate) fn body_rewind() -> Error {
        Error(ErrorKind::BodyRewind)
    }

    pub(crate) fn cancelled<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Cancelled(shared(source)))
    }
}

fn shared<T: Into<BoxError>>(source: T) -> SharedError {
    Arc::from(source.into())
}

#[derive(thiserror::Error, Clone, Debug)]
enum ErrorKind {
    #[error("the 401 response does not include a WWW-Authenticate challenge")]
    ChallengeMissing,
    #[error("cannot parse the WWW-Authenticate challenge <{header}>: {reason}")]
    ChallengeMalformed { header: String, reason: &'static str },
    #[error("cannot decode the registry token: {0}")]
    TokenDecode(#[source] SharedError),
    #[error("the token exchange failed with status {status}: {body}")]
    ExchangeStatus { status: StatusCode, body: String },
    #[error("cannot complete the token exchange: {0}")]
    Exchange(#[source] SharedError),
    #[error("cannot rewind the request body to retry the request with a new token")]
    BodyRewind,
    #[error("cannot fetch a token from the credentials: {0}")]
    Credentials(#[source] SharedError),
    #[error("the request was cancelled while acquiring a token: {0}")]
    Cancelled(#[source] SharedError),
    #[error("cannot send the request: {0}")]
    Transport(#[source] SharedError),
}

pub(crate) fn is_retryable(c: StatusCode) -> bool {
    match c {
        // Internal server errors do not indicate that there is anything wrong
        // with our request, so we retry them.
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::REQUEST_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS => true,
        _ => false,
    }
}
