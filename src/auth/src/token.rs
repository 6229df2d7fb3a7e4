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
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use time::OffsetDateTime;

// Registry tokens are JWTs, which use the URL-safe alphabet without padding.
// Some servers pad the payload anyway.
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Represents an access token.
///
/// Access tokens are returned by the identity provider through a
/// [TokenSource][crate::credentials::TokenSource], and by the registry in
/// exchange for a [RefreshToken]. Registry access tokens are limited to the
/// scope requested in the exchange.
#[derive(Clone, PartialEq)]
pub struct AccessToken {
    /// The actual token string.
    ///
    /// This is the value used in `Authorization:` header.
    pub token: String,

    /// The time at which the token expires.
    pub expires_on: OffsetDateTime,
}

impl AccessToken {
    /// Creates a new access token.
    pub fn new<T: Into<String>>(token: T, expires_on: OffsetDateTime) -> Self {
        Self {
            token: token.into(),
            expires_on,
        }
    }

    /// Returns `true` if the token can no longer be used.
    pub fn is_expired(&self) -> bool {
        OffsetDateTime::now_utc() >= self.expires_on
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[censored]")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Represents a registry refresh token.
///
/// The registry issues refresh tokens in exchange for identity-provider
/// access tokens. Refresh tokens are bound to a registry, but not to any
/// particular scope, and live longer than access tokens. The expiration time
/// is decoded from the claims embedded in the token.
#[derive(Clone, PartialEq)]
pub struct RefreshToken {
    /// The actual token string.
    pub token: String,

    /// The time at which the token expires.
    pub expires_on: OffsetDateTime,
}

impl RefreshToken {
    /// Creates a refresh token, decoding the expiration time from its claims.
    ///
    /// # Errors
    ///
    /// Returns an error if the token does not contain a valid `exp` claim.
    pub fn from_jwt<T: Into<String>>(token: T) -> Result<Self> {
        let token = token.into();
        let expires_on = expires_on(&token)?;
        Ok(Self { token, expires_on })
    }

    /// Returns `true` if the token can no longer be used.
    pub fn is_expired(&self) -> bool {
        OffsetDateTime::now_utc() >= self.expires_on
    }
}

impl std::fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshToken")
            .field("token", &"[censored]")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

#[derive(serde::Deserialize)]
struct ExpirationClaim {
    exp: i64,
}

/// Decodes the expiration time embedded in a JWT-like token.
///
/// The token must have at least three `.`-separated segments. The second
/// segment is the base64-encoded JSON payload, which must contain an integer
/// `exp` field with the expiration time in seconds since the Unix epoch. The
/// signature is not verified.
///
/// # Example
/// ```
/// # use containerregistry_auth::token::expires_on;
/// // {"exp":1700000000}
/// let token = "e30.eyJleHAiOjE3MDAwMDAwMDB9.c2ln";
/// let expires_on = expires_on(token).unwrap();
/// assert_eq!(expires_on.unix_timestamp(), 1_700_000_000);
/// ```
///
/// # Errors
///
/// Returns an error if the token has fewer than three segments, if the
/// payload is not valid base64, or if the payload is not JSON with a valid
/// `exp` field.
pub fn expires_on(token: &str) -> Result<OffsetDateTime> {
    let segments = token.split('.').collect::<Vec<_>>();
    if segments.len() < 3 {
        return Err(Error::token_decode(format!(
            "expected at least 3 segments separated by `.`, found {}",
            segments.len()
        )));
    }
    let payload = segments[1].replace('+', "-").replace('/', "_");
    let payload = CLAIMS_ENGINE.decode(payload).map_err(Error::token_decode)?;
    let claim = serde_json::from_slice::<ExpirationClaim>(&payload).map_err(Error::token_decode)?;
    OffsetDateTime::from_unix_timestamp(claim.exp).map_err(Error::token_decode)
}
