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
use crate::token::AccessToken;
use std::sync::Arc;

/// A source of identity-provider access tokens.
///
/// The registry does not authenticate identity-provider tokens on every
/// request. Instead, the [AuthenticationPolicy] exchanges the token returned
/// here for a registry refresh token, and then for short-lived registry access
/// tokens. The policy calls this trait only when it needs a new refresh token.
///
/// Applications implement this trait to integrate their identity provider.
/// Implementations should report errors using [Error::credentials].
///
/// # Example
/// ```
/// # use containerregistry_auth::credentials::{Credentials, TokenSource};
/// # use containerregistry_auth::token::AccessToken;
/// # use containerregistry_auth::Result;
/// #[derive(Debug)]
/// struct MyTokenSource;
///
/// #[async_trait::async_trait]
/// impl TokenSource for MyTokenSource {
///     async fn get_token(&self, scopes: &[String]) -> Result<AccessToken> {
///         # panic!();
///         // Ask the identity provider for a token valid for `scopes`.
///     }
/// }
///
/// let credentials = Credentials::from(MyTokenSource);
/// ```
///
/// [AuthenticationPolicy]: crate::policy::AuthenticationPolicy
/// [Error::credentials]: crate::errors::Error::credentials
#[async_trait::async_trait]
pub trait TokenSource: std::fmt::Debug + Send + Sync {
    /// Asynchronously retrieves a token valid for `scopes`.
    async fn get_token(&self, scopes: &[String]) -> Result<AccessToken>;
}

/// The credentials used to authenticate with the registry.
///
/// This is a cheap-to-clone wrapper around a [TokenSource]. Credentials may be
/// shared by many policies and across threads.
#[derive(Clone, Debug)]
pub struct Credentials {
    // We use an `Arc` to hold the inner implementation.
    //
    // Credentials may be shared across threads (`Send + Sync`), so an `Rc`
    // will not do.
    //
    // They also need to derive `Clone`, as the refresh of a token runs in a
    // future that outlives any single request. So a `Box` will not do.
    inner: Arc<dyn TokenSource>,
}

impl<T> std::convert::From<T> for Credentials
where
    T: TokenSource + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Credentials {
    /// Retrieves an identity-provider token valid for `scopes`.
    pub async fn get_token(&self, scopes: &[String]) -> Result<AccessToken> {
        self.inner.get_token(scopes).await
    }
}
