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
use crate::credentials::Credentials;
use crate::errors::Error;
use crate::exchange::{AuthenticationClient, GrantType};
use crate::token::{AccessToken, RefreshToken};
use crate::transport::remaining;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Duration;
use time::OffsetDateTime;
use tokio::time::Instant;

// Refresh tokens expiring within this window are refreshed before use.
const REFRESH_WINDOW: Duration = Duration::from_secs(5 * 60);

type PendingRefresh = Shared<BoxFuture<'static, Result<RefreshToken>>>;

/// Holds the most recent access token.
///
/// An expired token is never returned, the policy sends an unauthenticated
/// request to get a fresh challenge instead.
#[derive(Debug, Default)]
pub(crate) struct AccessTokenCell(RwLock<Option<AccessToken>>);

impl AccessTokenCell {
    pub(crate) fn load(&self) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|t| !t.is_expired())
            .map(|t| t.token.clone())
    }

    pub(crate) fn store(&self, token: AccessToken) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }
}

#[derive(Debug)]
struct CachedRefreshToken {
    service: String,
    token: RefreshToken,
}

impl CachedRefreshToken {
    fn usable_for(&self, service: &str) -> bool {
        self.service == service
            && OffsetDateTime::now_utc() + REFRESH_WINDOW < self.token.expires_on
    }
}

#[derive(Default)]
struct RefreshState {
    // The last refresh token, if any.
    current: Option<CachedRefreshToken>,
    // The refreshes in progress, by service. Callers for the same service
    // share the result.
    in_flight: HashMap<String, PendingRefresh>,
}

impl std::fmt::Debug for RefreshState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshState")
            .field("current", &self.current)
            .field("in_flight", &self.in_flight.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Caches the registry refresh token and the most recent access token.
#[derive(Debug)]
pub(crate) struct TokenCache {
    client: AuthenticationClient,
    // `None` for anonymous access.
    credentials: Option<Credentials>,
    // The identity-provider scopes used to get the token for the exchange.
    scopes: Vec<String>,
    refresh: Mutex<RefreshState>,
    access_token: AccessTokenCell,
}

impl TokenCache {
    pub(crate) fn new(
        client: AuthenticationClient,
        credentials: Option<Credentials>,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            client,
            credentials,
            scopes,
            refresh: Mutex::new(RefreshState::default()),
            access_token: AccessTokenCell::default(),
        }
    }

    pub(crate) fn access_token(&self) -> &AccessTokenCell {
        &self.access_token
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Returns a new access token for `scope`.
    ///
    /// Every call exchanges a refresh token for a new access token. Only the
    /// refresh token is reused across calls. All the exchanges must complete
    /// before `deadline`.
    pub(crate) async fn acquire_access_token(
        &self,
        service: &str,
        scope: &str,
        deadline: Option<Instant>,
    ) -> Result<String> {
        let (refresh_token, grant_type) = match &self.credentials {
            None => (String::new(), GrantType::Password),
            Some(credentials) => {
                let token = self.refresh_token(credentials, service, deadline).await?;
                (token.token, GrantType::RefreshToken)
            }
        };
        let token = self
            .client
            .exchange_refresh_token_for_access_token(
                service,
                scope,
                &refresh_token,
                grant_type,
                remaining(deadline)?,
            )
            .await?;
        self.access_token.store(token.clone());
        Ok(token.token)
    }

    /// Returns the cached refresh token for `service`, or starts (or joins) a
    /// refresh for the same service.
    async fn refresh_token(
        &self,
        credentials: &Credentials,
        service: &str,
        deadline: Option<Instant>,
    ) -> Result<RefreshToken> {
        let pending = {
            let mut state = self.refresh.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = state.current.as_ref().filter(|c| c.usable_for(service)) {
                return Ok(cached.token.clone());
            }
            match state.in_flight.get(service) {
                Some(pending) => {
                    tracing::trace!(service, "joining refresh token exchange in progress");
                    pending.clone()
                }
                None => {
                    let pending = self.start_refresh(credentials, service);
                    state.in_flight.insert(service.to_string(), pending.clone());
                    pending
                }
            }
        };

        // Each caller waits up to its own deadline. The refresh continues for
        // any other callers.
        let result = match deadline {
            None => pending.clone().await,
            Some(deadline) => tokio::time::timeout_at(deadline, pending.clone())
                .await
                .map_err(Error::cancelled)?,
        };

        let mut state = self.refresh.lock().unwrap_or_else(PoisonError::into_inner);
        // The first caller to observe the result updates the cache.
        if state
            .in_flight
            .get(service)
            .is_some_and(|p| p.ptr_eq(&pending))
        {
            state.in_flight.remove(service);
            if let Ok(token) = &result {
                state.current = Some(CachedRefreshToken {
                    service: service.to_string(),
                    token: token.clone(),
                });
            }
        }
        result
    }

    fn start_refresh(&self, credentials: &Credentials, service: &str) -> PendingRefresh {
        let client = self.client.clone();
        let credentials = credentials.clone();
        let scopes = self.scopes.clone();
        let service = service.to_string();
        tracing::debug!(service = %service, "starting refresh token exchange");
        async move {
            let aad_token = credentials.get_token(&scopes).await?;
            let aad_token = aad_token.token;
            client
                .exchange_aad_access_token_for_refresh_token(&service, None, &aad_token, None)
                .await
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::tests::MockTokenSource;
    use crate::credentials::TokenSource;
    use crate::token::tests::{test_jwt, test_jwt_valid_for};
    use httptest::cycle;
    use httptest::{Expectation, Server, matchers::*, responders::*};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    const AAD_SCOPE: &str = "https://registry.example.com/.default";
    const HOUR: Duration = Duration::from_secs(3600);

    fn aad_token() -> AccessToken {
        AccessToken::new("aad-token", OffsetDateTime::now_utc() + HOUR)
    }

    fn mock_source(times: usize) -> MockTokenSource {
        let mut mock = MockTokenSource::new();
        mock.expect_get_token()
            .withf(|scopes| scopes == [AAD_SCOPE.to_string()])
            .times(times)
            .returning(|_| Ok(aad_token()));
        mock
    }

    fn new_cache(server: &Server, credentials: Option<Credentials>) -> TokenCache {
        TokenCache::new(
            AuthenticationClient::new(server.url_str("")),
            credentials,
            vec![AAD_SCOPE.to_string()],
        )
    }

    fn expect_refresh(server: &Server, times: usize, refresh_token: &str) {
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/oauth2/exchange"),
                request::body(url_decoded(contains(("grant_type", "access_token")))),
                request::body(url_decoded(contains(("access_token", "aad-token")))),
                request::body(url_decoded(contains(("service", "x.io")))),
            ])
            .times(times)
            .respond_with(json_encoded(
                serde_json::json!({"refresh_token": refresh_token}),
            )),
        );
    }

    fn expect_access(server: &Server, times: usize, refresh_token: &str, access_token: &str) {
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/oauth2/token"),
                request::body(url_decoded(contains(("grant_type", "refresh_token")))),
                request::body(url_decoded(contains(("refresh_token", refresh_token.to_string())))),
                request::body(url_decoded(contains(("service", "x.io")))),
            ])
            .times(times)
            .respond_with(json_encoded(
                serde_json::json!({"access_token": access_token}),
            )),
        );
    }

    #[test]
    fn access_token_cell() {
        let now = OffsetDateTime::now_utc();
        let cell = AccessTokenCell::default();
        assert_eq!(cell.load(), None);
        cell.store(AccessToken::new("first", now + HOUR));
        assert_eq!(cell.load().as_deref(), Some("first"));
        cell.store(AccessToken::new("second", now + HOUR));
        assert_eq!(cell.load().as_deref(), Some("second"));
    }

    #[test]
    fn access_token_cell_hides_expired_tokens() {
        let now = OffsetDateTime::now_utc();
        let cell = AccessTokenCell::default();
        cell.store(AccessToken::new("expired", now - Duration::from_secs(1)));
        assert_eq!(cell.load(), None);
        cell.store(AccessToken::new("fresh", now + HOUR));
        assert_eq!(cell.load().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn expired_access_token_is_not_served() -> TestResult {
        let access_token = test_jwt(OffsetDateTime::now_utc() - HOUR);
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/oauth2/token")).respond_with(
                json_encoded(serde_json::json!({"access_token": access_token})),
            ),
        );

        let cache = new_cache(&server, None);
        let got = cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await?;
        assert_eq!(got, access_token);
        assert_eq!(cache.access_token().load(), None);
        Ok(())
    }

    #[tokio::test]
    async fn acquire_success() -> TestResult {
        let refresh_token = test_jwt_valid_for(HOUR);
        let access_token = test_jwt_valid_for(HOUR);
        let server = Server::run();
        expect_refresh(&server, 1, &refresh_token);
        expect_access(&server, 1, &refresh_token, &access_token);

        let cache = new_cache(&server, Some(Credentials::from(mock_source(1))));
        assert_eq!(cache.access_token().load(), None);
        let got = cache
            .acquire_access_token("x.io", "registry:catalog:*", None)
            .await?;
        assert_eq!(got, access_token);
        assert_eq!(cache.access_token().load(), Some(access_token));
        Ok(())
    }

    #[tokio::test]
    async fn reuses_refresh_token() -> TestResult {
        let refresh_token = test_jwt_valid_for(HOUR);
        let access_token = test_jwt_valid_for(HOUR);
        let server = Server::run();
        // Only the access token exchange runs for the second call.
        expect_refresh(&server, 1, &refresh_token);
        expect_access(&server, 2, &refresh_token, &access_token);

        let cache = new_cache(&server, Some(Credentials::from(mock_source(1))));
        cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await?;
        cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn refreshes_expiring_refresh_token() -> TestResult {
        // Inside the refresh window, so the token is never reused.
        let refresh_token = test_jwt_valid_for(Duration::from_secs(60));
        let access_token = test_jwt_valid_for(HOUR);
        let server = Server::run();
        expect_refresh(&server, 2, &refresh_token);
        expect_access(&server, 2, &refresh_token, &access_token);

        let cache = new_cache(&server, Some(Credentials::from(mock_source(2))));
        cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await?;
        cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn refresh_token_is_bound_to_service() -> TestResult {
        let refresh_token = test_jwt_valid_for(HOUR);
        let access_token = test_jwt_valid_for(HOUR);
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/oauth2/exchange"))
                .times(2)
                .respond_with(json_encoded(
                    serde_json::json!({"refresh_token": refresh_token}),
                )),
        );
        server.expect(
            Expectation::matching(request::method_path("POST", "/oauth2/token"))
                .times(2)
                .respond_with(json_encoded(
                    serde_json::json!({"access_token": access_token}),
                )),
        );

        let cache = new_cache(&server, Some(Credentials::from(mock_source(2))));
        cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await?;
        cache
            .acquire_access_token("y.io", "repository:hello:pull", None)
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn anonymous() -> TestResult {
        let access_token = test_jwt_valid_for(HOUR);
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/oauth2/token"),
                request::body(url_decoded(contains(("grant_type", "password")))),
                request::body(url_decoded(contains(("refresh_token", "")))),
                request::body(url_decoded(contains(("scope", "repository:hello:pull")))),
            ])
            .respond_with(json_encoded(
                serde_json::json!({"access_token": access_token}),
            )),
        );

        let cache = new_cache(&server, None);
        let got = cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await?;
        assert_eq!(got, access_token);
        assert_eq!(cache.access_token().load(), Some(access_token));
        Ok(())
    }

    #[tokio::test]
    async fn credentials_error() -> TestResult {
        let server = Server::run();
        let mut mock = MockTokenSource::new();
        mock.expect_get_token()
            .times(1)
            .returning(|_| Err(Error::credentials("identity provider unavailable")));

        let cache = new_cache(&server, Some(Credentials::from(mock)));
        let err = cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await
            .unwrap_err();
        assert!(err.is_credentials(), "{err:?}");
        assert_eq!(cache.access_token().load(), None);
        Ok(())
    }

    #[tokio::test]
    async fn failed_refresh_is_not_cached() -> TestResult {
        let refresh_token = test_jwt_valid_for(HOUR);
        let access_token = test_jwt_valid_for(HOUR);
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/oauth2/exchange"))
                .times(2)
                .respond_with(cycle![
                    status_code(503),
                    json_encoded(serde_json::json!({"refresh_token": refresh_token})),
                ]),
        );
        expect_access(&server, 1, &refresh_token, &access_token);

        let cache = new_cache(&server, Some(Credentials::from(mock_source(2))));
        let err = cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await
            .unwrap_err();
        assert!(err.is_exchange(), "{err:?}");
        assert!(err.is_retryable(), "{err:?}");

        let got = cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await?;
        assert_eq!(got, access_token);
        Ok(())
    }

    #[tokio::test]
    async fn access_token_error_keeps_refresh_token() -> TestResult {
        let refresh_token = test_jwt_valid_for(HOUR);
        let access_token = test_jwt_valid_for(HOUR);
        let server = Server::run();
        expect_refresh(&server, 1, &refresh_token);
        server.expect(
            Expectation::matching(request::method_path("POST", "/oauth2/token"))
                .times(2)
                .respond_with(cycle![
                    status_code(403),
                    json_encoded(serde_json::json!({"access_token": access_token})),
                ]),
        );

        let cache = new_cache(&server, Some(Credentials::from(mock_source(1))));
        let err = cache
            .acquire_access_token("x.io", "repository:hello:push", None)
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), Some(reqwest::StatusCode::FORBIDDEN));
        let got = cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await?;
        assert_eq!(got, access_token);
        Ok(())
    }

    // A token source that is slow enough for the callers in a thundering herd
    // to pile up.
    #[derive(Debug)]
    struct SlowTokenSource {
        result: Result<AccessToken>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl TokenSource for SlowTokenSource {
        async fn get_token(&self, _scopes: &[String]) -> Result<AccessToken> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn thundering_herd_single_refresh() -> TestResult {
        const N: usize = 100;
        let refresh_token = test_jwt_valid_for(HOUR);
        let access_token = test_jwt_valid_for(HOUR);
        let server = Server::run();
        expect_refresh(&server, 1, &refresh_token);
        expect_access(&server, N, &refresh_token, &access_token);

        let calls = Arc::new(AtomicUsize::new(0));
        let source = SlowTokenSource {
            result: Ok(aad_token()),
            calls: calls.clone(),
        };
        let cache = Arc::new(new_cache(&server, Some(Credentials::from(source))));

        // Spawn N tasks, all asking for a token at once.
        let tasks = (0..N)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    cache
                        .acquire_access_token("x.io", &format!("repository:r{i}:pull"), None)
                        .await
                })
            })
            .collect::<Vec<_>>();

        for task in tasks {
            let got = task.await?;
            assert_eq!(got?, access_token);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn thundering_herd_shares_error() -> TestResult {
        const N: usize = 100;
        let server = Server::run();

        let calls = Arc::new(AtomicUsize::new(0));
        let source = SlowTokenSource {
            result: Err(Error::credentials("epic fail")),
            calls: calls.clone(),
        };
        let cache = Arc::new(new_cache(&server, Some(Credentials::from(source))));

        let tasks = (0..N)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    cache
                        .acquire_access_token("x.io", "repository:hello:pull", None)
                        .await
                })
            })
            .collect::<Vec<_>>();

        for task in tasks {
            let err = task.await?.unwrap_err();
            assert!(err.is_credentials(), "{err:?}");
            assert!(err.to_string().contains("epic fail"), "{err}");
        }
        // Callers arriving after the failed refresh completes start a new
        // one, so the bound is loose.
        let calls = calls.load(Ordering::SeqCst);
        assert!(calls < N, "{calls}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn deadline_cancels_refresh() -> TestResult {
        let server = Server::run();
        let calls = Arc::new(AtomicUsize::new(0));
        let source = SlowTokenSource {
            result: Ok(aad_token()),
            calls: calls.clone(),
        };
        let cache = new_cache(&server, Some(Credentials::from(source)));

        let deadline = Instant::now() + Duration::from_millis(1);
        let err = cache
            .acquire_access_token("x.io", "repository:hello:pull", Some(deadline))
            .await
            .unwrap_err();
        assert!(err.is_cancelled(), "{err:?}");
        assert_eq!(cache.access_token().load(), None);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn deadline_does_not_cancel_other_waiters() -> TestResult {
        let refresh_token = test_jwt_valid_for(HOUR);
        let access_token = test_jwt_valid_for(HOUR);
        let server = Server::run();
        expect_refresh(&server, 1, &refresh_token);
        expect_access(&server, 1, &refresh_token, &access_token);

        let calls = Arc::new(AtomicUsize::new(0));
        let source = SlowTokenSource {
            result: Ok(aad_token()),
            calls: calls.clone(),
        };
        let cache = Arc::new(new_cache(&server, Some(Credentials::from(source))));

        let impatient = {
            let cache = cache.clone();
            let deadline = Instant::now() + Duration::from_millis(10);
            tokio::spawn(async move {
                cache
                    .acquire_access_token("x.io", "repository:hello:pull", Some(deadline))
                    .await
            })
        };
        let patient = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .acquire_access_token("x.io", "repository:hello:pull", None)
                    .await
            })
        };

        let err = impatient.await?.unwrap_err();
        assert!(err.is_cancelled(), "{err:?}");
        assert_eq!(patient.await??, access_token);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_refreshes_for_different_services() -> TestResult {
        let x_refresh = test_jwt_valid_for(HOUR);
        let y_refresh = test_jwt_valid_for(2 * HOUR);
        let x_access = test_jwt_valid_for(HOUR);
        let y_access = test_jwt_valid_for(2 * HOUR);
        let server = Server::run();
        for (service, refresh_token, access_token) in [
            ("x.io", &x_refresh, &x_access),
            ("y.io", &y_refresh, &y_access),
        ] {
            server.expect(
                Expectation::matching(all_of![
                    request::method_path("POST", "/oauth2/exchange"),
                    request::body(url_decoded(contains(("service", service)))),
                ])
                .times(1)
                .respond_with(json_encoded(
                    serde_json::json!({"refresh_token": refresh_token}),
                )),
            );
            server.expect(
                Expectation::matching(all_of![
                    request::method_path("POST", "/oauth2/token"),
                    request::body(url_decoded(contains(("service", service)))),
                    request::body(url_decoded(contains((
                        "refresh_token",
                        refresh_token.to_string()
                    )))),
                ])
                .times(1)
                .respond_with(json_encoded(
                    serde_json::json!({"access_token": access_token}),
                )),
            );
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let source = SlowTokenSource {
            result: Ok(aad_token()),
            calls: calls.clone(),
        };
        let cache = Arc::new(new_cache(&server, Some(Credentials::from(source))));

        let x = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .acquire_access_token("x.io", "repository:hello:pull", None)
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let y = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .acquire_access_token("y.io", "repository:hello:pull", None)
                    .await
            })
        };

        assert_eq!(x.await??, x_access);
        assert_eq!(y.await??, y_access);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn refresh_token_decode_error() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/oauth2/exchange")).respond_with(
                json_encoded(serde_json::json!({"refresh_token": "opaque"})),
            ),
        );

        let cache = new_cache(&server, Some(Credentials::from(mock_source(1))));
        let err = cache
            .acquire_access_token("x.io", "repository:hello:pull", None)
            .await
            .unwrap_err();
        assert!(err.is_token_decode(), "{err:?}");
        Ok(())
    }

    #[test]
    fn usable_for() {
        let now = OffsetDateTime::now_utc();
        let cached = CachedRefreshToken {
            service: "x.io".to_string(),
            token: RefreshToken {
                token: test_jwt(now + HOUR),
                expires_on: now + HOUR,
            },
        };
        assert!(cached.usable_for("x.io"));
        assert!(!cached.usable_for("y.io"));

        let cached = CachedRefreshToken {
            service: "x.io".to_string(),
            token: RefreshToken {
                token: test_jwt(now + Duration::from_secs(60)),
                expires_on: now + Duration::from_secs(60),
            },
        };
        assert!(!cached.usable_for("x.io"));
    }
}
