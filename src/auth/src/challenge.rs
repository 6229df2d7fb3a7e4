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
use http::HeaderValue;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, WWW_AUTHENTICATE};

const BEARER_SCHEME: &str = "Bearer";

/// A `Bearer` challenge returned by the registry in a `401` response.
///
/// The registry expects a token for `scope`, issued by `service`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    /// The token endpoint advertised by the registry, if any.
    pub realm: Option<String>,
    /// The name of the registry service, used in the token exchanges.
    pub service: String,
    /// The scope required by the request, for example
    /// `repository:hello-world:pull`.
    pub scope: String,
}

impl Challenge {
    /// Parses the value of a `WWW-Authenticate` header.
    ///
    /// The expected format is
    /// `Bearer realm="<url>",service="<name>",scope="<scope>"`. Parameter names
    /// are case-insensitive, the quotes are optional, and quoted values may
    /// contain commas.
    ///
    /// # Example
    /// ```
    /// # use containerregistry_auth::challenge::Challenge;
    /// # use http::HeaderValue;
    /// let header = HeaderValue::from_static(
    ///     r#"Bearer realm="https://x/oauth2/token",service="x.io",scope="registry:catalog:*""#);
    /// let challenge = Challenge::parse(Some(&header)).unwrap();
    /// assert_eq!(challenge.service, "x.io");
    /// assert_eq!(challenge.scope, "registry:catalog:*");
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if `header` is `None`, if it is not a `Bearer` challenge, or if it
    /// lacks the `service` or `scope` parameters.
    pub fn parse(header: Option<&HeaderValue>) -> Result<Self> {
        let header = header.ok_or_else(Error::challenge_missing)?;
        let value = header.to_str().map_err(|_| {
            Error::challenge_malformed(
                String::from_utf8_lossy(header.as_bytes()),
                "the header value is not printable ASCII",
            )
        })?;

        let trimmed = value.trim_start();
        let (scheme, params) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            return Err(Error::challenge_malformed(value, "not a Bearer challenge"));
        }

        let mut realm = None;
        let mut service = None;
        let mut scope = None;
        for (key, v) in parse_params(params) {
            if key.eq_ignore_ascii_case("realm") {
                realm = Some(v);
            } else if key.eq_ignore_ascii_case("service") {
                service = Some(v);
            } else if key.eq_ignore_ascii_case("scope") {
                scope = Some(v);
            }
        }

        let service = service
            .ok_or_else(|| Error::challenge_malformed(value, "missing `service` parameter"))?;
        let scope = scope
            .ok_or_else(|| Error::challenge_malformed(value, "missing `scope` parameter"))?;
        Ok(Self {
            realm,
            service,
            scope,
        })
    }

    /// Parses the `WWW-Authenticate` header of `response`.
    pub fn from_response(response: &reqwest::Response) -> Result<Self> {
        Self::parse(response.headers().get(WWW_AUTHENTICATE))
    }
}

// Splits `key="value"` pairs separated by commas. Quoted values may contain
// commas and backslash escapes. Segments without `=` are ignored.
fn parse_params(input: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = input.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace() || *c == ',').is_some() {}
        if chars.peek().is_none() {
            return params;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| *c != '=' && *c != ',') {
            key.push(c);
        }
        if chars.next_if_eq(&'=').is_none() {
            continue;
        }

        let mut value = String::new();
        if chars.next_if_eq(&'"').is_some() {
            while let Some(c) = chars.next() {
                match c {
                    '"' => break,
                    '\\' => value.extend(chars.next()),
                    c => value.push(c),
                }
            }
        } else {
            while let Some(c) = chars.next_if(|c| *c != ',') {
                value.push(c);
            }
            value = value.trim_end().to_string();
        }
        params.push((key.trim().to_string(), value));
    }
}

/// Creates the unauthenticated probe for `request`.
///
/// The probe has the same method, URL, headers and timeout as `request`, but
/// no body and no `Content-Type` or `Content-Length` headers. Sending the
/// probe never has the side effects of the original request body.
pub fn probe_request(request: &reqwest::Request) -> reqwest::Request {
    let mut probe = reqwest::Request::new(request.method().clone(), request.url().clone());
    *probe.headers_mut() = request.headers().clone();
    probe.headers_mut().remove(CONTENT_TYPE);
    probe.headers_mut().remove(CONTENT_LENGTH);
    *probe.timeout_mut() = request.timeout().copied();
    *probe.version_mut() = request.version();
    probe
}
