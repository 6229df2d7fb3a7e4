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

//! Errors created during policy construction.

use crate::cloud::CloudEnvironment;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for [AuthenticationPolicy] builders.
///
/// Applications rarely need to create instances of this error type. The
/// exception might be when testing application code, where the application is
/// mocking a client library behavior.
///
/// [AuthenticationPolicy]: crate::policy::AuthenticationPolicy
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// The requested cloud environment is not present in the configuration.
    pub fn is_unknown_environment(&self) -> bool {
        matches!(self.0, ErrorKind::UnknownEnvironment(_))
    }

    /// The registry endpoint is not a valid `http` or `https` URL.
    pub fn is_invalid_endpoint(&self) -> bool {
        matches!(self.0, ErrorKind::InvalidEndpoint(_))
    }

    /// A required field was missing from the builder.
    pub fn is_missing_field(&self) -> bool {
        matches!(self.0, ErrorKind::MissingField(_))
    }

    pub(crate) fn unknown_environment(environment: CloudEnvironment) -> Error {
        Error(ErrorKind::UnknownEnvironment(environment))
    }

    pub(crate) fn invalid_endpoint<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::InvalidEndpoint(source.into()))
    }

    pub(crate) fn missing_field(field: &'static str) -> Error {
        Error(ErrorKind::MissingField(field))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("the cloud environment {0} is not configured")]
    UnknownEnvironment(CloudEnvironment),
    #[error("invalid registry endpoint: {0}")]
    InvalidEndpoint(#[source] BoxError),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
