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

use crate::build_errors::Error as BuildError;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const PUBLIC_AUDIENCE: &str = "https://containerregistry.azure.net";
const PUBLIC_ENDPOINT: &str = ".azurecr.io";
const GOVERNMENT_AUDIENCE: &str = "https://containerregistry.azure.us";
const GOVERNMENT_ENDPOINT: &str = ".azurecr.us";
const CHINA_AUDIENCE: &str = "https://containerregistry.azure.cn";
const CHINA_ENDPOINT: &str = ".azurecr.cn";

/// The cloud environments recognized by this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CloudEnvironment {
    /// The public cloud.
    #[default]
    Public,
    /// The sovereign cloud for government workloads.
    Government,
    /// The sovereign cloud operated in China.
    China,
}

impl Display for CloudEnvironment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CloudEnvironment::Public => "public",
            CloudEnvironment::Government => "government",
            CloudEnvironment::China => "china",
        };
        f.write_str(name)
    }
}

/// The error returned when parsing an unrecognized cloud environment name.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("unrecognized cloud environment name: {0}")]
pub struct ParseCloudEnvironmentError(String);

impl FromStr for CloudEnvironment {
    type Err = ParseCloudEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" | "azurepublic" | "azurecloud" => Ok(CloudEnvironment::Public),
            "government" | "usgovernment" | "azuregovernment" | "azureusgovernment" => {
                Ok(CloudEnvironment::Government)
            }
            "china" | "azurechina" | "azurechinacloud" => Ok(CloudEnvironment::China),
            _ => Err(ParseCloudEnvironmentError(s.to_string())),
        }
    }
}

/// The container registry settings for one cloud environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfiguration {
    audience: String,
    endpoint: String,
}

impl ServiceConfiguration {
    /// Creates a new service configuration.
    ///
    /// # Arguments
    /// * `audience` - the identity-provider audience for the registry. The
    ///   policy requests tokens for the `<audience>/.default` scope.
    /// * `endpoint` - the suffix shared by the registry login servers in this
    ///   environment, for example `.azurecr.io`.
    pub fn new<A: Into<String>, E: Into<String>>(audience: A, endpoint: E) -> Self {
        Self {
            audience: audience.into(),
            endpoint: endpoint.into(),
        }
    }

    /// The identity-provider audience for the registry.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// The login server suffix.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the URL of the registry named `name` in this environment.
    ///
    /// # Example
    /// ```
    /// # use containerregistry_auth::cloud::{CloudConfiguration, CloudEnvironment};
    /// let config = CloudConfiguration::default();
    /// let service = config.service(CloudEnvironment::Public).unwrap();
    /// assert_eq!(service.registry_url("myregistry"), "https://myregistry.azurecr.io");
    /// ```
    pub fn registry_url(&self, name: &str) -> String {
        format!("https://{name}{}", self.endpoint)
    }

    /// The scopes requested from the identity provider.
    pub(crate) fn scopes(&self) -> Vec<String> {
        vec![format!("{}/.default", self.audience.trim_end_matches('/'))]
    }
}

/// The set of cloud environments available to a policy.
///
/// The default configuration includes all the [CloudEnvironment] variants.
/// Applications running in private clouds, or tests, may start from
/// [CloudConfiguration::empty] and add only the environments they need.
///
/// # Example
/// ```
/// # use containerregistry_auth::cloud::*;
/// let config = CloudConfiguration::empty().with_service(
///     CloudEnvironment::Public,
///     ServiceConfiguration::new("https://registry.example.com", ".example.com"),
/// );
/// assert!(config.service(CloudEnvironment::Public).is_ok());
/// assert!(config.service(CloudEnvironment::China).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CloudConfiguration {
    services: HashMap<CloudEnvironment, ServiceConfiguration>,
}

impl Default for CloudConfiguration {
    fn default() -> Self {
        Self::empty()
            .with_service(
                CloudEnvironment::Public,
                ServiceConfiguration::new(PUBLIC_AUDIENCE, PUBLIC_ENDPOINT),
            )
            .with_service(
                CloudEnvironment::Government,
                ServiceConfiguration::new(GOVERNMENT_AUDIENCE, GOVERNMENT_ENDPOINT),
            )
            .with_service(
                CloudEnvironment::China,
                ServiceConfiguration::new(CHINA_AUDIENCE, CHINA_ENDPOINT),
            )
    }
}

impl CloudConfiguration {
    /// Creates a configuration without any environments.
    pub fn empty() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Adds, or replaces, the settings for `environment`.
    pub fn with_service(
        mut self,
        environment: CloudEnvironment,
        service: ServiceConfiguration,
    ) -> Self {
        self.services.insert(environment, service);
        self
    }

    /// Returns the settings for `environment`.
    ///
    /// # Errors
    ///
    /// Returns an error if `environment` is not part of this configuration.
    pub fn service(
        &self,
        environment: CloudEnvironment,
    ) -> Result<&ServiceConfiguration, BuildError> {
        self.services
            .get(&environment)
            .ok_or_else(|| BuildError::unknown_environment(environment))
    }
}
