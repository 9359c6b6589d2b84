//! Remote backend - triggers parameterized Jenkins builds

use crate::core::{CommitContext, Component, Stage};
use crate::error::DispatchError;
use crate::execution::ExecutionBackend;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Connection settings for the remote build system
///
/// All four values are required before any network call is made.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub job: String,
    pub user: String,
    pub token: String,
}

impl RemoteConfig {
    /// Assemble the config, failing on any missing value
    pub fn from_parts(
        endpoint: Option<String>,
        job: Option<String>,
        user: Option<String>,
        token: Option<String>,
    ) -> Result<Self, DispatchError> {
        Ok(Self {
            endpoint: require(endpoint, "JENKINS_URL")?,
            job: require(job, "JENKINS_JOB")?,
            user: require(user, "JENKINS_USER")?,
            token: require(token, "JENKINS_TOKEN")?,
        })
    }
}

fn require(value: Option<String>, name: &str) -> Result<String, DispatchError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DispatchError::ConfigMissing(name.to_string()))
}

/// CSRF protection token issued by Jenkins
#[derive(Debug, Clone, Deserialize)]
struct Crumb {
    #[serde(rename = "crumbRequestField")]
    request_field: String,
    crumb: String,
}

/// Triggers one remote build per stage via `buildWithParameters`
pub struct RemoteBackend {
    config: RemoteConfig,
    http: reqwest::Client,
}

impl RemoteBackend {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn trigger_url(&self) -> String {
        format!(
            "{}/job/{}/buildWithParameters",
            self.config.endpoint.trim_end_matches('/'),
            self.config.job
        )
    }

    fn crumb_url(&self) -> String {
        format!(
            "{}/crumbIssuer/api/json",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    /// Fetch a CSRF crumb, absorbing every failure
    ///
    /// Jenkins instances without CSRF protection have no crumb issuer;
    /// the trigger is attempted either way, so absence is an expected
    /// outcome here, not an error.
    async fn fetch_crumb(&self) -> Option<Crumb> {
        let response = self
            .http
            .get(self.crumb_url())
            .basic_auth(&self.config.user, Some(&self.config.token))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<Crumb>().await {
                Ok(crumb) => {
                    debug!(field = %crumb.request_field, "obtained CSRF crumb");
                    Some(crumb)
                }
                Err(e) => {
                    warn!("crumb response malformed, proceeding without: {}", e);
                    None
                }
            },
            Ok(resp) => {
                warn!(status = %resp.status(), "crumb issuer refused, proceeding without");
                None
            }
            Err(e) => {
                warn!("crumb fetch failed, proceeding without: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl ExecutionBackend for RemoteBackend {
    async fn run_stage(
        &self,
        component: &Component,
        stage: Stage,
        ctx: &CommitContext,
    ) -> Result<(), DispatchError> {
        let params = [
            ("component_id", component.id.as_str()),
            ("component_path", component.path.as_str()),
            ("action", stage.key()),
            ("git_sha", ctx.sha.as_str()),
            ("git_ref", ctx.git_ref.as_str()),
            ("commit_message", ctx.message.as_str()),
        ];

        let mut request = self
            .http
            .post(self.trigger_url())
            .basic_auth(&self.config.user, Some(&self.config.token))
            .form(&params);

        if let Some(crumb) = self.fetch_crumb().await {
            request = request.header(crumb.request_field.as_str(), crumb.crumb.as_str());
        }

        let response = request.send().await.map_err(|e| DispatchError::StageFailed {
            stage,
            code: 1,
            reason: format!("build trigger request failed: {}", e),
        })?;

        if response.status().is_success() {
            debug!(stage = %stage, status = %response.status(), "build triggered");
            Ok(())
        } else {
            Err(DispatchError::StageFailed {
                stage,
                code: 1,
                reason: format!("build trigger returned {}", response.status()),
            })
        }
    }
}
