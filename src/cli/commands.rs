//! CLI command definitions

use clap::Args;
use std::path::PathBuf;

/// Alias map file locations
#[derive(Debug, Args, Clone)]
pub struct MapArgs {
    /// Path to the component map
    #[arg(long, default_value = "ci/components.map")]
    pub components: PathBuf,

    /// Path to the stage map
    #[arg(long, default_value = "ci/stages.map")]
    pub stages: PathBuf,
}

/// Commit inputs, each falling back to git HEAD when unset
#[derive(Debug, Args, Clone)]
pub struct CommitArgs {
    /// Commit message to dispatch on
    #[arg(long, env = "COMMIT_MESSAGE")]
    pub message: Option<String>,

    /// Commit SHA
    #[arg(long, env = "GIT_SHA")]
    pub sha: Option<String>,

    /// Ref or branch name
    #[arg(long = "ref", env = "GIT_REF")]
    pub git_ref: Option<String>,
}

/// Remote build-system connection values (all required for jenkins)
#[derive(Debug, Args, Clone)]
pub struct JenkinsArgs {
    /// Jenkins endpoint URL
    #[arg(long, env = "JENKINS_URL")]
    pub jenkins_url: Option<String>,

    /// Jenkins job name
    #[arg(long, env = "JENKINS_JOB")]
    pub jenkins_job: Option<String>,

    /// Jenkins user for basic auth
    #[arg(long, env = "JENKINS_USER")]
    pub jenkins_user: Option<String>,

    /// Jenkins API token for basic auth
    #[arg(long, env = "JENKINS_TOKEN")]
    pub jenkins_token: Option<String>,
}

/// Resolve the commit and execute the stage plan
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    #[command(flatten)]
    pub maps: MapArgs,

    #[command(flatten)]
    pub commit: CommitArgs,

    /// Execution backend (gitea = local scripts, jenkins = remote trigger)
    #[arg(long, env = "CI_PROVIDER", default_value = "gitea")]
    pub provider: String,

    /// Workspace root component paths are resolved against
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    #[command(flatten)]
    pub jenkins: JenkinsArgs,
}

/// Resolve the commit and print the plan without executing
#[derive(Debug, Args, Clone)]
pub struct PlanCommand {
    #[command(flatten)]
    pub maps: MapArgs,

    #[command(flatten)]
    pub commit: CommitArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Load both alias maps and report what was parsed
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub maps: MapArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
