use anyhow::{Context, Result};
use ci_dispatch::cli::commands::{PlanCommand, RunCommand, ValidateCommand};
use ci_dispatch::cli::output::*;
use ci_dispatch::cli::{Cli, Command};
use ci_dispatch::core::{AliasMapLoader, CommitContext, Stage, ALL_KEY};
use ci_dispatch::dispatch::{Dispatcher, Outcome};
use ci_dispatch::error::DispatchError;
use ci_dispatch::execution::{LocalBackend, Provider, RemoteBackend, RemoteConfig};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let result = match &cli.command {
        Command::Run(cmd) => run(cmd).await,
        Command::Plan(cmd) => plan(cmd).await,
        Command::Validate(cmd) => validate(cmd),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("{} {}", CROSS, style(&e).red());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(cmd: &RunCommand) -> std::result::Result<(), DispatchError> {
    // Cheap check first, so a bad provider fails before any resolution work
    let provider = Provider::parse(&cmd.provider)?;

    let dispatcher = Dispatcher::new();
    let maps = dispatcher.load_maps(&cmd.maps.components, &cmd.maps.stages)?;
    let ctx = CommitContext::from_env_or_git(
        cmd.commit.message.clone(),
        cmd.commit.sha.clone(),
        cmd.commit.git_ref.clone(),
    )
    .await;

    println!(
        "{} Dispatching {} on {}",
        ROCKET,
        style(short_sha(&ctx.sha)).dim(),
        style(&ctx.git_ref).dim()
    );

    let outcome = match provider {
        Provider::Gitea => {
            let backend = LocalBackend::new(&cmd.root);
            dispatcher.dispatch(&maps, &ctx, &backend).await?
        }
        Provider::Jenkins => {
            let config = RemoteConfig::from_parts(
                cmd.jenkins.jenkins_url.clone(),
                cmd.jenkins.jenkins_job.clone(),
                cmd.jenkins.jenkins_user.clone(),
                cmd.jenkins.jenkins_token.clone(),
            )?;
            let backend = RemoteBackend::new(config);
            dispatcher.dispatch(&maps, &ctx, &backend).await?
        }
    };

    match outcome {
        Outcome::Skipped => {
            println!("{} No component matched; nothing to do", INFO);
        }
        Outcome::Dispatched { component, plan } => {
            println!(
                "{} {} completed {}",
                CHECK,
                format_component(&component),
                format_plan(&plan)
            );
        }
    }

    Ok(())
}

async fn plan(cmd: &PlanCommand) -> std::result::Result<(), DispatchError> {
    let dispatcher = Dispatcher::new();
    let maps = dispatcher.load_maps(&cmd.maps.components, &cmd.maps.stages)?;
    let ctx = CommitContext::from_env_or_git(
        cmd.commit.message.clone(),
        cmd.commit.sha.clone(),
        cmd.commit.git_ref.clone(),
    )
    .await;

    match dispatcher.resolve(&maps, &ctx)? {
        None => {
            if cmd.json {
                println!("{:#}", serde_json::json!({ "matched": false }));
            } else {
                println!("{} No component matched; nothing to do", INFO);
            }
        }
        Some((component, plan)) => {
            if cmd.json {
                let data = serde_json::json!({
                    "matched": true,
                    "component": component,
                    "plan": plan.stages(),
                });
                println!("{:#}", data);
            } else {
                println!("{} Component: {}", INFO, format_component(&component));
                println!("{} Plan: {}", INFO, format_plan(&plan));
            }
        }
    }

    Ok(())
}

fn validate(cmd: &ValidateCommand) -> std::result::Result<(), DispatchError> {
    let loader = AliasMapLoader::new();
    let maps = loader.load(&cmd.maps.components, &cmd.maps.stages)?;

    if cmd.json {
        let components: Vec<_> = maps.components.iter().collect();
        let mut stage_keys: Vec<&str> = maps.stages.keys().collect();
        stage_keys.sort_unstable();
        let data = serde_json::json!({
            "components": components,
            "stage_keys": stage_keys,
        });
        println!("{:#}", data);
        return Ok(());
    }

    println!("{} Alias maps are valid", CHECK);
    println!("  Components: {}", style(maps.components.len()).cyan());
    for component in maps.components.iter() {
        if component.path.is_empty() {
            println!(
                "    {} {} has no path and cannot be dispatched",
                WARN,
                style(&component.id).bold()
            );
        } else {
            println!(
                "    {} → {} ({} aliases)",
                style(&component.id).bold(),
                component.path,
                component.aliases.len()
            );
        }
    }

    let mut stage_keys: Vec<&str> = maps.stages.keys().collect();
    stage_keys.sort_unstable();
    println!("  Stage keys: {}", style(stage_keys.len()).cyan());
    for key in stage_keys {
        if Stage::from_key(key).is_none() && key != ALL_KEY {
            println!(
                "    {} {} (retained, never consulted)",
                WARN,
                style(key).yellow()
            );
        } else {
            println!("    {} ({} aliases)", key, maps.stages.aliases(key).len());
        }
    }

    Ok(())
}
