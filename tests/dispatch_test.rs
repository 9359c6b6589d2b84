//! End-to-end dispatch tests against a temporary monorepo checkout

use ci_dispatch::core::{CommitContext, Stage};
use ci_dispatch::dispatch::{Dispatcher, Outcome};
use ci_dispatch::error::DispatchError;
use ci_dispatch::execution::LocalBackend;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const COMPONENT_MAP: &str = r#"
components:
  CPU:
    path: "hw/cpu"
    aliases: ["cpu", "core"]
  UART:
    path: "hw/uart"
    aliases: ["uart", "serial"]
  SOC_TOP:
    path: "hw/top"
    aliases: ["top"]
  FABRIC:
    path: "hw/fabric"
    aliases: ["top", "fabric"]
  MEM_CTRL:
    path: "hw/mem"
    aliases: ["memory"]
"#;

const STAGE_MAP: &str = r#"
stages:
  lint: ["lint", "style"]
  cdc: ["cdc"]
  vclp: ["vclp", "lowpower"]
  synth: ["synth", "synthesis"]
  formal: ["formal"]
  all: ["all", "everything"]
"#;

/// A throwaway checkout with alias maps and stage scripts for CPU
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("components.map"), COMPONENT_MAP).expect("write map");
        fs::write(dir.path().join("stages.map"), STAGE_MAP).expect("write map");

        // Every CPU stage script logs its stage name and succeeds
        for stage in Stage::ORDER {
            Self::write_script(
                dir.path(),
                "hw/cpu",
                stage,
                &format!("echo {} >> \"$LOG\"", stage.key()),
            );
        }

        Self { dir }
    }

    fn write_script(root: &Path, component_path: &str, stage: Stage, body: &str) {
        let script_dir = root.join(component_path).join("ci");
        fs::create_dir_all(&script_dir).expect("create script dir");
        let log = root.join("ran.log");
        fs::write(
            script_dir.join(stage.script_name()),
            format!("#!/bin/sh\nLOG=\"{}\"\n{}\n", log.display(), body),
        )
        .expect("write script");
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn ran(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("ran.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn dispatch_ctx(&self, message: &str) -> (Dispatcher, ci_dispatch::core::AliasMaps, CommitContext) {
        let dispatcher = Dispatcher::new();
        let maps = dispatcher
            .load_maps(
                &self.dir.path().join("components.map"),
                &self.dir.path().join("stages.map"),
            )
            .expect("maps should load");
        let ctx = CommitContext::new(message.to_string(), "0123456789abcdef".to_string(), "main".to_string());
        (dispatcher, maps, ctx)
    }
}

#[tokio::test]
async fn dispatches_matched_stages_in_priority_order() {
    let ws = Workspace::new();
    let (dispatcher, maps, ctx) = ws.dispatch_ctx("cpu: run synth and also lint");
    let backend = LocalBackend::new(ws.root());

    let outcome = dispatcher
        .dispatch(&maps, &ctx, &backend)
        .await
        .expect("dispatch should succeed");

    match outcome {
        Outcome::Dispatched { component, plan } => {
            assert_eq!(component.id, "CPU");
            assert_eq!(plan.stages(), &[Stage::Lint, Stage::Synth]);
        }
        Outcome::Skipped => panic!("expected a dispatch, got skip"),
    }
    assert_eq!(ws.ran(), ["lint", "synth"]);
}

#[tokio::test]
async fn all_keyword_runs_the_full_pipeline() {
    let ws = Workspace::new();
    let (dispatcher, maps, ctx) = ws.dispatch_ctx("core: rerun everything please");
    let backend = LocalBackend::new(ws.root());

    dispatcher
        .dispatch(&maps, &ctx, &backend)
        .await
        .expect("dispatch should succeed");

    assert_eq!(ws.ran(), ["lint", "cdc", "vclp", "synth", "formal"]);
}

#[tokio::test]
async fn unrelated_commit_is_a_clean_skip() {
    let ws = Workspace::new();
    let (dispatcher, maps, ctx) = ws.dispatch_ctx("docs: fix a typo in the readme");
    let backend = LocalBackend::new(ws.root());

    let outcome = dispatcher
        .dispatch(&maps, &ctx, &backend)
        .await
        .expect("skip must not be an error");

    assert_eq!(outcome, Outcome::Skipped);
    assert!(ws.ran().is_empty());
}

#[tokio::test]
async fn tag_fallback_selects_component_without_aliases_in_message() {
    let ws = Workspace::new();
    // "memory" never appears, and mem_ctrl is not an alias, so only the
    // CI[] tag can select MEM_CTRL
    Workspace::write_script(ws.root(), "hw/mem", Stage::Lint, "echo mem-lint >> \"$LOG\"");
    let (dispatcher, maps, ctx) = ws.dispatch_ctx("tweak timing margins CI[mem_ctrl] lint");
    let backend = LocalBackend::new(ws.root());

    let outcome = dispatcher
        .dispatch(&maps, &ctx, &backend)
        .await
        .expect("dispatch should succeed");

    assert!(matches!(
        outcome,
        Outcome::Dispatched { ref component, .. } if component.id == "MEM_CTRL"
    ));
    assert_eq!(ws.ran(), ["mem-lint"]);
}

#[tokio::test]
async fn ambiguous_component_aborts_before_execution() {
    let ws = Workspace::new();
    let (dispatcher, maps, ctx) = ws.dispatch_ctx("top: lint pass");
    let backend = LocalBackend::new(ws.root());

    let err = dispatcher
        .dispatch(&maps, &ctx, &backend)
        .await
        .expect_err("two components alias 'top'");

    match &err {
        DispatchError::AmbiguousComponent { ids } => {
            assert_eq!(ids, &["SOC_TOP".to_string(), "FABRIC".to_string()]);
        }
        other => panic!("expected AmbiguousComponent, got {:?}", other),
    }
    assert_eq!(err.exit_code(), 3);
    assert!(ws.ran().is_empty());
}

#[tokio::test]
async fn matched_component_without_stage_keyword_fails() {
    let ws = Workspace::new();
    let (dispatcher, maps, ctx) = ws.dispatch_ctx("cpu refactor, no pipeline keywords");
    let backend = LocalBackend::new(ws.root());

    let err = dispatcher
        .dispatch(&maps, &ctx, &backend)
        .await
        .expect_err("component matched but no stage did");

    assert!(matches!(err, DispatchError::NoStageMatched));
    assert_eq!(err.exit_code(), 5);
    assert!(ws.ran().is_empty());
}

#[tokio::test]
async fn failing_stage_stops_the_plan_and_propagates_its_code() {
    let ws = Workspace::new();
    // Make cdc fail; lint before it succeeds, synth after it must not run
    Workspace::write_script(
        ws.root(),
        "hw/cpu",
        Stage::Cdc,
        "echo cdc >> \"$LOG\"\nexit 9",
    );

    let (dispatcher, maps, ctx) = ws.dispatch_ctx("cpu: lint cdc synth");
    let backend = LocalBackend::new(ws.root());

    let err = dispatcher
        .dispatch(&maps, &ctx, &backend)
        .await
        .expect_err("cdc stage fails");

    assert!(matches!(err, DispatchError::StageFailed { code: 9, .. }));
    assert_eq!(err.exit_code(), 9);
    assert_eq!(ws.ran(), ["lint", "cdc"], "synth must never run");
}

#[tokio::test]
async fn dispatch_is_idempotent_across_passes() {
    let ws = Workspace::new();
    let (dispatcher, maps, ctx) = ws.dispatch_ctx("cpu: lint");

    let first = dispatcher.resolve(&maps, &ctx).expect("first pass");
    let second = dispatcher.resolve(&maps, &ctx).expect("second pass");
    assert_eq!(first, second);
}
