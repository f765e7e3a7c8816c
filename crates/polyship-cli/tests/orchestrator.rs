//! Halt-on-first-failure behavior of the orchestrator, with a faked engine.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use polyship_bundler::{BuildExecutor, BuildResult, BundleEngine, Error, Minifier, with_banner};
use polyship_cli::{Orchestrator, RunOutcome, Stage};
use polyship_config::{BuildContext, ModuleFormat, ResolvedConfig, TargetSpec};
use tempfile::TempDir;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Returns fixed code, failing for one target name.
struct ScriptedEngine {
    fail_on: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedEngine {
    fn new(fail_on: Option<&str>) -> Self {
        Self {
            fail_on: fail_on.map(str::to_string),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BundleEngine for ScriptedEngine {
    async fn bundle(&self, config: &ResolvedConfig) -> polyship_bundler::Result<String> {
        self.calls.lock().unwrap().push(config.source_name.clone());
        if self.fail_on.as_deref() == Some(config.source_name.as_str()) {
            return Err(Error::Bundle {
                target: config.source_name.clone(),
                message: "Could not resolve './missing'".to_string(),
            });
        }
        Ok(with_banner(
            config.output.banner.as_deref(),
            format!("var {} = 1;\n", config.output.module_name),
        ))
    }
}

struct Collapse;

impl Minifier for Collapse {
    fn minify(&self, code: &str, _format: ModuleFormat) -> anyhow::Result<String> {
        Ok(code.split_whitespace().collect())
    }
}

fn targets() -> Vec<TargetSpec> {
    vec![
        TargetSpec::new("cjs", "src/index.js", "dist/lib.common.js", ModuleFormat::Cjs),
        TargetSpec::new("umd-dev", "src/index.js", "dist/lib.js", ModuleFormat::Umd),
        TargetSpec::new("umd-prod", "src/index.js", "dist/lib.min.js", ModuleFormat::Umd),
    ]
}

fn orchestrator(root: &Path, engine: Arc<ScriptedEngine>) -> Orchestrator {
    let executor = BuildExecutor::new(engine, Arc::new(Collapse));
    Orchestrator::new(executor, BuildContext::new("1.0.0", root).module_name("Lib"))
}

#[tokio::test]
async fn builds_every_target_in_order() {
    let dir = TempDir::new().unwrap();
    let engine = Arc::new(ScriptedEngine::new(None));
    let specs = targets();
    let selected: Vec<&TargetSpec> = specs.iter().collect();
    let reported = Mutex::new(Vec::new());

    let outcome = orchestrator(dir.path(), engine.clone())
        .run(&selected, &|result: &BuildResult| {
            reported.lock().unwrap().push(result.source_name.clone())
        })
        .await;

    assert!(outcome.is_success());
    assert_eq!(engine.calls(), ["cjs", "umd-dev", "umd-prod"]);
    assert_eq!(*reported.lock().unwrap(), ["cjs", "umd-dev", "umd-prod"]);

    let results = outcome.into_result().unwrap();
    assert_eq!(results[0].compressed_bytes, None);
    assert_eq!(results[1].compressed_bytes, None);
    assert!(results[2].compressed_bytes.is_some());
    assert_eq!(
        fs::read_to_string(dir.path().join("dist/lib.min.js")).unwrap(),
        "varLib=1;"
    );
}

#[tokio::test]
async fn first_failure_stops_the_run() {
    let dir = TempDir::new().unwrap();
    let engine = Arc::new(ScriptedEngine::new(Some("umd-dev")));
    let specs = targets();
    let selected: Vec<&TargetSpec> = specs.iter().collect();

    let outcome = orchestrator(dir.path(), engine.clone())
        .run(&selected, &|_: &BuildResult| {})
        .await;

    // the third target is never attempted
    assert_eq!(engine.calls(), ["cjs", "umd-dev"]);

    match outcome {
        RunOutcome::Aborted {
            completed,
            failure,
            skipped,
        } => {
            assert_eq!(completed.len(), 1);
            assert_eq!(completed[0].source_name, "cjs");
            assert_eq!(failure.target, "umd-dev");
            assert_eq!(failure.error.stage(), Stage::Build);
            assert_eq!(skipped, ["umd-prod"]);
        }
        other => panic!("expected abort, got {other:?}"),
    }

    assert!(dir.path().join("dist/lib.common.js").exists());
    assert!(!dir.path().join("dist/lib.js").exists());
    assert!(!dir.path().join("dist/lib.min.js").exists());
}

#[tokio::test]
async fn compile_failure_stops_before_bundling() {
    let dir = TempDir::new().unwrap();
    let engine = Arc::new(ScriptedEngine::new(None));
    let mut specs = targets();
    specs[0].entry = String::new();
    let selected: Vec<&TargetSpec> = specs.iter().collect();

    let outcome = orchestrator(dir.path(), engine.clone())
        .run(&selected, &|_: &BuildResult| {})
        .await;

    assert!(!outcome.is_success());
    assert!(outcome.completed().is_empty());
    assert!(engine.calls().is_empty());

    let failure = outcome.into_result().unwrap_err();
    assert_eq!(failure.target, "cjs");
    assert_eq!(failure.error.stage(), Stage::Compile);
}

#[tokio::test]
async fn single_selected_target() {
    let dir = TempDir::new().unwrap();
    let engine = Arc::new(ScriptedEngine::new(None));
    let specs = targets();

    let outcome = orchestrator(dir.path(), engine.clone())
        .run(&[&specs[2]], &|_: &BuildResult| {})
        .await;

    assert_eq!(engine.calls(), ["umd-prod"]);
    assert_eq!(outcome.completed().len(), 1);
}

/// Counts events at ERROR level.
struct ErrorCount(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCount {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[tokio::test]
async fn abort_is_left_to_the_caller_to_report() {
    let errors = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCount(errors.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    let dir = TempDir::new().unwrap();
    let engine = Arc::new(ScriptedEngine::new(Some("cjs")));
    let specs = targets();
    let selected: Vec<&TargetSpec> = specs.iter().collect();

    let outcome = orchestrator(dir.path(), engine)
        .run(&selected, &|_: &BuildResult| {})
        .await;

    assert!(!outcome.is_success());
    assert_eq!(errors.load(Ordering::SeqCst), 0);
}
