//! Runs the registered cases and the end-to-end scenarios against a live
//! GraphQL endpoint.
//!
//! Exits non-zero when any case or scenario fails.

#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use courier_core::logging::init_subscriber;
use courier_harness::{DocumentRegistry, Lifecycle, ScenarioKind, ScenarioRunner, catalog};
use courier_settings::load_settings;
use futures::future::join_all;

#[derive(Debug, Parser)]
#[command(
    name = "courier-scenarios",
    about = "Integration scenarios for the courier GraphQL API"
)]
struct Args {
    /// GraphQL endpoint (overrides `GRAPHQL_ENDPOINT`).
    #[arg(long)]
    endpoint: Option<String>,

    /// Per-request timeout in milliseconds (overrides `COURIER_REQUEST_TIMEOUT_MS`).
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Directory of recorded snapshots (overrides `COURIER_SNAPSHOT_DIR`).
    ///
    /// Defaults to the `snapshots/` directory of the source tree this binary
    /// was built from.
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Do not log request/response exchanges.
    #[arg(long, default_value_t = false)]
    quiet: bool,

    /// List case and scenario names, then exit.
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Run only the case or scenario with this name.
    #[arg(long)]
    only: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings().context("invalid harness settings")?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        settings.request_timeout_ms = timeout_ms;
    }
    if let Some(dir) = args.snapshot_dir {
        settings.snapshot_dir = Some(dir);
    }
    if args.quiet {
        settings.debug = false;
    }
    settings.validate().context("invalid command-line override")?;

    init_subscriber(&settings.log_level);

    let lifecycle = Lifecycle::new(&settings, DocumentRegistry::builtin())
        .context("failed to build lifecycle helpers")?;
    let mut runner = ScenarioRunner::new(lifecycle.clone(), &settings);
    catalog::default_cases(&mut runner).context("failed to register cases")?;

    if args.list {
        for case in runner.cases() {
            println!("case      {}", case.name);
        }
        for kind in ScenarioKind::ALL {
            println!("scenario  {kind}");
        }
        return Ok(());
    }

    let only = args.only.as_deref();
    runner
        .check_snapshot_dir(only)
        .context("snapshot cases cannot run")?;
    let mut failures = 0usize;
    let mut ran = 0usize;

    for case in runner.cases().iter().filter(|c| only.is_none_or(|n| n == c.name)) {
        ran += 1;
        match runner.run_case(case).await {
            Ok(outcome) => println!("PASS  {} ({} ms)", case.label, outcome.elapsed.as_millis()),
            Err(e) => {
                failures += 1;
                println!("FAIL  {}: {e}", case.label);
            }
        }
    }

    let kinds: Vec<ScenarioKind> = ScenarioKind::ALL
        .into_iter()
        .filter(|k| only.is_none_or(|n| n == k.name()))
        .collect();
    ran += kinds.len();
    let results = join_all(kinds.iter().map(|kind| kind.run(&lifecycle))).await;
    for (kind, result) in kinds.iter().zip(results) {
        match result {
            Ok(report) => println!(
                "PASS  scenario {kind} ({} steps, run {})",
                report.steps.len(),
                report.run_id
            ),
            Err(e) => {
                failures += 1;
                println!("FAIL  scenario {kind}: {e}");
            }
        }
    }

    if ran == 0 {
        anyhow::bail!("no case or scenario named `{}`", only.unwrap_or_default());
    }
    println!("{} passed, {failures} failed", ran - failures);
    if failures > 0 {
        anyhow::bail!("{failures} of {ran} failed");
    }
    Ok(())
}
