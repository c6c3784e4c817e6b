//! Declarative registration and execution of single-request cases.
//!
//! A case is a request document, a name, optional variables and a
//! [`Verification`] chosen at registration:
//!
//! - [`Verification::Snapshot`] compares the response data against the
//!   recorded reference output named after the case
//! - [`Verification::Callback`] hands the response to a [`PostProcess`]
//!   (lookup, delete, both, or a custom [`PostProcessor`]) whose result must
//!   be truthy
//!
//! Both modes first require the response to carry no top-level errors.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use courier_client::ClientError;
use courier_core::json::is_truthy;
use courier_core::logging::log_exchange;
use courier_settings::HarnessSettings;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::{HarnessError, Result};
use crate::lifecycle::Lifecycle;
use crate::registry::DocumentKind;

/// Custom post-processing of a case response.
#[async_trait]
pub trait PostProcessor: Send + Sync {
    /// Inspect `data` returned by case `name`; the result must be truthy.
    async fn process(&self, lifecycle: &Lifecycle, name: &str, data: &Value) -> Result<Value>;
}

/// What to do with a case response in callback mode.
#[derive(Clone)]
pub enum PostProcess {
    /// Look the created record up again.
    Lookup,
    /// Delete the created record.
    Delete,
    /// Look the created record up, then delete it.
    LookupThenDelete,
    /// Run a custom processor.
    Custom(Arc<dyn PostProcessor>),
}

impl PostProcess {
    async fn apply(&self, lifecycle: &Lifecycle, name: &str, data: &Value) -> Result<Value> {
        match self {
            Self::Lookup => lifecycle.lookup_and_verify(name, data).await,
            Self::Delete => lifecycle
                .delete_and_verify_cascade(name, data)
                .await
                .map(Value::String),
            Self::LookupThenDelete => lifecycle
                .lookup_then_delete(name, data)
                .await
                .map(Value::String),
            Self::Custom(processor) => processor.process(lifecycle, name, data).await,
        }
    }
}

impl fmt::Debug for PostProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lookup => f.write_str("Lookup"),
            Self::Delete => f.write_str("Delete"),
            Self::LookupThenDelete => f.write_str("LookupThenDelete"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How a case's response is verified.
#[derive(Debug, Clone)]
pub enum Verification {
    /// Compare against the recorded reference output.
    Snapshot,
    /// Run a post-process and require a truthy result.
    Callback(PostProcess),
}

/// One registered case.
#[derive(Debug, Clone)]
pub struct ScenarioCase {
    /// Case name; for callback cases, the `Create<Entity>` operation.
    pub name: String,
    /// `"Mutation: <name>"` or `"Query: <name>"`.
    pub label: String,
    /// The request document.
    pub document: Arc<str>,
    /// Request variables.
    pub variables: Option<Value>,
    /// Verification mode.
    pub verification: Verification,
}

/// Result of one passed case.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    /// Case label.
    pub label: String,
    /// Response data.
    pub data: Value,
    /// Post-process result; `None` in snapshot mode.
    pub result: Option<Value>,
    /// Wall time of the case.
    pub elapsed: Duration,
}

/// Outcome of [`ScenarioRunner::run_all`].
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Per-case result, in registration order.
    pub results: Vec<(String, Result<CaseOutcome>)>,
}

impl RunSummary {
    /// Number of passed cases.
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_ok()).count()
    }

    /// Number of failed cases.
    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    /// Whether every case passed.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Registrar and executor of [`ScenarioCase`]s.
#[derive(Debug)]
pub struct ScenarioRunner {
    lifecycle: Lifecycle,
    snapshot_dir: PathBuf,
    cases: Vec<ScenarioCase>,
}

impl ScenarioRunner {
    /// A runner whose snapshot directory comes from `settings`.
    ///
    /// Without `COURIER_SNAPSHOT_DIR` it falls back to the `snapshots/`
    /// directory of this crate's source tree, resolved at build time. An
    /// installed binary run elsewhere should set the variable.
    pub fn new(lifecycle: Lifecycle, settings: &HarnessSettings) -> Self {
        let snapshot_dir = settings
            .snapshot_dir
            .clone()
            .unwrap_or_else(default_snapshot_dir);
        Self {
            lifecycle,
            snapshot_dir,
            cases: Vec::new(),
        }
    }

    /// The lifecycle helpers used by callbacks.
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Directory holding the reference outputs.
    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    /// Fail unless the snapshot directory exists, when any case selected by
    /// `only` (all of them when `None`) is verified by snapshot.
    pub fn check_snapshot_dir(&self, only: Option<&str>) -> Result<()> {
        let needed = self
            .cases
            .iter()
            .filter(|c| only.is_none_or(|n| n == c.name))
            .any(|c| matches!(c.verification, Verification::Snapshot));
        if needed && !self.snapshot_dir.is_dir() {
            return Err(HarnessError::MissingSnapshotDir {
                path: self.snapshot_dir.clone(),
            });
        }
        Ok(())
    }

    /// Registered cases, in order.
    pub fn cases(&self) -> &[ScenarioCase] {
        &self.cases
    }

    /// Register a case. Without `post_process` the case runs in snapshot mode.
    pub fn register(
        &mut self,
        document: impl Into<Arc<str>>,
        name: &str,
        variables: Option<Value>,
        post_process: Option<PostProcess>,
    ) -> &mut Self {
        let document = document.into();
        let label = format!("{}: {name}", DocumentKind::classify(&document));
        let verification = post_process.map_or(Verification::Snapshot, Verification::Callback);
        self.cases.push(ScenarioCase {
            name: name.to_string(),
            label,
            document,
            variables,
            verification,
        });
        self
    }

    /// Run the case registered as `name`.
    pub async fn run_named(&self, name: &str) -> Result<CaseOutcome> {
        let case = self
            .cases
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| HarnessError::UnknownCase {
                name: name.to_string(),
            })?;
        self.run_case(case).await
    }

    /// Run one case.
    pub async fn run_case(&self, case: &ScenarioCase) -> Result<CaseOutcome> {
        let started = Instant::now();
        let response = self
            .lifecycle
            .client()
            .send(&case.document, case.variables.as_ref())
            .await?;
        log_exchange(
            self.lifecycle.debug(),
            &case.label,
            case.variables.as_ref(),
            response.data(),
        );

        if response.has_errors() {
            return Err(ClientError::GraphQl {
                errors: response.errors().to_vec(),
            }
            .into());
        }
        let data = response.data().clone();

        let result = match &case.verification {
            Verification::Snapshot => {
                self.assert_snapshot(&case.name, &data)?;
                None
            }
            Verification::Callback(post_process) => {
                let result = post_process.apply(&self.lifecycle, &case.name, &data).await?;
                if !is_truthy(&result) {
                    return Err(HarnessError::assertion(format!(
                        "{} post-process returned {result}",
                        case.label
                    )));
                }
                Some(result)
            }
        };

        Ok(CaseOutcome {
            label: case.label.clone(),
            data,
            result,
            elapsed: started.elapsed(),
        })
    }

    /// Run every case in registration order.
    pub async fn run_all(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for case in &self.cases {
            let result = self.run_case(case).await;
            match &result {
                Ok(outcome) => info!(label = %case.label, elapsed_ms = outcome.elapsed.as_millis(), "case passed"),
                Err(e) => warn!(label = %case.label, error = %e, "case failed"),
            }
            summary.results.push((case.label.clone(), result));
        }
        summary
    }

    fn assert_snapshot(&self, name: &str, data: &Value) -> Result<()> {
        let mut settings = insta::Settings::clone_current();
        settings.set_snapshot_path(&self.snapshot_dir);
        settings.set_prepend_module_to_snapshot(false);
        settings.set_omit_expression(true);

        catch_unwind(AssertUnwindSafe(|| {
            settings.bind(|| insta::assert_json_snapshot!(name, data));
        }))
        .map_err(|panic| HarnessError::Snapshot {
            name: name.to_string(),
            message: panic_message(panic.as_ref()),
        })
    }
}

/// `snapshots/` next to this crate's manifest on the build machine.
fn default_snapshot_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("snapshots")
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "snapshot assertion failed".to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
