//! End-to-end business flows.
//!
//! Each scenario chains requests strictly in order (every step feeds the
//! next one's variables), asserts the relational invariants between what a
//! step created and what later lookups return, and finally deletes what it
//! created and checks that every dependent is gone.
//!
//! A scenario that fails part-way deletes the roots it created (standalone
//! sessions and threads) before returning the error, so a failed run leaves
//! nothing behind for the cascade to miss.

pub mod message;
pub mod session;
pub mod thread;

use std::fmt;

use courier_core::{CreateOperation, EntityKind};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::entities::{Session, Thread, decode_at, id_of};
use crate::errors::{Result, ensure, ensure_eq};
use crate::fixtures;
use crate::lifecycle::Lifecycle;
use crate::registry::DocumentKind;

/// What a finished scenario did.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: &'static str,
    /// Id tagging every log event of this run.
    pub run_id: Uuid,
    /// Step labels, in execution order.
    pub steps: Vec<String>,
}

/// The hand-written scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    /// Create a session, look it up twice, delete it.
    Session,
    /// Owner, thread, self-join, guest, lookups, thread delete.
    Thread,
    /// Thread flow plus a message sent by the owner and re-fetched.
    Message,
}

impl ScenarioKind {
    /// All scenarios.
    pub const ALL: [Self; 3] = [Self::Session, Self::Thread, Self::Message];

    /// Scenario name as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Thread => "thread",
            Self::Message => "message",
        }
    }

    /// Parse a scenario name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Run the scenario inside a `scenario` span carrying a fresh run id.
    pub async fn run(self, lifecycle: &Lifecycle) -> Result<ScenarioReport> {
        let run_id = Uuid::now_v7();
        let span = info_span!("scenario", name = self.name(), %run_id);
        async move {
            let mut ctx = ScenarioContext::new(lifecycle, self.title());
            let outcome = match self {
                Self::Session => session::create_lookup_delete(&mut ctx).await,
                Self::Thread => thread::ownership_and_membership(&mut ctx).await,
                Self::Message => message::send_and_refetch(&mut ctx).await,
            };
            if let Err(e) = outcome {
                ctx.clean_up().await;
                return Err(e);
            }
            info!(steps = ctx.steps.len(), "scenario passed");
            Ok(ScenarioReport {
                name: self.name(),
                run_id,
                steps: ctx.steps,
            })
        }
        .instrument(span)
        .await
    }

    fn title(self) -> &'static str {
        match self {
            Self::Session => "CreateSession",
            Self::Thread => "CreateThread",
            Self::Message => "CreateMessage",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record whose deletion removes everything created under it.
#[derive(Debug)]
struct Root {
    operation: &'static str,
    id: String,
    creation: Value,
}

/// Step runner shared by the scenarios; numbers and records every step.
#[derive(Debug)]
pub struct ScenarioContext<'a> {
    lifecycle: &'a Lifecycle,
    title: &'static str,
    steps: Vec<String>,
    roots: Vec<Root>,
}

impl<'a> ScenarioContext<'a> {
    /// A context labelling its steps `"<Kind>: <title> <n> - <operation>"`.
    pub fn new(lifecycle: &'a Lifecycle, title: &'static str) -> Self {
        Self {
            lifecycle,
            title,
            steps: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// The lifecycle helpers.
    pub fn lifecycle(&self) -> &'a Lifecycle {
        self.lifecycle
    }

    /// Labels of the steps run so far.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    fn label(&mut self, kind: DocumentKind, operation: &str, role: Option<&str>) -> String {
        let n = self.steps.len() + 1;
        let mut label = format!("{kind}: {} {n} - {operation}", self.title);
        if let Some(role) = role {
            label.push_str(" - ");
            label.push_str(role);
        }
        self.steps.push(label.clone());
        label
    }

    /// Run the registered `operation` as the next step.
    pub async fn request(&mut self, operation: &str, role: Option<&str>, variables: Value) -> Result<Value> {
        let document = self.lifecycle.registry().require(operation)?;
        let label = self.label(DocumentKind::classify(&document), operation, role);
        self.lifecycle
            .request(&label, &document, Some(&variables))
            .await
    }

    /// Look the record created by `name` up as the next step; it must exist.
    pub async fn lookup(&mut self, name: &str, role: Option<&str>, creation: &Value) -> Result<Value> {
        let operation = CreateOperation::parse(name)?;
        let label = self.label(DocumentKind::Query, &operation.lookup_name(), role);
        self.lifecycle
            .lookup_and_verify_as(&label, name, creation)
            .await
    }

    /// Delete the record created by `name` as the next step.
    ///
    /// Returns the non-empty node id the server confirmed.
    pub async fn delete(&mut self, name: &str, creation: &Value) -> Result<String> {
        let operation = CreateOperation::parse(name)?;
        let label = self.label(DocumentKind::Mutation, &operation.delete_name(), None);
        let node_id = self
            .lifecycle
            .delete_and_verify_cascade_as(&label, name, creation)
            .await?;
        self.roots.retain(|root| root.creation != *creation);
        Ok(node_id)
    }

    /// Check as the next step that a `kind` record with `id` is gone.
    pub async fn verify_absent(&mut self, kind: EntityKind, id: &str) -> Result<()> {
        let lookup = kind.create_operation()?.lookup_name();
        let label = self.label(DocumentKind::Query, &lookup, Some("absent"));
        self.lifecycle.verify_absent_as(&label, kind, id).await
    }

    fn track(&mut self, operation: &'static str, id: &str, creation: &Value) {
        self.roots.push(Root {
            operation,
            id: id.to_string(),
            creation: creation.clone(),
        });
    }

    /// Delete every root still recorded, newest first.
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn clean_up(&mut self) {
        for root in std::mem::take(&mut self.roots).into_iter().rev() {
            match self
                .lifecycle
                .delete_and_verify_cascade(root.operation, &root.creation)
                .await
            {
                Ok(_) => info!(operation = root.operation, id = %root.id, "cleaned up after failure"),
                Err(e) => warn!(operation = root.operation, id = %root.id, error = %e, "cleanup failed"),
            }
        }
    }

    /// Create a session with a fresh public key, optionally inside a thread.
    ///
    /// Returns the decoded session and the raw creation data.
    pub async fn create_session(&mut self, role: &str, thread_id: Option<&str>) -> Result<(Session, Value)> {
        let public_key = fixtures::public_key();
        let mut variables = json!({ "publicKey": public_key });
        if let Some(thread_id) = thread_id {
            variables["threadId"] = json!(thread_id);
        }
        let data = self.request("CreateSession", Some(role), variables).await?;
        let record = self.lifecycle.verify_created("CreateSession", &data)?;
        if thread_id.is_none() {
            self.track("CreateSession", &id_of(&record).unwrap_or_default(), &data);
        }
        let session: Session = decode_at("CreateSession", &data, &["createSession", "session"])?;
        ensure_eq(&format!("{role}.publicKey"), session.public_key.as_str(), public_key.as_str())?;
        if let Some(thread_id) = thread_id {
            ensure_eq(&format!("{role}.thread.id"), &session.thread_id(), &Some(thread_id))?;
        }
        Ok((session, data))
    }

    /// Create a thread owned by `owner`; the owner must be that session.
    pub async fn create_thread(&mut self, owner: &Session) -> Result<(Thread, Value)> {
        let data = self
            .request("CreateThread", Some("Owner"), json!({ "sessionId": owner.id }))
            .await?;
        let record = self.lifecycle.verify_created("CreateThread", &data)?;
        // deleting the thread also removes its owner
        self.roots.retain(|root| root.id != owner.id);
        self.track("CreateThread", &id_of(&record).unwrap_or_default(), &data);
        let thread: Thread = decode_at("CreateThread", &data, &["createThread", "thread"])?;
        ensure_eq("thread.owner.id", thread.owner.id.as_str(), owner.id.as_str())?;
        Ok((thread, data))
    }

    /// Move `session` into `thread`; the session must report it afterwards.
    pub async fn join_thread(&mut self, role: &str, session: &Session, thread: &Thread) -> Result<Session> {
        let data = self
            .request(
                "JoinThread",
                Some(role),
                json!({ "sessionId": session.id, "threadId": thread.id }),
            )
            .await?;
        let joined: Session = decode_at("JoinThread", &data, &["updateSession", "session"])?;
        ensure_eq(&format!("{role}.id"), joined.id.as_str(), session.id.as_str())?;
        ensure_eq(&format!("{role}.thread.id"), &joined.thread_id(), &Some(thread.id.as_str()))?;
        Ok(joined)
    }

    /// Fetch a session by id.
    pub async fn lookup_session(&mut self, role: &str, id: &str) -> Result<Session> {
        let data = self
            .request("GetSessionById", Some(role), json!({ "id": id }))
            .await?;
        decode_at("GetSessionById", &data, &["session"])
    }

    /// Fetch a thread by id.
    pub async fn lookup_thread(&mut self, id: &str) -> Result<Thread> {
        let data = self
            .request("GetThreadById", None, json!({ "id": id }))
            .await?;
        decode_at("GetThreadById", &data, &["thread"])
    }

    /// Look the thread up, delete it, then check that the thread and every
    /// listed dependent can no longer be found.
    pub async fn delete_thread(&mut self, creation: &Value, dependents: &[(EntityKind, &str)]) -> Result<String> {
        let thread = self.lifecycle.verify_created("CreateThread", creation)?;
        let thread_id = id_of(&thread).unwrap_or_default();

        let _ = self.lookup("CreateThread", Some("before delete"), creation).await?;
        let node_id = self.delete("CreateThread", creation).await?;
        ensure(!node_id.is_empty(), "deleteThread returned an empty node id")?;

        let gone = std::iter::once((EntityKind::Thread, thread_id.as_str())).chain(dependents.iter().copied());
        for (kind, id) in gone {
            self.verify_absent(kind, id).await?;
        }
        Ok(node_id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
