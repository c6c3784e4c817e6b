//! Request documents and the per-entity operation table.
//!
//! [`DocumentRegistry`] is a plain name → document store. The built-in set is
//! embedded from `documents/` at compile time. [`OperationTable::build`]
//! resolves the create, lookup and delete documents of every
//! [`EntityKind`] up front, so a missing or misnamed document fails when the
//! harness starts rather than halfway through a scenario.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use courier_core::{CreateOperation, EntityKind};
use tracing::debug;

use crate::errors::{HarnessError, Result};

/// Whether a document reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A read-only query.
    Query,
    /// A mutation.
    Mutation,
}

impl DocumentKind {
    /// Classify a document by whether its text mentions `mutation`.
    pub fn classify(document: &str) -> Self {
        if document.contains("mutation") {
            Self::Mutation
        } else {
            Self::Query
        }
    }

    /// Human-readable prefix for step labels.
    pub fn label(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const BUILTIN: &[(&str, &str)] = &[
    (
        "CreateSession",
        include_str!("../documents/mutation/CreateSession.graphql"),
    ),
    (
        "CreateThread",
        include_str!("../documents/mutation/CreateThread.graphql"),
    ),
    (
        "CreateMessage",
        include_str!("../documents/mutation/CreateMessage.graphql"),
    ),
    (
        "JoinThread",
        include_str!("../documents/mutation/JoinThread.graphql"),
    ),
    (
        "DeleteSession",
        include_str!("../documents/mutation/DeleteSession.graphql"),
    ),
    (
        "DeleteThread",
        include_str!("../documents/mutation/DeleteThread.graphql"),
    ),
    (
        "DeleteMessage",
        include_str!("../documents/mutation/DeleteMessage.graphql"),
    ),
    (
        "GetSessionById",
        include_str!("../documents/query/GetSessionById.graphql"),
    ),
    (
        "GetThreadById",
        include_str!("../documents/query/GetThreadById.graphql"),
    ),
    (
        "GetMessageById",
        include_str!("../documents/query/GetMessageById.graphql"),
    ),
];

/// Name → request document store.
#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    documents: BTreeMap<String, Arc<str>>,
}

impl DocumentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The documents shipped with the harness.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, document) in BUILTIN {
            let _ = registry.insert(*name, *document);
        }
        registry
    }

    /// Add or replace a document, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, document: impl Into<Arc<str>>) -> Option<Arc<str>> {
        self.documents.insert(name.into(), document.into())
    }

    /// Look up a document by operation name.
    pub fn get(&self, name: &str) -> Option<&Arc<str>> {
        self.documents.get(name)
    }

    /// Look up a document, failing with [`HarnessError::MissingDocument`].
    pub fn require(&self, name: &str) -> Result<Arc<str>> {
        self.get(name)
            .cloned()
            .ok_or_else(|| HarnessError::MissingDocument {
                operation: name.to_string(),
            })
    }

    /// Registered operation names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no document is registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// The create/lookup/delete documents of one entity.
#[derive(Debug, Clone)]
pub struct EntityOperations {
    /// The entity.
    pub kind: EntityKind,
    /// The create operation and its derived names.
    pub create: CreateOperation,
    /// Document of the create mutation.
    pub create_document: Arc<str>,
    /// Document of the lookup query.
    pub lookup_document: Arc<str>,
    /// Document of the delete mutation.
    pub delete_document: Arc<str>,
}

impl EntityOperations {
    fn resolve(kind: EntityKind, registry: &DocumentRegistry) -> Result<Self> {
        let create = kind.create_operation()?;
        let create_document = registry.require(create.name())?;
        let lookup_document = registry.require(&create.lookup_name())?;
        let delete_document = registry.require(&create.delete_name())?;
        debug!(
            entity = %kind,
            lookup = %create.lookup_name(),
            delete = %create.delete_name(),
            "resolved entity operations"
        );
        Ok(Self {
            kind,
            create,
            create_document,
            lookup_document,
            delete_document,
        })
    }
}

/// Static `EntityKind → {create, lookup, delete}` table, validated at build.
#[derive(Debug, Clone)]
pub struct OperationTable {
    session: EntityOperations,
    thread: EntityOperations,
    message: EntityOperations,
}

impl OperationTable {
    /// Resolve every entity's documents from `registry`.
    pub fn build(registry: &DocumentRegistry) -> Result<Self> {
        Ok(Self {
            session: EntityOperations::resolve(EntityKind::Session, registry)?,
            thread: EntityOperations::resolve(EntityKind::Thread, registry)?,
            message: EntityOperations::resolve(EntityKind::Message, registry)?,
        })
    }

    /// Operations of `kind`.
    pub fn get(&self, kind: EntityKind) -> &EntityOperations {
        match kind {
            EntityKind::Session => &self.session,
            EntityKind::Thread => &self.thread,
            EntityKind::Message => &self.message,
        }
    }

    /// Operations of the entity created by `operation`.
    pub fn for_operation(&self, operation: &CreateOperation) -> Result<&EntityOperations> {
        EntityKind::from_entity(operation.entity())
            .map(|kind| self.get(kind))
            .ok_or_else(|| HarnessError::MissingDocument {
                operation: operation.lookup_name(),
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
