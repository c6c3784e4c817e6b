//! Entities exposed by the courier GraphQL API.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::naming::CreateOperation;

/// Record types the harness creates, looks up and deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// A client session identified by its public key.
    Session,
    /// A conversation owned by one session.
    Thread,
    /// A message posted by a member session into a thread.
    Message,
}

impl EntityKind {
    /// Every kind, parents before dependents.
    pub const ALL: [Self; 3] = [Self::Session, Self::Thread, Self::Message];

    /// Capitalized entity name as it appears in operation names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Session => "Session",
            Self::Thread => "Thread",
            Self::Message => "Message",
        }
    }

    /// Name of the mutation that creates this entity.
    pub fn create_name(self) -> String {
        format!("Create{}", self.as_str())
    }

    /// The validated create operation for this entity.
    pub fn create_operation(self) -> Result<CreateOperation> {
        CreateOperation::parse(&self.create_name())
    }

    /// Resolve a kind from its capitalized entity name.
    pub fn from_entity(entity: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == entity)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
