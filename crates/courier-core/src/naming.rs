//! Name conventions linking a `Create<Entity>` mutation to its siblings.
//!
//! The API is generated from the relational schema, so every entity exposes
//! the same family of operations:
//!
//! | derived | `CreateThread` |
//! |---|---|
//! | entity key | `thread` |
//! | response root key | `createThread` |
//! | lookup operation | `GetThreadById` |
//! | delete operation | `DeleteThread` |
//! | delete root key | `deleteThread` |
//! | deletion confirmation | `deletedThreadNodeId` |
//!
//! Names outside the `Create<Entity>` pattern are rejected by
//! [`CreateOperation::parse`] instead of producing meaningless keys.

use std::fmt;

use crate::errors::{NamingError, Result};

const CREATE_PREFIX: &str = "Create";

/// A validated `Create<Entity>` operation name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreateOperation {
    name: String,
    entity: String,
}

impl CreateOperation {
    /// Parse and validate an operation name such as `"CreateThread"`.
    pub fn parse(name: &str) -> Result<Self> {
        let Some(entity) = name.strip_prefix(CREATE_PREFIX) else {
            return Err(NamingError::NotACreateOperation(name.to_string()));
        };
        if entity.is_empty() {
            return Err(NamingError::EmptyEntity(name.to_string()));
        }
        let starts_upper = entity.chars().next().is_some_and(|c| c.is_ascii_uppercase());
        if !starts_upper || !entity.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(NamingError::InvalidEntity(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            entity: entity.to_string(),
        })
    }

    /// The full operation name (`CreateThread`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The capitalized entity name (`Thread`).
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Key of the created record inside the response root (`thread`).
    pub fn entity_key(&self) -> String {
        uncap(&self.entity)
    }

    /// Top-level response field of the mutation (`createThread`).
    pub fn response_root_key(&self) -> String {
        uncap(&self.name)
    }

    /// Name of the sibling lookup query (`GetThreadById`).
    pub fn lookup_name(&self) -> String {
        format!("Get{}ById", self.entity)
    }

    /// Top-level response field of the lookup query (`thread`).
    pub fn lookup_root_key(&self) -> String {
        self.entity_key()
    }

    /// Name of the sibling delete mutation (`DeleteThread`).
    pub fn delete_name(&self) -> String {
        format!("Delete{}", self.entity)
    }

    /// Top-level response field of the delete mutation (`deleteThread`).
    pub fn delete_root_key(&self) -> String {
        format!("delete{}", self.entity)
    }

    /// Field confirming the deletion (`deletedThreadNodeId`).
    pub fn deleted_node_id_key(&self) -> String {
        format!("deleted{}NodeId", self.entity)
    }
}

impl fmt::Display for CreateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Uppercase the first character.
pub fn cap(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character.
pub fn uncap(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
