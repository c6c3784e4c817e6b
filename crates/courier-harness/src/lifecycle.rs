//! Create → verify → look up → delete helpers driven by name conventions.
//!
//! Given the name of a `Create<Entity>` mutation and the data it returned,
//! [`Lifecycle`] finds the created record, looks it up again through the
//! sibling `Get<Entity>ById` query and removes it through `Delete<Entity>`.
//! A creation response without the expected record fails immediately with
//! [`HarnessError::Shape`]; nothing after it runs.

use std::sync::Arc;

use courier_client::GraphQlClient;
use courier_core::json::{dotted, get_path, is_truthy};
use courier_core::logging::log_exchange;
use courier_core::{CreateOperation, EntityKind};
use courier_settings::HarnessSettings;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::entities::id_of;
use crate::errors::{HarnessError, Result};
use crate::registry::{DocumentKind, DocumentRegistry, EntityOperations, OperationTable};

/// Lifecycle helpers bound to one endpoint and document set.
#[derive(Clone, Debug)]
pub struct Lifecycle {
    client: GraphQlClient,
    registry: Arc<DocumentRegistry>,
    operations: Arc<OperationTable>,
    debug: bool,
}

impl Lifecycle {
    /// Build a client from `settings` and validate `registry`.
    pub fn new(settings: &HarnessSettings, registry: DocumentRegistry) -> Result<Self> {
        let client = GraphQlClient::new(settings)?;
        Self::from_parts(client, registry, settings.debug)
    }

    /// Assemble from an existing client.
    pub fn from_parts(client: GraphQlClient, registry: DocumentRegistry, debug: bool) -> Result<Self> {
        let operations = OperationTable::build(&registry)?;
        Ok(Self {
            client,
            registry: Arc::new(registry),
            operations: Arc::new(operations),
            debug,
        })
    }

    /// The underlying client.
    pub fn client(&self) -> &GraphQlClient {
        &self.client
    }

    /// The document registry.
    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    /// The validated operation table.
    pub fn operations(&self) -> &OperationTable {
        &self.operations
    }

    /// Whether exchanges are logged.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Send `document`, log the exchange under `label` and return `data`.
    ///
    /// Server-reported GraphQL errors fail the call.
    pub async fn request(&self, label: &str, document: &str, variables: Option<&Value>) -> Result<Value> {
        let data = self.client.execute(document, variables).await?;
        log_exchange(self.debug, label, variables, &data);
        Ok(data)
    }

    /// Run the registered operation `name` with `variables`.
    pub async fn run(&self, name: &str, variables: &Value) -> Result<Value> {
        let document = self.registry.require(name)?;
        let label = format!("{}: {name}", DocumentKind::classify(&document));
        self.request(&label, &document, Some(variables)).await
    }

    /// The record created by `name`, found at `<responseRootKey>.<entityKey>`.
    ///
    /// Fails with [`HarnessError::Shape`] unless it is present and has an id.
    pub fn verify_created(&self, name: &str, creation: &Value) -> Result<Value> {
        let operation = CreateOperation::parse(name)?;
        Self::created_record(&operation, creation).map(|(record, _)| record)
    }

    /// Look the created record up by id through `Get<Entity>ById`.
    ///
    /// Returns the raw lookup data for further assertions.
    pub async fn lookup_and_verify(&self, name: &str, creation: &Value) -> Result<Value> {
        let operation = CreateOperation::parse(name)?;
        let label = format!("Query: {} - {}", operation.response_root_key(), operation.lookup_name());
        self.lookup_and_verify_as(&label, name, creation).await
    }

    /// [`lookup_and_verify`](Self::lookup_and_verify), logging the exchange
    /// under `label`.
    #[instrument(skip(self, creation), fields(operation = %name))]
    pub async fn lookup_and_verify_as(&self, label: &str, name: &str, creation: &Value) -> Result<Value> {
        let (operation, ops, id) = self.resolve(name, creation)?;
        let lookup = operation.lookup_name();
        let variables = json!({ "id": id });
        let data = self
            .request(label, &ops.lookup_document, Some(&variables))
            .await?;

        let root = operation.lookup_root_key();
        match data.get(&root) {
            Some(found) if is_truthy(found) => {
                debug!(%id, "lookup found record");
                Ok(data)
            }
            _ => Err(HarnessError::shape(lookup, root, &data)),
        }
    }

    /// Delete the created record through `Delete<Entity>`.
    ///
    /// Returns the `delete<Entity>.deleted<Entity>NodeId` confirmation.
    /// Dependents are removed by the store's cascade; use
    /// [`verify_absent`](Self::verify_absent) to check them.
    pub async fn delete_and_verify_cascade(&self, name: &str, creation: &Value) -> Result<String> {
        let operation = CreateOperation::parse(name)?;
        let label = format!("Mutation: {} - {}", operation.response_root_key(), operation.delete_name());
        self.delete_and_verify_cascade_as(&label, name, creation).await
    }

    /// [`delete_and_verify_cascade`](Self::delete_and_verify_cascade),
    /// logging the exchange under `label`.
    #[instrument(skip(self, creation), fields(operation = %name))]
    pub async fn delete_and_verify_cascade_as(&self, label: &str, name: &str, creation: &Value) -> Result<String> {
        let (operation, ops, id) = self.resolve(name, creation)?;
        let delete = operation.delete_name();
        let variables = json!({ "id": id });
        let data = self
            .request(label, &ops.delete_document, Some(&variables))
            .await?;

        let root = operation.delete_root_key();
        let field = operation.deleted_node_id_key();
        let keys = [root.as_str(), field.as_str()];
        match get_path(&data, &keys) {
            Some(Value::String(node_id)) if !node_id.is_empty() => {
                debug!(%id, node_id = %node_id, "record deleted");
                Ok(node_id.clone())
            }
            _ => Err(HarnessError::shape(delete, dotted(&keys), &data)),
        }
    }

    /// Look the record up (it must exist), then delete it.
    pub async fn lookup_then_delete(&self, name: &str, creation: &Value) -> Result<String> {
        let _ = self.lookup_and_verify(name, creation).await?;
        self.delete_and_verify_cascade(name, creation).await
    }

    /// Assert that a `kind` record with `id` can no longer be looked up.
    ///
    /// The lookup must answer with its root field set to `null`; a missing
    /// field or a null `data` is a [`HarnessError::Shape`], not absence.
    pub async fn verify_absent(&self, kind: EntityKind, id: &str) -> Result<()> {
        let label = format!("Query: {} - absent", self.operations.get(kind).create.lookup_name());
        self.verify_absent_as(&label, kind, id).await
    }

    /// [`verify_absent`](Self::verify_absent), logging the exchange under
    /// `label`.
    #[instrument(skip(self, label), fields(entity = %kind))]
    pub async fn verify_absent_as(&self, label: &str, kind: EntityKind, id: &str) -> Result<()> {
        let ops = self.operations.get(kind);
        let lookup = ops.create.lookup_name();
        let variables = json!({ "id": id });
        let data = self
            .request(label, &ops.lookup_document, Some(&variables))
            .await?;

        let root = ops.create.lookup_root_key();
        match data.as_object().and_then(|fields| fields.get(&root)) {
            Some(Value::Null) => Ok(()),
            Some(found) => Err(HarnessError::assertion(format!(
                "{kind} {id} still exists after delete: {found}"
            ))),
            None => Err(HarnessError::shape(lookup, root, &data)),
        }
    }

    fn resolve(&self, name: &str, creation: &Value) -> Result<(CreateOperation, &EntityOperations, String)> {
        let operation = CreateOperation::parse(name)?;
        let ops = self.operations.for_operation(&operation)?;
        let (_, id) = Self::created_record(&operation, creation)?;
        Ok((operation, ops, id))
    }

    fn created_record(operation: &CreateOperation, creation: &Value) -> Result<(Value, String)> {
        let root = operation.response_root_key();
        let entity = operation.entity_key();
        let keys = [root.as_str(), entity.as_str()];
        let record = get_path(creation, &keys)
            .filter(|v| v.is_object())
            .ok_or_else(|| HarnessError::shape(operation.name(), dotted(&keys), creation))?;
        let id = id_of(record).ok_or_else(|| {
            HarnessError::shape(
                operation.name(),
                format!("{}.id", dotted(&keys)),
                creation,
            )
        })?;
        Ok((record.clone(), id))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
