//! Session lifecycle: create, look up twice, delete, confirm gone.

use courier_core::EntityKind;

use super::ScenarioContext;
use crate::entities::{Session, decode_at};
use crate::errors::{Result, ensure, ensure_eq};

/// Create a session, check that two lookups agree with it and with each
/// other, then delete it and check that it can no longer be found.
pub async fn create_lookup_delete(ctx: &mut ScenarioContext<'_>) -> Result<()> {
    let (created, creation) = ctx.create_session("Owner", None).await?;

    let first = ctx.lookup("CreateSession", Some("first"), &creation).await?;
    let second = ctx.lookup("CreateSession", Some("second"), &creation).await?;
    ensure(first == second, "repeated session lookups differ")?;

    let found: Session = decode_at("GetSessionById", &first, &["session"])?;
    ensure_eq("session.id", found.id.as_str(), created.id.as_str())?;
    ensure_eq("session.publicKey", found.public_key.as_str(), created.public_key.as_str())?;
    ensure_eq("session.thread", &found.thread_id(), &None)?;

    let node_id = ctx.delete("CreateSession", &creation).await?;
    ensure(!node_id.is_empty(), "deleteSession returned an empty node id")?;

    ctx.verify_absent(EntityKind::Session, &created.id).await
}
