//! Messages: sent by a thread member, re-fetched field by field.

use courier_core::EntityKind;
use serde_json::json;

use super::ScenarioContext;
use crate::entities::{Message, decode_at};
use crate::errors::{HarnessError, Result, ensure, ensure_eq};
use crate::fixtures;

/// Build the thread flow, have the owner send a generated message, then
/// check that a lookup returns the same body, sender and thread. Deleting
/// the thread must remove the message and both sessions.
pub async fn send_and_refetch(ctx: &mut ScenarioContext<'_>) -> Result<()> {
    let (owner, _) = ctx.create_session("Owner", None).await?;
    let (thread, creation) = ctx.create_thread(&owner).await?;
    let owner = ctx.join_thread("Owner", &owner, &thread).await?;
    let (guest, _) = ctx.create_session("Guest", Some(thread.id.as_str())).await?;

    let body = fixtures::hacker_phrase();
    let owner_thread = owner
        .thread_id()
        .ok_or_else(|| HarnessError::assertion("owner has no thread after joining"))?;
    let data = ctx
        .request(
            "CreateMessage",
            Some("Owner"),
            json!({ "threadId": owner_thread, "fromId": owner.id, "body": body }),
        )
        .await?;
    let _ = ctx.lifecycle().verify_created("CreateMessage", &data)?;
    let sent: Message = decode_at("CreateMessage", &data, &["createMessage", "message"])?;
    ensure_eq("message.fromId", sent.from_id.as_str(), owner.id.as_str())?;
    ensure_eq("message.threadId", sent.thread_id.as_str(), owner_thread)?;
    ensure_eq("message.body", sent.body.as_str(), body.as_str())?;
    ensure(
        sent.created_at.as_deref().is_some_and(|s| !s.is_empty()),
        "message.createdAt is missing",
    )?;

    let data = ctx
        .request("GetMessageById", None, json!({ "id": sent.id }))
        .await?;
    let fetched: Message = decode_at("GetMessageById", &data, &["message"])?;
    ensure_eq("message.id", fetched.id.as_str(), sent.id.as_str())?;
    ensure_eq("message.body", fetched.body.as_bytes(), sent.body.as_bytes())?;
    ensure_eq("message.fromId", fetched.from_id.as_str(), sent.from_id.as_str())?;
    ensure_eq("message.threadId", fetched.thread_id.as_str(), sent.thread_id.as_str())?;
    ensure_eq(
        "message.from.id",
        &fetched.from.as_ref().map(|s| s.id.as_str()),
        &Some(owner.id.as_str()),
    )?;
    ensure_eq(
        "message.thread.id",
        &fetched.thread.as_ref().map(|t| t.id.as_str()),
        &Some(thread.id.as_str()),
    )?;

    let _ = ctx
        .delete_thread(
            &creation,
            &[
                (EntityKind::Message, sent.id.as_str()),
                (EntityKind::Session, owner.id.as_str()),
                (EntityKind::Session, guest.id.as_str()),
            ],
        )
        .await?;
    Ok(())
}
