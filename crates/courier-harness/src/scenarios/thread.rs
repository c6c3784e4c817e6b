//! Thread ownership and membership.

use courier_core::EntityKind;

use super::ScenarioContext;
use crate::errors::{Result, ensure_eq};

/// Owner creates a thread, joins it, a guest is created inside it, and
/// fresh lookups of the thread, owner and guest must agree with what the
/// mutations returned. Deleting the thread must remove both sessions.
pub async fn ownership_and_membership(ctx: &mut ScenarioContext<'_>) -> Result<()> {
    let (owner, _) = ctx.create_session("Owner", None).await?;
    let (thread, creation) = ctx.create_thread(&owner).await?;
    let owner = ctx.join_thread("Owner", &owner, &thread).await?;
    let (guest, _) = ctx.create_session("Guest", Some(thread.id.as_str())).await?;

    let found = ctx.lookup_thread(&thread.id).await?;
    ensure_eq("thread", &found, &thread)?;
    ensure_eq("thread.owner.id", found.owner.id.as_str(), owner.id.as_str())?;
    let again = ctx.lookup_thread(&thread.id).await?;
    ensure_eq("thread (second lookup)", &again, &found)?;

    let owner2 = ctx.lookup_session("Owner", &owner.id).await?;
    ensure_eq("owner.id", owner2.id.as_str(), owner.id.as_str())?;
    ensure_eq("owner.thread.id", &owner2.thread_id(), &owner.thread_id())?;
    ensure_eq("thread.owner.id", owner2.id.as_str(), thread.owner.id.as_str())?;

    let guest2 = ctx.lookup_session("Guest", &guest.id).await?;
    ensure_eq("guest.id", guest2.id.as_str(), guest.id.as_str())?;
    ensure_eq("guest.thread.id", &guest2.thread_id(), &guest.thread_id())?;
    let guest_owner = guest2
        .thread
        .as_ref()
        .and_then(|t| t.owner.as_ref())
        .map(|o| o.id.as_str());
    ensure_eq("guest.thread.owner.id", &guest_owner, &Some(owner.id.as_str()))?;

    let _ = ctx
        .delete_thread(
            &creation,
            &[(EntityKind::Session, owner.id.as_str()), (EntityKind::Session, guest.id.as_str())],
        )
        .await?;
    Ok(())
}
