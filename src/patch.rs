//! Structural diffing between user snapshots
//!
//! The server's update endpoint takes an RFC 6902 patch rather than a full
//! record, so only the fields that actually changed travel over the wire.
//! Invariant: `apply(original, diff(original, candidate)) == candidate`.

use crate::error::UserlinkResult;
use crate::model::User;
use json_patch::Patch;

/// Compute the ordered patch transforming `original` into `candidate`.
pub fn diff(original: &User, candidate: &User) -> UserlinkResult<Patch> {
    let before = serde_json::to_value(original)?;
    let after = serde_json::to_value(candidate)?;
    Ok(json_patch::diff(&before, &after))
}

/// Apply a patch to a snapshot, yielding the patched record.
pub fn apply(user: &User, patch: &Patch) -> UserlinkResult<User> {
    let mut doc = serde_json::to_value(user)?;
    json_patch::patch(&mut doc, patch)?;
    Ok(serde_json::from_value(doc)?)
}
