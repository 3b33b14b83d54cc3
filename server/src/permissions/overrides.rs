//! Command permission override list editing.
//!
//! Upstream only accepts whole lists, so every edit produces the full new list.

use gk_common::{CommandPermission, CommandPermissionType, Snowflake};

/// Merge `incoming` into `current`.
///
/// Entries in `current` sharing `(id, kind)` with any incoming entry are
/// dropped; the incoming entries are appended after the survivors. When
/// `incoming` names a subject more than once, its last entry wins, so the
/// result never holds two entries for one subject.
#[must_use]
pub fn merge_command_permissions(
    current: &[CommandPermission],
    incoming: &[CommandPermission],
) -> Vec<CommandPermission> {
    let mut merged: Vec<CommandPermission> = current
        .iter()
        .filter(|existing| {
            !incoming
                .iter()
                .any(|new| existing.targets(new.id, new.kind))
        })
        .copied()
        .collect();

    for (i, new) in incoming.iter().enumerate() {
        let superseded = incoming[i + 1..]
            .iter()
            .any(|later| later.targets(new.id, new.kind));
        if !superseded {
            merged.push(*new);
        }
    }
    merged
}

/// Drop every entry targeting `(target_id, target_kind)`.
#[must_use]
pub fn remove_command_permission(
    current: &[CommandPermission],
    target_id: Snowflake,
    target_kind: CommandPermissionType,
) -> Vec<CommandPermission> {
    current
        .iter()
        .filter(|p| !p.targets(target_id, target_kind))
        .copied()
        .collect()
}
