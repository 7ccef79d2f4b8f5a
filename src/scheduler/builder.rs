use super::merge::OverrideMerger;
use crate::model::{Override, RotationDefinition, ScheduleEntry, Window};

/// Construit le planning effectif sur `window`. `overrides` doit être trié par `start`.
pub(super) fn build(
    rotation: &RotationDefinition,
    overrides: &[Override],
    window: Window,
) -> Vec<ScheduleEntry> {
    if window.is_empty() {
        return Vec::new();
    }

    let mut merger = OverrideMerger::new(rotation, overrides, window.from);
    let mut entries = Vec::new();

    while merger.position() <= window.until {
        let Some(pending) = merger.pending() else {
            break;
        };
        entries.push(merger.merge_step(pending));
    }

    while merger.position() < window.until {
        entries.push(merger.rotation_step());
    }

    // seule la dernière entrée peut dépasser `until`
    if let Some(last) = entries.last_mut() {
        last.end = last.end.min(window.until);
        if last.start >= last.end {
            entries.pop();
        }
    }

    entries
}
