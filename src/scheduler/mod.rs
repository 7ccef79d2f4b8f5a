mod builder;
mod cursor;
mod merge;
mod types;
mod util;

pub use cursor::RotationCursor;
pub use types::SchedError;

use crate::model::{Override, PersonId, RotationDefinition, ScheduleEntry, Window};
use chrono::{DateTime, Utc};

/// Scheduler : une rotation et ses overrides, triés par début
#[derive(Debug, Clone)]
pub struct Scheduler {
    rotation: RotationDefinition,
    overrides: Vec<Override>,
}

impl Scheduler {
    pub fn new(rotation: RotationDefinition) -> Self {
        Self {
            rotation,
            overrides: Vec::new(),
        }
    }

    pub fn rotation(&self) -> &RotationDefinition {
        &self.rotation
    }
    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    /// Ajoute des overrides (ordre quelconque). Ils ne doivent pas se chevaucher.
    pub fn add_overrides(&mut self, overrides: Vec<Override>) {
        self.overrides.extend(overrides);
        self.overrides.sort_by_key(|o| o.start);
    }

    /// Planning effectif sur `window` : entrées contiguës, triées, sans chevauchement.
    pub fn render(&self, window: Window) -> Vec<ScheduleEntry> {
        let entries = builder::build(&self.rotation, &self.overrides, window);
        #[cfg(feature = "logging")]
        tracing::debug!(
            from = %window.from,
            until = %window.until,
            entries = entries.len(),
            "schedule rendered"
        );
        entries
    }

    /// Qui est d'astreinte à l'instant `at` ; `None` avant le début de la rotation.
    pub fn on_call_at(&self, at: DateTime<Utc>) -> Option<&PersonId> {
        if at < self.rotation.handover_start() {
            return None;
        }
        if let Some(o) = self
            .overrides
            .iter()
            .find(|o| util::contains(o.start, o.end, at))
        {
            return Some(&o.participant);
        }
        Some(RotationCursor::locate(&self.rotation, at).participant())
    }
}

/// Planning effectif pour une rotation éventuellement absente.
///
/// Sans rotation il n'y a rien à planifier : le résultat est vide.
pub fn render_schedule(
    rotation: Option<&RotationDefinition>,
    overrides: &[Override],
    window: Window,
) -> Vec<ScheduleEntry> {
    let Some(rotation) = rotation else {
        return Vec::new();
    };
    let mut scheduler = Scheduler::new(rotation.clone());
    scheduler.add_overrides(overrides.to_vec());
    scheduler.render(window)
}
