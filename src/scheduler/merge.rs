use super::cursor::RotationCursor;
use crate::model::{Override, RotationDefinition, ScheduleEntry};
use chrono::{DateTime, Utc};

/// Parcourt en parallèle la rotation et la liste triée des overrides.
///
/// `position` est le prochain instant à couvrir ; il ne recule jamais.
pub(super) struct OverrideMerger<'a> {
    cursor: RotationCursor<'a>,
    overrides: &'a [Override],
    next: usize,
    position: DateTime<Utc>,
}

impl<'a> OverrideMerger<'a> {
    /// `overrides` doit être trié par `start`.
    pub(super) fn new(
        rotation: &'a RotationDefinition,
        overrides: &'a [Override],
        from: DateTime<Utc>,
    ) -> Self {
        Self {
            cursor: RotationCursor::locate(rotation, from),
            overrides,
            next: 0,
            position: from.max(rotation.handover_start()),
        }
    }

    pub(super) fn position(&self) -> DateTime<Utc> {
        self.position
    }

    /// Prochain override encore utile ; ceux qui finissent avant `position`
    /// sont consommés sans rien émettre.
    pub(super) fn pending(&mut self) -> Option<&'a Override> {
        while let Some(candidate) = self.overrides.get(self.next) {
            if candidate.end > self.position {
                return Some(candidate);
            }
            self.next += 1;
        }
        None
    }

    /// Émet une entrée en tenant compte de l'override `pending`.
    pub(super) fn merge_step(&mut self, pending: &'a Override) -> ScheduleEntry {
        let start = self.position;
        let interval_end = self.cursor.interval_end();
        let override_start = pending.start.max(start);

        let entry = if override_start == start {
            // l'override commence sur la position courante : il gagne toujours
            self.next += 1;
            ScheduleEntry {
                participant: pending.participant.clone(),
                start,
                end: pending.end,
            }
        } else if override_start < interval_end {
            // coupe l'intervalle courant sans consommer le tour du participant
            ScheduleEntry {
                participant: self.cursor.participant().clone(),
                start,
                end: override_start,
            }
        } else {
            ScheduleEntry {
                participant: self.cursor.participant().clone(),
                start,
                end: interval_end,
            }
        };

        self.position = entry.end;
        self.cursor.advance_past(self.position);
        entry
    }

    /// Émet le reste de l'intervalle de rotation courant puis avance d'un cran.
    pub(super) fn rotation_step(&mut self) -> ScheduleEntry {
        let entry = ScheduleEntry {
            participant: self.cursor.participant().clone(),
            start: self.position,
            end: self.cursor.interval_end(),
        };
        self.position = entry.end;
        self.cursor.advance();
        entry
    }
}
