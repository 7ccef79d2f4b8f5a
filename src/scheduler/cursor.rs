use super::util;
use crate::model::{PersonId, RotationDefinition};
use chrono::{DateTime, Utc};

/// Position courante dans la rotation : intervalle `[interval_start, interval_end)`
/// et index du participant d'astreinte.
#[derive(Debug, Clone)]
pub struct RotationCursor<'a> {
    rotation: &'a RotationDefinition,
    interval_start: DateTime<Utc>,
    interval_end: DateTime<Utc>,
    index: usize,
}

impl<'a> RotationCursor<'a> {
    /// Place le curseur sur l'intervalle qui contient `reference`.
    ///
    /// Avant `handover_start`, le curseur reste sur le premier intervalle
    /// (participant 0) : l'index n'est jamais calculé sur un écart négatif.
    pub fn locate(rotation: &'a RotationDefinition, reference: DateTime<Utc>) -> Self {
        let handover = rotation.handover_start();
        let interval = rotation.interval();
        if reference < handover {
            return Self {
                rotation,
                interval_start: handover,
                interval_end: util::forward(handover, interval),
                index: 0,
            };
        }

        let k = util::whole_intervals(reference - handover, interval);
        let interval_start = util::forward(handover, util::scaled(interval, k));
        Self {
            rotation,
            interval_start,
            interval_end: util::forward(interval_start, interval),
            index: util::cycle(0, k, rotation.participants().len()),
        }
    }

    /// Avance d'exactement un intervalle.
    pub fn advance(&mut self) {
        self.interval_start = self.interval_end;
        self.interval_end = util::forward(self.interval_end, self.rotation.interval());
        self.index = util::cycle(self.index, 1, self.rotation.participants().len());
    }

    /// Avance jusqu'à ce que `interval_end > point`, en sautant d'un coup tous
    /// les intervalles couverts (un override peut en consommer plusieurs).
    pub fn advance_past(&mut self, point: DateTime<Utc>) {
        if self.interval_end > point {
            return;
        }
        let interval = self.rotation.interval();
        let steps = util::whole_intervals(point - self.interval_end, interval) + 1;
        self.interval_end = util::forward(self.interval_end, util::scaled(interval, steps));
        self.interval_start = self
            .interval_end
            .checked_sub_signed(interval)
            .unwrap_or(self.interval_start);
        self.index = util::cycle(self.index, steps, self.rotation.participants().len());
    }

    pub fn participant(&self) -> &'a PersonId {
        &self.rotation.participants()[self.index]
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn interval_start(&self) -> DateTime<Utc> {
        self.interval_start
    }
    pub fn interval_end(&self) -> DateTime<Utc> {
        self.interval_end
    }
}
