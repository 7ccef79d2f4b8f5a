use crate::scheduler::SchedError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Identifiant fort pour un participant de la rotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Définition de la rotation : passation à `handover_start`, puis toutes les
/// `interval`, en suivant l'ordre de `participants`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationDefinition {
    handover_start: DateTime<Utc>,
    interval: Duration,
    participants: Vec<PersonId>,
}

impl RotationDefinition {
    /// Crée une rotation en validant `interval > 0` (et représentable depuis
    /// `handover_start`) et `participants` non vide.
    pub fn new(
        handover_start: DateTime<Utc>,
        interval: Duration,
        participants: Vec<PersonId>,
    ) -> Result<Self, SchedError> {
        if interval <= Duration::zero() || handover_start.checked_add_signed(interval).is_none()
        {
            return Err(SchedError::InvalidInterval);
        }
        if participants.is_empty() {
            return Err(SchedError::EmptyRotation);
        }
        Ok(Self {
            handover_start,
            interval,
            participants,
        })
    }

    /// Raccourci pour une cadence exprimée en jours entiers.
    pub fn with_days(
        handover_start: DateTime<Utc>,
        days: i64,
        participants: Vec<PersonId>,
    ) -> Result<Self, SchedError> {
        let interval = Duration::try_days(days).ok_or(SchedError::InvalidInterval)?;
        Self::new(handover_start, interval, participants)
    }

    pub fn handover_start(&self) -> DateTime<Utc> {
        self.handover_start
    }
    pub fn interval(&self) -> Duration {
        self.interval
    }
    pub fn participants(&self) -> &[PersonId] {
        &self.participants
    }
}

/// Remplacement ponctuel de la rotation sur `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub participant: PersonId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Override {
    /// Crée un override en validant que `end > start`.
    pub fn new(
        participant: PersonId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, SchedError> {
        if end <= start {
            return Err(SchedError::InvalidTimeRange);
        }
        Ok(Self {
            participant,
            start,
            end,
        })
    }
}

/// Entrée du planning effectif, intervalle semi-ouvert `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub participant: PersonId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ScheduleEntry {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Fenêtre demandée `[from, until)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub from: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl Window {
    pub fn new(from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self { from, until }
    }

    /// Vrai si la fenêtre ne couvre aucun instant.
    pub fn is_empty(&self) -> bool {
        self.from >= self.until
    }
}
