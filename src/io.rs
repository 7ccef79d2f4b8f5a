use crate::model::{Override, PersonId, RotationDefinition, ScheduleEntry};
use crate::scheduler::SchedError;
use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}: {source}", path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] SchedError),
}

impl LoadError {
    /// Fichier absent ou JSON illisible (par opposition à un contenu invalide).
    pub fn is_unreadable(&self) -> bool {
        matches!(self, LoadError::Read { .. } | LoadError::Syntax { .. })
    }
}

/// Fichier de rotation : `{handover_start_at, handover_interval_days, users}`
#[derive(Debug, Deserialize)]
struct RawRotation {
    handover_start_at: String,
    /// Nombre JSON quelconque (`7` ou `7.0`) ; doit être entier.
    handover_interval_days: f64,
    users: Vec<String>,
}

/// Entrée du fichier d'overrides : `{user, start_at, end_at}`
#[derive(Debug, Deserialize)]
struct RawOverride {
    user: String,
    start_at: String,
    end_at: String,
}

#[derive(Debug, Serialize)]
struct EntryRecord<'a> {
    user: &'a str,
    start_at: String,
    end_at: String,
}

impl<'a> From<&'a ScheduleEntry> for EntryRecord<'a> {
    fn from(entry: &'a ScheduleEntry) -> Self {
        Self {
            user: entry.participant.as_str(),
            start_at: format_time(entry.start),
            end_at: format_time(entry.end),
        }
    }
}

/// Parse un horodatage RFC3339 (normalisé en UTC). Accepte aussi une date
/// seule `YYYY-MM-DD` (minuit UTC) et une date-heure sans fuseau (lue en UTC).
pub fn parse_time(raw: &str) -> Result<DateTime<Utc>, SchedError> {
    let raw = raw.trim();
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| SchedError::InvalidTimestamp(raw.to_string()))
}

/// Format de sortie : UTC, suffixe `Z`, fractions de seconde seulement si présentes.
pub fn format_time(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn read_json<T, P>(path: P) -> Result<T, LoadError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|source| LoadError::Syntax {
        path: path.to_path_buf(),
        source,
    })
}

/// Charge la définition de rotation.
pub fn load_rotation<P: AsRef<Path>>(path: P) -> Result<RotationDefinition, LoadError> {
    let raw: RawRotation = read_json(path)?;
    let handover_start = parse_time(&raw.handover_start_at)?;
    let days = whole_days(raw.handover_interval_days)?;
    let users = raw.users.iter().map(PersonId::new).collect();
    Ok(RotationDefinition::with_days(handover_start, days, users)?)
}

fn whole_days(raw: f64) -> Result<i64, SchedError> {
    if !raw.is_finite() || raw.fract() != 0.0 || raw.abs() >= i64::MAX as f64 {
        return Err(SchedError::InvalidInterval);
    }
    Ok(raw as i64)
}

/// Charge les overrides, triés par début.
pub fn load_overrides<P: AsRef<Path>>(path: P) -> Result<Vec<Override>, LoadError> {
    let raw: Vec<RawOverride> = read_json(path)?;
    let mut out = Vec::with_capacity(raw.len());
    for rec in raw {
        let start = parse_time(&rec.start_at)?;
        let end = parse_time(&rec.end_at)?;
        out.push(Override::new(PersonId::new(rec.user), start, end)?);
    }
    out.sort_by_key(|o| o.start);
    Ok(out)
}

/// Rotation illisible ou sans participant : rien à planifier (`None`).
/// Un horodatage invalide ou un intervalle non positif reste une erreur.
pub fn load_rotation_or_skip<P: AsRef<Path>>(
    path: P,
) -> Result<Option<RotationDefinition>, LoadError> {
    match load_rotation(path) {
        Ok(rotation) => Ok(Some(rotation)),
        Err(err)
            if err.is_unreadable()
                || matches!(err, LoadError::Invalid(SchedError::EmptyRotation)) =>
        {
            #[cfg(feature = "logging")]
            tracing::warn!(error = %err, "schedule ignored, nothing to render");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Overrides illisibles : la rotation seule fait foi (liste vide).
pub fn load_overrides_or_empty<P: AsRef<Path>>(path: P) -> Result<Vec<Override>, LoadError> {
    match load_overrides(path) {
        Ok(overrides) => Ok(overrides),
        Err(err) if err.is_unreadable() => {
            #[cfg(feature = "logging")]
            tracing::warn!(error = %err, "overrides ignored, using rotation only");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

/// Planning au format JSON (jolie mise en forme)
pub fn schedule_to_json(entries: &[ScheduleEntry]) -> anyhow::Result<String> {
    let records: Vec<EntryRecord<'_>> = entries.iter().map(EntryRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Planning au format CSV: header `user,start_at,end_at`
pub fn schedule_to_csv(entries: &[ScheduleEntry]) -> anyhow::Result<String> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    w.write_record(["user", "start_at", "end_at"])?;
    for entry in entries {
        let rec = EntryRecord::from(entry);
        w.write_record([rec.user, rec.start_at.as_str(), rec.end_at.as_str()])?;
    }
    let bytes = w
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing csv: {}", e.error()))?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}
