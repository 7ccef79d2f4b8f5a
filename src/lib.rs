#![forbid(unsafe_code)]
//! Astreinte render — calcul du planning d'astreinte effectif.
//!
//! - Rotation à cadence fixe, participants en round-robin.
//! - Overrides prioritaires sur la rotation, sans décaler les tours suivants.
//! - Fenêtre `[from, until)` couverte sans trou ni chevauchement.
//! - Tout en UTC ; parsing RFC3339 ; sortie JSON/CSV en dehors du cœur.

pub mod io;
pub mod model;
pub mod output;
pub mod scheduler;

pub use model::{Override, PersonId, RotationDefinition, ScheduleEntry, Window};
pub use output::{FileSink, OutputFormat, ScheduleSink, StdoutSink};
pub use scheduler::{render_schedule, RotationCursor, SchedError, Scheduler};
