use crate::io;
use crate::model::ScheduleEntry;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Format de rendu du planning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn render(self, entries: &[ScheduleEntry]) -> anyhow::Result<String> {
        match self {
            OutputFormat::Json => io::schedule_to_json(entries),
            OutputFormat::Csv => io::schedule_to_csv(entries),
        }
    }
}

pub trait ScheduleSink {
    /// Écrit le planning rendu.
    fn write(&self, rendered: &str) -> anyhow::Result<()>;
}

/// Sortie standard.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ScheduleSink for StdoutSink {
    fn write(&self, rendered: &str) -> anyhow::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{rendered}")?;
        out.flush()?;
        Ok(())
    }
}

/// Fichier, remplacé de manière atomique.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ScheduleSink for FileSink {
    fn write(&self, rendered: &str) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        writeln!(tmp, "{rendered}")?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .with_context(|| format!("atomic rename to {}", self.path.display()))?;
        Ok(())
    }
}
