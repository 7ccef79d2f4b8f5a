#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use astreinte_render::{
    io,
    model::Window,
    output::{FileSink, OutputFormat, ScheduleSink, StdoutSink},
    scheduler::render_schedule,
};
use clap::Parser;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Rendu du planning d'astreinte effectif (rotation + overrides)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long)]
    #[cfg_attr(not(feature = "logging"), allow(dead_code))]
    log: bool,

    /// Fichier JSON de rotation
    #[arg(long)]
    schedule: String,

    /// Fichier JSON d'overrides
    #[arg(long)]
    overrides: String,

    /// Début de la fenêtre (RFC3339 UTC)
    #[arg(long = "from")]
    from: String,

    /// Fin de la fenêtre (RFC3339 UTC)
    #[arg(long)]
    until: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Fichier de sortie (stdout par défaut)
    #[arg(long)]
    out: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let from = io::parse_time(&cli.from).context("--from")?;
    let until = io::parse_time(&cli.until).context("--until")?;

    let rotation = io::load_rotation_or_skip(&cli.schedule)?;
    let entries = match rotation {
        Some(rotation) => {
            let overrides = io::load_overrides_or_empty(&cli.overrides)?;
            render_schedule(Some(&rotation), &overrides, Window::new(from, until))
        }
        None => Vec::new(),
    };

    let rendered = cli.format.render(&entries)?;
    match cli.out {
        Some(path) => FileSink::new(path).write(&rendered),
        None => StdoutSink.write(&rendered),
    }
}
