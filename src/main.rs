mod config;
mod script;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use road_canvas::engine::EngineCore;

use crate::config::{ConfigArgs, ConfigError};
use crate::script::{ScriptError, Session, parse_script};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to open {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "roadboard", about = "Replay road tile placement scripts")]
struct Cli {
    /// Newline-delimited JSON commands. Reads stdin when absent or `-`.
    script: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = cli.config.engine_config()?;

    let commands = match cli.script.as_ref().filter(|path| path.as_os_str() != "-") {
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Open { path: path.clone(), source })?;
            parse_script(BufReader::new(file))?
        }
        None => parse_script(io::stdin().lock())?,
    };

    let mut session = Session::new(EngineCore::with_config(config));
    let summary = session.replay(&commands);
    tracing::info!(
        commands = commands.len(),
        placed = summary.placed,
        rejected = summary.rejected,
        deleted = summary.deleted,
        "replay finished"
    );

    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &session.engine.snapshot())?;
    writeln!(out)?;
    Ok(())
}
