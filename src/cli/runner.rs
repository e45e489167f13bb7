//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{read_json_file, ConfiguredCatalog, SourceConfig};
use crate::connector::{ConnectionStatus, Connector};
use crate::error::Result;
use crate::output::{Message, MessageSink};
use crate::source::NytBooksSource;
use crate::types::JsonValue;
use clap::error::ErrorKind;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Log line for an unknown or missing subcommand
pub const INVALID_COMMAND_MESSAGE: &str =
    "Invalid command. Allowable commands: [spec, check, discover, read]";

/// How the process should terminate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command handled
    Success,
    /// Command failed or was not recognised
    Failure,
}

impl ExitStatus {
    /// Process exit code
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

/// Report an invocation clap could not parse.
///
/// Emits one `LOG` message; the caller exits with the returned status.
pub fn reject_invocation(err: &clap::Error, out: &mut dyn MessageSink) -> ExitStatus {
    let message = match err.kind() {
        ErrorKind::InvalidSubcommand
        | ErrorKind::MissingSubcommand
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            INVALID_COMMAND_MESSAGE.to_string()
        }
        _ => format!("Invalid arguments: {}", summarize(err)),
    };
    debug!(kind = ?err.kind(), "Rejected invocation");

    if let Err(e) = out.emit(&Message::fatal(message)) {
        error!(error = %e, "Failed to write log message");
    }
    ExitStatus::Failure
}

/// First line of clap's rendered error without the `error:` prefix
fn summarize(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.trim_start_matches("error:").trim().to_string()
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the command and turn any failure into a `LOG` message and a
    /// failing exit status
    pub async fn execute(&self, out: &mut (dyn MessageSink + Send)) -> ExitStatus {
        let command = self.cli.command.name();
        match self.run(out).await {
            Ok(()) => ExitStatus::Success,
            Err(e) => {
                error!(command, error = %e, "Command failed");
                if let Err(write_err) = out.emit(&Message::fatal(e.to_string())) {
                    error!(error = %write_err, "Failed to write log message");
                }
                ExitStatus::Failure
            }
        }
    }

    /// Run the CLI command
    pub async fn run(&self, out: &mut (dyn MessageSink + Send)) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => self.spec(out),
            Commands::Check { config } => self.check(config, out).await,
            Commands::Discover { config } => self.discover(config, out),
            Commands::Read {
                config,
                catalog,
                state,
            } => {
                self.read(config, catalog, state.as_deref(), out)
                    .await
            }
        }
    }

    /// Load the configuration file.
    ///
    /// The API key is checked by the source once it is about to call the API.
    fn load_config(&self, path: &Path) -> Result<SourceConfig> {
        let raw: JsonValue = read_json_file(path)?;
        SourceConfig::parse(raw)
    }

    /// Show connector specification
    fn spec(&self, out: &mut (dyn MessageSink + Send)) -> Result<()> {
        let source = NytBooksSource::public()?;
        out.emit(&Message::spec(source.spec()))
    }

    /// Check connection
    async fn check(&self, config_path: &Path, out: &mut (dyn MessageSink + Send)) -> Result<()> {
        let raw: JsonValue = read_json_file(config_path)?;

        let status = match SourceConfig::from_value(raw) {
            Ok(config) => {
                let source = NytBooksSource::from_config(&config)?;
                source.check(&config).await
            }
            Err(e) => {
                warn!(error = %e, "Configuration rejected during check");
                ConnectionStatus::failed(e.to_string())
            }
        };

        info!(succeeded = status.is_success(), "Connection check finished");
        out.emit(&Message::connection_status(status))
    }

    /// Discover streams
    fn discover(&self, config_path: &Path, out: &mut (dyn MessageSink + Send)) -> Result<()> {
        // The catalog is static; the config only has to be readable JSON
        let _: JsonValue = read_json_file(config_path)?;

        let source = NytBooksSource::public()?;
        out.emit(&Message::catalog(source.discover()))
    }

    /// Read records
    async fn read(
        &self,
        config_path: &Path,
        catalog_path: &Path,
        state_path: Option<&Path>,
        out: &mut (dyn MessageSink + Send),
    ) -> Result<()> {
        let config = self.load_config(config_path)?;
        let catalog: ConfiguredCatalog = read_json_file(catalog_path)?;

        if let Some(state_path) = state_path {
            debug!(
                path = %state_path.display(),
                "Ignoring state file, only full refresh is supported"
            );
        }

        let source = NytBooksSource::from_config(&config)?;
        let records = source.read(&config, &catalog, out).await?;
        info!(records, "Read finished");
        Ok(())
    }
}
