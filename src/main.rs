// Allow common clippy pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! NYTimes Books source CLI
//!
//! Speaks the connector protocol on stdout; diagnostics go to stderr.

use clap::error::ErrorKind;
use clap::Parser;
use source_nytimes_books::cli::{reject_invocation, Cli, Runner};
use source_nytimes_books::logging;
use source_nytimes_books::output::MessageWriter;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = logging::init() {
        eprintln!("Error: {e:#}");
    }

    let mut out = MessageWriter::stdout();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprint!("{}", e.render());
            return reject_invocation(&e, &mut out).into();
        }
    };

    debug!(command = cli.command.name(), "Parsed command line");
    Runner::new(cli).execute(&mut out).await.into()
}
