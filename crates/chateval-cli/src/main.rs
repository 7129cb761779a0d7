//! ChatEval CLI application
//!
//! Runs log-likelihood benchmark tasks against a chat-completion endpoint.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/chateval-cli
//! ```
//!
//! # Output contract
//!
//! stdout receives exactly one JSON document: `{"success": true, "results": {...}}`
//! or `{"success": false, "error": "...", "trace": "..."}`. Progress, the summary
//! table and logs go to stderr (see `--diagnostics`). The exit status is `0` on
//! success and `1` otherwise.

mod args;
mod commands;
mod logging;
mod output;

use std::ffi::OsString;

use clap::Parser;
use clap::error::ErrorKind;

use chateval_eval::BenchmarkOutcome;

use args::Cli;

#[tokio::main]
async fn main() {
    let argv: Vec<OsString> = std::env::args_os().collect();

    let cli = match Cli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            let rendered = e.render().to_string();
            let reason = rendered.lines().next().unwrap_or_default();
            let outcome = BenchmarkOutcome::failure(format!(
                "Invalid arguments: {}",
                reason.trim_start_matches("error: ")
            ));
            let output_file = output::fallback_output_path(
                argv.into_iter().skip(1),
                std::env::var_os("CHATEVAL_OUTPUT"),
            );
            std::process::exit(output::emit_outcome(&outcome, output_file.as_deref()).await);
        }
    };

    logging::init(cli.verbose, cli.log_format);

    let code = commands::bench::run(&cli).await;
    std::process::exit(code);
}
