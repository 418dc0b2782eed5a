//! CLI interface to allow regex based file renaming
//!
//! # Example:
//! ```bash
//! rr '*.JPG' 'photo(\d+)' 'image_${1}' /p
//! rr '*.JPG' 'photo(\d+)' 'image_${1}'
//! ```

use std::process::ExitCode;

use rename_regex::{app, error::Error, logging, parse_args, usage};

fn main() -> ExitCode {
        logging::tracing_subscribe_boilerplate("warn");
        tracing::trace!("Starting up!");

        let args = match parse_args(std::env::args_os()) {
                Ok(args) => args,
                Err(e) => {
                        tracing::debug!("Argument parsing failed: {}", e);
                        println!("{}", usage());
                        return ExitCode::FAILURE;
                }
        };

        match app(&args) {
                Ok(summary) => {
                        tracing::debug!(?summary, "done");
                        ExitCode::SUCCESS
                }
                Err(Error::NoMatch) => {
                        println!("{}", Error::NoMatch);
                        ExitCode::FAILURE
                }
                Err(e) => {
                        eprintln!("Error: {}", e);
                        ExitCode::FAILURE
                }
        }
}
