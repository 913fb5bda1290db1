//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use relay_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr before exiting"
)]
fn main() {
    match relay_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("relay: {err}");
            std::process::exit(1);
        }
    }
}
