//! Entry point for the daytour command-line interface.
#![forbid(unsafe_code)]

fn main() -> eyre::Result<()> {
    daytour_cli::run().map_err(eyre::Report::new)
}
