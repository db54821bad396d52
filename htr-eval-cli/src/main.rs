//! htr - transcription accuracy benchmarking

use clap::Parser;
use htr_eval_cli::commands::{init_logging, Commands};
use htr_eval_cli::CliResult;

/// Evaluate OCR/HTR transcriptions against ground truth
#[derive(Debug, Parser)]
#[command(name = "htr", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    log::debug!("Command: {:?}", cli.command);
    cli.command.execute(cli.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["htr", "summary", "evals/*.json", "-vv", "-q"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Summary(_)));
    }
}
