use crate::report::{run_portfolio_report, PortfolioReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_surveillance::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Surveillance",
    about = "Serve and inspect the loan portfolio risk surveillance data layer",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the merged loan portfolio
    Portfolio {
        #[command(subcommand)]
        command: PortfolioCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PortfolioCommand {
    /// Print the filtered portfolio with its summary statistics
    Report(PortfolioReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Portfolio {
            command: PortfolioCommand::Report(args),
        } => run_portfolio_report(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_flags_parse() {
        let cli = Cli::try_parse_from([
            "loan-surveillance",
            "portfolio",
            "report",
            "--facts",
            "data/loan_facts.json",
            "--risk-score",
            "4",
            "--sort",
            "severity",
            "--json",
        ])
        .expect("valid arguments");

        match cli.command {
            Some(Command::Portfolio {
                command: PortfolioCommand::Report(args),
            }) => {
                assert_eq!(args.risk_score.as_deref(), Some("4"));
                assert_eq!(args.sort.as_deref(), Some("severity"));
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["loan-surveillance"]).expect("valid arguments");
        assert!(cli.command.is_none());
    }
}
