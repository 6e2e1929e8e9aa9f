use crate::demo::{
    run_advise, run_demo, run_loans, run_schemes, AdviseArgs, DemoArgs, LoansArgs, SchemesArgs,
};
use crate::infra::init_cli_telemetry;
use crate::server;
use clap::{Args, Parser, Subcommand};
use krishi_mitra::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "KrishiMitra",
    about = "Run the KrishiMitra farm advisory service or query it from the command line",
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
    /// Evaluate weather advice for a crop
    Advise(AdviseArgs),
    /// List government schemes a farmer is eligible for
    Schemes(SchemesArgs),
    /// Suggest loans and subsidies by age and land holding
    Loans(LoansArgs),
    /// Walk through every advisory feature with sample inputs
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the directory holding crop and scheme tables
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    if !matches!(command, Command::Serve(_)) {
        init_cli_telemetry()?;
    }

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Advise(args) => run_advise(args),
        Command::Schemes(args) => run_schemes(args),
        Command::Loans(args) => run_loans(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["krishi-mitra-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn schemes_flags_parse() {
        let cli = Cli::try_parse_from([
            "krishi-mitra-api",
            "schemes",
            "--state",
            "Rajasthan",
            "--land-holding",
            "2.5",
            "--gender",
            "Female",
        ])
        .expect("parses");

        let Some(Command::Schemes(args)) = cli.command else {
            panic!("expected schemes command");
        };
        assert_eq!(args.state, "Rajasthan");
        assert_eq!(args.land_holding, Some(2.5));
        assert!(args.loanee.is_none());
    }
}
