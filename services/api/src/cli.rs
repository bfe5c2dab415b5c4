use crate::offline::{run_route, run_validate, RouteArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use drip_campaign::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Drip Campaign Survey Router",
    about = "Route survey responses and audit survey path configuration",
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
    /// Resolve which path a set of selected options routes to
    Route(RouteArgs),
    /// Print configuration warnings for every path of a survey export
    Validate(ValidateArgs),
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
        Command::Route(args) => run_route(args),
        Command::Validate(args) => run_validate(args),
    }
}
