use crate::demo::{run_demo, run_status_report, DemoArgs, StatusReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use erms::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Retirement Case Tracker",
    about = "Run the retirement case tracking service or inspect cases from the command line",
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
    /// Case status inspection
    Status {
        #[command(subcommand)]
        command: StatusCommand,
    },
    /// Walk a seeded case through the full routing lifecycle
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum StatusCommand {
    /// Classify a seeded demo case against one workflow's field set
    Report(StatusReportArgs),
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
        Command::Status {
            command: StatusCommand::Report(args),
        } => run_status_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
