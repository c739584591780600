use crate::commands::{
    run_peaks, run_recommend, run_services, run_trend, RecommendArgs, TrendArgs,
};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use smartqueue::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SmartQueue",
    about = "Rank appointment slots and serve the SmartQueue API",
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
    /// Rank the slots of a day for a service
    Recommend(RecommendArgs),
    /// Summarize bookings per slot and their trend
    Trend(TrendArgs),
    /// Show reference and detected peak hours
    Peaks,
    /// List the configured services
    Services,
    /// Walk through recommendations, explanations, and trends on demo data
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Trend(args) => run_trend(args),
        Command::Peaks => run_peaks(),
        Command::Services => run_services(),
        Command::Demo(args) => run_demo(args),
    }
}
