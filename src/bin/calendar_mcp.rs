use std::path::PathBuf;

use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::EnvFilter;

use training_calendar::mcp::CalendarService;
use training_calendar::model::WeekStart;

/// Training Calendar MCP Server: month grids, phases and scheduling via Model Context Protocol.
#[derive(Parser, Debug)]
#[command(name = "training-calendar-mcp", version, about)]
struct Cli {
    /// Directory holding items.json and phases.json
    #[arg(long, default_value = "./training-data")]
    data_dir: PathBuf,

    /// First column of each week
    #[arg(long, value_enum, default_value_t = WeekStart::Sunday)]
    week_start: WeekStart,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr (MCP uses stdio for JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("training_calendar=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    if !cli.data_dir.is_dir() {
        anyhow::bail!("data directory not found: {}", cli.data_dir.display());
    }

    tracing::info!(
        data_dir = %cli.data_dir.display(),
        week_start = ?cli.week_start,
        "Starting Training Calendar MCP server"
    );

    let service = CalendarService::new(&cli.data_dir, cli.week_start)?;

    let server = service.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    server.waiting().await?;

    Ok(())
}
