use agent_time_tool::{cli::Cli, logging, server};

/// Time Tool Server
///
/// Usage: npx @modelcontextprotocol/inspector cargo run --bin agent-time-tool
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments and environment into configuration
    let config = Cli::parse_config()?;

    logging::init_logging(&config)?;
    tracing::info!(
        "Starting time tool server (default timezone: {}, schema: {:?})",
        config.default_timezone,
        config.schema_policy
    );

    if let Err(e) = server::run(config).await {
        tracing::error!("Error running time tool server: {}", e);
        return Err(e);
    }

    Ok(())
}
