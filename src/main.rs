use clap::Parser;
use swap_quoter::cli::{commands, Cli, Commands};
use swap_quoter::core::{Config, SwapError};

#[tokio::main]
async fn main() -> Result<(), SwapError> {
    // Load .env before the logger so RUST_LOG can live there too
    dotenv::dotenv().ok();

    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Quote(args) => commands::quote::execute(args, &config).await?,
        Commands::Routes(args) => commands::routes::execute(args, &config).await?,
        Commands::Pools(args) => commands::pools::execute(args, &config).await?,
    }

    Ok(())
}
