use anyhow::Result;
use dotenvy::dotenv;
use log::info;

use starlight::{Config, StarlightBot};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌  {e}");
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("🚀 Launching Starlight-Bot v{} …", env!("CARGO_PKG_VERSION"));

    StarlightBot::new(config).run().await
}
