use std::process::ExitCode;

use bus_monitor::alert::TerminalBell;
use bus_monitor::bis::{BisClient, BisConfig, BusInfoApi, MockBisClient};
use bus_monitor::console::Terminal;
use bus_monitor::driver::{CtrlC, Driver, DriverError};
use bus_monitor::monitor::MonitorConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A .env file is optional; real environment variables take precedence
    _ = dotenvy::dotenv();

    // Logs go to stderr and stay quiet by default so they don't tear the display
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = MonitorConfig::default();

    let result = match std::env::var("BIS_MOCK_DIR") {
        Ok(dir) => {
            let api = MockBisClient::from_dir(&dir).expect("Failed to load mock data");
            run(api, config).await
        }
        Err(_) => {
            let api = BisClient::new(bis_config_from_env()).expect("Failed to create BIS client");
            run(api, config).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Read service keys and endpoint from the environment.
fn bis_config_from_env() -> BisConfig {
    let station_key = std::env::var("BIS_STATION_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: BIS_STATION_KEY not set. API calls will fail.");
        String::new()
    });
    // One key usually covers both endpoints
    let arrival_key = std::env::var("BIS_ARRIVAL_KEY").unwrap_or_else(|_| station_key.clone());

    let config = BisConfig::new(station_key, arrival_key);
    match std::env::var("BIS_BASE_URL") {
        Ok(url) => config.with_base_url(url),
        Err(_) => config,
    }
}

async fn run<A: BusInfoApi>(api: A, config: MonitorConfig) -> Result<(), DriverError> {
    let mut driver = Driver::new(api, Terminal::new(), TerminalBell, CtrlC, config);
    driver.run().await
}
