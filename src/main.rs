mod account;
mod bot;
mod config;
mod midas;

use std::time::Duration;

use log::{error, info};

use crate::account::load_accounts;
use crate::bot::Timing;
use crate::config::Config;
use crate::midas::{MidasClient, RetryPolicy};

const PLAY_COUNTDOWN: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load();
    let accounts = load_accounts(&config.auth_file);
    if accounts.is_empty() {
        error!("No accounts found in {}, exiting", config.auth_file);
        return;
    }
    info!("Loaded {} account(s) from {}", accounts.len(), config.auth_file);

    let policy = RetryPolicy {
        max_retries: config.max_retries,
        ..Default::default()
    };
    let client = match MidasClient::new(policy) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build HTTP client: {e}");
            return;
        }
    };
    let timing = Timing {
        between_accounts: Duration::from_secs(config.sleep_between_accounts),
        between_runs: Duration::from_secs(config.sleep_between_runs),
        play_countdown: PLAY_COUNTDOWN,
    };

    tokio::select! {
        () = bot::run(&client, &accounts, &timing) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted by user, exiting");
        }
    }
}
