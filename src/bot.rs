use std::time::Duration;

use log::{error, info, warn};
use tokio::time::sleep;

use crate::account::{tail_preview, Account};
use crate::midas::{MidasApi, Session};

/// Sleep intervals driving the account loop. Constructed once from config in
/// `main` and passed down, zeroed out in tests.
#[derive(Debug, Clone)]
pub struct Timing {
    pub between_accounts: Duration,
    pub between_runs: Duration,
    pub play_countdown: Duration,
}

/// One full pass over an account: authenticate, collect streak and referral
/// rewards, then spend tickets. Returns the points earned from plays. Every
/// step tolerates failure by logging and moving on; only a failed
/// authentication aborts the pass.
pub async fn process_account<A: MidasApi>(api: &A, account: &Account, timing: &Timing) -> u64 {
    info!("Processing account {}", account.preview());

    let session = match api.authenticate(&account.init_data).await {
        Ok(session) => session,
        Err(e) => {
            error!("Could not register account {}: {e}", account.preview());
            return 0;
        }
    };
    info!("Token received: {}", tail_preview(&session.token));
    info!("Cookies received: {}", tail_preview(&session.cookies));

    check_streak(api, &session).await;
    check_referral(api, &session).await;

    let tickets = fetch_user_info(api, &session).await;
    if tickets == 0 {
        warn!("No tickets available to play games");
        return 0;
    }
    let total = play_tickets(api, &session, tickets, timing).await;
    info!("Total points after playing games: {total}");
    total
}

async fn check_streak<A: MidasApi>(api: &A, session: &Session) {
    let streak = match api.streak_info(session).await {
        Ok(streak) => streak,
        Err(e) => {
            error!("Could not fetch streak info: {e}");
            return;
        }
    };
    info!("Streak days count: {}", streak.streak_days_count);
    info!(
        "Next rewards: {} points, {} tickets",
        streak.next_rewards.points, streak.next_rewards.tickets
    );
    if !streak.claimable {
        warn!("Streak not available to claim");
        return;
    }
    match api.claim_streak(session).await {
        Ok(reward) => info!(
            "Daily claim successful: {} points, {} tickets",
            reward.points, reward.tickets
        ),
        Err(e) => error!("Failed to claim daily reward: {e}"),
    }
}

async fn check_referral<A: MidasApi>(api: &A, session: &Session) {
    let status = match api.referral_status(session).await {
        Ok(status) => status,
        Err(e) => {
            error!("Could not fetch referral status: {e}");
            return;
        }
    };
    if !status.can_claim {
        warn!("No referral claims available at this time");
        return;
    }
    info!("Referral claim available, executing claim");
    match api.claim_referral(session).await {
        Ok(reward) => info!(
            "Referral claim successful: {} points, {} tickets",
            reward.total_points, reward.total_tickets
        ),
        Err(e) => error!("Error executing referral claim: {e}"),
    }
}

/// Fetch and log user info, returning the spendable ticket count. A failed
/// fetch yields zero tickets.
async fn fetch_user_info<A: MidasApi>(api: &A, session: &Session) -> u32 {
    let user = match api.user_info(session).await {
        Ok(user) => user,
        Err(e) => {
            error!("Could not fetch user info: {e}");
            return 0;
        }
    };
    info!("Telegram ID: {}", user.telegram_id);
    info!("Username: {}", user.username);
    info!("First name: {}", user.first_name);
    info!("Points: {}", user.points);
    info!("Tickets: {}", user.tickets);
    info!("Games played: {}", user.games_played);
    info!("Streak days count: {}", user.streak_days_count);
    user.tickets
}

/// Spend tickets one play at a time, stopping early on the first failed play.
async fn play_tickets<A: MidasApi>(
    api: &A,
    session: &Session,
    tickets: u32,
    timing: &Timing,
) -> u64 {
    let mut total = 0;
    let mut remaining = tickets;
    while remaining > 0 {
        play_countdown(timing.play_countdown).await;
        match api.play(session).await {
            Ok(result) => {
                total += result.points;
                remaining -= 1;
                info!(
                    "Earned {} points, total points: {total}, remaining tickets: {remaining}",
                    result.points
                );
            }
            Err(e) => {
                error!("Error playing game: {e}");
                break;
            }
        }
    }
    total
}

async fn play_countdown(countdown: Duration) {
    for i in (1..=countdown.as_secs()).rev() {
        info!("Starting game in {i}s...");
        sleep(Duration::from_secs(1)).await;
    }
}

/// One pass over all accounts, sleeping a short interval after each.
pub async fn run_pass<A: MidasApi>(api: &A, accounts: &[Account], timing: &Timing) {
    for account in accounts {
        process_account(api, account, timing).await;
        info!(
            "Sleeping {}s before processing the next account",
            timing.between_accounts.as_secs()
        );
        sleep(timing.between_accounts).await;
    }
}

/// The outer driver: pass over all accounts, long sleep, repeat forever.
/// Terminates only by external interruption, handled in `main`.
pub async fn run<A: MidasApi>(api: &A, accounts: &[Account], timing: &Timing) {
    loop {
        run_pass(api, accounts, timing).await;
        info!(
            "Finished processing all accounts, restarting in {}s",
            timing.between_runs.as_secs()
        );
        sleep(timing.between_runs).await;
    }
}
