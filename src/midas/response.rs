//! Payloads returned by the Midas API. Server values are trusted as-is and
//! missing fields fall back to defaults.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakInfo {
    pub streak_days_count: u32,
    pub claimable: bool,
    pub next_rewards: NextRewards,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NextRewards {
    pub points: u64,
    pub tickets: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StreakReward {
    pub points: u64,
    pub tickets: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub telegram_id: i64,
    pub username: String,
    pub first_name: String,
    pub points: u64,
    pub tickets: u32,
    pub games_played: u32,
    pub streak_days_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferralStatus {
    pub can_claim: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferralReward {
    pub total_points: u64,
    pub total_tickets: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayResult {
    pub points: u64,
}
