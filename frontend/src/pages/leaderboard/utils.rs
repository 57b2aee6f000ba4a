use crate::{
    api::{Timeframe, UserResponse},
    pages::dashboard::utils::level_for,
};
use serde::{Deserialize, Serialize};

pub const TIMEFRAMES: [(Timeframe, &str); 3] = [
    (Timeframe::All, "All Time"),
    (Timeframe::Month, "This Month"),
    (Timeframe::Week, "This Week"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub user: UserResponse,
    pub level: i64,
}

impl RankedEntry {
    pub fn rank_label(&self) -> String {
        match self.rank {
            1 => "🥇".into(),
            2 => "🥈".into(),
            3 => "🥉".into(),
            rank => format!("#{}", rank),
        }
    }
}

/// Ranks users by points, highest first. Ties share the better rank.
pub fn rank_users(mut users: Vec<UserResponse>) -> Vec<RankedEntry> {
    users.sort_by(|a, b| b.points.cmp(&a.points));
    let mut entries: Vec<RankedEntry> = Vec::with_capacity(users.len());
    for (index, user) in users.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev.user.points == user.points => prev.rank,
            _ => index + 1,
        };
        entries.push(RankedEntry {
            rank,
            level: level_for(user.points),
            user,
        });
    }
    entries
}

pub fn position_of(entries: &[RankedEntry], user_id: i64) -> Option<usize> {
    entries
        .iter()
        .find(|entry| entry.user.id == user_id)
        .map(|entry| entry.rank)
}
