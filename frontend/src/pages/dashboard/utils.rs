use crate::api::{Enrollment, UserBadge, UserResponse};
use serde::{Deserialize, Serialize};

pub const POINTS_PER_LEVEL: i64 = 100;
pub const PROGRESS_STEP: i64 = 25;

pub fn level_for(points: i64) -> i64 {
    points.max(0) / POINTS_PER_LEVEL + 1
}

/// Progress after one more step, capped at 100.
pub fn next_progress(current: i64) -> i64 {
    (current.clamp(0, 100) + PROGRESS_STEP).min(100)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub points: i64,
    pub level: i64,
    pub enrolled: usize,
    pub completed: usize,
    pub average_progress: i64,
    pub badges: usize,
}

impl DashboardStats {
    pub fn compute(me: &UserResponse, enrollments: &[Enrollment], badges: &[UserBadge]) -> Self {
        let completed = enrollments
            .iter()
            .filter(|enrollment| enrollment.completed || enrollment.progress >= 100)
            .count();
        let average_progress = if enrollments.is_empty() {
            0
        } else {
            let total: i64 = enrollments.iter().map(|e| e.progress.clamp(0, 100)).sum();
            let count = enrollments.len() as i64;
            (total + count / 2) / count
        };
        Self {
            points: me.points,
            level: level_for(me.points),
            enrolled: enrollments.len(),
            completed,
            average_progress,
            badges: badges.iter().filter(|badge| badge.is_active).count(),
        }
    }
}
