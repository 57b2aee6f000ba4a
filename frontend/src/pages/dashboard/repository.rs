use crate::{
    api::{ApiClient, ApiError, Enrollment, UserBadge, UserResponse},
    pages::dashboard::utils::{next_progress, DashboardStats},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub me: UserResponse,
    pub enrollments: Vec<Enrollment>,
    pub badges: Vec<UserBadge>,
    pub stats: DashboardStats,
}

/// Enrollments, badges and identity are requested together; any failure fails the whole view.
pub async fn fetch_overview(api: &ApiClient) -> Result<DashboardOverview, ApiError> {
    let (enrollments, badges, me) =
        futures::join!(api.my_enrollments(), api.my_badges(), api.get_me());
    let (enrollments, badges, me) = (enrollments?, badges?, me?);
    let stats = DashboardStats::compute(&me, &enrollments, &badges);
    Ok(DashboardOverview {
        me,
        enrollments,
        badges,
        stats,
    })
}

pub async fn advance_progress(api: &ApiClient, enrollment: &Enrollment) -> Result<Enrollment, ApiError> {
    api.update_enrollment_progress(enrollment.id, next_progress(enrollment.progress))
        .await
}
