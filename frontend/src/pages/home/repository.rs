use crate::api::{ApiClient, ApiError, Course, CourseQuery, PublicStats};

pub const FEATURED_COURSES: usize = 3;

pub async fn fetch_featured_courses(api: &ApiClient) -> Result<Vec<Course>, ApiError> {
    let mut courses = api.list_courses(&CourseQuery::default()).await?;
    courses.retain(|course| course.is_active);
    courses.truncate(FEATURED_COURSES);
    Ok(courses)
}

pub async fn fetch_stats(api: &ApiClient) -> Result<PublicStats, ApiError> {
    api.public_stats().await
}
