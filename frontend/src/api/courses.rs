use super::{
    client::{ApiClient, ApiRequest},
    types::{Course, CourseQuery, Enrollment, ListPayload, MessageResponse},
    ApiError,
};

impl ApiClient {
    pub async fn list_courses(&self, query: &CourseQuery) -> Result<Vec<Course>, ApiError> {
        let payload: ListPayload<Course> = self
            .fetch(ApiRequest::get("/courses/").queries(query.to_params()))
            .await?;
        Ok(payload.into_vec())
    }

    pub async fn get_course(&self, course_id: i64) -> Result<Course, ApiError> {
        self.fetch(ApiRequest::get(format!("/courses/{}/", course_id)))
            .await
    }

    pub async fn enroll_course(&self, course_id: i64) -> Result<MessageResponse, ApiError> {
        self.fetch(ApiRequest::post(format!("/courses/{}/enroll/", course_id)))
            .await
    }

    /// The caller's enrollment in `course_id`, if any.
    pub async fn course_enrollment(&self, course_id: i64) -> Result<Option<Enrollment>, ApiError> {
        let payload: ListPayload<Enrollment> = self
            .fetch(ApiRequest::get("/enrollments/").query("course", course_id.to_string()))
            .await?;
        Ok(payload
            .into_vec()
            .into_iter()
            .find(|enrollment| enrollment.course == course_id))
    }
}
