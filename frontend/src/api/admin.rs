use serde_json::json;

use super::{
    client::{ApiClient, ApiRequest},
    types::{Course, CoursePayload, ListPayload, UserResponse},
    ApiError,
};

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, ApiError> {
        let payload: ListPayload<UserResponse> = self.fetch(ApiRequest::get("/users/")).await?;
        Ok(payload.into_vec())
    }

    pub async fn create_course(&self, course: &CoursePayload) -> Result<Course, ApiError> {
        self.fetch(ApiRequest::post("/courses/").json(course)?).await
    }

    pub async fn update_course(&self, course_id: i64, course: &CoursePayload) -> Result<Course, ApiError> {
        self.fetch(ApiRequest::put(format!("/courses/{}/", course_id)).json(course)?)
            .await
    }

    pub async fn set_course_active(&self, course_id: i64, active: bool) -> Result<(), ApiError> {
        let request = ApiRequest::patch(format!("/courses/{}/", course_id))
            .json(&json!({ "is_active": active }))?;
        self.execute(request).await
    }

    pub async fn delete_course(&self, course_id: i64) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(format!("/courses/{}/", course_id)))
            .await
    }
}
