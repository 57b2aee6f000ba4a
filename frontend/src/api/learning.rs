use super::{
    client::{ApiClient, ApiRequest},
    types::{Enrollment, ListPayload, ProgressUpdate, UserBadge},
    ApiError,
};

impl ApiClient {
    pub async fn my_enrollments(&self) -> Result<Vec<Enrollment>, ApiError> {
        let payload: ListPayload<Enrollment> =
            self.fetch(ApiRequest::get("/enrollments/")).await?;
        Ok(payload.into_vec())
    }

    pub async fn update_enrollment_progress(
        &self,
        enrollment_id: i64,
        progress: i64,
    ) -> Result<Enrollment, ApiError> {
        if !(0..=100).contains(&progress) {
            return Err(ApiError::validation("Progress must be between 0 and 100"));
        }
        let request = ApiRequest::post(format!("/enrollments/{}/update_progress/", enrollment_id))
            .json(&ProgressUpdate { progress })?;
        self.fetch(request).await
    }

    pub async fn my_badges(&self) -> Result<Vec<UserBadge>, ApiError> {
        let payload: ListPayload<UserBadge> = self.fetch(ApiRequest::get("/user-badges/")).await?;
        Ok(payload.into_vec())
    }
}
