use super::{
    client::{ApiClient, ApiRequest},
    types::{FreeCourse, FreeCoursesResponse, ListPayload, PublicStats, Timeframe, UserResponse},
    ApiError,
};

impl ApiClient {
    /// Users ordered by points, highest first.
    pub async fn leaderboard(&self, timeframe: Timeframe) -> Result<Vec<UserResponse>, ApiError> {
        let payload: ListPayload<UserResponse> = self
            .fetch(ApiRequest::get("/leaderboard/").query("timeframe", timeframe.as_str()))
            .await?;
        Ok(payload.into_vec())
    }

    pub async fn public_stats(&self) -> Result<PublicStats, ApiError> {
        self.fetch(ApiRequest::get("/public-stats/")).await
    }

    pub async fn free_courses(&self) -> Result<Vec<FreeCourse>, ApiError> {
        let payload: FreeCoursesResponse = self.fetch(ApiRequest::get("/free-courses/")).await?;
        Ok(payload.results)
    }
}
