use log::info;

use super::{
    client::{ApiClient, ApiRequest},
    types::{ListPayload, MatchResponse, Mentorship, MentorshipRequest},
    ApiError,
};

impl ApiClient {
    pub async fn list_mentorships(&self) -> Result<Vec<Mentorship>, ApiError> {
        let payload: ListPayload<Mentorship> = self.fetch(ApiRequest::get("/mentorships/")).await?;
        Ok(payload.into_vec())
    }

    /// `None` when the server has no mentor to offer.
    pub async fn match_mentor(&self) -> Result<Option<Mentorship>, ApiError> {
        let response: MatchResponse = self
            .fetch(ApiRequest::post("/mentorships/match/"))
            .await?;
        match response {
            MatchResponse::Matched(mentorship) => Ok(Some(mentorship)),
            MatchResponse::Unavailable { error } => {
                info!("Mentor match unavailable: {}", error);
                Ok(None)
            }
        }
    }

    pub async fn request_mentorship(&self, mentor_id: i64, learner_id: i64) -> Result<Mentorship, ApiError> {
        let request = ApiRequest::post("/mentorships/").json(&MentorshipRequest {
            mentor: mentor_id,
            learner: learner_id,
            status: "pending".into(),
        })?;
        self.fetch(request).await
    }

    pub async fn complete_mentorship_session(&self, mentorship_id: i64) -> Result<Mentorship, ApiError> {
        self.fetch(ApiRequest::post(format!(
            "/mentorships/{}/complete_session/",
            mentorship_id
        )))
        .await
    }
}
