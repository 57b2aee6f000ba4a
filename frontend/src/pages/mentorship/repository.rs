use crate::{
    api::{ApiClient, ApiError, Mentorship},
    pages::mentorship::utils::MatchOutcome,
};

pub async fn fetch_mentorships(api: &ApiClient) -> Result<Vec<Mentorship>, ApiError> {
    api.list_mentorships().await
}

pub async fn find_mentor(api: &ApiClient) -> Result<MatchOutcome, ApiError> {
    Ok(match api.match_mentor().await? {
        Some(mentorship) => MatchOutcome::Matched(mentorship),
        None => MatchOutcome::NoMentors,
    })
}

/// Asks `mentor_id` to mentor the signed-in user.
pub async fn request_mentor(api: &ApiClient, mentor_id: i64) -> Result<Mentorship, ApiError> {
    let learner = api
        .current_user()
        .ok_or_else(|| ApiError::validation("Please log in to request a mentor."))?;
    if learner.id == mentor_id {
        return Err(ApiError::validation("You cannot mentor yourself."));
    }
    api.request_mentorship(mentor_id, learner.id).await
}

pub async fn complete_session(api: &ApiClient, mentorship_id: i64) -> Result<Mentorship, ApiError> {
    api.complete_mentorship_session(mentorship_id).await
}
