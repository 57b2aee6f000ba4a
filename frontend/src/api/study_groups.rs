use super::{
    client::{ApiClient, ApiRequest},
    types::{GroupMessage, ListPayload, MessageResponse, NewGroupMessage, NewStudyGroup, StudyGroup},
    ApiError,
};

impl ApiClient {
    /// All groups, or only those `member` belongs to.
    pub async fn list_study_groups(&self, member: Option<i64>) -> Result<Vec<StudyGroup>, ApiError> {
        let mut request = ApiRequest::get("/study-groups/");
        if let Some(member) = member {
            request = request.query("member", member.to_string());
        }
        let payload: ListPayload<StudyGroup> = self.fetch(request).await?;
        Ok(payload.into_vec())
    }

    pub async fn create_study_group(&self, group: &NewStudyGroup) -> Result<StudyGroup, ApiError> {
        self.fetch(ApiRequest::post("/study-groups/").json(group)?)
            .await
    }

    pub async fn join_study_group(&self, group_id: i64) -> Result<MessageResponse, ApiError> {
        self.fetch(ApiRequest::post(format!("/study-groups/{}/join/", group_id)))
            .await
    }

    pub async fn leave_study_group(&self, group_id: i64) -> Result<MessageResponse, ApiError> {
        self.fetch(ApiRequest::post(format!("/study-groups/{}/leave/", group_id)))
            .await
    }

    pub async fn group_messages(&self, group_id: i64) -> Result<Vec<GroupMessage>, ApiError> {
        let payload: ListPayload<GroupMessage> = self
            .fetch(ApiRequest::get(format!("/study-groups/{}/messages/", group_id)))
            .await?;
        Ok(payload.into_vec())
    }

    pub async fn send_group_message(&self, group_id: i64, message: &str) -> Result<GroupMessage, ApiError> {
        let request = ApiRequest::post("/group-messages/").json(&NewGroupMessage {
            group: group_id,
            message: message.to_string(),
        })?;
        self.fetch(request).await
    }
}
