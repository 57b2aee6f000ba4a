use crate::{
    api::{ApiClient, ApiError, MessageResponse, StudyGroup},
    pages::study_groups::utils::GroupForm,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupsOverview {
    pub all: Vec<StudyGroup>,
    pub mine: Vec<StudyGroup>,
}

/// All groups and the caller's groups, requested together.
pub async fn fetch_groups(api: &ApiClient) -> Result<GroupsOverview, ApiError> {
    let Some(user) = api.current_user() else {
        let all = api.list_study_groups(None).await?;
        return Ok(GroupsOverview {
            all,
            mine: Vec::new(),
        });
    };
    let (all, mine) = futures::join!(
        api.list_study_groups(None),
        api.list_study_groups(Some(user.id))
    );
    Ok(GroupsOverview {
        all: all?,
        mine: mine?,
    })
}

pub async fn create_group(api: &ApiClient, form: &GroupForm) -> Result<StudyGroup, ApiError> {
    let group = form.validate()?;
    api.create_study_group(&group).await
}

pub async fn join_group(api: &ApiClient, group: &StudyGroup) -> Result<MessageResponse, ApiError> {
    if group.is_full() {
        return Err(ApiError::validation("Group is full"));
    }
    api.join_study_group(group.id).await
}

pub async fn leave_group(api: &ApiClient, group_id: i64) -> Result<MessageResponse, ApiError> {
    api.leave_study_group(group_id).await
}
