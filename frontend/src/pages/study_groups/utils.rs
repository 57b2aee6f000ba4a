use crate::api::{ApiError, NewStudyGroup, StudyGroup};

pub const MIN_MEMBERS: i64 = 2;
pub const MAX_MEMBERS: i64 = 100;
pub const DEFAULT_MAX_MEMBERS: i64 = 10;
const MAX_NAME_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupsTab {
    #[default]
    Browse,
    Mine,
    Create,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupForm {
    pub name: String,
    pub description: String,
    pub max_members: String,
    pub is_private: bool,
    pub meeting_link: String,
}

impl Default for GroupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            max_members: DEFAULT_MAX_MEMBERS.to_string(),
            is_private: false,
            meeting_link: String::new(),
        }
    }
}

impl GroupForm {
    pub fn validate(&self) -> Result<NewStudyGroup, ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("Group name is required"));
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(ApiError::validation(format!(
                "Group name must be at most {} characters",
                MAX_NAME_CHARS
            )));
        }
        let max_members: i64 = self
            .max_members
            .trim()
            .parse()
            .map_err(|_| ApiError::validation("Max members must be a number"))?;
        if !(MIN_MEMBERS..=MAX_MEMBERS).contains(&max_members) {
            return Err(ApiError::validation(format!(
                "Max members must be between {} and {}",
                MIN_MEMBERS, MAX_MEMBERS
            )));
        }
        Ok(NewStudyGroup {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            course: None,
            is_private: self.is_private,
            max_members,
            meeting_link: self.meeting_link.trim().to_string(),
        })
    }
}

/// Whether `user_id` may join `group` right now.
pub fn can_join(group: &StudyGroup, user_id: i64) -> bool {
    !group.has_member(user_id) && !group.is_full()
}

pub fn capacity_label(group: &StudyGroup) -> String {
    format!("{}/{}", group.member_count(), group.max_members)
}

#[cfg(test)]
pub(crate) fn group(id: i64, name: &str, members: Vec<i64>, max_members: i64) -> StudyGroup {
    StudyGroup {
        id,
        name: name.into(),
        description: String::new(),
        course: None,
        creator: members.first().copied(),
        creator_username: String::new(),
        members_count: members.len() as i64,
        members,
        is_member: false,
        is_private: false,
        max_members,
        meeting_link: String::new(),
        created_at: None,
    }
}
