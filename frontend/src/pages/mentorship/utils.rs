use crate::api::Mentorship;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MentorshipTab {
    #[default]
    Find,
    Mine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Matched(Mentorship),
    NoMentors,
}

/// A user's mentorships seen from both sides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MentorshipSplit {
    pub as_mentor: Vec<Mentorship>,
    pub as_learner: Vec<Mentorship>,
}

impl MentorshipSplit {
    pub fn new(mentorships: &[Mentorship], user_id: i64) -> Self {
        let mut split = Self::default();
        for mentorship in mentorships {
            if mentorship.mentor == user_id {
                split.as_mentor.push(mentorship.clone());
            }
            if mentorship.learner == user_id {
                split.as_learner.push(mentorship.clone());
            }
        }
        split
    }

    pub fn is_empty(&self) -> bool {
        self.as_mentor.is_empty() && self.as_learner.is_empty()
    }

    /// Mentors this user has learned from, first occurrence wins.
    pub fn past_mentors(&self) -> Vec<(i64, String)> {
        let mut mentors: Vec<(i64, String)> = Vec::new();
        for mentorship in &self.as_learner {
            if !mentors.iter().any(|(id, _)| *id == mentorship.mentor) {
                mentors.push((mentorship.mentor, mentorship.mentor_username.clone()));
            }
        }
        mentors
    }
}

pub fn can_complete(mentorship: &Mentorship, user_id: i64) -> bool {
    let participant = mentorship.mentor == user_id || mentorship.learner == user_id;
    participant && !matches!(mentorship.status.as_str(), "completed" | "cancelled")
}

pub fn status_label(status: &str) -> &'static str {
    match status {
        "pending" => "Pending",
        "active" => "Active",
        "completed" => "Completed",
        "cancelled" => "Cancelled",
        _ => "Unknown",
    }
}

#[cfg(test)]
pub(crate) fn mentorship(id: i64, mentor: i64, learner: i64, status: &str) -> Mentorship {
    Mentorship {
        id,
        mentor,
        learner,
        course: None,
        status: status.into(),
        mentor_username: format!("mentor{}", mentor),
        learner_username: format!("learner{}", learner),
        course_title: None,
        created_at: None,
        scheduled_at: None,
        completed_at: None,
        notes: String::new(),
        rating: 0,
        feedback: String::new(),
        meeting_link: String::new(),
    }
}
