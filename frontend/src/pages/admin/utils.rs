use crate::api::{ApiError, Course, CoursePayload, PublicStats};
use crate::pages::courses::utils::humanize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Overview,
    Courses,
    Users,
    Analytics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Activate,
    Deactivate,
    Delete,
}

impl BulkAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "activate" => Some(BulkAction::Activate),
            "deactivate" => Some(BulkAction::Deactivate),
            "delete" => Some(BulkAction::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BulkAction::Activate => "activate",
            BulkAction::Deactivate => "deactivate",
            BulkAction::Delete => "delete",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            BulkAction::Activate => "activated",
            BulkAction::Deactivate => "deactivated",
            BulkAction::Delete => "deleted",
        }
    }

    pub fn summary(self, count: usize) -> String {
        format!("{} courses {} successfully!", count, self.past_tense())
    }
}

/// Courses ticked in the course table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseSelection {
    ids: BTreeSet<i64>,
}

impl CourseSelection {
    pub fn toggle(&mut self, course_id: i64) {
        if !self.ids.remove(&course_id) {
            self.ids.insert(course_id);
        }
    }

    /// Selects every course, or clears the selection if all are already selected.
    pub fn toggle_all(&mut self, courses: &[Course]) {
        if self.all_selected(courses) {
            self.ids.clear();
        } else {
            self.ids = courses.iter().map(|course| course.id).collect();
        }
    }

    pub fn all_selected(&self, courses: &[Course]) -> bool {
        !courses.is_empty() && courses.iter().all(|course| self.ids.contains(&course.id))
    }

    pub fn contains(&self, course_id: i64) -> bool {
        self.ids.contains(&course_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.ids.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Editable course fields. Duration stays text until validated.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub skill_level: String,
    pub duration: String,
    pub provider: String,
    pub external_url: String,
    pub is_active: bool,
}

impl Default for CourseForm {
    fn default() -> Self {
        let defaults = CoursePayload::default();
        Self {
            title: defaults.title,
            description: defaults.description,
            category: defaults.category,
            skill_level: defaults.skill_level,
            duration: defaults.duration.to_string(),
            provider: defaults.provider,
            external_url: defaults.external_url,
            is_active: defaults.is_active,
        }
    }
}

impl CourseForm {
    pub fn from_course(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone(),
            category: course.category.clone(),
            skill_level: course.skill_level.clone(),
            duration: course.duration.to_string(),
            provider: course.provider.clone(),
            external_url: course.external_url.clone(),
            is_active: course.is_active,
        }
    }

    pub fn validate(&self) -> Result<CoursePayload, ApiError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ApiError::validation("Course title is required"));
        }
        let duration: i64 = self
            .duration
            .trim()
            .parse()
            .map_err(|_| ApiError::validation("Duration must be a whole number of hours"))?;
        if duration <= 0 {
            return Err(ApiError::validation("Duration must be at least one hour"));
        }
        let external_url = self.external_url.trim();
        if !external_url.is_empty()
            && !(external_url.starts_with("http://") || external_url.starts_with("https://"))
        {
            return Err(ApiError::validation(
                "External URL must start with http:// or https://",
            ));
        }
        Ok(CoursePayload {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            category: self.category.clone(),
            skill_level: self.skill_level.clone(),
            duration,
            provider: self.provider.trim().to_string(),
            external_url: external_url.to_string(),
            is_active: self.is_active,
        })
    }
}

/// `None` course id means the editor creates a new course.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CourseEditor {
    pub course_id: Option<i64>,
    pub form: CourseForm,
}

impl CourseEditor {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit(course: &Course) -> Self {
        Self {
            course_id: Some(course.id),
            form: CourseForm::from_course(course),
        }
    }
}

pub fn category_breakdown(stats: &PublicStats) -> Vec<(String, i64)> {
    stats
        .courses_by_category
        .iter()
        .map(|(category, count)| (humanize(category), *count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::courses::utils::course;

    fn catalogue() -> Vec<Course> {
        vec![
            course(1, "Python", "coding", "beginner"),
            course(2, "Solar", "renewable_energy", "beginner"),
        ]
    }

    #[test]
    fn selection_toggles_individual_courses() {
        let mut selection = CourseSelection::default();
        selection.toggle(1);
        selection.toggle(2);
        selection.toggle(1);
        assert_eq!(selection.ids(), vec![2]);
        assert!(!selection.contains(1));
    }

    #[test]
    fn select_all_clears_when_everything_is_selected() {
        let courses = catalogue();
        let mut selection = CourseSelection::default();
        selection.toggle(1);

        selection.toggle_all(&courses);
        assert_eq!(selection.ids(), vec![1, 2]);
        assert!(selection.all_selected(&courses));

        selection.toggle_all(&courses);
        assert!(selection.is_empty());
    }

    #[test]
    fn empty_catalogue_is_never_all_selected() {
        assert!(!CourseSelection::default().all_selected(&[]));
    }

    #[test]
    fn bulk_action_round_trips_select_values() {
        for action in [BulkAction::Activate, BulkAction::Deactivate, BulkAction::Delete] {
            assert_eq!(BulkAction::parse(action.as_str()), Some(action));
        }
        assert_eq!(BulkAction::parse(""), None);
        assert_eq!(
            BulkAction::Deactivate.summary(3),
            "3 courses deactivated successfully!"
        );
    }

    #[test]
    fn course_form_validates_fields() {
        let form = CourseForm {
            title: "  Intro to Solar ".into(),
            duration: "12".into(),
            external_url: "https://example.org/solar".into(),
            ..Default::default()
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.title, "Intro to Solar");
        assert_eq!(payload.duration, 12);
        assert_eq!(payload.category, "coding");

        let missing_title = CourseForm::default().validate().unwrap_err();
        assert_eq!(missing_title.to_string(), "Course title is required");

        let bad_duration = CourseForm {
            title: "T".into(),
            duration: "0".into(),
            ..Default::default()
        };
        assert!(bad_duration.validate().is_err());

        let bad_url = CourseForm {
            title: "T".into(),
            external_url: "ftp://x".into(),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn editor_prefills_from_course() {
        let editor = CourseEditor::edit(&course(5, "Design", "design", "advanced"));
        assert_eq!(editor.course_id, Some(5));
        assert_eq!(editor.form.title, "Design");
        assert_eq!(editor.form.duration, "10");
        assert_eq!(CourseEditor::create().course_id, None);
    }

    #[test]
    fn categories_are_humanized() {
        let mut stats = PublicStats::default();
        stats.courses_by_category.insert("data_science".into(), 4);
        stats.courses_by_category.insert("coding".into(), 7);
        assert_eq!(
            category_breakdown(&stats),
            vec![("Coding".to_string(), 7), ("Data Science".to_string(), 4)]
        );
    }
}
