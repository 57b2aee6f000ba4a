use crate::api::FreeCourse;
use std::collections::BTreeMap;

pub const ALL_PROVIDERS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeCourseFilter {
    /// `all` or a provider name, compared case-insensitively.
    pub provider: String,
    pub search: String,
}

impl Default for FreeCourseFilter {
    fn default() -> Self {
        Self {
            provider: ALL_PROVIDERS.into(),
            search: String::new(),
        }
    }
}

impl FreeCourseFilter {
    pub fn matches(&self, course: &FreeCourse) -> bool {
        let provider = self.provider.trim().to_lowercase();
        let matches_provider = provider.is_empty()
            || provider == ALL_PROVIDERS
            || course.provider.to_lowercase() == provider;
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty()
            || course.title.to_lowercase().contains(&search)
            || course.description.to_lowercase().contains(&search);
        matches_provider && matches_search
    }

    pub fn apply(&self, courses: &[FreeCourse]) -> Vec<FreeCourse> {
        courses
            .iter()
            .filter(|course| self.matches(course))
            .cloned()
            .collect()
    }
}

/// Distinct providers in first-seen spelling, ordered case-insensitively.
pub fn providers(courses: &[FreeCourse]) -> Vec<String> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for course in courses {
        let name = course.provider.trim();
        if name.is_empty() {
            continue;
        }
        seen.entry(name.to_lowercase())
            .or_insert_with(|| name.to_string());
    }
    seen.into_values().collect()
}

#[cfg(test)]
pub(crate) fn free_course(id: &str, title: &str, provider: &str) -> FreeCourse {
    FreeCourse {
        id: id.into(),
        title: title.into(),
        provider: provider.into(),
        description: format!("Learn {}", title),
        duration: "4 weeks".into(),
        skill_level: "beginner".into(),
        category: "coding".into(),
        url: format!("https://example.org/{}", id),
        rating: 4.5,
        enrolled_count: 0,
        image_url: None,
        external_id: None,
    }
}
