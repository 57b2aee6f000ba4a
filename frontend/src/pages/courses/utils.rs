use crate::api::{Course, CourseQuery};

pub const CATEGORIES: [&str; 6] = [
    "coding",
    "digital_literacy",
    "renewable_energy",
    "business",
    "design",
    "data_science",
];

pub const SKILL_LEVELS: [&str; 3] = ["beginner", "intermediate", "advanced"];

/// `digital_literacy` -> `Digital Literacy`.
pub fn humanize(value: &str) -> String {
    value
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Catalogue filters. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub search: String,
    pub category: String,
    pub skill_level: String,
}

impl CourseFilter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.category.is_empty() && self.skill_level.is_empty()
    }

    pub fn to_query(&self) -> CourseQuery {
        let non_empty = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        CourseQuery {
            search: non_empty(&self.search),
            category: non_empty(&self.category),
            skill_level: non_empty(&self.skill_level),
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty()
            || course.title.to_lowercase().contains(&search)
            || course.description.to_lowercase().contains(&search);
        let matches_category = self.category.is_empty() || course.category == self.category;
        let matches_level = self.skill_level.is_empty() || course.skill_level == self.skill_level;
        matches_search && matches_category && matches_level
    }

    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        courses
            .iter()
            .filter(|course| self.matches(course))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn course(id: i64, title: &str, category: &str, skill_level: &str) -> Course {
    Course {
        id,
        title: title.into(),
        description: format!("{} description", title),
        category: category.into(),
        skill_level: skill_level.into(),
        duration: 10,
        provider: "Hub".into(),
        external_url: String::new(),
        image: None,
        created_at: None,
        is_active: true,
        rating: 4.0,
        enrolled_count: 0,
        is_enrolled: false,
        user_progress: 0,
    }
}
