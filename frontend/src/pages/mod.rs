pub mod admin;
pub mod chat;
pub mod courses;
pub mod dashboard;
pub mod free_courses;
pub mod home;
pub mod leaderboard;
pub mod login;
pub mod mentorship;
pub mod register;
pub mod study_groups;
