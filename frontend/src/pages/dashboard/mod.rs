//! Signed-in learner overview: enrollments, badges, points and level.
pub mod repository;
pub mod utils;
pub mod view_model;
