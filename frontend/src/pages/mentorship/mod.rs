//! Mentor matching and the caller's mentorships.
pub mod repository;
pub mod utils;
pub mod view_model;
