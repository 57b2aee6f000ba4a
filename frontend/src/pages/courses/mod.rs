//! Course catalogue, course detail and enrollment.
pub mod repository;
pub mod utils;
pub mod view_model;
