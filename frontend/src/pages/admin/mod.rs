//! Admin console: platform overview, course management and bulk actions.
//! Only reachable behind `RequireAdmin`.
pub mod repository;
pub mod utils;
pub mod view_model;
