//! Account creation form state.
pub mod utils;
pub mod view_model;
