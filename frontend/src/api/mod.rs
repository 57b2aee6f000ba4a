mod admin;
mod auth;
pub mod client;
mod courses;
pub mod error;
mod learning;
mod mentorships;
mod public;
mod study_groups;
pub mod types;

pub use client::*;
pub use error::ApiError;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
