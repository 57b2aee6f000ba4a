pub mod utils;
pub mod view_model;
