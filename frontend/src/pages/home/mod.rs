//! Landing view: public stats and featured courses, loaded independently.
pub mod repository;
pub mod view_model;
