//! Study-group chat: a polling message room and its view model.
pub mod room;
pub mod view_model;
