pub mod load_state;
pub mod message;
pub mod poll;
pub mod scope;
pub mod storage;
pub mod task;
pub mod time;

pub use load_state::LoadState;
pub use message::{field_error_lines, MessageState};
pub use scope::ViewScope;
