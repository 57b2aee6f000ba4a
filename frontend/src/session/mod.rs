pub mod manager;


pub use manager::{
    validate_registration, Session, SessionEvent, SessionManager, SessionStatus,
};
