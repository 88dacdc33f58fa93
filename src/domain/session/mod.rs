//! Session state: the reducer behind the signed-in/signed-out lifecycle.

mod state;

pub use state::{Session, SessionEvent, SessionPhase};
