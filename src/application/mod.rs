//! Application layer: the services page views talk to.

mod forms;
mod preference_editor;
mod session_manager;

pub use forms::{FormError, LoginForm, SignupForm};
pub use preference_editor::{PreferenceEditor, PreferenceError, SaveFeedback, FEEDBACK_DISPLAY};
pub use session_manager::SessionManager;
