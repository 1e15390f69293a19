//! The entry wizard: states, session data, review actions, and the
//! temp-file-to-final-file lifecycle.

mod lifecycle;
mod review;
mod session;
mod state;

pub use lifecycle::{TEMP_PREFIX, TEMP_SUFFIX};
pub use review::{ReviewAction, UnknownCommand};
pub use session::{SessionOutcome, Wizard};
pub use state::{State, TRANSITIONS};
