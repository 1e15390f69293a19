//! # Touchlog Core
//!
//! Entry-creation engine for touchlog - a terminal wizard that writes dated,
//! templated notes.
//!
//! This crate holds the wizard state machine and everything it drives,
//! independent of the CLI prompts that feed it.
//!
//! ## Architecture
//!
//! - **wizard**: State machine, session data, review actions, file lifecycle
//! - **template**: Rendering with escaping of user-supplied values
//! - **editor**: Editor resolution chain, launcher, built-in line editor
//! - **naming**: Slugs and collision-safe filenames
//! - **paths**: Output directory expansion and validation
//! - **config**: Typed configuration model
//! - **metadata**: User/host/git metadata boundary
//! - **zone**: Timezones and date formatting

pub mod config;
pub mod editor;
pub mod error;
pub mod fs;
pub mod metadata;
pub mod naming;
pub mod paths;
pub mod template;
pub mod wizard;
pub mod zone;

pub use config::TouchlogConfig;
pub use editor::{EditorDecision, EditorLauncher, EditorResolver};
pub use error::{ErrorCategory, Result, TouchlogError};
pub use metadata::{GitContext, Metadata, MetadataSource};
pub use naming::FilenamePolicy;
pub use template::{render, RenderContext, TemplateStore};
pub use wizard::{ReviewAction, SessionOutcome, State, Wizard};
pub use zone::Zone;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
