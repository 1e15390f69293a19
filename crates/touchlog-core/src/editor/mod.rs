//! Editor resolution, external launch, and the built-in line editor.

mod internal;
mod launcher;
mod resolver;

pub use internal::LineEditor;
pub use launcher::{launch, EditorLauncher, TerminalLauncher};
pub use resolver::{
    parse_editor_string, EditorDecision, EditorResolver, PathLookup, SystemPathLookup,
    PATH_EDITORS,
};
