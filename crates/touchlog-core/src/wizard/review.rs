//! Review screen actions and their two input surfaces.

use std::fmt;

/// What the user decided on the review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    /// Move the entry to its final location.
    Save,
    /// Open the editor again.
    Edit,
    /// Leave the temp file where it is and stop.
    Keep,
    /// Delete the temp file and stop.
    Discard,
}

impl ReviewAction {
    /// Menu entries in display order.
    pub const MENU: [ReviewAction; 4] = [
        ReviewAction::Save,
        ReviewAction::Edit,
        ReviewAction::Keep,
        ReviewAction::Discard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReviewAction::Save => "Save and exit",
            ReviewAction::Edit => "Open editor again",
            ReviewAction::Keep => "Quit and keep file",
            ReviewAction::Discard => "Cancel and delete file",
        }
    }

    /// Short command shown next to the menu entry.
    pub fn shortcut(&self) -> &'static str {
        match self {
            ReviewAction::Save => ":wq",
            ReviewAction::Edit => ":e",
            ReviewAction::Keep => ":q",
            ReviewAction::Discard => ":q!",
        }
    }

    /// Menu selection by index into [`ReviewAction::MENU`].
    pub fn from_menu_index(index: usize) -> Option<Self> {
        Self::MENU.get(index).copied()
    }

    /// Parse a typed review command.
    pub fn parse_command(input: &str) -> Result<Self, UnknownCommand> {
        match input.trim() {
            ":wq" | ":w" | ":write" => Ok(ReviewAction::Save),
            ":q!" | ":quit!" => Ok(ReviewAction::Discard),
            ":q" | ":quit" => Ok(ReviewAction::Keep),
            ":e" | ":edit" => Ok(ReviewAction::Edit),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

/// A typed command the review screen does not recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown command: {} (use :wq, :q, :q!, or :e)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCommand {}
