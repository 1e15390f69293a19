//! Wizard states and the transition legality table.

use std::fmt;

/// One step of the entry wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    MainMenu,
    TemplateSelection,
    OutputDir,
    Title,
    Tags,
    Message,
    FileCreated,
    EditorLaunch,
    ReviewScreen,
}

impl State {
    /// Every state, in wizard order.
    pub const ALL: [State; 9] = [
        State::MainMenu,
        State::TemplateSelection,
        State::OutputDir,
        State::Title,
        State::Tags,
        State::Message,
        State::FileCreated,
        State::EditorLaunch,
        State::ReviewScreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            State::MainMenu => "MainMenu",
            State::TemplateSelection => "TemplateSelection",
            State::OutputDir => "OutputDir",
            State::Title => "Title",
            State::Tags => "Tags",
            State::Message => "Message",
            State::FileCreated => "FileCreated",
            State::EditorLaunch => "EditorLaunch",
            State::ReviewScreen => "ReviewScreen",
        }
    }

    /// Legal targets from this state: `(forward, backward)`.
    pub fn transitions(&self) -> (&'static [State], Option<State>) {
        TRANSITIONS
            .iter()
            .find(|(from, _, _)| from == self)
            .map(|(_, forward, back)| (*forward, *back))
            .unwrap_or((&[], None))
    }

    /// The single forward step taken by "next"; `None` where the next step
    /// depends on the user's choice.
    pub fn next(&self) -> Option<State> {
        match self.transitions().0 {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Target of back navigation, if allowed.
    pub fn previous(&self) -> Option<State> {
        self.transitions().1
    }

    pub fn can_go_back(&self) -> bool {
        self.previous().is_some()
    }

    pub fn can_transition_to(&self, target: State) -> bool {
        let (forward, back) = self.transitions();
        forward.contains(&target) || back == Some(target)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(from, forward targets, back target)` for every state.
pub const TRANSITIONS: [(State, &[State], Option<State>); 9] = [
    (State::MainMenu, &[State::TemplateSelection], None),
    (
        State::TemplateSelection,
        &[State::OutputDir],
        Some(State::MainMenu),
    ),
    (State::OutputDir, &[State::Title], Some(State::TemplateSelection)),
    (State::Title, &[State::Tags], Some(State::OutputDir)),
    (State::Tags, &[State::Message], Some(State::Title)),
    (State::Message, &[State::FileCreated], Some(State::Tags)),
    (State::FileCreated, &[State::EditorLaunch], None),
    (State::EditorLaunch, &[State::ReviewScreen], None),
    (
        State::ReviewScreen,
        &[State::EditorLaunch, State::MainMenu],
        None,
    ),
];
