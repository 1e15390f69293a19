use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::TouchlogConfig;
use crate::editor::EditorLauncher;
use crate::error::{Result, TouchlogError};
use crate::metadata::{Metadata, MetadataSource, NoMetadata};
use crate::naming::FilenamePolicy;
use crate::paths::{expand_path, validate_output_dir};

use super::review::ReviewAction;
use super::state::State;

/// How a session ended, or that it goes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The session is still running.
    Continue,
    /// Entry written to its final path.
    Saved(PathBuf),
    /// Temp file left in place at this path.
    Kept(PathBuf),
    /// Temp file deleted.
    Cancelled,
}

/// One run of the entry wizard.
///
/// Field values survive back and forward navigation. The creation
/// timestamp is fixed when the session starts.
pub struct Wizard {
    pub(super) config: TouchlogConfig,
    pub(super) templates_dir: Option<PathBuf>,
    pub(super) policy: FilenamePolicy,
    metadata_source: Box<dyn MetadataSource>,

    state: State,
    history: Vec<State>,

    pub(super) output_dir: String,
    pub(super) template_name: String,
    pub(super) title: String,
    pub(super) tags: Vec<String>,
    pub(super) message: String,
    pub(super) timestamp: DateTime<Utc>,

    pub(super) temp_path: Option<PathBuf>,
    pub(super) final_path: Option<PathBuf>,
    pub(super) content: String,
    metadata: Option<Metadata>,
}

impl Wizard {
    pub fn new(config: TouchlogConfig) -> Self {
        Self {
            config,
            templates_dir: None,
            policy: FilenamePolicy::default(),
            metadata_source: Box::new(NoMetadata),
            state: State::MainMenu,
            history: vec![State::MainMenu],
            output_dir: String::new(),
            template_name: String::new(),
            title: String::new(),
            tags: Vec::new(),
            message: String::new(),
            timestamp: Utc::now(),
            temp_path: None,
            final_path: None,
            content: String::new(),
            metadata: None,
        }
    }

    pub fn with_templates_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.templates_dir = dir;
        self
    }

    pub fn with_metadata_source(mut self, source: Box<dyn MetadataSource>) -> Self {
        self.metadata_source = source;
        self.metadata = None;
        self
    }

    pub fn with_filename_policy(mut self, policy: FilenamePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pin the creation timestamp instead of using the current time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn config(&self) -> &TouchlogConfig {
        &self.config
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn history(&self) -> &[State] {
        &self.history
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn temp_path(&self) -> Option<&Path> {
        self.temp_path.as_deref()
    }

    pub fn final_path(&self) -> Option<&Path> {
        self.final_path.as_deref()
    }

    /// Rendered content as of the last editor round-trip.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates_dir.as_deref()
    }

    pub fn filename_policy(&self) -> FilenamePolicy {
        self.policy
    }

    /// Change the output directory; cached metadata is recollected on next use.
    pub fn set_output_dir(&mut self, dir: impl Into<String>) {
        self.output_dir = dir.into();
        self.metadata = None;
    }

    pub fn set_template_name(&mut self, name: impl Into<String>) {
        self.template_name = name.into();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Move to `target` if the legality table allows it.
    ///
    /// Entering [`State::FileCreated`] renders the template into a new temp
    /// file before the state changes. On failure nothing about the session
    /// changes.
    pub fn transition_to(&mut self, target: State) -> Result<()> {
        if !self.state.can_transition_to(target) {
            return Err(TouchlogError::InvalidTransition {
                from: self.state,
                to: target,
            });
        }
        if target == State::FileCreated {
            self.create_temp_file()?;
        }
        log::debug!("wizard: {} -> {}", self.state, target);
        self.state = target;
        self.history.push(target);
        Ok(())
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    pub fn go_back(&mut self) -> Result<()> {
        let previous = self
            .state
            .previous()
            .ok_or(TouchlogError::BackNavigationNotAllowed(self.state))?;
        self.transition_to(previous)
    }

    /// Check the current step's input before leaving it.
    pub fn validate_current(&self) -> Result<()> {
        match self.state {
            State::OutputDir => validate_output_dir(&self.output_dir).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Validate the current step and take the single forward transition.
    ///
    /// The editor and review steps are left through [`Wizard::run_editor`]
    /// and [`Wizard::apply_review`].
    pub fn advance(&mut self) -> Result<State> {
        if matches!(self.state, State::EditorLaunch | State::ReviewScreen) {
            return Err(TouchlogError::Validation(format!(
                "{} is left through the editor or review actions",
                self.state
            )));
        }
        self.validate_current()?;

        let target = self.state.next().ok_or(TouchlogError::InvalidTransition {
            from: self.state,
            to: self.state,
        })?;
        self.transition_to(target)?;
        Ok(target)
    }

    /// Open the temp file with `launcher` and move to the review screen.
    ///
    /// On failure the session stays at [`State::EditorLaunch`] and the file
    /// is untouched; call [`Wizard::enter_review`] to continue.
    pub fn run_editor(&mut self, launcher: &mut dyn EditorLauncher) -> Result<()> {
        if self.state != State::EditorLaunch {
            return Err(TouchlogError::InvalidTransition {
                from: self.state,
                to: State::EditorLaunch,
            });
        }
        let path = self
            .temp_path
            .clone()
            .ok_or(TouchlogError::NoTempFile("edit"))?;

        self.content = launcher.edit(&path)?;
        self.transition_to(State::ReviewScreen)
    }

    /// Go to the review screen without a successful editor run, reloading
    /// whatever is currently on disk.
    pub fn enter_review(&mut self) -> Result<()> {
        let reloaded = self
            .temp_path
            .as_deref()
            .and_then(|path| match std::fs::read_to_string(path) {
                Ok(content) => Some(content),
                Err(err) => {
                    log::warn!("could not reload {}: {}", path.display(), err);
                    None
                }
            });
        self.transition_to(State::ReviewScreen)?;
        if let Some(content) = reloaded {
            self.content = content;
        }
        Ok(())
    }

    /// Apply a review screen decision.
    pub fn apply_review(&mut self, action: ReviewAction) -> Result<SessionOutcome> {
        if self.state != State::ReviewScreen {
            return Err(TouchlogError::Validation(format!(
                "review actions are only available on the review screen, not {}",
                self.state
            )));
        }

        match action {
            ReviewAction::Edit => {
                self.transition_to(State::EditorLaunch)?;
                Ok(SessionOutcome::Continue)
            }
            ReviewAction::Save => {
                let path = self.confirm(self.policy)?;
                self.transition_to(State::MainMenu)?;
                Ok(SessionOutcome::Saved(path))
            }
            ReviewAction::Keep => {
                let path = self
                    .temp_path
                    .clone()
                    .ok_or(TouchlogError::NoTempFile("keep"))?;
                log::info!("keeping {}", path.display());
                self.transition_to(State::MainMenu)?;
                Ok(SessionOutcome::Kept(path))
            }
            ReviewAction::Discard => {
                self.cancel()?;
                self.transition_to(State::MainMenu)?;
                Ok(SessionOutcome::Cancelled)
            }
        }
    }

    /// Metadata for the current output directory, collected on first use.
    ///
    /// Returns `None` when every metadata flag is off.
    pub fn metadata(&mut self) -> Option<&Metadata> {
        let options = &self.config.metadata;
        if !(options.include_user || options.include_host || options.include_git) {
            return None;
        }
        if self.metadata.is_none() {
            let dir = expand_path(&self.output_dir)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| self.output_dir.clone());
            let collected = self.metadata_source.collect(options, &dir);
            self.metadata = Some(collected);
        }
        self.metadata.as_ref()
    }

    /// Clear every field and return to the main menu.
    ///
    /// Files on disk are left alone.
    pub fn reset(&mut self) {
        self.state = State::MainMenu;
        self.history = vec![State::MainMenu];
        self.output_dir.clear();
        self.template_name.clear();
        self.title.clear();
        self.tags.clear();
        self.message.clear();
        self.temp_path = None;
        self.final_path = None;
        self.content.clear();
        self.metadata = None;
        self.timestamp = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetadataSection;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingSource(Rc<Cell<usize>>);

    impl MetadataSource for CountingSource {
        fn collect(&self, _options: &MetadataSection, output_dir: &str) -> Metadata {
            self.0.set(self.0.get() + 1);
            Metadata {
                user: "sam".to_string(),
                host: output_dir.to_string(),
                git: None,
            }
        }
    }

    fn wizard() -> Wizard {
        Wizard::new(TouchlogConfig::default())
    }

    #[test]
    fn test_new_session_starts_at_main_menu() {
        let w = wizard();
        assert_eq!(w.state(), State::MainMenu);
        assert_eq!(w.history(), &[State::MainMenu]);
        assert!(w.temp_path().is_none());
        assert!(w.final_path().is_none());
    }

    #[test]
    fn test_transition_matches_table_exhaustively() {
        for from in State::ALL {
            for to in State::ALL {
                let mut w = wizard();
                w.state = from;
                w.set_output_dir("/srv/notes");
                w.set_title("kept");
                w.set_tags(vec!["a".to_string(), "b".to_string()]);
                w.set_message("hello");
                let before_history = w.history().to_vec();

                let result = w.transition_to(to);
                if from.can_transition_to(to) {
                    assert!(result.is_ok(), "{} -> {} should succeed", from, to);
                    assert_eq!(w.state(), to);
                } else {
                    assert!(
                        matches!(result, Err(TouchlogError::InvalidTransition { .. })),
                        "{} -> {} should fail",
                        from,
                        to
                    );
                    assert_eq!(w.state(), from);
                    assert_eq!(w.history(), before_history.as_slice());
                    assert!(w.temp_path().is_none());
                    assert!(w.final_path().is_none());
                }
                assert_eq!(w.output_dir(), "/srv/notes");
                assert_eq!(w.title(), "kept");
                assert_eq!(w.tags(), &["a".to_string(), "b".to_string()]);
                assert_eq!(w.message(), "hello");
                w.cancel().unwrap();
            }
        }
    }

    #[test]
    fn test_entering_file_created_creates_temp_file() {
        let mut w = wizard();
        w.state = State::Message;
        w.set_title("Standup");

        w.transition_to(State::FileCreated).unwrap();
        assert_eq!(w.state(), State::FileCreated);
        let path = w.temp_path().map(Path::to_path_buf).unwrap();
        assert!(path.exists());
        assert!(std::fs::read_to_string(&path).unwrap().contains("Standup"));

        w.cancel().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_temp_file_keeps_session_at_message() {
        let mut w = wizard();
        w.state = State::Message;
        w.set_template_name("nope");

        let err = w.transition_to(State::FileCreated).unwrap_err();
        assert!(matches!(err, TouchlogError::TemplateNotFound(_)));
        assert_eq!(w.state(), State::Message);
        assert_eq!(w.history(), &[State::MainMenu]);
        assert!(w.temp_path().is_none());
    }

    #[test]
    fn test_enter_review_keeps_content_when_file_missing() {
        let mut w = wizard();
        w.state = State::Message;
        w.transition_to(State::FileCreated).unwrap();
        w.transition_to(State::EditorLaunch).unwrap();
        let path = w.temp_path().map(Path::to_path_buf).unwrap();
        let rendered = w.content.clone();
        std::fs::remove_file(&path).unwrap();

        w.enter_review().unwrap();
        assert_eq!(w.state(), State::ReviewScreen);
        assert_eq!(w.content, rendered);
        w.cancel().unwrap();
    }

    #[test]
    fn test_enter_review_outside_editor_launch_leaves_content() {
        let mut w = wizard();
        w.state = State::Message;
        w.transition_to(State::FileCreated).unwrap();
        let path = w.temp_path().map(Path::to_path_buf).unwrap();
        std::fs::write(&path, "edited").unwrap();
        let rendered = w.content.clone();

        assert!(w.enter_review().is_err());
        assert_eq!(w.state(), State::FileCreated);
        assert_eq!(w.content, rendered);
        w.cancel().unwrap();
    }

    #[test]
    fn test_back_navigation_keeps_fields() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap().to_string();
        let mut w = wizard();
        w.transition_to(State::TemplateSelection).unwrap();
        w.transition_to(State::OutputDir).unwrap();
        w.set_output_dir(dir_str.clone());
        w.transition_to(State::Title).unwrap();
        w.set_title("Team Sync");

        w.go_back().unwrap();
        assert_eq!(w.state(), State::OutputDir);
        w.advance().unwrap();
        assert_eq!(w.state(), State::Title);
        assert_eq!(w.title(), "Team Sync");
        assert_eq!(w.output_dir(), dir_str);
    }

    #[test]
    fn test_back_not_allowed() {
        for state in [
            State::MainMenu,
            State::FileCreated,
            State::EditorLaunch,
            State::ReviewScreen,
        ] {
            let mut w = wizard();
            w.state = state;
            let err = w.go_back().unwrap_err();
            assert!(matches!(err, TouchlogError::BackNavigationNotAllowed(s) if s == state));
            assert_eq!(w.state(), state);
        }
    }

    #[test]
    fn test_empty_output_dir_blocks_advance() {
        let mut w = wizard();
        w.transition_to(State::TemplateSelection).unwrap();
        w.transition_to(State::OutputDir).unwrap();
        let err = w.advance().unwrap_err();
        assert!(matches!(err, TouchlogError::OutputDirRequired));
        assert_eq!(w.state(), State::OutputDir);
    }

    #[test]
    fn test_metadata_cached_until_output_dir_changes() {
        let calls = Rc::new(Cell::new(0));
        let mut w = wizard().with_metadata_source(Box::new(CountingSource(calls.clone())));
        w.set_output_dir("/srv/a");

        assert_eq!(w.metadata().map(|m| m.host.clone()), Some("/srv/a".to_string()));
        w.metadata();
        assert_eq!(calls.get(), 1);

        w.set_output_dir("/srv/b");
        assert_eq!(w.metadata().map(|m| m.host.clone()), Some("/srv/b".to_string()));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_metadata_disabled() {
        let mut config = TouchlogConfig::default();
        config.metadata = MetadataSection {
            include_user: false,
            include_host: false,
            include_git: false,
        };
        let mut w = Wizard::new(config);
        assert!(w.metadata().is_none());
    }

    #[test]
    fn test_review_actions_require_review_screen() {
        let mut w = wizard();
        assert!(w.apply_review(ReviewAction::Save).is_err());
        assert_eq!(w.state(), State::MainMenu);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut w = wizard();
        w.transition_to(State::TemplateSelection).unwrap();
        w.set_title("x");
        w.set_tags(vec!["a".to_string()]);
        w.reset();
        assert_eq!(w.state(), State::MainMenu);
        assert_eq!(w.history(), &[State::MainMenu]);
        assert!(w.title().is_empty());
        assert!(w.tags().is_empty());
    }
}
