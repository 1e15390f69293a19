//! The `new` command: drive the entry wizard from prompts or flags.

use std::path::Path;

use chrono::Local;
use touchlog_core::editor::{SystemPathLookup, TerminalLauncher};
use touchlog_core::{
    EditorDecision, EditorResolver, ErrorCategory, FilenamePolicy, ReviewAction, SessionOutcome,
    State, TemplateStore, TouchlogConfig, TouchlogError, Wizard, Zone,
};

use crate::app::AppContext;
use crate::cli::NewArgs;
use crate::metadata::SystemMetadata;
use crate::ui::prompt::{
    parse_tags, print_step, prompt_command, prompt_select, prompt_text, StepInput,
};
use crate::ui::{badge, blank_line, header, hint, print, receipt, Badge, UiContext};

const BACK_LABEL: &str = "< Back";
const TYPE_COMMAND_LABEL: &str = "Type a command";

/// Steps shown with a position indicator.
const INPUT_STEPS: [State; 5] = [
    State::TemplateSelection,
    State::OutputDir,
    State::Title,
    State::Tags,
    State::Message,
];

pub fn handle_new(app: &AppContext, args: &NewArgs) -> anyhow::Result<()> {
    let ui = app.ui();
    let config = effective_config(app.load_config()?, args)?;

    let policy = if args.overwrite {
        FilenamePolicy::Overwrite
    } else {
        FilenamePolicy::AvoidCollision
    };
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.notes_directory().to_string());

    let mut wizard = Wizard::new(config)
        .with_templates_dir(Some(app.templates_dir()))
        .with_metadata_source(Box::new(SystemMetadata))
        .with_filename_policy(policy);
    wizard.set_output_dir(output_dir);
    if let Some(template) = &args.template {
        wizard.set_template_name(template.as_str());
    }
    if let Some(title) = &args.title {
        wizard.set_title(title.as_str());
    }
    wizard.set_tags(args.tag.iter().flat_map(|t| parse_tags(t)).collect());
    if let Some(message) = &args.message {
        wizard.set_message(message.as_str());
    }

    let outcome = if args.no_input {
        run_without_input(&mut wizard)?
    } else {
        let decision = resolve_editor(&wizard, args)?;
        log::info!("editor: {:?}", decision);
        let mut launcher = TerminalLauncher::new(decision);
        if ui.mode.is_pretty() && !ui.quiet {
            println!("{}", header(ui, "new"));
            blank_line(ui);
        }
        run_interactive(ui, &mut wizard, &mut launcher)?
    };

    report(ui, &wizard, outcome);
    Ok(())
}

/// Fold command-line overrides into the loaded config.
fn effective_config(mut config: TouchlogConfig, args: &NewArgs) -> anyhow::Result<TouchlogConfig> {
    if let Some(tz) = args.timezone.as_deref() {
        Zone::resolve(Some(tz))?;
        config.timezone = Some(tz.trim().to_string());
    }
    if args.include_git {
        config.metadata.include_git = true;
    }
    Ok(config)
}

fn resolve_editor(wizard: &Wizard, args: &NewArgs) -> anyhow::Result<EditorDecision> {
    let decision = EditorResolver::new(SystemPathLookup)
        .cli_override(args.editor.as_deref())
        .with_process_env()
        .config_editor(wizard.config().editor.as_ref())
        .fallback_to_internal(!args.no_internal_editor)
        .resolve()?;
    Ok(decision)
}

/// Walk every step with the pre-filled values and save without an editor.
fn run_without_input(wizard: &mut Wizard) -> anyhow::Result<Option<SessionOutcome>> {
    while wizard.state() != State::EditorLaunch {
        wizard.advance()?;
    }
    wizard.enter_review()?;
    Ok(Some(wizard.apply_review(ReviewAction::Save)?))
}

/// Run the wizard on the terminal. `None` when the user quits from the
/// main menu before starting an entry.
fn run_interactive(
    ui: &UiContext,
    wizard: &mut Wizard,
    launcher: &mut TerminalLauncher,
) -> anyhow::Result<Option<SessionOutcome>> {
    loop {
        let state = wizard.state();
        if let Some(position) = INPUT_STEPS.iter().position(|s| *s == state) {
            print_step(ui, position + 1, INPUT_STEPS.len(), step_title(state));
        }

        let step = match state {
            State::MainMenu => {
                let choice = prompt_select(ui, "Touchlog", &["New entry", "Quit"], 0)?;
                if choice != Some(0) {
                    return Ok(None);
                }
                wizard.advance().map(|_| ())
            }
            State::TemplateSelection => select_template(ui, wizard)?,
            State::OutputDir => {
                let default = wizard.output_dir().to_string();
                match prompt_text(ui, "Output directory", &default)? {
                    StepInput::Back => wizard.go_back(),
                    StepInput::Value(value) => {
                        wizard.set_output_dir(value.trim());
                        wizard.advance().map(|_| ())
                    }
                }
            }
            State::Title => {
                let default = wizard.title().to_string();
                text_step(ui, wizard, "Title", &default, |w, v| w.set_title(v.trim()))?
            }
            State::Tags => {
                let default = wizard.tags().join(", ");
                text_step(ui, wizard, "Tags (comma separated)", &default, |w, v| {
                    w.set_tags(parse_tags(&v))
                })?
            }
            State::Message => {
                let default = wizard.message().to_string();
                text_step(ui, wizard, "Message", &default, |w, v| w.set_message(v))?
            }
            State::FileCreated => wizard.advance().map(|_| ()),
            State::EditorLaunch => match wizard.run_editor(launcher) {
                Ok(()) => Ok(()),
                Err(err) if err.category() == ErrorCategory::Process => {
                    eprintln!("{}", badge(ui, Badge::Warn, &err.to_string()));
                    wizard.enter_review()
                }
                Err(err) => Err(err),
            },
            State::ReviewScreen => {
                if let Some(outcome) = review(ui, wizard)? {
                    return Ok(Some(outcome));
                }
                Ok(())
            }
        };

        if let Err(err) = step {
            recover(ui, err)?;
        }
    }
}

/// Report a step error and keep going, or give up on the session.
fn recover(ui: &UiContext, err: TouchlogError) -> anyhow::Result<()> {
    let missing_template = matches!(err, TouchlogError::TemplateNotFound(_));
    if err.category() != ErrorCategory::State && !missing_template {
        return Err(err.into());
    }

    eprintln!("{}", badge(ui, Badge::Err, &err.to_string()));
    if missing_template {
        eprintln!("{}", hint(ui, "Enter < to go back and pick another template."));
    }
    Ok(())
}

fn step_title(state: State) -> &'static str {
    match state {
        State::TemplateSelection => "Template",
        State::OutputDir => "Output directory",
        State::Title => "Title",
        State::Tags => "Tags",
        State::Message => "Message",
        _ => state.as_str(),
    }
}

/// Prompt a text step: `<` goes back, anything else is stored and the
/// wizard moves on.
fn text_step(
    ui: &UiContext,
    wizard: &mut Wizard,
    prompt: &str,
    default: &str,
    store: impl FnOnce(&mut Wizard, String),
) -> anyhow::Result<touchlog_core::Result<()>> {
    Ok(match prompt_text(ui, prompt, default)? {
        StepInput::Back => wizard.go_back(),
        StepInput::Value(value) => {
            store(wizard, value);
            wizard.advance().map(|_| ())
        }
    })
}

fn select_template(
    ui: &UiContext,
    wizard: &mut Wizard,
) -> anyhow::Result<touchlog_core::Result<()>> {
    let (mut options, current) = {
        let templates_dir = wizard.templates_dir().map(Path::to_path_buf);
        let store = TemplateStore::new(wizard.config(), templates_dir);
        let names = store.available();
        let current = store.effective_name(wizard.template_name()).to_string();
        (names, current)
    };
    let default = options.iter().position(|n| *n == current).unwrap_or(0);
    options.push(BACK_LABEL.to_string());

    Ok(match prompt_select(ui, "Template", &options, default)? {
        Some(index) if index < options.len() - 1 => {
            wizard.set_template_name(options[index].as_str());
            wizard.advance().map(|_| ())
        }
        _ => wizard.go_back(),
    })
}

/// Show the review menu once. `Some` when the session has ended.
fn review(ui: &UiContext, wizard: &mut Wizard) -> anyhow::Result<Option<SessionOutcome>> {
    if let Some(path) = wizard.temp_path() {
        print(ui, &badge(ui, Badge::Info, &format!("Draft: {}", path.display())));
    }

    let mut options: Vec<String> = ReviewAction::MENU
        .iter()
        .map(|action| format!("{} ({})", action.label(), action.shortcut()))
        .collect();
    options.push(TYPE_COMMAND_LABEL.to_string());

    let action = match prompt_select(ui, "Review", &options, 0)? {
        Some(index) => match ReviewAction::from_menu_index(index) {
            Some(action) => action,
            None => {
                let input = prompt_command(ui, "Command")?;
                match ReviewAction::parse_command(&input) {
                    Ok(action) => action,
                    Err(unknown) => {
                        eprintln!("{}", badge(ui, Badge::Warn, &unknown.to_string()));
                        return Ok(None);
                    }
                }
            }
        },
        None => return Ok(None),
    };

    match wizard.apply_review(action)? {
        SessionOutcome::Continue => Ok(None),
        outcome => Ok(Some(outcome)),
    }
}

fn report(ui: &UiContext, wizard: &Wizard, outcome: Option<SessionOutcome>) {
    let created = wizard
        .timestamp()
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    let text = match outcome {
        Some(SessionOutcome::Saved(path)) => {
            let path = path.display().to_string();
            receipt(
                ui,
                "saved",
                "Entry saved",
                &[("Path", path.as_str()), ("Created", created.as_str())],
            )
        }
        Some(SessionOutcome::Kept(path)) => {
            let path = path.display().to_string();
            receipt(ui, "kept", "Draft kept", &[("Path", path.as_str())])
        }
        Some(SessionOutcome::Cancelled) => receipt(ui, "cancelled", "Entry discarded", &[]),
        Some(SessionOutcome::Continue) | None => return,
    };
    print(ui, &text);
}
