//! Interactive input collection.
//!
//! Uses cliclack with a custom theme. A [`PathPicker`] supplies paths and
//! an [`InputCollector`] assembles the whole [`UserInputBag`] for one
//! activation, prompting only for what the caller has not already provided.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use cliclack::{Theme, ThemeState, set_theme};
use console::{Style, Term};

use crate::definition::ServerDefinition;
use crate::error::{InputKind, ToggleError, ToggleResult};
use crate::placeholder::{PathTarget, path_label, path_target};
use crate::requirements::{env_input_fields, requirements_of};
use crate::resolve::{ResolveOptions, UserInputBag, missing_inputs};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

static CTRLC_HANDLER_SET: AtomicBool = AtomicBool::new(false);

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Prompt theme.
pub struct ToggleTheme;

/// Asks the user for a path.
pub trait PathPicker {
    /// Pick a path for the placeholder labelled `label`. `None` means the
    /// user dismissed the picker.
    fn pick_path(&mut self, label: &str, target: PathTarget) -> ToggleResult<Option<String>>;
}

/// Produces the input for one activation.
pub trait InputCollector {
    fn collect(&mut self, name: &str, template: &ServerDefinition) -> ToggleResult<UserInputBag>;
}

/// Terminal path prompt. `${dir:..}` only accepts existing directories.
#[derive(Debug, Default)]
pub struct PromptPathPicker;

/// Uses a fixed bag without prompting.
#[derive(Debug, Clone, Default)]
pub struct PrefilledInput(pub UserInputBag);

/// Prompts in the terminal for whatever the prefilled bag lacks.
pub struct PromptCollector<P: PathPicker> {
    prefill: UserInputBag,
    picker: P,
    options: ResolveOptions,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<P: PathPicker> PromptCollector<P> {
    pub fn new(prefill: UserInputBag, picker: P, options: ResolveOptions) -> Self {
        Self {
            prefill,
            picker,
            options,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Theme for ToggleTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().cyan(),
            ThemeState::Error(_) => Style::new().red(),
            _ => Style::new().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active | ThemeState::Submit => Style::new().cyan(),
            ThemeState::Error(_) => Style::new().red(),
            _ => Style::new().dim(),
        }
    }

    fn input_style(&self, _state: &ThemeState) -> Style {
        Style::new()
    }

    fn placeholder_style(&self, _state: &ThemeState) -> Style {
        Style::new().dim()
    }
}

impl PathPicker for PromptPathPicker {
    fn pick_path(&mut self, label: &str, target: PathTarget) -> ToggleResult<Option<String>> {
        init_theme();

        let prompt = match target {
            PathTarget::Directory => format!("Directory for {}", label),
            PathTarget::Any => format!("Path for {}", label),
        };
        let result = cliclack::input(prompt)
            .placeholder(label)
            .required(false)
            .validate(move |input: &String| validate_path(input, target))
            .interact::<String>();

        match result {
            Ok(path) if path.is_empty() => Ok(None),
            Ok(path) => Ok(Some(expand_home(&path).to_string_lossy().to_string())),
            // Dismissing the picker is the same as not picking anything.
            Err(e) if is_cancelled(&e) => Ok(None),
            Err(e) => Err(ToggleError::Io(e)),
        }
    }
}

impl<C: InputCollector + ?Sized> InputCollector for Box<C> {
    fn collect(&mut self, name: &str, template: &ServerDefinition) -> ToggleResult<UserInputBag> {
        (**self).collect(name, template)
    }
}

impl InputCollector for PrefilledInput {
    fn collect(&mut self, _name: &str, _template: &ServerDefinition) -> ToggleResult<UserInputBag> {
        Ok(self.0.clone())
    }
}

impl<P: PathPicker> InputCollector for PromptCollector<P> {
    fn collect(&mut self, name: &str, template: &ServerDefinition) -> ToggleResult<UserInputBag> {
        let mut bag = self.prefill.clone();
        let mut missing = missing_inputs(template, &bag, self.options);

        // The path comes first. A dismissed picker ends collection and
        // resolution reports the missing path.
        if missing.iter().any(|gap| gap.kind == InputKind::Path) {
            let (label, target) = template
                .args
                .iter()
                .find_map(|a| Some((path_label(a)?, path_target(a)?)))
                .unwrap_or(("path", PathTarget::Any));
            bag.path = self.picker.pick_path(label, target)?;
            if bag.path.is_none() {
                return Ok(bag);
            }
            missing.retain(|gap| gap.kind != InputKind::Path);
        }

        if missing.is_empty() {
            return Ok(bag);
        }

        init_theme();
        map_cancelled(cliclack::intro(format!("Configure {}", name)))?;

        let requirement = requirements_of(template);
        for gap in missing {
            match gap.kind {
                InputKind::Path => {}
                InputKind::Text => {
                    let label = requirement
                        .text_labels
                        .first()
                        .map(String::as_str)
                        .unwrap_or("text");
                    let text: String = map_cancelled(
                        cliclack::input("Configuration text")
                            .placeholder(label)
                            .interact(),
                    )?;
                    bag.text = Some(text);
                }
                InputKind::Env => {
                    for field in env_input_fields(template) {
                        if !gap.missing_keys.contains(&field.key) {
                            continue;
                        }
                        let value = if field.is_secret {
                            map_cancelled(cliclack::password(&field.key).mask('▪').interact())?
                        } else {
                            map_cancelled(cliclack::input(&field.key).interact::<String>())?
                        };
                        bag.env.insert(field.key, value);
                    }
                }
            }
        }

        map_cancelled(cliclack::outro("Input collected"))?;
        Ok(bag)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Initialize the prompt theme and a Ctrl+C handler that restores the cursor.
pub fn init_theme() {
    set_theme(ToggleTheme);

    if !CTRLC_HANDLER_SET.swap(true, Ordering::SeqCst) {
        let _ = ctrlc::set_handler(|| {
            let term = Term::stderr();
            let _ = term.show_cursor();
            std::process::exit(130);
        });
    }
}

/// Accept empty input (dismissal), existing directories for `${dir:..}`, and
/// any non-blank path for `${path:..}`.
fn validate_path(input: &str, target: PathTarget) -> Result<(), &'static str> {
    if input.is_empty() {
        return Ok(());
    }
    match target {
        PathTarget::Directory if !expand_home(input).is_dir() => Err("Not an existing directory"),
        PathTarget::Any if input.trim().is_empty() => Err("Path cannot be blank"),
        _ => Ok(()),
    }
}

/// Check if an error indicates the user cancelled (ESC or Ctrl+C).
fn is_cancelled(e: &std::io::Error) -> bool {
    e.kind() == std::io::ErrorKind::Interrupted
}

/// Convert IO interrupted errors to Cancelled.
fn map_cancelled<T>(result: Result<T, std::io::Error>) -> ToggleResult<T> {
    result.map_err(|e| {
        if is_cancelled(&e) {
            ToggleError::Cancelled
        } else {
            ToggleError::Io(e)
        }
    })
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => Path::new(path).to_path_buf(),
        },
        _ => PathBuf::from(path),
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
