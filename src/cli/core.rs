//! Command dispatch, error reporting and shared helpers for command handlers.

use std::io;

use billy_config::ConfigError;
use billy_core::CoreError;
use strsim::levenshtein;

pub use crate::cli::shell_context::{CliMode, ShellContext};
pub use crate::errors::CliError;

use super::io as cli_io;
use super::registry::CommandEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

const SUGGESTION_DISTANCE: usize = 3;

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenizes and runs one shell line.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .all_names()
            .into_iter()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::NoFileOpen => {
                cli_io::print_error(CommandError::NoFileOpen);
                cli_io::print_hint("Try `files` to see what is available.");
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Yes/no question. Script mode never prompts and answers `default_script`.
    pub(crate) fn confirm(&self, prompt: &str, default_script: bool) -> Result<bool, CommandError> {
        match self.mode {
            CliMode::Script => Ok(default_script),
            CliMode::Interactive => cli_io::confirm_action(&self.theme, prompt, false),
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        self.confirm("Exit shell?", true).map_err(CliError::from)
    }

    /// Offers to save pending edits before the open file is replaced or the
    /// shell exits. Declined edits are dropped.
    pub(crate) fn resolve_unsaved_changes(&mut self) -> CommandResult {
        if !self.session.has_unsaved_changes() {
            return Ok(());
        }
        let file = self.session.current_file().unwrap_or_default().to_string();
        if self.confirm(&format!("Save changes to {file}?"), false)? {
            let path = self.session.save()?;
            cli_io::print_success(format!("Saved {}", path.display()));
        } else if self.mode == CliMode::Script {
            cli_io::print_warning(format!("Discarding unsaved changes to {file}."));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("No bill file is open. Use `open <YYYYMM>` or `new <YYYY> <MM>` first.")]
    NoFileOpen,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoFileOpen => CommandError::NoFileOpen,
            other => CommandError::Core(other),
        }
    }
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Input(message) => CommandError::InvalidArguments(message),
            other => CommandError::Message(other.to_string()),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Parses `1,3,5` or `1 3 5` style 1-based indices into 0-based positions.
pub(crate) fn parse_indices(args: &[&str]) -> Result<Vec<usize>, CommandError> {
    let mut indices = Vec::new();
    for token in args
        .iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
    {
        let index = parse_index(token)?;
        indices.push(index);
    }
    if indices.is_empty() {
        return Err(CommandError::InvalidArguments(
            "expected one or more entry numbers".into(),
        ));
    }
    Ok(indices)
}

pub(crate) fn parse_index(token: &str) -> Result<usize, CommandError> {
    match token.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not an entry number (numbers start at 1)",
            token
        ))),
    }
}

/// Splits `--flag value` options from positional arguments.
pub(crate) fn split_options<'a>(
    args: &[&'a str],
    known: &[&str],
) -> Result<(Vec<&'a str>, Vec<(&'a str, Option<&'a str>)>), CommandError> {
    let mut positional = Vec::new();
    let mut options = Vec::new();
    let mut iter = args.iter().copied().peekable();
    while let Some(arg) = iter.next() {
        if let Some(flag) = arg.strip_prefix("--") {
            let Some(name) = known.iter().find(|name| name.trim_start_matches('!') == flag) else {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `{}`",
                    arg
                )));
            };
            if name.starts_with('!') {
                options.push((flag, None));
            } else {
                let value = iter.next().ok_or_else(|| {
                    CommandError::InvalidArguments(format!("option `{}` needs a value", arg))
                })?;
                options.push((flag, Some(value)));
            }
        } else {
            positional.push(arg);
        }
    }
    Ok((positional, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_one_based() {
        assert_eq!(parse_indices(&["1,3", "2"]).unwrap(), vec![0, 2, 1]);
        assert!(parse_indices(&["0"]).is_err());
        assert!(parse_indices(&[","]).is_err());
        assert!(parse_indices(&["x"]).is_err());
    }

    #[test]
    fn options_split_from_positionals() {
        let (positional, options) =
            split_options(&["2024", "--force", "03"], &["!force"]).unwrap();
        assert_eq!(positional, vec!["2024", "03"]);
        assert_eq!(options, vec![("force", None)]);

        let (_, options) = split_options(&["--from", "0301"], &["from", "to"]).unwrap();
        assert_eq!(options, vec![("from", Some("0301"))]);

        assert!(split_options(&["--to"], &["to"]).is_err());
        assert!(split_options(&["--colour", "x"], &["to"]).is_err());
    }
}
