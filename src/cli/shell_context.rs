//! Shared runtime state for CLI interactions and command execution.

use billy_config::{Config, ConfigManager};
use billy_core::Session;
use billy_storage_md::MarkdownStorage;
use dialoguer::theme::ColorfulTheme;

use crate::errors::CliError;

use super::{
    commands,
    io as cli_io,
    output::{self, OutputPreferences},
    registry::CommandRegistry,
    table::BillTableRenderer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new_default()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        apply_output_preferences(&config, mode);

        let renderer = BillTableRenderer::new(mode == CliMode::Interactive);
        let session = Session::new(
            Box::new(MarkdownStorage::new()),
            config.resolve_data_dir(),
            Box::new(renderer),
        )
        .with_undo_limit(config.undo_limit);

        let mut context = ShellContext {
            mode,
            registry,
            session,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            last_command: None,
            running: true,
        };
        context.auto_load_last();
        Ok(context)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.all_names()
    }

    pub fn prompt(&self) -> String {
        match self.session.current_file() {
            Some(file) if self.session.has_unsaved_changes() => format!("bill [{file}*]> "),
            Some(file) => format!("bill [{file}]> "),
            None => "bill> ".to_string(),
        }
    }

    pub(crate) fn persist_config(&self) -> Result<(), CliError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Remembers `name` as the file to reopen on the next interactive start.
    pub(crate) fn remember_file(&mut self, name: Option<&str>) -> Result<(), CliError> {
        self.config.last_opened_file = name.map(str::to_string);
        self.persist_config()
    }

    pub(crate) fn apply_config(&mut self) {
        apply_output_preferences(&self.config, self.mode);
        self.session.set_undo_limit(self.config.undo_limit);
        self.session.set_data_dir(self.config.resolve_data_dir());
    }

    // Interactive start-up opens the last file, or the first one available.
    fn auto_load_last(&mut self) {
        if self.mode != CliMode::Interactive {
            return;
        }
        let candidate = match self.config.last_opened_file.clone() {
            Some(name) => Some(name),
            None => self
                .session
                .available_files()
                .ok()
                .and_then(|files| files.into_iter().next()),
        };
        let Some(name) = candidate else {
            return;
        };
        match self.session.open(&name) {
            Ok(count) => cli_io::print_success(format!(
                "Automatically loaded `{}` ({} entries).",
                name, count
            )),
            Err(err) => cli_io::print_warning(format!("Could not reopen `{}`: {}", name, err)),
        }
    }
}

fn apply_output_preferences(config: &Config, mode: CliMode) {
    output::set_preferences(OutputPreferences {
        plain_mode: config.plain_output,
        color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
    });
}
