use std::{io, path::PathBuf, sync::Arc};

use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    errors::LedgerError,
    ledger::{Clock, PeriodLedger, SystemClock},
    utils::persistence,
};

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

pub const SCRIPT_ENV: &str = "EXPENSE_CORE_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Session state shared by every command handler: the ledger, the loaded
/// preferences and the command table.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) running: bool,
    ledger: PeriodLedger,
    config: Config,
    config_manager: ConfigManager,
    data_dir: PathBuf,
    theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_parts(mode, config_manager, Arc::new(SystemClock))
    }

    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

        let data_dir = config.resolve_data_dir(config_manager.base_dir());
        let ledger = persistence::open_ledger(&data_dir, clock)?;

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(ShellContext {
            mode,
            registry,
            running: true,
            ledger,
            config,
            config_manager,
            data_dir,
            theme: ColorfulTheme::default(),
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn ledger(&self) -> &PeriodLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut PeriodLedger {
        &mut self.ledger
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        format!("expense [{}]> ", self.ledger.active_period())
    }

    /// Asks before a destructive action. Script mode and a disabled
    /// `confirm_deletes` preference always answer yes.
    pub(crate) fn confirm(&self, question: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script || !self.config.confirm_deletes {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, question, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

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

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        if let Some(name) = self.registry.closest(input) {
            output::hint(format!("Did you mean `{}`?", name));
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Ledger(LedgerError::Validation(message)) => {
                output::error(message);
            }
            other => output::error(other),
        }
    }
}

#[cfg(test)]
pub(crate) fn script_context(base: PathBuf, clock: Arc<dyn Clock>) -> ShellContext {
    let manager = ConfigManager::with_base_dir(base).expect("config manager");
    ShellContext::with_parts(CliMode::Script, manager, clock).expect("shell context")
}

#[cfg(test)]
pub(crate) fn process_script(context: &mut ShellContext, lines: &[&str]) {
    for line in lines {
        if super::shell::execute(context, line) == LoopControl::Exit {
            break;
        }
    }
}
