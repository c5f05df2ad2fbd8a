use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change shell preferences",
        "config [show|<key> <value>]",
        cmd_config,
    )]
}

fn parse_flag(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected on or off, got `{other}`"
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = context.config();
    output::section("Configuration");
    output::info(format!("  data_dir        : {}", context.data_dir().display()));
    output::info(format!("  list_limit      : {}", config.list_limit));
    output::info(format!("  confirm_deletes : {}", config.confirm_deletes));
    output::info(format!("  color           : {}", config.ui_color_enabled));
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    let [key, value, ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: config <list_limit|confirm_deletes|color|data_dir> <value>".into(),
        ));
    };

    match key.to_ascii_lowercase().as_str() {
        "list_limit" => {
            let limit = value
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| {
                    CommandError::InvalidArguments("list_limit must be a positive number".into())
                })?;
            context.config_mut().list_limit = limit;
        }
        "confirm_deletes" => context.config_mut().confirm_deletes = parse_flag(value)?,
        "color" | "ui_color_enabled" => {
            context.config_mut().ui_color_enabled = parse_flag(value)?;
        }
        "data_dir" => {
            context.config_mut().data_dir = Some(PathBuf::from(*value));
            output::hint("The new data directory is used from the next start.");
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{other}`"
            )))
        }
    }

    context.persist_config()?;
    output::success(format!("Updated {key}."));
    Ok(())
}
