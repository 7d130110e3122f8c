use std::path::PathBuf;

use crate::catalog::WizardVariant;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatting::Formatter;
use crate::cli::output;
use crate::cli::registry::{ArgKind, CommandEntry, CommandGroup};
use crate::draft::DraftField;
use crate::utils::build_info;
use crate::wizard::WizardStep;

/// Keys accepted by `config set`.
pub(crate) const SETTINGS: [&str; 6] = [
    "api_base_url",
    "submit_path",
    "timeout_secs",
    "variant",
    "catalog_file",
    "require_desired_experiences",
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            CommandGroup::Shell,
            "Show or change settings",
            "config [set <key> <value>]",
            cmd_config,
        )
        .takes(ArgKind::Setting),
        CommandEntry::new(
            "version",
            CommandGroup::Shell,
            "Show build metadata",
            "version",
            cmd_version,
        ),
        CommandEntry::new(
            "help",
            CommandGroup::Shell,
            "Explain a command or a field",
            "help [command|field]",
            cmd_help,
        )
        .takes(ArgKind::HelpTopic),
        CommandEntry::new("exit", CommandGroup::Shell, "Exit the shell", "exit", cmd_exit)
            .aliases(&["quit"]),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            show_config(context);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            set_config_value(context, key, &value.join(" "))
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [set <key> <value>]".into(),
        )),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    let timeout = config.timeout_secs.to_string();
    let catalog_file = config
        .catalog_file
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "-".into());
    let require = config
        .require_desired_experiences
        .map(|flag| flag.to_string())
        .unwrap_or_else(|| "-".into());
    let file = context.config_manager.path().display().to_string();

    let formatter = Formatter::new();
    formatter.print_header("Configuration");
    formatter.print_two_column(&[
        ("api_base_url", config.api_base_url.as_str()),
        ("submit_path", config.submit_path.as_str()),
        ("timeout_secs", timeout.as_str()),
        ("variant", config.variant.as_str()),
        ("catalog_file", catalog_file.as_str()),
        ("require_desired_experiences", require.as_str()),
        ("file", file.as_str()),
    ]);
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let config = &mut context.config;
    match key {
        "api_base_url" => config.api_base_url = value.trim_end_matches('/').to_string(),
        "submit_path" => config.submit_path = value.to_string(),
        "timeout_secs" => {
            config.timeout_secs = value.parse().map_err(|_| {
                CommandError::InvalidArguments(format!("`{value}` is not a number of seconds"))
            })?
        }
        "variant" => {
            config.variant = match value.to_ascii_lowercase().as_str() {
                "current" => WizardVariant::Current,
                "legacy" => WizardVariant::Legacy,
                _ => {
                    return Err(CommandError::InvalidArguments(
                        "variant must be `current` or `legacy`".into(),
                    ))
                }
            }
        }
        "catalog_file" => {
            config.catalog_file = (value != "-").then(|| PathBuf::from(value));
        }
        "require_desired_experiences" => {
            config.require_desired_experiences = match value {
                "-" => None,
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => {
                    return Err(CommandError::InvalidArguments(
                        "expected true, false or -".into(),
                    ))
                }
            }
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "Unknown setting `{other}`"
            )))
        }
    }
    context.persist_config()?;
    output::success(format!("Updated {key}."));
    if matches!(key, "variant" | "catalog_file" | "require_desired_experiences") {
        output::hint("Use `restart` to apply catalog changes to a new draft.");
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Trip Planner {}", meta.version));
    let rows = meta.rows();
    Formatter::new().print_two_column(&rows[1..]);
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(topic) = args.first() else {
        print_overview(context);
        return Ok(());
    };

    if let Some(entry) = context.registry.find(topic) {
        output::section(format!("Help: {}", entry.name));
        output::info(format!("  Description: {}", entry.description));
        output::info(format!("  Usage: {}", entry.usage));
        if !entry.aliases.is_empty() {
            output::info(format!("  Also: {}", entry.aliases.join(", ")));
        }
    } else if let Ok(field) = topic.parse::<DraftField>() {
        print_field_help(context, field);
    } else {
        context.suggest_command(topic);
    }
    Ok(())
}

fn print_overview(context: &ShellContext) {
    for group in CommandGroup::ALL {
        output::section(group.title());
        for entry in context.registry.in_group(group) {
            output::info(format!("  {:<10} {}", entry.name, entry.description));
        }
    }
    output::info("Use `help <command>` or `help <field>` for details.");
}

fn print_field_help(context: &ShellContext, field: DraftField) {
    let wizard = &context.wizard;
    output::section(format!("Field: {field}"));
    output::info(format!(
        "  {} is asked on {}.",
        field.label(),
        WizardStep::owning(field)
    ));
    if !wizard.is_field_enabled(field) {
        output::warning(format!(
            "  Not collected by the {} variant.",
            wizard.config().variant.as_str()
        ));
        return;
    }
    match (field.as_collection(), wizard.catalog_for(field)) {
        (Some(_), Some(catalog)) => {
            output::info(format!("  Toggle any of: {}", catalog.describe_options()))
        }
        (None, Some(catalog)) => output::info(format!("  One of: {}", catalog.describe_options())),
        _ if field == DraftField::TravelDates => {
            output::info("  Free text, or use `dates <start> [end]` to pick a range.")
        }
        _ if field == DraftField::NumberOfTravelers => {
            output::info("  A whole number of at least 1.")
        }
        _ => output::info("  Free text."),
    }
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.wizard.is_submitted() && !context.confirm("Leave without submitting?", true)? {
        return Ok(());
    }
    Err(CommandError::ExitRequested)
}
