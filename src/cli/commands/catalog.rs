use crate::catalog::Catalog;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatting::Formatter;
use crate::cli::output;
use crate::cli::registry::{ArgKind, CommandEntry, CommandGroup};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "catalog",
        CommandGroup::Review,
        "List option catalogs or the options of one",
        "catalog [name]",
        cmd_catalog,
    )
    .aliases(&["options"])
    .takes(ArgKind::Catalog)]
}

fn cmd_catalog(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let config = context.wizard.config();
    let names = config.catalog_names();

    let Some(name) = args.first() else {
        let formatter = Formatter::new();
        formatter.print_header(format!("Catalogs ({} variant)", config.variant.as_str()));
        for name in &names {
            let count = config.catalog_by_name(name).map(Catalog::len).unwrap_or(0);
            output::info(format!("  {:<20} {} options", name, count));
        }
        output::info("Use `catalog <name>` to list options.");
        return Ok(());
    };

    let catalog = config.catalog_by_name(name).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "Unknown catalog `{}`. Available: {}",
            name,
            names.join(", ")
        ))
    })?;
    print_catalog(name, catalog);
    Ok(())
}

fn print_catalog(name: &str, catalog: &Catalog) {
    let formatter = Formatter::new();
    formatter.print_header(name);
    let labels: Vec<String> = catalog
        .entries()
        .iter()
        .map(|entry| match (&entry.icon, &entry.description) {
            (Some(icon), Some(description)) => format!("{icon} {} - {description}", entry.label),
            (Some(icon), None) => format!("{icon} {}", entry.label),
            (None, Some(description)) => format!("{} - {description}", entry.label),
            (None, None) => entry.label.clone(),
        })
        .collect();
    let rows: Vec<(&str, &str)> = catalog
        .entries()
        .iter()
        .zip(labels.iter())
        .map(|(entry, label)| (entry.key.as_str(), label.as_str()))
        .collect();
    formatter.print_two_column(&rows);
}
