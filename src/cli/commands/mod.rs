pub mod catalog;
pub mod system;
pub mod wizard;

use crate::cli::registry::CommandEntry;

/// Every shell command, in the order `help` lists them.
pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(wizard::definitions());
    commands.extend(catalog::definitions());
    commands.extend(system::definitions());
    commands
}
