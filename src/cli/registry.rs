use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Heading a command is listed under in `help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Draft,
    Navigation,
    Review,
    Shell,
}

impl CommandGroup {
    pub const ALL: [CommandGroup; 4] = [
        CommandGroup::Draft,
        CommandGroup::Navigation,
        CommandGroup::Review,
        CommandGroup::Shell,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            CommandGroup::Draft => "Filling in the request",
            CommandGroup::Navigation => "Moving between steps",
            CommandGroup::Review => "Reviewing",
            CommandGroup::Shell => "Shell",
        }
    }
}

/// What the first argument of a command names. Drives tab completion;
/// `set` and `toggle` also complete their value from the field's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Nothing,
    Field,
    Collection,
    Catalog,
    Setting,
    HelpTopic,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub group: CommandGroup,
    pub description: &'static str,
    pub usage: &'static str,
    pub arg: ArgKind,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        group: CommandGroup,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            group,
            description,
            usage,
            arg: ArgKind::Nothing,
            handler,
        }
    }

    pub const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn takes(mut self, arg: ArgKind) -> Self {
        self.arg = arg;
        self
    }

    pub fn answers_to(&self, word: &str) -> bool {
        self.name.eq_ignore_ascii_case(word)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(word))
    }
}

/// The shell's commands in the order they were declared.
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn with_entries(entries: impl IntoIterator<Item = CommandEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Resolves a command word or one of its aliases.
    pub fn find(&self, word: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.answers_to(word))
    }

    pub fn in_group(&self, group: CommandGroup) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter().filter(move |entry| entry.group == group)
    }

    /// Every word that starts a command, aliases included.
    pub fn words(&self) -> impl Iterator<Item = (&'static str, ArgKind)> + '_ {
        self.entries.iter().flat_map(|entry| {
            std::iter::once(entry.name)
                .chain(entry.aliases.iter().copied())
                .map(move |word| (word, entry.arg))
        })
    }
}
