use std::collections::HashMap;
use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, KeyEvent, Validator,
};
use shell_words::ParseError;

use crate::cli::commands::{system::SETTINGS, wizard::print_step};
use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::output;
use crate::cli::registry::ArgKind;
use crate::draft::DraftField;

pub const SCRIPT_ENV: &str = "TRIP_PLANNER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<TripCompleter, DefaultHistory>::new()?;
    editor.set_helper(Some(TripCompleter::new(Vocabulary::of(context))));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info("Plan your trip in four steps. Type `help` for commands.");
    print_step(context);

    loop {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                editor.add_history_entry(line.trim()).ok();
                if run_line(context, &line)? == LoopControl::Exit {
                    break;
                }
                // Variant and catalog changes alter what can be completed.
                if let Some(helper) = editor.helper_mut() {
                    helper.vocabulary = Vocabulary::of(context);
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Leaving the trip planner.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if run_line(context, &line?)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs one input line. Command failures are reported and the shell goes on.
fn run_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    let (command, args) = match tokenize(line) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => return Ok(LoopControl::Continue),
        Err(err) => {
            output::warning(format!("Could not read `{}`: {err}", line.trim()));
            return Ok(LoopControl::Continue);
        }
    };
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match context.dispatch(&command.to_lowercase(), &command, &args) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

/// Splits a line into command and arguments. Blank lines and `#` comments
/// yield `None`.
fn tokenize(line: &str) -> Result<Option<(String, Vec<String>)>, ParseError> {
    let mut words = shell_words::split(line)?.into_iter();
    Ok(words
        .next()
        .filter(|command| !command.starts_with('#'))
        .map(|command| (command, words.collect())))
}

/// Words the completer can offer, taken from the live wizard.
#[derive(Debug, Default)]
struct Vocabulary {
    commands: Vec<(&'static str, ArgKind)>,
    fields: Vec<&'static str>,
    collections: Vec<&'static str>,
    catalogs: Vec<&'static str>,
    /// Catalog keys per field wire name.
    options: HashMap<&'static str, Vec<String>>,
}

impl Vocabulary {
    fn of(context: &ShellContext) -> Self {
        let wizard = &context.wizard;
        let enabled: Vec<DraftField> = DraftField::ALL
            .into_iter()
            .filter(|field| wizard.is_field_enabled(*field))
            .collect();
        let options: HashMap<_, Vec<String>> = enabled
            .iter()
            .filter_map(|field| {
                let catalog = wizard.catalog_for(*field)?;
                Some((field.wire_name(), catalog.keys().map(str::to_string).collect()))
            })
            .collect();

        Self {
            commands: context.registry.words().collect(),
            fields: enabled
                .iter()
                .filter(|field| field.as_collection().is_none())
                .map(|field| field.wire_name())
                .collect(),
            collections: enabled
                .iter()
                .filter(|field| field.as_collection().is_some())
                .map(|field| field.wire_name())
                .collect(),
            catalogs: wizard.config().catalog_names(),
            options,
        }
    }

    fn arg_kind(&self, command: &str) -> ArgKind {
        self.commands
            .iter()
            .find(|(word, _)| word.eq_ignore_ascii_case(command))
            .map(|(_, kind)| *kind)
            .unwrap_or(ArgKind::Nothing)
    }

    /// Candidates for the word after `previous`.
    fn pool(&self, previous: &[&str]) -> Vec<String> {
        match previous {
            [] => self.commands.iter().map(|(word, _)| word.to_string()).collect(),
            [command] => match self.arg_kind(command) {
                ArgKind::Nothing => Vec::new(),
                ArgKind::Field => owned(&self.fields[..]),
                ArgKind::Collection => owned(&self.collections[..]),
                ArgKind::Catalog => owned(&self.catalogs[..]),
                ArgKind::Setting => vec!["set".to_string()],
                ArgKind::HelpTopic => {
                    let mut topics: Vec<String> =
                        self.commands.iter().map(|(word, _)| word.to_string()).collect();
                    topics.extend(self.fields.iter().chain(&self.collections).map(|f| f.to_string()));
                    topics
                }
            },
            [command, target] => match self.arg_kind(command) {
                ArgKind::Field | ArgKind::Collection => target
                    .parse::<DraftField>()
                    .ok()
                    .and_then(|field| self.options.get(field.wire_name()))
                    .map(|keys| keys.iter().map(|key| quote_if_spaced(key)).collect())
                    .unwrap_or_default(),
                ArgKind::Setting if target.eq_ignore_ascii_case("set") => owned(&SETTINGS[..]),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn complete(&self, line: &str) -> (usize, Vec<String>) {
        let start = line.rfind(char::is_whitespace).map_or(0, |idx| idx + 1);
        let needle = line[start..].to_lowercase();
        let previous: Vec<&str> = line[..start].split_whitespace().collect();
        let mut matches: Vec<String> = self
            .pool(&previous)
            .into_iter()
            .filter(|word| word.trim_start_matches('"').to_lowercase().starts_with(&needle))
            .collect();
        matches.sort();
        matches.dedup();
        (start, matches)
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

fn quote_if_spaced(key: &str) -> String {
    if key.contains(char::is_whitespace) {
        format!("\"{key}\"")
    } else {
        key.to_string()
    }
}

#[derive(Helper, Hinter, Highlighter, Validator)]
struct TripCompleter {
    vocabulary: Vocabulary,
}

impl TripCompleter {
    fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }
}

impl Completer for TripCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.vocabulary.complete(&line[..pos]);
        let pairs = words
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}
