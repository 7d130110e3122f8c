use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatting::Formatter;
use crate::cli::output;
use crate::cli::registry::{ArgKind, CommandEntry, CommandGroup};
use crate::draft::{CollectionField, DraftField, TravelDates};
use crate::errors::SubmissionError;
use crate::wizard::{NextOutcome, StepStatus, WizardStep};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    use CommandGroup::{Draft, Navigation, Review};
    vec![
        CommandEntry::new("show", Navigation, "Show the current step", "show", cmd_show),
        CommandEntry::new(
            "set",
            Draft,
            "Set a field on the draft",
            "set <field> <value...>",
            cmd_set,
        )
        .takes(ArgKind::Field),
        CommandEntry::new("clear", Draft, "Empty a field", "clear <field>", cmd_clear)
            .takes(ArgKind::Field),
        CommandEntry::new(
            "toggle",
            Draft,
            "Select or deselect a multi-choice option",
            "toggle <collection> <option...>",
            cmd_toggle,
        )
        .takes(ArgKind::Collection),
        CommandEntry::new(
            "dates",
            Draft,
            "Pick travel dates (YYYY-MM-DD, `-` leaves a side open)",
            "dates <start|-> [end]",
            cmd_dates,
        ),
        CommandEntry::new(
            "next",
            Navigation,
            "Validate this step and continue (submits on the last step)",
            "next",
            cmd_next,
        )
        .aliases(&["submit"]),
        CommandEntry::new("back", Navigation, "Return to the previous step", "back", cmd_back)
            .aliases(&["prev"]),
        CommandEntry::new("errors", Review, "List problems on this step", "errors", cmd_errors),
        CommandEntry::new("summary", Review, "Review the whole request", "summary", cmd_summary)
            .aliases(&["review"]),
        CommandEntry::new(
            "payload",
            Review,
            "Print the JSON that would be submitted",
            "payload",
            cmd_payload,
        ),
        CommandEntry::new(
            "restart",
            Navigation,
            "Discard the draft and start over",
            "restart",
            cmd_restart,
        ),
    ]
}

/// Prints the active step with values, errors and any pending notice.
pub(crate) fn print_step(context: &ShellContext) {
    let wizard = &context.wizard;
    if wizard.is_submitted() {
        output::success("Your trip request has been submitted.");
        output::hint("Use `restart` to plan another trip.");
        return;
    }

    let step = wizard.step();
    output::section(step);

    let indicator = wizard
        .progress()
        .into_iter()
        .map(|(step, status)| {
            let mark = match status {
                StepStatus::Completed => "x",
                StepStatus::Active => ">",
                StepStatus::Upcoming => " ",
            };
            format!("[{mark}] {}", step.title())
        })
        .collect::<Vec<_>>()
        .join("  ");
    Formatter::new().print_detail(indicator);

    for field in wizard.fields_for(step) {
        let value = wizard.display_value(field);
        let shown = if value.is_empty() { "-" } else { value.as_str() };
        output::info(format!("  {:<22} {}", field.wire_name(), shown));
        if let Some(message) = wizard.errors().get(field) {
            output::warning(format!("  {}: {}", field.wire_name(), message));
        }
    }

    if let Some(notice) = wizard.notice() {
        output::error(notice);
    }
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_step(context);
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, rest) = args
        .split_first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: set <field> <value...>".into()))?;
    let field: DraftField = name.parse()?;
    let value = rest.join(" ");
    context.wizard.set_field(field, &value)?;

    let stored = context.wizard.display_value(field);
    if stored.is_empty() {
        output::success(format!("{} cleared", field.label()));
    } else {
        let mut message = format!("{} set to {}", field.label(), stored);
        if field == DraftField::TravelDates {
            if let Some(nights) = TravelDates::decode(&stored).and_then(|dates| dates.nights()) {
                message.push_str(&format!(" ({nights} nights)"));
            }
        }
        output::success(message);
    }

    let owner = WizardStep::owning(field);
    if owner != context.wizard.step() {
        output::hint(format!("{field} is asked on {owner}."));
    }
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: clear <field>".into()))?;
    let field: DraftField = name.parse()?;
    context.wizard.clear_field(field)?;
    output::success(format!("{} cleared", field.label()));
    Ok(())
}

fn cmd_toggle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, rest) = match args.split_first() {
        Some((name, rest)) if !rest.is_empty() => (name, rest),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: toggle <collection> <option...>".into(),
            ))
        }
    };
    let collection: CollectionField = name.parse()?;
    let option = rest.join(" ");
    let selected = context.wizard.toggle(collection, &option)?;

    let label = context
        .wizard
        .config()
        .collection(collection)
        .and_then(|catalog| catalog.resolve(&option))
        .map(|entry| entry.label.clone())
        .unwrap_or(option);
    if selected {
        output::success(format!("Added {label} to {}", collection.field().label()));
    } else {
        output::success(format!("Removed {label} from {}", collection.field().label()));
    }
    Ok(())
}

fn cmd_dates(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args.len() > 2 {
        return Err(CommandError::InvalidArguments(
            "usage: dates <start|-> [end]".into(),
        ));
    }
    let dates = TravelDates::from_inputs(args.first().copied(), args.get(1).copied())?;
    context.wizard.set_travel_dates(dates)?;

    if dates.is_empty() {
        output::success("Travel dates cleared");
    } else {
        let mut message = format!("Travel dates set to {}", dates.encode());
        if let Some(nights) = dates.nights() {
            message.push_str(&format!(" ({nights} nights)"));
        }
        output::success(message);
    }
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.advance()? {
        NextOutcome::Advanced(_) => print_step(context),
        NextOutcome::Blocked(_) => {
            output::warning("Please complete the highlighted fields before continuing.");
            print_errors(context);
        }
        NextOutcome::ReadyToSubmit => output::info("Submitting trip request..."),
        NextOutcome::Submitted(receipt) => {
            output::success("Thank you! Your trip request has been submitted.");
            output::info(format!("Reference: {}", receipt.request_id));
        }
        NextOutcome::SubmissionFailed(SubmissionError::Validation(_)) => {
            output::warning("Please review your contact details.");
            print_errors(context);
        }
        NextOutcome::SubmissionFailed(err) => {
            output::error(err.user_message());
            if err.is_retryable() {
                output::hint("Your answers are kept. Use `next` to try again.");
            }
        }
    }
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.wizard.prev()?;
    print_step(context);
    Ok(())
}

fn cmd_errors(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.wizard.errors().is_empty() {
        output::info("No errors on this step.");
    } else {
        print_errors(context);
    }
    Ok(())
}

fn print_errors(context: &ShellContext) {
    for (field, message) in context.wizard.errors().iter() {
        output::warning(format!("{field}: {message}"));
    }
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let formatter = Formatter::new();
    formatter.print_header("Trip summary");
    for section in context.wizard.summary().sections {
        formatter.print_detail(format!("{}. {}", section.step.number(), section.step.title()));
        let values: Vec<(&str, String)> = section
            .entries
            .iter()
            .map(|(field, value)| {
                let shown = if value.is_empty() { "-".to_string() } else { value.clone() };
                (field.label(), shown)
            })
            .collect();
        let rows: Vec<(&str, &str)> = values
            .iter()
            .map(|(label, value)| (*label, value.as_str()))
            .collect();
        formatter.print_two_column(&rows);
    }
    Ok(())
}

fn cmd_payload(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let json = serde_json::to_string_pretty(&context.wizard.payload())?;
    println!("{json}");
    Ok(())
}

fn cmd_restart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.wizard.is_submitted() && !context.confirm("Discard the current draft?", false)? {
        output::info("Draft kept.");
        return Ok(());
    }
    context.restart_wizard()?;
    output::success("Started a new trip request.");
    print_step(context);
    Ok(())
}
