use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};

pub struct Formatter {
    prefs: OutputPreferences,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.header_text(title));
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        let text = format!("=== {} ===", title);
        if self.prefs.plain_mode {
            text
        } else {
            text.bold().to_string()
        }
    }

    pub fn print_detail(&self, message: impl fmt::Display) {
        let text = message.to_string();
        if self.prefs.plain_mode {
            println!("{text}");
        } else {
            println!("{}", text.dimmed());
        }
    }

    pub fn print_two_column(&self, entries: &[(&str, &str)]) {
        if entries.is_empty() {
            return;
        }
        let label_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        for (label, value) in entries {
            println!("{}", self.format_two_column_row(label, value, label_width));
        }
    }

    pub fn format_two_column_row(&self, label: &str, value: &str, width: usize) -> String {
        format!("  {:<width$}  {}", label, value, width = width + 2)
    }
}
