//! Terminal front end for widget clicks.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{theme::ColorfulTheme, Input};
use tagset_client::TagUi;
use tagset_core::WidgetState;

use crate::style;

fn use_dialoguer() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Prompts on the terminal; notifications go to stderr.
#[derive(Debug, Default)]
pub struct TerminalUi;

impl TagUi for TerminalUi {
    fn prompt(&mut self, widget: &WidgetState) -> Option<String> {
        let label = format!("{} ({}, {} B)", widget.tag, widget.kind, widget.byte_width);
        if use_dialoguer() {
            let theme = ColorfulTheme::default();
            return Input::<String>::with_theme(&theme)
                .with_prompt(label)
                .default(widget.current_value.to_string())
                .interact_text()
                .ok();
        }
        prompt_line(&label, &widget.current_value, &mut io::stdin().lock())
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", style::warning(message));
    }
}

/// Plain prompt: EOF cancels, an empty line keeps `current`.
fn prompt_line(label: &str, current: &str, input: &mut impl BufRead) -> Option<String> {
    print!("{label} [{current}]: ");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                Some(current.to_string())
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}
