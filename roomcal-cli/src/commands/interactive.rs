use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;
use roomcal_core::{SelectionError, SelectionListener};

use crate::render::{Render, legend};
use crate::session::Session;

/// Prints rejections as they happen; changes go to the debug log.
struct ConsoleListener;

impl SelectionListener for ConsoleListener {
    fn check_in_changed(&mut self, value: &str) {
        tracing::debug!(check_in = value, "check-in changed");
    }

    fn check_out_changed(&mut self, value: &str) {
        tracing::debug!(check_out = value, "check-out changed");
    }

    fn rejected(&mut self, error: SelectionError) {
        eprintln!("  {}", error.to_string().red());
    }
}

enum Command {
    Day(u32),
    Next,
    Prev,
    Clear,
    Quit,
}

fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_ascii_lowercase().as_str() {
        "n" | "next" | ">" => Some(Command::Next),
        "p" | "prev" | "<" => Some(Command::Prev),
        "c" | "clear" => Some(Command::Clear),
        "q" | "quit" | "" => Some(Command::Quit),
        other => other.parse().ok().map(Command::Day),
    }
}

pub fn run(session: &Session) -> Result<()> {
    let mut calendar = session.calendar(String::new(), String::new(), None, ConsoleListener)?;

    println!("{}", legend());

    loop {
        println!();
        println!("{}", calendar.month_grid().render());
        println!("{}", calendar.selection().render());

        let input: String = Input::new()
            .with_prompt("  Day, n/p to change month, c to clear, q to quit")
            .allow_empty(true)
            .interact_text()?;

        match parse_command(&input) {
            Some(Command::Day(day)) => {
                let outcome = calendar.click_day(day);
                if !matches!(outcome, roomcal_core::ClickOutcome::Rejected(_)) {
                    println!("  {}", outcome.render());
                }
            }
            Some(Command::Next) => {
                calendar.next_month();
                session.refresh(&mut calendar)?;
            }
            Some(Command::Prev) => {
                calendar.prev_month();
                session.refresh(&mut calendar)?;
            }
            Some(Command::Clear) => calendar.clear(),
            Some(Command::Quit) => break,
            None => eprintln!("  {}", format!("Unknown input '{}'", input.trim()).red()),
        }
    }

    let selection = calendar.selection();
    if selection.is_complete() {
        let stay = format!(
            "  Selected: {} → {}",
            selection.check_in_str(),
            selection.check_out_str()
        );
        println!("{}", stay.green());
    }

    Ok(())
}
