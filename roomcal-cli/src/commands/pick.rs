use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use roomcal_core::date::parse_date;
use roomcal_core::{AvailabilityCalendar, ClickOutcome, EventLog, MonthCursor};

use crate::render::Render;
use crate::session::Session;

pub fn run(session: &Session, dates: &[String], json: bool) -> Result<()> {
    let dates = dates
        .iter()
        .map(|s| parse_date(s))
        .collect::<Result<Vec<NaiveDate>, _>>()?;

    let Some(first) = dates.first() else {
        anyhow::bail!("No dates to pick");
    };

    let mut calendar = session.calendar(
        String::new(),
        String::new(),
        Some(MonthCursor::of(*first).to_string()),
        EventLog::default(),
    )?;

    for date in &dates {
        let outcome = click(session, &mut calendar, *date)?;
        if !json {
            println!("{}  {}", date, outcome.render());
        }
    }

    let selection = calendar.selection();

    if json {
        let errors: Vec<&str> = calendar.listener().errors().collect();
        let out = serde_json::json!({
            "check_in": selection.check_in_str(),
            "check_out": selection.check_out_str(),
            "nights": selection.nights(),
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        println!("{}", selection.render());
    }

    Ok(())
}

/// Show the date's month, reloading occupancy if it changed, then click it.
pub(crate) fn click(
    session: &Session,
    calendar: &mut AvailabilityCalendar<EventLog>,
    date: NaiveDate,
) -> Result<ClickOutcome> {
    let month = MonthCursor::of(date);
    if calendar.cursor() != month {
        calendar.show_month(month);
        session.refresh(calendar)?;
    }
    Ok(calendar.click_day(date.day()))
}
