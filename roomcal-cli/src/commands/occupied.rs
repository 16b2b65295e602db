use anyhow::Result;
use chrono::Duration;
use owo_colors::OwoColorize;
use roomcal_core::date::parse_date;

use super::OCCUPIED_WINDOW_DAYS;
use crate::session::{Session, this_month};

pub fn run(session: &Session, from: Option<&str>, to: Option<&str>, json: bool) -> Result<()> {
    let from = match from {
        Some(s) => parse_date(s)?,
        None => this_month().first_day(),
    };
    let to = match to {
        Some(s) => parse_date(s)?,
        None => from + Duration::days(OCCUPIED_WINDOW_DAYS),
    };

    if to < from {
        anyhow::bail!("--to ({}) is before --from ({})", to, from);
    }

    let dates = session.occupied(from, to);

    if json {
        println!("{}", serde_json::to_string_pretty(&dates)?);
        return Ok(());
    }

    if dates.is_empty() {
        println!("{}", format!("Rooms available every night from {from} to {to}").dimmed());
        return Ok(());
    }

    for date in &dates {
        println!("{}", date.red());
    }

    Ok(())
}
