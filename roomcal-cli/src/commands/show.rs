use anyhow::Result;
use roomcal_core::EventLog;

use crate::render::{Render, legend};
use crate::session::Session;

pub fn run(
    session: &Session,
    month: Option<String>,
    check_in: String,
    check_out: String,
) -> Result<()> {
    let calendar = session.calendar(check_in, check_out, month, EventLog::default())?;

    println!("{}", calendar.month_grid().render());
    println!();
    println!("{}", calendar.selection().render());
    println!("{}", legend());

    Ok(())
}
