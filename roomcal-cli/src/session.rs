//! Everything a command needs: inventory, minimum date and room filter,
//! resolved from CLI flags over the global config.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use roomcal_core::config::{MinDate, RoomcalConfig};
use roomcal_core::date::format_date;
use roomcal_core::inventory::Inventory;
use roomcal_core::{
    AvailabilityCalendar, CalendarProps, MonthCursor, SelectionListener, TracingSink,
};

use crate::GlobalArgs;

pub struct Session {
    pub inventory: Inventory,
    pub inventory_path: PathBuf,
    pub min_date: Option<NaiveDate>,
    pub room_type: Option<String>,
}

impl Session {
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let config = RoomcalConfig::load().context("Failed to load roomcal config")?;

        let inventory_path = match &args.inventory {
            Some(path) => path.clone(),
            None => config.inventory_path(),
        };

        if !inventory_path.exists() {
            anyhow::bail!(
                "Inventory file not found at {}\n\n\
                Create it with your rooms and reservations:\n\n\
                [[rooms]]\n\
                id = 1\n\
                number = \"101\"\n\
                room_type = \"double\"\n\n\
                [[reservations]]\n\
                id = 1\n\
                room_id = 1\n\
                check_in = \"2024-06-05\"\n\
                check_out = \"2024-06-08\"\n\
                status = \"confirmed\"\n\n\
                or pass --inventory <path>.",
                inventory_path.display()
            );
        }

        let inventory = Inventory::load(&inventory_path)
            .with_context(|| format!("Failed to load inventory at {}", inventory_path.display()))?;

        let min_date = match &args.min {
            Some(s) => MinDate::parse(s)?,
            None => config.min_date()?,
        }
        .resolve(today());

        let room_type = args.room_type.clone().or(config.room_type);

        tracing::debug!(
            inventory = %inventory_path.display(),
            rooms = inventory.rooms.len(),
            reservations = inventory.reservations.len(),
            min_date = ?min_date,
            room_type = ?room_type,
            "session loaded"
        );

        Ok(Session {
            inventory,
            inventory_path,
            min_date,
            room_type,
        })
    }

    /// Occupied dates in `[from, to)` as `YYYY-MM-DD` strings.
    pub fn occupied(&self, from: NaiveDate, to: NaiveDate) -> Vec<String> {
        self.inventory.occupied_dates(from, to, self.room_type.as_deref())
    }

    /// Build a calendar showing `month` (or its default month), with the
    /// occupied set loaded for whatever it ends up displaying.
    pub fn calendar<L: SelectionListener>(
        &self,
        check_in: String,
        check_out: String,
        month: Option<String>,
        listener: L,
    ) -> Result<AvailabilityCalendar<L>> {
        let props = CalendarProps {
            check_in,
            check_out,
            occupied: Vec::new(),
            min_date: self.min_date.map(format_date),
            month,
        };

        let mut calendar = AvailabilityCalendar::new(props, listener)?.with_sink(TracingSink);
        self.refresh(&mut calendar)?;

        let selection = calendar.selection();
        if let Some(date) = selection.first_conflict(calendar.occupied()) {
            anyhow::bail!(
                "Stay {} to {} includes unavailable date {}",
                selection.check_in_str(),
                selection.check_out_str(),
                format_date(date)
            );
        }

        Ok(calendar)
    }

    /// Reload the occupied set so it covers the displayed month and every
    /// night of the current stay, even where the stay crosses into another
    /// month.
    pub fn refresh<L: SelectionListener>(
        &self,
        calendar: &mut AvailabilityCalendar<L>,
    ) -> Result<()> {
        let month = calendar.cursor();
        let selection = calendar.selection();
        let from = selection
            .check_in
            .map_or(month.first_day(), |check_in| check_in.min(month.first_day()));
        let to = selection
            .check_out
            .map_or(month.next().first_day(), |check_out| check_out.max(month.next().first_day()));

        calendar.set_occupied(self.occupied(from, to))?;
        Ok(())
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// First day of the current month.
pub fn this_month() -> MonthCursor {
    MonthCursor::of(today())
}
