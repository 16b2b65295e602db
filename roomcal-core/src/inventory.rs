//! Rooms and reservations, and the occupied dates they imply.
//!
//! A date is occupied when every room (of the requested type) has a live
//! reservation covering that night.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::format_date;
use crate::error::{RoomcalError, RoomcalResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub number: String,
    pub room_type: String,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

fn default_capacity() -> u32 {
    2
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Whether a reservation in this state holds its room.
    pub fn holds_room(self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: u32,
    pub room_id: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub status: ReservationStatus,
}

impl Reservation {
    /// Whether the guest sleeps in the room on the night of `date`.
    /// The check-out day is free for the next guest.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.status.holds_room() && self.check_in <= date && date < self.check_out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

impl Inventory {
    /// Load an inventory file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> RoomcalResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let inventory: Inventory = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| RoomcalError::Serialization(e.to_string()))?,
            _ => toml::from_str(&content).map_err(|e| RoomcalError::Serialization(e.to_string()))?,
        };

        inventory.validate()?;
        Ok(inventory)
    }

    /// Every reservation must point at a known room and not end before it starts.
    pub fn validate(&self) -> RoomcalResult<()> {
        let mut room_ids = HashSet::new();
        for room in &self.rooms {
            if !room_ids.insert(room.id) {
                return Err(RoomcalError::Inventory(format!("duplicate room id {}", room.id)));
            }
        }

        for reservation in &self.reservations {
            if !room_ids.contains(&reservation.room_id) {
                return Err(RoomcalError::Inventory(format!(
                    "reservation {} references unknown room {}",
                    reservation.id, reservation.room_id
                )));
            }
            if reservation.check_out < reservation.check_in {
                return Err(RoomcalError::Inventory(format!(
                    "reservation {} checks out before it checks in",
                    reservation.id
                )));
            }
        }

        Ok(())
    }

    fn rooms_of_type<'a>(&'a self, room_type: Option<&str>) -> impl Iterator<Item = &'a Room> {
        self.rooms
            .iter()
            .filter(move |room| room_type.is_none_or(|t| room.room_type.eq_ignore_ascii_case(t)))
    }

    /// Rooms with no live reservation on the night of `date`.
    pub fn available_rooms(&self, date: NaiveDate, room_type: Option<&str>) -> Vec<&Room> {
        let booked: HashSet<u32> = self
            .reservations
            .iter()
            .filter(|r| r.covers(date))
            .map(|r| r.room_id)
            .collect();

        self.rooms_of_type(room_type)
            .filter(|room| !booked.contains(&room.id))
            .collect()
    }

    /// Dates in `[from, to)` with no room (of `room_type`, if given) left,
    /// as sorted `YYYY-MM-DD` strings. With no matching rooms at all, every
    /// date is occupied.
    pub fn occupied_dates(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        room_type: Option<&str>,
    ) -> Vec<String> {
        let rooms: HashSet<u32> = self.rooms_of_type(room_type).map(|room| room.id).collect();

        let mut by_room: HashMap<u32, Vec<&Reservation>> = HashMap::new();
        for reservation in &self.reservations {
            if rooms.contains(&reservation.room_id) && reservation.status.holds_room() {
                by_room.entry(reservation.room_id).or_default().push(reservation);
            }
        }

        from.iter_days()
            .take_while(|date| *date < to)
            .filter(|date| {
                rooms.iter().all(|id| {
                    by_room
                        .get(id)
                        .is_some_and(|held| held.iter().any(|r| r.covers(*date)))
                })
            })
            .map(format_date)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn room(id: u32, room_type: &str) -> Room {
        Room {
            id,
            number: format!("{}0{}", id, id),
            room_type: room_type.to_string(),
            capacity: 2,
        }
    }

    fn booking(id: u32, room_id: u32, from: (u32, u32), to: (u32, u32)) -> Reservation {
        Reservation {
            id,
            room_id,
            check_in: ymd(2024, from.0, from.1),
            check_out: ymd(2024, to.0, to.1),
            status: ReservationStatus::Confirmed,
        }
    }

    fn hotel() -> Inventory {
        Inventory {
            rooms: vec![room(1, "single"), room(2, "double")],
            reservations: vec![
                booking(1, 1, (6, 8), (6, 12)),
                booking(2, 2, (6, 10), (6, 11)),
                booking(3, 2, (6, 11), (6, 13)),
            ],
        }
    }

    #[test]
    fn date_is_occupied_only_when_every_room_is_booked() {
        let occupied = hotel().occupied_dates(ymd(2024, 6, 1), ymd(2024, 7, 1), None);
        assert_eq!(occupied, vec!["2024-06-10", "2024-06-11"]);
    }

    #[test]
    fn room_type_filter_narrows_the_pool() {
        let inventory = hotel();
        let singles = inventory.occupied_dates(ymd(2024, 6, 1), ymd(2024, 6, 30), Some("single"));
        assert_eq!(singles, vec!["2024-06-08", "2024-06-09", "2024-06-10", "2024-06-11"]);

        let doubles = inventory.occupied_dates(ymd(2024, 6, 1), ymd(2024, 6, 30), Some("DOUBLE"));
        assert_eq!(doubles, vec!["2024-06-10", "2024-06-11", "2024-06-12"]);
    }

    #[test]
    fn cancelled_reservations_free_the_room() {
        let mut inventory = hotel();
        inventory.reservations[0].status = ReservationStatus::Cancelled;
        let occupied = inventory.occupied_dates(ymd(2024, 6, 1), ymd(2024, 7, 1), None);
        assert!(occupied.is_empty());
    }

    #[test]
    fn no_matching_rooms_means_fully_occupied() {
        let occupied = hotel().occupied_dates(ymd(2024, 6, 1), ymd(2024, 6, 4), Some("suite"));
        assert_eq!(occupied, vec!["2024-06-01", "2024-06-02", "2024-06-03"]);
    }

    #[test]
    fn available_rooms_respects_checkout_day() {
        let inventory = hotel();
        let free: Vec<u32> = inventory
            .available_rooms(ymd(2024, 6, 12), None)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(free, vec![1]);
    }

    #[test]
    fn validate_catches_bad_references() {
        let mut inventory = hotel();
        inventory.reservations.push(booking(9, 42, (6, 1), (6, 2)));
        assert!(matches!(inventory.validate(), Err(RoomcalError::Inventory(_))));

        let mut inventory = hotel();
        inventory.reservations.push(booking(9, 1, (6, 5), (6, 2)));
        assert!(matches!(inventory.validate(), Err(RoomcalError::Inventory(_))));

        let mut inventory = hotel();
        inventory.rooms.push(room(1, "suite"));
        assert!(matches!(inventory.validate(), Err(RoomcalError::Inventory(_))));
    }

    #[test]
    fn loads_toml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("inventory.toml");
        let mut file = std::fs::File::create(&toml_path).unwrap();
        writeln!(
            file,
            r#"
[[rooms]]
id = 1
number = "101"
room_type = "single"

[[reservations]]
id = 1
room_id = 1
check_in = "2024-06-05"
check_out = "2024-06-07"
status = "confirmed"
"#
        )
        .unwrap();

        let inventory = Inventory::load(&toml_path).unwrap();
        assert_eq!(inventory.rooms[0].capacity, 2);
        assert_eq!(
            inventory.occupied_dates(ymd(2024, 6, 1), ymd(2024, 6, 30), None),
            vec!["2024-06-05", "2024-06-06"]
        );

        let json_path = dir.path().join("inventory.json");
        std::fs::write(&json_path, serde_json::to_string(&inventory).unwrap()).unwrap();
        assert_eq!(Inventory::load(&json_path).unwrap(), inventory);
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Inventory::load(&path), Err(RoomcalError::Serialization(_))));
    }
}
