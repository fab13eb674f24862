//! Free-room snapshots and the day × slot grid built from them.
//!
//! The store encodes free rooms 1-indexed: days `"1"..="7"`, slots
//! `"1"..="5"`, each level either an object or an array (array position
//! used as the key, so position 0 is never a valid day or slot). The
//! snapshot normalizes this into a 0-indexed 7 × 5 table aligned with
//! [`Lesson::day_index`](crate::Lesson).

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::raw::{scalar_text, FreeRoomsDocument, Indexed};
use crate::slot::{canonical_slot_time, DAYS_PER_WEEK, SLOTS_PER_DAY};

/// Free rooms per day and slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeRoomsSnapshot {
    rooms: [[Vec<String>; SLOTS_PER_DAY]; DAYS_PER_WEEK],
    last_update: String,
}

impl FreeRoomsSnapshot {
    /// Normalize a free-rooms document.
    ///
    /// Entries whose day or slot key is not a number in range are ignored,
    /// as are room lists that are not arrays.
    pub fn from_document(document: &FreeRoomsDocument) -> Self {
        let mut snapshot = FreeRoomsSnapshot {
            last_update: document.last_update().to_string(),
            ..Default::default()
        };

        for (day_key, day_value) in Indexed::from_value(Some(&document.schedule)).entries() {
            let Some(day_index) = key_to_index(day_key.as_index(), DAYS_PER_WEEK) else {
                continue;
            };
            for (slot_key, rooms_value) in Indexed::from_value(Some(day_value)).entries() {
                let Some(slot_index) = key_to_index(slot_key.as_index(), SLOTS_PER_DAY) else {
                    continue;
                };
                snapshot.rooms[day_index][slot_index] = parse_rooms(rooms_value);
            }
        }

        trace!(
            last_update = %snapshot.last_update,
            "normalized free rooms snapshot"
        );
        snapshot
    }

    /// Rooms free on a 0-based day during a 1-based slot.
    ///
    /// Out-of-range positions yield an empty slice.
    pub fn rooms(&self, day_index: usize, slot_number: usize) -> &[String] {
        slot_number
            .checked_sub(1)
            .and_then(|slot_index| self.rooms.get(day_index)?.get(slot_index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn last_update(&self) -> &str {
        &self.last_update
    }

    /// `true` when no slot of any day lists a room.
    pub fn is_empty(&self) -> bool {
        self.rooms.iter().flatten().all(Vec::is_empty)
    }
}

/// Map a 1-based key to a 0-based index below `len`.
fn key_to_index(key: Option<i64>, len: usize) -> Option<usize> {
    let index = usize::try_from(key?).ok()?.checked_sub(1)?;
    (index < len).then_some(index)
}

fn parse_rooms(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(scalar_text)
            .collect(),
        _ => Vec::new(),
    }
}

// ── Grid ────────────────────────────────────────────────────────────────────

/// Free rooms of one slot, with its canonical time string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotFreeRooms {
    /// 1-based.
    pub slot_number: usize,
    pub time: String,
    /// Sorted.
    pub rooms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayFreeRooms {
    pub day_index: usize,
    pub slots: Vec<SlotFreeRooms>,
}

/// Seven days of five slots each, independent of any group's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeRoomGrid {
    pub days: Vec<DayFreeRooms>,
    pub last_update: String,
}

impl FreeRoomGrid {
    /// Look up one cell by 0-based day and 1-based slot.
    pub fn slot(&self, day_index: usize, slot_number: usize) -> Option<&SlotFreeRooms> {
        self.days
            .get(day_index)?
            .slots
            .iter()
            .find(|s| s.slot_number == slot_number)
    }
}

/// Build the full grid from a snapshot. Missing cells become empty lists.
pub fn build_free_room_grid(snapshot: &FreeRoomsSnapshot) -> FreeRoomGrid {
    let days = (0..DAYS_PER_WEEK)
        .map(|day_index| DayFreeRooms {
            day_index,
            slots: (1..=SLOTS_PER_DAY)
                .map(|slot_number| {
                    let mut rooms = snapshot.rooms(day_index, slot_number).to_vec();
                    rooms.sort();
                    SlotFreeRooms {
                        slot_number,
                        time: canonical_slot_time(slot_number).to_string(),
                        rooms,
                    }
                })
                .collect(),
        })
        .collect();

    FreeRoomGrid {
        days,
        last_update: snapshot.last_update().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: Value) -> FreeRoomsSnapshot {
        FreeRoomsSnapshot::from_document(&FreeRoomsDocument::from_value(value))
    }

    #[test]
    fn test_keyed_snapshot_is_shifted_to_zero_based_days() {
        let snap = snapshot(json!({
            "schedule": {"1": {"2": ["305", "101"]}, "7": {"5": ["A"]}},
            "last_update": "19.10.2026"
        }));
        assert_eq!(snap.rooms(0, 2), ["305", "101"]);
        assert_eq!(snap.rooms(6, 5), ["A"]);
        assert!(snap.rooms(0, 1).is_empty());
        assert_eq!(snap.last_update(), "19.10.2026");
    }

    #[test]
    fn test_list_snapshot_uses_positions_as_keys() {
        // Position 0 of each level is unused, as in the store's array export.
        let snap = snapshot(json!({
            "schedule": [null, [null, ["101"], ["102", "103"]]]
        }));
        assert_eq!(snap.rooms(0, 1), ["101"]);
        assert_eq!(snap.rooms(0, 2), ["102", "103"]);
        assert!(snap.rooms(1, 1).is_empty());
    }

    #[test]
    fn test_out_of_range_and_garbage_are_ignored() {
        let snap = snapshot(json!({
            "schedule": {
                "0": {"1": ["zero-day"]},
                "8": {"1": ["eighth-day"]},
                "mon": {"1": ["named"]},
                "2": {"6": ["sixth-slot"], "1": "not-a-list", "3": [101, null, "B"]}
            }
        }));
        assert!(snap.rooms(1, 1).is_empty());
        assert_eq!(snap.rooms(1, 3), ["101", "B"]);
        assert!(snap.rooms(7, 1).is_empty());
        assert!(snap.rooms(1, 0).is_empty());
        assert!(snap.rooms(1, 6).is_empty());
        assert!(!snap.is_empty());
    }

    #[test]
    fn test_missing_schedule_is_empty() {
        let snap = snapshot(json!({"last_update": "x"}));
        assert!(snap.is_empty());
        let snap = snapshot(json!("nope"));
        assert!(snap.is_empty());
        assert_eq!(snap.last_update(), "");
    }

    #[test]
    fn test_grid_is_seven_by_five_with_sorted_rooms() {
        let snap = snapshot(json!({
            "schedule": {"3": {"4": ["410", "105", "212"]}}
        }));
        let grid = build_free_room_grid(&snap);
        assert_eq!(grid.days.len(), 7);
        assert!(grid.days.iter().all(|d| d.slots.len() == 5));

        let cell = grid.slot(2, 4).unwrap();
        assert_eq!(cell.rooms, vec!["105", "212", "410"]);
        assert_eq!(cell.time, "14:00\n15:30");

        let empty = grid.slot(0, 1).unwrap();
        assert!(empty.rooms.is_empty());
        assert_eq!(empty.time, "08:00\n09:30");

        assert!(grid.slot(7, 1).is_none());
        assert!(grid.slot(0, 6).is_none());
    }

    #[test]
    fn test_grid_times_match_computed_slot_times() {
        let grid = build_free_room_grid(&FreeRoomsSnapshot::default());
        for day in &grid.days {
            for cell in &day.slots {
                assert_eq!(cell.time, crate::slot::slot_time(cell.slot_number));
            }
        }
    }
}
