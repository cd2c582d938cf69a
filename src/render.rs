//! Display helpers for whatever front end drives a session.
//!
//! Choices always carry the structured value next to the label; nothing is
//! ever parsed back out of a label.

use crate::model::{Query, SeatMap, Station, Train, TravelClass};
use serde::Serialize;
use std::fmt::Write;

/// One selectable item: what to show, and what to hand back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

/// Column subset of [`Train`] shown in the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainRow {
    pub train_id: u32,
    pub train_name: String,
    pub source: Station,
    pub destination: Station,
    pub class: TravelClass,
    pub seat_available: u32,
}

impl From<&Train> for TrainRow {
    fn from(t: &Train) -> Self {
        Self {
            train_id: t.train_id,
            train_name: t.train_name.clone(),
            source: t.source,
            destination: t.destination,
            class: t.class,
            seat_available: t.seat_available,
        }
    }
}

pub fn train_table(trains: &[Train], limit: usize) -> Vec<TrainRow> {
    trains.iter().take(limit).map(TrainRow::from).collect()
}

/// Plain-text rendering of [`train_table`] rows.
pub fn format_train_table(rows: &[TrainRow]) -> String {
    let mut out = format!(
        "{:<8} {:<12} {:<11} {:<11} {:<7} {:>5}\n",
        "ID", "Name", "From", "To", "Class", "Seats"
    );
    for r in rows {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{:<8} {:<12} {:<11} {:<11} {:<7} {:>5}",
            r.train_id,
            r.train_name,
            r.source.as_str(),
            r.destination.as_str(),
            r.class.as_str(),
            r.seat_available
        );
    }
    out
}

pub fn train_label(t: &Train) -> String {
    format!("{} | ID:{} | Seats:{}", t.train_name, t.train_id, t.seat_available)
}

/// Choices over the first `limit` trains; the value is the train's position
/// in `trains`, since train ids are not unique.
pub fn train_choices(trains: &[Train], limit: usize) -> Vec<Choice<usize>> {
    trains
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, t)| Choice {
            label: train_label(t),
            value: i,
        })
        .collect()
}

pub fn seat_choices(seats: &SeatMap) -> Vec<Choice<u32>> {
    seats
        .available()
        .map(|s| Choice {
            label: format!("Seat {} ({})", s.seat_no, s.seat_type),
            value: s.seat_no,
        })
        .collect()
}

pub fn query_json(query: &Query) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{build_seat_map, normalize};
    use crate::model::Preference;

    fn train(id: u32, name: &str, free: u32) -> Train {
        Train::new(
            id,
            name,
            Station::Chennai,
            Station::Bangalore,
            "2025-12-10",
            TravelClass::Sleeper,
            50,
            50 - free,
            44,
            Preference::Any,
        )
    }

    #[test]
    fn table_is_limited() {
        let trains: Vec<Train> = (0..15).map(|i| train(10_000 + i, "Express_1", 4)).collect();
        let rows = train_table(&trains, 10);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[9].train_id, 10_009);

        let text = format_train_table(&rows);
        assert_eq!(text.lines().count(), 11);
        assert!(text.lines().nth(1).unwrap().starts_with("10000"));
    }

    #[test]
    fn train_labels_carry_position() {
        let trains = vec![train(54321, "Express_7", 5), train(54321, "Express_8", 2)];
        let choices = train_choices(&trains, 10);
        assert_eq!(choices[0].label, "Express_7 | ID:54321 | Seats:5");
        assert_eq!(choices[1].value, 1);
    }

    #[test]
    fn seat_choices_skip_booked_seats() {
        let mut map = build_seat_map(4);
        assert!(map.reserve(2));
        let choices = seat_choices(&map);
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Seat 1 (Lower)", "Seat 3 (Lower)", "Seat 4 (Upper)"]);
        assert_eq!(choices[2].value, 4);
    }

    #[test]
    fn query_renders_as_json() {
        let q = normalize("hi", Station::Chennai, Station::Delhi, TravelClass::ThreeTier);
        let json: serde_json::Value = serde_json::from_str(&query_json(&q).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "intent": "Book Ticket",
                "source": "Chennai",
                "destination": "Delhi",
                "class": "3A",
                "original_text": "hi"
            })
        );
    }
}
