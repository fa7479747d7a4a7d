use std::collections::HashMap;

use chrono::{
    Datelike,
    Days,
    NaiveDate,
    Weekday
};
use serde::{
    Serialize,
    Deserialize
};


/// An alternative day on which a holiday is observed.
///
/// When the actual date falls on `weekday`, the holiday is observed `offset`
/// days later (or earlier for negative offsets).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct AltDay {
    pub weekday: Weekday,
    pub offset: i32
}

impl AltDay {
    pub fn new(weekday: Weekday, offset: i32) -> AltDay {
        AltDay { weekday, offset }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum WeekendAdjustment {
    Unadjusted = 0,
    NextWeekday = 1,
    PreviousWeekday = -1
}

/// Saturday moves back to Friday, Sunday forward to Monday.
pub fn weekend_to_nearest() -> Vec<AltDay> {
    vec![
        AltDay::new(Weekday::Sat, -1),
        AltDay::new(Weekday::Sun, 1)
    ]
}

/// Saturday and Sunday both move forward to Monday.
pub fn weekend_to_monday() -> Vec<AltDay> {
    vec![
        AltDay::new(Weekday::Sat, 2),
        AltDay::new(Weekday::Sun, 1)
    ]
}

/// Builds substitution days from a weekday adjustment map.
///
/// Each adjusted weekday walks in its direction until it reaches a weekday
/// that is not a key of the map, so consecutive non-working days collapse onto
/// the same working day. The result is ordered Monday first.
pub fn alt_days_from_adjustment_map(adjustment_map: &HashMap<Weekday, WeekendAdjustment>) -> Vec<AltDay> {
    let mut alt_days = Vec::with_capacity(adjustment_map.len());

    for (&weekday, &adj) in adjustment_map {
        if adj == WeekendAdjustment::Unadjusted {
            continue;
        }

        let mut to_weekday = weekday;
        let next_weekday = if adj == WeekendAdjustment::NextWeekday {
            Weekday::succ
        } else {
            Weekday::pred
        };

        let mut shift_days: i32 = 0;
        let one_day = adj as i32;

        // a map covering the whole week has no working day to land on
        while adjustment_map.contains_key(&to_weekday) && shift_days.abs() < 7 {
            to_weekday = next_weekday(&to_weekday);
            shift_days += one_day;
        }

        if shift_days.abs() < 7 {
            alt_days.push(AltDay::new(weekday, shift_days));
        }
    }

    alt_days.sort_by_key(|alt| alt.weekday.num_days_from_monday());
    alt_days
}

/// Shifts `d` by the first substitution day matching its weekday.
pub fn observe(d: NaiveDate, alt_days: &[AltDay]) -> Option<NaiveDate> {
    let weekday = d.weekday();
    match alt_days.iter().find(|alt| alt.weekday == weekday) {
        Some(alt) if alt.offset >= 0 => d.checked_add_days(Days::new(alt.offset as u64)),
        Some(alt) => d.checked_sub_days(Days::new(alt.offset.unsigned_abs() as u64)),
        None => Some(d)
    }
}
