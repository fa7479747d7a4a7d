use chrono::{
    DateTime,
    NaiveDate
};
use chrono_tz::Tz;

use crate::time::holiday::holiday::Holiday;

/// Outcome of matching one date against the rules of a calendar.
///
/// `actual` is set when the date is the literal holiday date, `observed` when
/// the holiday is taken off on that date. Both may be set at once.
#[derive(Debug, Clone, Copy)]
pub struct HolidayMatch<'a> {
    pub actual: bool,
    pub observed: bool,
    pub holiday: Option<&'a Holiday>
}

impl<'a> HolidayMatch<'a> {
    pub const fn none() -> HolidayMatch<'a> {
        HolidayMatch {
            actual: false,
            observed: false,
            holiday: None
        }
    }

    pub fn is_match(&self) -> bool {
        self.actual || self.observed
    }

    pub fn name(&self) -> Option<&'a str> {
        self.holiday.map(|h| h.name())
    }
}

impl PartialEq for HolidayMatch<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.actual == other.actual
            && self.observed == other.observed
            && self.name() == other.name()
    }
}

pub trait HolidayCalendar: Send + Sync {
    fn name(&self) -> &str;

    /// Location assumed for plain dates.
    fn default_location(&self) -> Tz;

    fn is_applicable(&self, location: Tz) -> bool;

    fn is_holiday_in(&self, d: NaiveDate, location: Tz) -> HolidayMatch<'_>;

    fn is_holiday(&self, d: NaiveDate) -> HolidayMatch<'_> {
        self.is_holiday_in(d, self.default_location())
    }

    /// Matches the local date of `t` in the location of `t`.
    fn is_holiday_at(&self, t: &DateTime<Tz>) -> HolidayMatch<'_> {
        self.is_holiday_in(t.date_naive(), t.timezone())
    }
}
