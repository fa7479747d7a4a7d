use std::fmt;
use std::sync::Arc;

use chrono::{
    DateTime,
    Datelike,
    Days,
    NaiveDate,
    NaiveTime,
    TimeDelta,
    Timelike,
    Weekday
};
use chrono_tz::Tz;

use crate::time::calendar::calendar::Calendar;
use crate::time::calendar::holidaycalendar::{
    HolidayCalendar,
    HolidayMatch
};
use crate::time::rangeofdates::RangeOfDates;
use crate::time::utility::{
    localize,
    month_first_day,
    month_last_day
};

/// Searches for a workday give up after ten years of consecutive non-workdays.
const MAX_SEARCH_DAYS: u32 = 3653;

/// Overrides the weekday table for a date.
pub type WorkdayFn = Arc<dyn Fn(NaiveDate) -> bool + Send + Sync>;

/// Overrides the start or end of work for a date.
pub type WorkTimeFn = Arc<dyn Fn(NaiveDate) -> NaiveTime + Send + Sync>;

fn minute_of_day(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

/// A holiday calendar with a working week and working hours.
///
/// A date is a workday when its weekday is a workday (or the workday function
/// says so) and no holiday is observed on it. Work hours are local times of
/// day in the location of the queried instant.
#[derive(Clone)]
pub struct BusinessCalendar {
    calendar: Calendar,
    workdays: [bool; 7],
    workday_fn: Option<WorkdayFn>,
    workday_start: NaiveTime,
    workday_end: NaiveTime,
    workday_start_fn: Option<WorkTimeFn>,
    workday_end_fn: Option<WorkTimeFn>
}

impl BusinessCalendar {
    /// Monday to Friday, 09:00 to 17:00.
    pub fn new(calendar: Calendar) -> BusinessCalendar {
        BusinessCalendar {
            calendar,
            workdays: [true, true, true, true, true, false, false],
            workday_fn: None,
            workday_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            workday_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            workday_start_fn: None,
            workday_end_fn: None
        }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut Calendar {
        &mut self.calendar
    }

    pub fn set_workday(&mut self, weekday: Weekday, workday: bool) {
        self.workdays[weekday.num_days_from_monday() as usize] = workday;
    }

    pub fn set_work_hours(&mut self, start: NaiveTime, end: NaiveTime) {
        self.workday_start = start;
        self.workday_end = end;
    }

    pub fn set_workday_fn(&mut self, f: impl Fn(NaiveDate) -> bool + Send + Sync + 'static) {
        self.workday_fn = Some(Arc::new(f));
    }

    pub fn set_workday_start_fn(&mut self, f: impl Fn(NaiveDate) -> NaiveTime + Send + Sync + 'static) {
        self.workday_start_fn = Some(Arc::new(f));
    }

    pub fn set_workday_end_fn(&mut self, f: impl Fn(NaiveDate) -> NaiveTime + Send + Sync + 'static) {
        self.workday_end_fn = Some(Arc::new(f));
    }

    pub fn work_hours_of_day(&self) -> (NaiveTime, NaiveTime) {
        (self.workday_start, self.workday_end)
    }

    fn is_workday_of_week(&self, d: NaiveDate) -> bool {
        match &self.workday_fn {
            Some(f) => f(d),
            None => self.workdays[d.weekday().num_days_from_monday() as usize]
        }
    }

    fn start_time(&self, d: NaiveDate) -> NaiveTime {
        self.workday_start_fn.as_ref().map_or(self.workday_start, |f| f(d))
    }

    fn end_time(&self, d: NaiveDate) -> NaiveTime {
        self.workday_end_fn.as_ref().map_or(self.workday_end, |f| f(d))
    }

    pub fn is_workday_in(&self, d: NaiveDate, location: Tz) -> bool {
        self.is_workday_of_week(d) && !self.calendar.is_holiday_in(d, location).observed
    }

    /// Workday check in the default location of the calendar.
    pub fn is_workday(&self, d: NaiveDate) -> bool {
        self.is_workday_in(d, self.calendar.default_location())
    }

    pub fn is_workday_at(&self, t: &DateTime<Tz>) -> bool {
        self.is_workday_in(t.date_naive(), t.timezone())
    }

    /// Reports whether `t` lies within the work hours of a workday, both ends
    /// included. Times are compared to the minute, so the whole closing minute
    /// counts as work time.
    pub fn is_work_time(&self, t: &DateTime<Tz>) -> bool {
        if !self.is_workday_at(t) {
            return false;
        }

        let d = t.date_naive();
        let minute = minute_of_day(t.time());
        minute_of_day(self.start_time(d)) <= minute && minute <= minute_of_day(self.end_time(d))
    }

    /// Workdays after `d` until the end of its month.
    pub fn workdays_remain(&self, d: NaiveDate) -> usize {
        match (d.succ_opt(), month_last_day(d.year(), d.month())) {
            (Some(next), Some(last)) if next <= last => {
                RangeOfDates::new(next, last).count_where(|x| self.is_workday(x))
            },
            _ => 0
        }
    }

    pub fn workdays_in_month(&self, year: i32, month: u32) -> usize {
        match (month_first_day(year, month), month_last_day(year, month)) {
            (Some(first), Some(last)) => {
                RangeOfDates::new(first, last).count_where(|x| self.is_workday(x))
            },
            _ => 0
        }
    }

    /// Observed holidays between `start` and `end` inclusive, negative when
    /// `end` precedes `start`.
    pub fn holidays_in_range(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let n = RangeOfDates::new(start, end)
            .count_where(|x| self.calendar.is_holiday(x).observed) as i64;
        if end < start { -n } else { n }
    }

    /// Workdays between `start` and `end` inclusive, negative when `end`
    /// precedes `start`.
    pub fn workdays_in_range(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let n = RangeOfDates::new(start, end).count_where(|x| self.is_workday(x)) as i64;
        if end < start { -n } else { n }
    }

    /// The nth workday of a month, counted from the end of the month when `n`
    /// is negative. `None` for `n == 0` or when the month has fewer workdays.
    pub fn workday_n(&self, year: i32, month: u32, n: i32) -> Option<NaiveDate> {
        if n == 0 {
            return None;
        }

        let range = RangeOfDates::new(month_first_day(year, month)?, month_last_day(year, month)?);
        let nth = n.unsigned_abs() as usize - 1;
        if n > 0 {
            range.iter().filter(|d| self.is_workday(*d)).nth(nth)
        } else {
            let workdays: Vec<NaiveDate> = range.iter().filter(|d| self.is_workday(*d)).collect();
            workdays.len().checked_sub(nth + 1).and_then(|i| workdays.get(i).copied())
        }
    }

    /// The date `offset` workdays away from `start`; `start` itself when
    /// `offset` is zero.
    pub fn workdays_from(&self, start: NaiveDate, offset: i32) -> Option<NaiveDate> {
        let step = |d: NaiveDate| {
            if offset > 0 {
                d.checked_add_days(Days::new(1))
            } else {
                d.checked_sub_days(Days::new(1))
            }
        };

        let mut d = start;
        let mut remaining = offset.unsigned_abs();
        let mut idle_days = 0;
        while remaining > 0 {
            d = step(d)?;
            if self.is_workday(d) {
                remaining -= 1;
                idle_days = 0;
            } else {
                idle_days += 1;
                if idle_days > MAX_SEARCH_DAYS {
                    return None;
                }
            }
        }
        Some(d)
    }

    /// Length of the working day of `d`; zero on non-workdays.
    pub fn work_hours(&self, d: NaiveDate) -> TimeDelta {
        if !self.is_workday(d) {
            return TimeDelta::zero();
        }
        self.end_time(d) - self.start_time(d)
    }

    /// Start of work on the day of `t`, `None` on non-workdays.
    pub fn workday_start(&self, t: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if !self.is_workday_at(t) {
            return None;
        }
        let d = t.date_naive();
        localize(t.timezone(), d.and_time(self.start_time(d)))
    }

    /// End of work on the day of `t`, `None` on non-workdays.
    pub fn workday_end(&self, t: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if !self.is_workday_at(t) {
            return None;
        }
        let d = t.date_naive();
        localize(t.timezone(), d.and_time(self.end_time(d)))
    }

    // first workday strictly after the day of `t`
    fn next_workday_after(&self, t: &DateTime<Tz>) -> Option<NaiveDate> {
        let location = t.timezone();
        let mut d = t.date_naive();
        for _ in 0..MAX_SEARCH_DAYS {
            d = d.succ_opt()?;
            if self.is_workday_in(d, location) {
                return Some(d);
            }
        }
        None
    }

    /// Start of the current workday if it has not begun yet, else start of
    /// the next workday.
    pub fn next_workday_start(&self, t: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if let Some(start) = self.workday_start(t) {
            if *t <= start {
                return Some(start);
            }
        }
        let d = self.next_workday_after(t)?;
        localize(t.timezone(), d.and_time(self.start_time(d)))
    }

    /// End of the current workday if it has not ended yet, else end of the
    /// next workday.
    pub fn next_workday_end(&self, t: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if let Some(end) = self.workday_end(t) {
            if *t <= end {
                return Some(end);
            }
        }
        let d = self.next_workday_after(t)?;
        localize(t.timezone(), d.and_time(self.end_time(d)))
    }

    /// Work time between two instants, in either order.
    pub fn work_hours_in_range(&self, start: &DateTime<Tz>, end: &DateTime<Tz>) -> TimeDelta {
        let (start, end) = if end < start { (end, start) } else { (start, end) };

        let first = if self.is_work_time(start) {
            Some(*start)
        } else {
            match (self.workday_start(start), self.workday_end(start)) {
                (Some(day_start), Some(day_end)) if *start <= day_end => Some(day_start.max(*start)),
                _ => self.next_workday_start(start)
            }
        };

        let mut total = TimeDelta::zero();
        let mut current = first;
        while let Some(from) = current {
            if from >= *end {
                break;
            }
            let Some(day_end) = self.workday_end(&from) else {
                break;
            };
            let until = day_end.min(*end);
            if until > from {
                total += until - from;
            }
            current = self.next_workday_after(&from)
                .and_then(|d| localize(from.timezone(), d.and_time(self.start_time(d))));
        }
        total
    }

    /// The instant at which `worked` hours of work, started at `t`, are done.
    ///
    /// Returns `t` unchanged for a non-positive duration and `None` when no
    /// further workday can be found.
    pub fn add_work_hours(&self, t: &DateTime<Tz>, worked: TimeDelta) -> Option<DateTime<Tz>> {
        if worked <= TimeDelta::zero() {
            return Some(*t);
        }

        let mut start = if self.is_work_time(t) {
            *t
        } else {
            match self.workday_start(t) {
                Some(day_start) if *t < day_start => day_start,
                _ => self.next_workday_start(t)?
            }
        };

        // next_workday_after bounds the search for each workday; workdays
        // without any work time are bounded here
        let mut remaining = worked;
        let mut empty_days = 0;
        loop {
            let day_end = self.workday_end(&start)?;
            let available = if day_end > start { day_end - start } else { TimeDelta::zero() };
            if remaining <= available {
                return Some(start + remaining);
            }
            if available == TimeDelta::zero() {
                empty_days += 1;
                if empty_days > MAX_SEARCH_DAYS {
                    return None;
                }
            } else {
                empty_days = 0;
            }
            remaining -= available;
            let next = self.next_workday_after(&start)?;
            start = localize(start.timezone(), next.and_time(self.start_time(next)))?;
        }
    }
}

impl HolidayCalendar for BusinessCalendar {
    fn name(&self) -> &str {
        self.calendar.name()
    }

    fn default_location(&self) -> Tz {
        self.calendar.default_location()
    }

    fn is_applicable(&self, location: Tz) -> bool {
        self.calendar.is_applicable(location)
    }

    fn is_holiday_in(&self, d: NaiveDate, location: Tz) -> HolidayMatch<'_> {
        self.calendar.is_holiday_in(d, location)
    }
}

impl fmt::Debug for BusinessCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusinessCalendar")
            .field("calendar", &self.calendar)
            .field("workdays", &self.workdays)
            .field("workday_start", &self.workday_start)
            .field("workday_end", &self.workday_end)
            .field("workday_fn", &self.workday_fn.is_some())
            .field("workday_start_fn", &self.workday_start_fn.is_some())
            .field("workday_end_fn", &self.workday_end_fn.is_some())
            .finish()
    }
}
