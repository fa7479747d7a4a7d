use chrono::{
    Datelike,
    NaiveDate
};
use chrono_tz::Tz;

use crate::time::calendar::holidaycache::{
    CacheConfig,
    HolidayCache,
    HolidayHit,
    YearHits
};
use crate::time::calendar::holidaycalendar::{
    HolidayCalendar,
    HolidayMatch
};
use crate::time::holiday::holiday::Holiday;

/// A date on which a holiday rule matches within one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMatch {
    pub date: NaiveDate,
    pub actual: bool,
    pub observed: bool
}

/// Every date of `year` on which `holiday` matches, in date order.
///
/// A substitution can move the observed date across the year boundary (1 Jan
/// on a Saturday observed on 31 Dec), so the rule is evaluated for the years
/// either side of `year` as well. Dates are compared in full.
pub fn year_matches(holiday: &Holiday, year: i32) -> Vec<YearMatch> {
    let mut matches: Vec<YearMatch> = Vec::with_capacity(2);

    let mut mark = |date: NaiveDate, actual: bool, observed: bool| {
        if date.year() != year {
            return;
        }
        match matches.iter_mut().find(|m| m.date == date) {
            Some(m) => {
                m.actual |= actual;
                m.observed |= observed;
            },
            None => matches.push(YearMatch { date, actual, observed })
        }
    };

    for y in [year.checked_sub(1), Some(year), year.checked_add(1)].into_iter().flatten() {
        if let Some(occurrence) = holiday.calc(y) {
            mark(occurrence.actual, true, false);
            mark(occurrence.observed, false, true);
        }
    }

    matches.sort_by_key(|m| m.date);
    matches
}

/// A holiday of a calendar on a specific date.
#[derive(Debug, Clone, Copy)]
pub struct HolidayOccurrence<'a> {
    pub date: NaiveDate,
    pub actual: bool,
    pub observed: bool,
    pub holiday: &'a Holiday
}

/// A named, ordered list of holiday rules.
///
/// Rules are matched in insertion order and the first matching rule wins.
/// The optional cache stores every hit of a (year, location) pair; it is
/// cleared whenever a rule is added.
#[derive(Debug, Clone)]
pub struct Calendar {
    name: String,
    description: String,
    locations: Vec<Tz>,
    default_location: Option<Tz>,
    holidays: Vec<Holiday>,
    cache: Option<HolidayCache>
}

impl Calendar {
    pub fn new(name: impl Into<String>) -> Calendar {
        Calendar {
            name: name.into(),
            description: String::new(),
            locations: Vec::new(),
            default_location: None,
            holidays: Vec::new(),
            cache: None
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Calendar {
        self.description = description.into();
        self
    }

    /// Restricts the calendar to `locations`. An empty list applies everywhere.
    /// Without an explicit default location the first entry becomes the
    /// default.
    pub fn with_locations(mut self, locations: Vec<Tz>) -> Calendar {
        self.locations = locations;
        self
    }

    pub fn with_default_location(mut self, location: Tz) -> Calendar {
        self.default_location = Some(location);
        self
    }

    pub fn with_cache(mut self, config: CacheConfig) -> Calendar {
        self.cache = Some(HolidayCache::new(config));
        self
    }

    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = Holiday>) -> Calendar {
        self.add_holidays(holidays);
        self
    }

    pub fn add_holiday(&mut self, holiday: Holiday) {
        self.holidays.push(holiday);
        self.invalidate_cache();
    }

    pub fn add_holidays(&mut self, holidays: impl IntoIterator<Item = Holiday>) {
        self.holidays.extend(holidays);
        self.invalidate_cache();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn locations(&self) -> &[Tz] {
        &self.locations
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    pub fn cache(&self) -> Option<&HolidayCache> {
        self.cache.as_ref()
    }

    /// Lists every holiday date of `year` in date order.
    pub fn holidays_in_year(&self, year: i32) -> Vec<HolidayOccurrence<'_>> {
        self.compute_year_hits(year)
            .into_iter()
            .filter_map(|(date, hit)| {
                self.holidays.get(hit.index).map(|holiday| HolidayOccurrence {
                    date,
                    actual: hit.actual,
                    observed: hit.observed,
                    holiday
                })
            })
            .collect()
    }

    fn invalidate_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    fn compute_year_hits(&self, year: i32) -> YearHits {
        let mut hits = YearHits::new();
        for (index, holiday) in self.holidays.iter().enumerate() {
            for m in year_matches(holiday, year) {
                hits.entry(m.date).or_insert(HolidayHit {
                    actual: m.actual,
                    observed: m.observed,
                    index
                });
            }
        }
        hits
    }

    fn to_match(&self, hit: &HolidayHit) -> HolidayMatch<'_> {
        HolidayMatch {
            actual: hit.actual,
            observed: hit.observed,
            holiday: self.holidays.get(hit.index)
        }
    }
}

impl HolidayCalendar for Calendar {
    fn name(&self) -> &str {
        &self.name
    }

    /// The location set with `with_default_location`, else the first
    /// declared location, else UTC.
    fn default_location(&self) -> Tz {
        self.default_location
            .or_else(|| self.locations.first().copied())
            .unwrap_or(Tz::UTC)
    }

    fn is_applicable(&self, location: Tz) -> bool {
        self.locations.is_empty() || self.locations.contains(&location)
    }

    fn is_holiday_in(&self, d: NaiveDate, location: Tz) -> HolidayMatch<'_> {
        if self.holidays.is_empty() || !self.is_applicable(location) {
            return HolidayMatch::none();
        }

        let year = d.year();
        match &self.cache {
            Some(cache) => {
                let hits = cache.get_or_compute(year, location, || self.compute_year_hits(year));
                hits.get(&d).map_or(HolidayMatch::none(), |hit| self.to_match(hit))
            },
            None => {
                for holiday in self.holidays.iter() {
                    if let Some(m) = year_matches(holiday, year).into_iter().find(|m| m.date == d) {
                        return HolidayMatch {
                            actual: m.actual,
                            observed: m.observed,
                            holiday: Some(holiday)
                        };
                    }
                }
                HolidayMatch::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{
        TimeZone,
        Weekday
    };

    use super::*;
    use crate::time::holiday::definitions::us;
    use crate::time::holiday::holidayrule::HolidayRule;
    use crate::time::holiday::weekendadjustment::{
        AltDay,
        weekend_to_nearest
    };

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_year() -> Holiday {
        Holiday::new("New Year")
            .with_rule(HolidayRule::day_of_month(1, 1))
            .with_observed(weekend_to_nearest())
    }

    fn late_december() -> Holiday {
        Holiday::new("Late December")
            .with_rule(HolidayRule::day_of_month(12, 28))
            .with_observed(vec![AltDay::new(Weekday::Sat, -1), AltDay::new(Weekday::Sun, 5)])
    }

    fn independence_day() -> Holiday {
        Holiday::new("Independence Day")
            .with_rule(HolidayRule::day_of_month(7, 4))
            .with_observed(weekend_to_nearest())
    }

    fn calendars() -> Vec<Calendar> {
        let holidays = vec![new_year(), late_december(), independence_day()];
        vec![
            Calendar::new("plain").with_holidays(holidays.clone()),
            Calendar::new("cached").with_holidays(holidays).with_cache(CacheConfig::new(2, 1))
        ]
    }

    #[test]
    fn matches_across_year_boundaries() {
        let cases = [
            (ymd(2020, 1, 1), true, true, Some("New Year")),
            (ymd(2021, 1, 1), true, true, Some("New Year")),
            (ymd(2021, 12, 31), false, true, Some("New Year")),
            (ymd(2022, 1, 1), true, false, Some("New Year")),
            (ymd(2014, 12, 28), true, false, Some("Late December")),
            (ymd(2015, 1, 2), false, true, Some("Late December")),
            (ymd(2015, 7, 3), false, true, Some("Independence Day")),
            (ymd(2015, 7, 4), true, false, Some("Independence Day")),
            (ymd(2015, 7, 5), false, false, None),
            (ymd(2016, 1, 2), false, false, None),
        ];
        for calendar in calendars() {
            for (d, actual, observed, name) in cases {
                let m = calendar.is_holiday(d);
                assert_eq!((m.actual, m.observed, m.name()), (actual, observed, name), "{} {d}", calendar.name());
            }
        }
    }

    #[test]
    fn empty_calendar_matches_nothing() {
        let calendar = Calendar::new("empty");
        assert!(!calendar.is_holiday(ymd(2021, 1, 1)).is_match());
    }

    #[test]
    fn locations_restrict_applicability() {
        let calendar = Calendar::new("us")
            .with_locations(vec![Tz::America__New_York, Tz::America__Chicago])
            .with_default_location(Tz::America__New_York)
            .with_holidays(vec![independence_day()]);

        assert!(calendar.is_applicable(Tz::America__Chicago));
        assert!(!calendar.is_applicable(Tz::Europe__Berlin));
        assert!(calendar.is_holiday(ymd(2015, 7, 3)).observed);
        assert!(!calendar.is_holiday_in(ymd(2015, 7, 3), Tz::Europe__Berlin).is_match());

        let t = Tz::America__Chicago.with_ymd_and_hms(2015, 7, 3, 23, 0, 0).unwrap();
        assert!(calendar.is_holiday_at(&t).observed);
        assert!(Calendar::new("anywhere").is_applicable(Tz::Asia__Tokyo));
    }

    #[test]
    fn first_rule_wins() {
        let calendar = Calendar::new("dup").with_holidays(vec![
            Holiday::new("first").with_rule(HolidayRule::day_of_month(5, 1)),
            Holiday::new("second").with_rule(HolidayRule::day_of_month(5, 1))
        ]);
        assert_eq!(calendar.is_holiday(ymd(2021, 5, 1)).name(), Some("first"));
    }

    #[test]
    fn adding_a_holiday_invalidates_the_cache() {
        let mut calendar = Calendar::new("cached")
            .with_holidays(vec![new_year()])
            .with_cache(CacheConfig::default());
        assert!(!calendar.is_holiday(ymd(2015, 7, 4)).is_match());
        assert_eq!(calendar.cache().map(|c| c.len()), Some(1));

        calendar.add_holiday(independence_day());
        assert_eq!(calendar.cache().map(|c| c.len()), Some(0));
        assert!(calendar.is_holiday(ymd(2015, 7, 4)).actual);
    }

    #[test]
    fn year_matches_merges_actual_and_observed() {
        // 2021-01-01 is a Friday, 2022-01-01 a Saturday
        assert_eq!(
            year_matches(&new_year(), 2021),
            vec![
                YearMatch { date: ymd(2021, 1, 1), actual: true, observed: true },
                YearMatch { date: ymd(2021, 12, 31), actual: false, observed: true },
            ]
        );
        assert_eq!(
            year_matches(&new_year(), 2022),
            vec![YearMatch { date: ymd(2022, 1, 1), actual: true, observed: false }]
        );
    }

    #[test]
    fn holidays_in_year_lists_us_holidays() {
        let calendar = Calendar::new("us").with_holidays(us::holidays());
        let listed: Vec<(NaiveDate, &str)> = calendar
            .holidays_in_year(2021)
            .iter()
            .map(|o| (o.date, o.holiday.name()))
            .collect();

        assert_eq!(listed.first(), Some(&(ymd(2021, 1, 1), "New Year's Day")));
        assert_eq!(listed.last(), Some(&(ymd(2021, 12, 31), "New Year's Day")));
        assert!(listed.contains(&(ymd(2021, 6, 18), "Juneteenth")));
        assert!(listed.contains(&(ymd(2021, 11, 25), "Thanksgiving Day")));
        assert!(listed.contains(&(ymd(2021, 12, 24), "Christmas Day")));
        assert!(listed.contains(&(ymd(2021, 12, 25), "Christmas Day")));
    }

    #[test]
    fn clone_starts_with_an_empty_cache() {
        let calendar = Calendar::new("cached")
            .with_holidays(vec![new_year()])
            .with_cache(CacheConfig::default());
        calendar.is_holiday(ymd(2021, 1, 1));
        let copy = calendar.clone();
        assert_eq!(copy.cache().map(|c| c.len()), Some(0));
        assert!(copy.is_holiday(ymd(2021, 12, 31)).observed);
    }

    #[test]
    fn extreme_years_produce_no_matches() {
        for calendar in calendars() {
            assert!(calendar.holidays_in_year(i32::MAX).is_empty());
            assert!(calendar.holidays_in_year(i32::MIN).is_empty());
        }
        assert!(year_matches(&new_year(), i32::MAX).is_empty());
        assert!(year_matches(&new_year(), i32::MIN).is_empty());
    }

    #[test]
    fn first_location_is_the_default() {
        let calendar = Calendar::new("us")
            .with_locations(vec![Tz::America__New_York, Tz::America__Chicago])
            .with_holidays(vec![independence_day()]);
        assert_eq!(calendar.default_location(), Tz::America__New_York);
        assert!(calendar.is_holiday(ymd(2021, 7, 5)).observed);

        let explicit = calendar.clone().with_default_location(Tz::America__Chicago);
        assert_eq!(explicit.default_location(), Tz::America__Chicago);
        assert_eq!(Calendar::new("anywhere").default_location(), Tz::UTC);
    }
}
