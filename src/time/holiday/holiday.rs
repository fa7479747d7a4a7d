use chrono::{
    NaiveDate,
    TimeDelta
};
use serde::{
    Deserialize,
    Deserializer,
    Serialize
};

use crate::time::holiday::holidayrule::HolidayRule;
use crate::time::holiday::weekendadjustment::{
    AltDay,
    observe
};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default, Serialize, Deserialize)]
pub enum ObservanceType {
    #[default]
    Public,
    Bank,
    Religious,
    Other,
    Unknown
}

/// The dates of a holiday in one year.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Occurrence {
    pub actual: NaiveDate,
    pub observed: NaiveDate
}

/// A rule for the yearly recurrence of a named holiday.
///
/// Built once with the `with_*` methods and read-only afterwards. A holiday
/// without a rule never occurs.
#[derive(Debug, Clone)]
pub struct Holiday {
    name: String,
    description: String,
    observance: ObservanceType,
    start_year: Option<i32>,
    end_year: Option<i32>,
    except_years: Vec<i32>,
    rule: Option<HolidayRule>,
    calc_offset: i32,
    observed: Vec<AltDay>
}

impl Holiday {
    pub fn new(name: impl Into<String>) -> Holiday {
        Holiday {
            name: name.into(),
            description: String::new(),
            observance: ObservanceType::default(),
            start_year: None,
            end_year: None,
            except_years: Vec::new(),
            rule: None,
            calc_offset: 0,
            observed: Vec::new()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Holiday {
        self.description = description.into();
        self
    }

    pub fn with_observance(mut self, observance: ObservanceType) -> Holiday {
        self.observance = observance;
        self
    }

    pub fn with_start_year(mut self, year: i32) -> Holiday {
        self.start_year = Some(year);
        self
    }

    pub fn with_end_year(mut self, year: i32) -> Holiday {
        self.end_year = Some(year);
        self
    }

    pub fn with_except_years(mut self, years: Vec<i32>) -> Holiday {
        self.except_years = years;
        self
    }

    pub fn with_rule(mut self, rule: HolidayRule) -> Holiday {
        self.rule = Some(rule);
        self
    }

    /// Days added to the computed date, e.g. `1` for the day after Thanksgiving.
    pub fn with_calc_offset(mut self, days: i32) -> Holiday {
        self.calc_offset = days;
        self
    }

    pub fn with_observed(mut self, observed: Vec<AltDay>) -> Holiday {
        self.observed = observed;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn observance(&self) -> ObservanceType {
        self.observance
    }

    pub fn start_year(&self) -> Option<i32> {
        self.start_year
    }

    pub fn end_year(&self) -> Option<i32> {
        self.end_year
    }

    pub fn except_years(&self) -> &[i32] {
        &self.except_years
    }

    pub fn rule(&self) -> Option<&HolidayRule> {
        self.rule.as_ref()
    }

    pub fn calc_offset(&self) -> i32 {
        self.calc_offset
    }

    pub fn observed(&self) -> &[AltDay] {
        &self.observed
    }

    /// Reports whether the holiday applies in `year` at all.
    pub fn is_active(&self, year: i32) -> bool {
        self.start_year.is_none_or(|start| year >= start)
            && self.end_year.is_none_or(|end| year <= end)
            && !self.except_years.contains(&year)
    }

    /// Computes the actual and observed dates of the holiday in `year`.
    ///
    /// Returns `None` outside the validity window, in an excepted year, for a
    /// holiday without a rule, or when the rule does not produce a date.
    pub fn calc(&self, year: i32) -> Option<Occurrence> {
        if !self.is_active(year) {
            return None;
        }

        let base = self.rule.as_ref()?.evaluate(self, year)?;
        let actual = base.checked_add_signed(TimeDelta::try_days(self.calc_offset as i64)?)?;
        let observed = observe(actual, &self.observed)?;
        Some(Occurrence { actual, observed })
    }

    /// Copies the holiday, replacing only the fields `changes` supplies.
    ///
    /// The rule and the calculation offset are always inherited.
    pub fn clone_with(&self, changes: &HolidayOverride) -> Holiday {
        let mut holiday = self.clone();
        if let Some(name) = &changes.name {
            holiday.name = name.clone();
        }
        if let Some(description) = &changes.description {
            holiday.description = description.clone();
        }
        if let Some(observance) = changes.observance {
            holiday.observance = observance;
        }
        if let Some(start_year) = changes.start_year {
            holiday.start_year = start_year;
        }
        if let Some(end_year) = changes.end_year {
            holiday.end_year = end_year;
        }
        if let Some(except_years) = &changes.except_years {
            holiday.except_years = except_years.clone();
        }
        if let Some(observed) = &changes.observed {
            holiday.observed = observed.clone();
        }
        holiday
    }
}

/// Fields to replace when deriving a regional variant of a holiday.
///
/// `None` keeps the inherited value. `start_year` and `end_year` take
/// `Some(None)` to make a bound unbounded again; in JSON that is an explicit
/// `null`. An empty `except_years` or `observed` clears the inherited list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HolidayOverride {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub observance: Option<ObservanceType>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub start_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub end_year: Option<Option<i32>>,
    #[serde(default)]
    pub except_years: Option<Vec<i32>>,
    #[serde(default)]
    pub observed: Option<Vec<AltDay>>
}

impl HolidayOverride {
    pub fn renamed(name: impl Into<String>) -> HolidayOverride {
        HolidayOverride {
            name: Some(name.into()),
            ..HolidayOverride::default()
        }
    }

    pub fn with_observance(mut self, observance: ObservanceType) -> HolidayOverride {
        self.observance = Some(observance);
        self
    }

    pub fn with_observed(mut self, observed: Vec<AltDay>) -> HolidayOverride {
        self.observed = Some(observed);
        self
    }
}

// a present field, `null` included, deserializes to `Some`
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> {
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::time::easter::EasterType;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march_11() -> Holiday {
        Holiday::new("march 11")
            .with_start_year(2015)
            .with_end_year(2025)
            .with_except_years(vec![2020])
            .with_rule(HolidayRule::day_of_month(3, 11))
    }

    #[test]
    fn holiday_without_rule_never_occurs() {
        assert_eq!(Holiday::new("inert").calc(2020), None);
    }

    #[test]
    fn calc_respects_validity_window() {
        let h = march_11();
        assert_eq!(h.calc(2000), None);
        assert_eq!(h.calc(2026), None);
        assert_eq!(h.calc(2020), None);
        assert_eq!(h.calc(2015), Some(Occurrence { actual: ymd(2015, 3, 11), observed: ymd(2015, 3, 11) }));
        assert_eq!(h.calc(2025).map(|o| o.actual), Some(ymd(2025, 3, 11)));
    }

    #[test]
    fn calc_applies_first_matching_substitution() {
        // 2015-03-11 is a Wednesday, 2016-03-11 a Friday
        let h = march_11().with_observed(vec![
            AltDay::new(Weekday::Wed, 2),
            AltDay::new(Weekday::Wed, -1)
        ]);
        assert_eq!(h.calc(2015), Some(Occurrence { actual: ymd(2015, 3, 11), observed: ymd(2015, 3, 13) }));
        assert_eq!(h.calc(2016), Some(Occurrence { actual: ymd(2016, 3, 11), observed: ymd(2016, 3, 11) }));
    }

    #[test]
    fn calc_offset_shifts_before_substitution() {
        // 4th Thursday of November 2021 is the 25th
        let h = Holiday::new("day after")
            .with_rule(HolidayRule::weekday_offset(11, Weekday::Thu, 4))
            .with_calc_offset(1)
            .with_observed(vec![AltDay::new(Weekday::Fri, 3)]);
        assert_eq!(h.calc(2021), Some(Occurrence { actual: ymd(2021, 11, 26), observed: ymd(2021, 11, 29) }));
    }

    #[test]
    fn malformed_rule_yields_no_occurrence() {
        let h = Holiday::new("bad").with_rule(HolidayRule::weekday_offset(11, Weekday::Thu, 0));
        assert_eq!(h.calc(2021), None);
        let h = Holiday::new("bad").with_rule(HolidayRule::day_of_month(4, 31));
        assert_eq!(h.calc(2021), None);
    }

    #[test]
    fn good_friday_and_easter_monday_surround_easter() {
        let easter = Holiday::new("easter").with_rule(HolidayRule::easter_offset(EasterType::Western, 0));
        let good_friday = Holiday::new("good friday").with_rule(HolidayRule::easter_offset(EasterType::Western, -2));
        let easter_monday = Holiday::new("easter monday").with_rule(HolidayRule::easter_offset(EasterType::Western, 1));
        for year in 2000..2050 {
            let e = easter.calc(year).unwrap().actual;
            assert_eq!(good_friday.calc(year).unwrap().actual, e - TimeDelta::days(2));
            assert_eq!(easter_monday.calc(year).unwrap().actual, e + TimeDelta::days(1));
        }
    }

    #[test]
    fn clone_with_replaces_only_supplied_fields() {
        let h = Holiday::new("7")
            .with_description("1")
            .with_observance(ObservanceType::Religious)
            .with_start_year(10)
            .with_end_year(2)
            .with_except_years(vec![3])
            .with_rule(HolidayRule::day_of_month(6, 1))
            .with_calc_offset(9)
            .with_observed(vec![AltDay::new(Weekday::Mon, 8)]);

        let c = h.clone_with(
            &HolidayOverride::renamed("clone")
                .with_observance(ObservanceType::Bank)
                .with_observed(vec![AltDay::new(Weekday::Tue, 2)])
        );

        assert_eq!(c.name(), "clone");
        assert_eq!(c.description(), h.description());
        assert_eq!(c.observance(), ObservanceType::Bank);
        assert_eq!(c.start_year(), h.start_year());
        assert_eq!(c.end_year(), h.end_year());
        assert_eq!(c.except_years(), h.except_years());
        assert_eq!(c.calc_offset(), h.calc_offset());
        assert_ne!(c.observed(), h.observed());
        assert!(matches!(c.rule(), Some(HolidayRule::DayOfMonth { month: 6, day: 1 })));
    }

    #[test]
    fn clone_with_can_clear_inherited_values() {
        let h = march_11().with_observed(vec![AltDay::new(Weekday::Wed, 2)]);
        let c = h.clone_with(&HolidayOverride {
            start_year: Some(None),
            except_years: Some(Vec::new()),
            observed: Some(Vec::new()),
            ..HolidayOverride::default()
        });
        assert_eq!(c.start_year(), None);
        assert_eq!(c.end_year(), Some(2025));
        assert!(c.except_years().is_empty());
        assert!(c.observed().is_empty());
        assert_eq!(c.calc(2000).map(|o| o.actual), Some(ymd(2000, 3, 11)));
        assert_eq!(c.calc(2020).map(|o| o.observed), Some(ymd(2020, 3, 11)));
    }

    #[test]
    fn override_deserializes_null_as_clear() {
        let o: HolidayOverride = serde_json::from_str(r#"{"name": "x", "start_year": null, "end_year": 2030}"#).unwrap();
        assert_eq!(o.name.as_deref(), Some("x"));
        assert_eq!(o.start_year, Some(None));
        assert_eq!(o.end_year, Some(Some(2030)));
        assert_eq!(o.except_years, None);

        let o: HolidayOverride = serde_json::from_str("{}").unwrap();
        assert_eq!(o, HolidayOverride::default());
    }
}
