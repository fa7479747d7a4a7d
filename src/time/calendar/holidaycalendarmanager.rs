use std::collections::HashMap;
use std::sync::Arc;

use chrono::Weekday;
use chrono_tz::Tz;
use log::{
    debug,
    warn
};
use serde::Deserialize;

use crate::manager::manager::Manager;
use crate::manager::managererror::{
    ManagerError,
    parse_json_value
};
use crate::time::calendar::calendar::Calendar;
use crate::time::calendar::holidaycache::CacheConfig;
use crate::time::easter::EasterType;
use crate::time::holiday::definitions::{
    common,
    gb,
    us
};
use crate::time::holiday::holiday::{
    Holiday,
    HolidayOverride,
    ObservanceType
};
use crate::time::holiday::holidayrule::HolidayRule;
use crate::time::holiday::weekendadjustment::{
    AltDay,
    WeekendAdjustment,
    alt_days_from_adjustment_map
};
use crate::time::utility::days_of_month;

const BUILTIN_TABLES: [&str; 3] = ["common", "us", "gb"];

fn named_table(table: &str) -> Option<Vec<(&'static str, Holiday)>> {
    match table {
        "common" => Some(common::named_holidays()),
        "us" => Some(us::named_holidays()),
        "gb" => Some(gb::named_holidays()),
        _ => None
    }
}

/// Looks up a built-in holiday by `"<table>/<holiday>"`, e.g.
/// `"us/thanksgiving_day"`.
pub fn builtin_holiday(key: &str) -> Result<Holiday, ManagerError> {
    let (table, name) = key
        .split_once('/')
        .ok_or_else(|| ManagerError::UnknownBuiltinHoliday(key.to_owned()))?;
    named_table(table)
        .and_then(|holidays| holidays.into_iter().find(|(n, _)| *n == name))
        .map(|(_, holiday)| holiday)
        .ok_or_else(|| ManagerError::UnknownBuiltinHoliday(key.to_owned()))
}

/// The standard holidays of a built-in table. `"common"` yields every feast it
/// defines.
pub fn builtin_table(table: &str) -> Result<Vec<Holiday>, ManagerError> {
    match table {
        "us" => Ok(us::holidays()),
        "gb" => Ok(gb::holidays()),
        "common" => Ok(common::named_holidays().into_iter().map(|(_, h)| h).collect()),
        _ => Err(ManagerError::UnknownBuiltinHoliday(format!(
            "{} (known tables: {})",
            table,
            BUILTIN_TABLES.join(", ")
        )))
    }
}

fn validate_month(name: &str, month: u32) -> Result<(), ManagerError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ManagerError::invalid_parameter(name, format!("month {} out of range", month)))
    }
}

fn validate_day(name: &str, month: u32, day: u32) -> Result<(), ManagerError> {
    validate_month(name, month)?;
    // leap year bound, Feb 29 is simply skipped in other years
    if day >= 1 && day <= days_of_month(2000, month) {
        Ok(())
    } else {
        Err(ManagerError::invalid_parameter(name, format!("day {} out of range for month {}", day, month)))
    }
}

fn validate_offset(name: &str, offset: i32) -> Result<(), ManagerError> {
    if offset != 0 {
        Ok(())
    } else {
        Err(ManagerError::invalid_parameter(name, "weekday offset must not be 0"))
    }
}

#[derive(Deserialize)]
struct DayOfMonthJsonProp {
    month: u32,
    day: u32
}

#[derive(Deserialize)]
struct WeekdayOffsetJsonProp {
    month: u32,
    weekday: Weekday,
    offset: i32
}

#[derive(Deserialize)]
struct WeekdayFromJsonProp {
    month: u32,
    day: u32,
    weekday: Weekday,
    offset: i32
}

#[derive(Deserialize)]
struct EasterOffsetJsonProp {
    #[serde(default = "western")]
    easter_type: EasterType,
    offset: i32
}

fn western() -> EasterType {
    EasterType::Western
}

#[derive(Deserialize)]
struct BuiltinJsonProp {
    builtin: String,
    #[serde(default, rename = "override")]
    changes: Option<HolidayOverride>
}

#[derive(Deserialize)]
struct HolidayCommonJsonProp {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    observance: ObservanceType,
    start_year: Option<i32>,
    end_year: Option<i32>,
    #[serde(default)]
    except_years: Vec<i32>,
    #[serde(default)]
    calc_offset: i32,
    observed: Option<Vec<AltDay>>,
    weekend_adjustment_map: Option<HashMap<Weekday, WeekendAdjustment>>
}

impl HolidayCommonJsonProp {
    fn into_holiday(self, rule: HolidayRule) -> Result<Holiday, ManagerError> {
        if let (Some(start_year), Some(end_year)) = (self.start_year, self.end_year) {
            if start_year > end_year {
                return Err(ManagerError::invalid_parameter(
                    &self.name,
                    format!("start_year {} after end_year {}", start_year, end_year)
                ));
            }
        }

        let observed = match (self.observed, self.weekend_adjustment_map) {
            (Some(_), Some(_)) => {
                return Err(ManagerError::invalid_parameter(
                    &self.name,
                    "observed and weekend_adjustment_map are mutually exclusive"
                ));
            },
            (Some(observed), None) => observed,
            (None, Some(adjustment_map)) => alt_days_from_adjustment_map(&adjustment_map),
            (None, None) => Vec::new()
        };

        let mut holiday = Holiday::new(self.name)
            .with_description(self.description)
            .with_observance(self.observance)
            .with_except_years(self.except_years)
            .with_calc_offset(self.calc_offset)
            .with_observed(observed)
            .with_rule(rule);
        if let Some(start_year) = self.start_year {
            holiday = holiday.with_start_year(start_year);
        }
        if let Some(end_year) = self.end_year {
            holiday = holiday.with_end_year(end_year);
        }
        Ok(holiday)
    }
}

#[derive(Deserialize)]
enum HolidayType {
    DayOfMonth,
    WeekdayOffset,
    WeekdayFrom,
    EasterOffset,
    Builtin
}

#[derive(Deserialize)]
struct HolidayTypedObject {
    holiday_type: HolidayType
}

fn rule_from_json(holiday_type: HolidayType,
                  name: &str,
                  json_value: serde_json::Value) -> Result<HolidayRule, ManagerError> {
    match holiday_type {
        HolidayType::DayOfMonth => {
            let json_prop: DayOfMonthJsonProp = parse_json_value(json_value)?;
            validate_day(name, json_prop.month, json_prop.day)?;
            Ok(HolidayRule::day_of_month(json_prop.month, json_prop.day))
        },
        HolidayType::WeekdayOffset => {
            let json_prop: WeekdayOffsetJsonProp = parse_json_value(json_value)?;
            validate_month(name, json_prop.month)?;
            validate_offset(name, json_prop.offset)?;
            Ok(HolidayRule::weekday_offset(json_prop.month, json_prop.weekday, json_prop.offset))
        },
        HolidayType::WeekdayFrom => {
            let json_prop: WeekdayFromJsonProp = parse_json_value(json_value)?;
            validate_day(name, json_prop.month, json_prop.day)?;
            validate_offset(name, json_prop.offset)?;
            Ok(HolidayRule::weekday_from(json_prop.month, json_prop.day, json_prop.weekday, json_prop.offset))
        },
        HolidayType::EasterOffset => {
            let json_prop: EasterOffsetJsonProp = parse_json_value(json_value)?;
            Ok(HolidayRule::easter_offset(json_prop.easter_type, json_prop.offset))
        },
        HolidayType::Builtin => Err(ManagerError::invalid_parameter(name, "built-in holidays carry their own rule"))
    }
}

/// Builds one holiday from its JSON declaration.
pub fn get_holiday_from_json(json_value: serde_json::Value) -> Result<Holiday, ManagerError> {
    let typed_object: HolidayTypedObject = parse_json_value(json_value.clone())?;
    if let HolidayType::Builtin = typed_object.holiday_type {
        let json_prop: BuiltinJsonProp = parse_json_value(json_value)?;
        let holiday = builtin_holiday(&json_prop.builtin)?;
        return Ok(match json_prop.changes {
            Some(changes) => holiday.clone_with(&changes),
            None => holiday
        });
    }

    let common_prop: HolidayCommonJsonProp = parse_json_value(json_value.clone())?;
    let rule = rule_from_json(typed_object.holiday_type, &common_prop.name, json_value)?;
    common_prop.into_holiday(rule)
}

fn parse_location(location: &str) -> Result<Tz, ManagerError> {
    location
        .parse::<Tz>()
        .map_err(|_| ManagerError::InvalidLocation(location.to_owned()))
}

#[derive(Deserialize)]
struct CacheJsonProp {
    max_entries: Option<usize>,
    target_entries: Option<usize>
}

impl CacheJsonProp {
    fn config(&self) -> CacheConfig {
        let default_config = CacheConfig::default();
        let max_entries = self.max_entries.unwrap_or(default_config.max_entries);
        let target_entries = self.target_entries.unwrap_or(default_config.target_entries.min(max_entries));
        CacheConfig::new(max_entries, target_entries)
    }
}

#[derive(Deserialize)]
struct CalendarJsonProp {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    locations: Vec<String>,
    default_location: Option<String>,
    cache: Option<CacheJsonProp>,
    #[serde(default)]
    builtin_tables: Vec<String>,
    #[serde(default)]
    holidays: Vec<serde_json::Value>
}

/// Builds a calendar from its JSON declaration.
///
/// Built-in tables are added first, in the order listed, then the inline
/// holidays. Since the first matching rule wins, an inline holiday never
/// shadows a built-in one on the same date.
pub fn get_calendar_from_json(json_value: serde_json::Value) -> Result<Arc<Calendar>, ManagerError> {
    let json_prop: CalendarJsonProp = parse_json_value(json_value)?;

    let locations = json_prop
        .locations
        .iter()
        .map(|l| parse_location(l))
        .collect::<Result<Vec<Tz>, ManagerError>>()?;

    let mut calendar = Calendar::new(json_prop.name.as_str())
        .with_description(json_prop.description)
        .with_locations(locations);

    if let Some(default_location) = &json_prop.default_location {
        calendar = calendar.with_default_location(parse_location(default_location)?);
    }

    if let Some(cache_prop) = &json_prop.cache {
        calendar = calendar.with_cache(cache_prop.config());
    }

    for table in json_prop.builtin_tables.iter() {
        calendar.add_holidays(builtin_table(table)?);
    }

    for holiday_json in json_prop.holidays {
        let holiday = get_holiday_from_json(holiday_json)?;
        if holiday.rule().is_none() {
            warn!("holiday '{}' of calendar '{}' has no rule and never matches", holiday.name(), json_prop.name);
        }
        calendar.add_holiday(holiday);
    }

    debug!("calendar '{}' loaded with {} holidays", json_prop.name, calendar.holidays().len());
    Ok(Arc::new(calendar))
}

pub struct HolidayCalendarManager;

impl HolidayCalendarManager {
    pub fn new() -> Manager<Arc<Calendar>> {
        Manager::new(get_calendar_from_json)
    }
}
