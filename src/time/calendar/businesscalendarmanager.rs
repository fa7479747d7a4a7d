use std::cell::{
    RefCell,
    RefMut
};
use std::collections::{
    HashMap,
    HashSet
};
use std::sync::Arc;

use chrono::{
    NaiveTime,
    Weekday
};
use log::debug;
use serde::Deserialize;

use crate::manager::manager::{
    IManager,
    Manager
};
use crate::manager::managererror::{
    ManagerError,
    parse_json_value
};
use crate::time::calendar::businesscalendar::BusinessCalendar;
use crate::time::calendar::calendar::Calendar;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun
];

#[derive(Deserialize)]
struct BusinessCalendarJsonProp {
    name: String,
    calendar: String,
    workdays: Option<HashSet<Weekday>>,
    workday_start: Option<String>,
    workday_end: Option<String>
}

fn parse_time(name: &str, s: &str) -> Result<NaiveTime, ManagerError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| ManagerError::invalid_parameter(name, format!("'{}' is not a HH:MM time", s)))
}

/// Registry of business calendars. Each declaration names the holiday
/// calendar it is built on, which must already be registered.
pub struct BusinessCalendarManager {
    map_cell: RefCell<HashMap<String, Arc<BusinessCalendar>>>
}

impl BusinessCalendarManager {
    pub fn new() -> BusinessCalendarManager {
        BusinessCalendarManager { map_cell: RefCell::new(HashMap::new()) }
    }
}

impl IManager<Arc<BusinessCalendar>, Manager<Arc<Calendar>>> for BusinessCalendarManager {
    fn map(&self) -> RefMut<'_, HashMap<String, Arc<BusinessCalendar>>> {
        self.map_cell.borrow_mut()
    }

    fn insert_obj_from_json(&self,
                            json_value: serde_json::Value,
                            supports: &Manager<Arc<Calendar>>) -> Result<(), ManagerError> {
        let json_prop: BusinessCalendarJsonProp = parse_json_value(json_value)?;
        let calendar = supports.get(&json_prop.calendar)?;
        let mut business_calendar = BusinessCalendar::new(Calendar::clone(&calendar));

        if let Some(workdays) = &json_prop.workdays {
            for weekday in WEEKDAYS {
                business_calendar.set_workday(weekday, workdays.contains(&weekday));
            }
        }

        let (default_start, default_end) = business_calendar.work_hours_of_day();
        let start = match &json_prop.workday_start {
            Some(s) => parse_time(&json_prop.name, s)?,
            None => default_start
        };
        let end = match &json_prop.workday_end {
            Some(s) => parse_time(&json_prop.name, s)?,
            None => default_end
        };
        if start >= end {
            return Err(ManagerError::invalid_parameter(
                &json_prop.name,
                format!("workday start {} not before end {}", start, end)
            ));
        }
        business_calendar.set_work_hours(start, end);

        debug!("business calendar '{}' built on '{}'", json_prop.name, json_prop.calendar);
        self.insert(&json_prop.name, Arc::new(business_calendar));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::time::calendar::holidaycalendarmanager::HolidayCalendarManager;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendars() -> Manager<Arc<Calendar>> {
        let manager = HolidayCalendarManager::new();
        manager.insert_obj_from_json(json!({
            "name": "us",
            "locations": ["America/New_York"],
            "builtin_tables": ["us"]
        }), &()).unwrap();
        manager
    }

    #[test]
    fn builds_on_registered_calendar() {
        let calendars = calendars();
        let manager = BusinessCalendarManager::new();
        manager.insert_obj_from_json(json!({
            "name": "us_six_day",
            "calendar": "us",
            "workdays": ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            "workday_start": "08:30",
            "workday_end": "12:00"
        }), &calendars).unwrap();

        let business = manager.get("us_six_day").unwrap();
        assert!(business.is_workday(ymd(2021, 11, 27)));
        assert!(!business.is_workday(ymd(2021, 11, 28)));
        assert!(!business.is_workday(ymd(2021, 11, 25)));
        assert_eq!(
            business.work_hours_of_day(),
            (NaiveTime::from_hms_opt(8, 30, 0).unwrap(), NaiveTime::from_hms_opt(12, 0, 0).unwrap())
        );
    }

    #[test]
    fn unknown_calendar_is_reported() {
        let result = BusinessCalendarManager::new()
            .insert_obj_from_json(json!({"name": "b", "calendar": "fr"}), &calendars());
        assert!(matches!(result, Err(ManagerError::NameNotFoundError(n)) if n == "fr"));
    }

    #[test]
    fn work_hours_are_validated() {
        let calendars = calendars();
        let manager = BusinessCalendarManager::new();
        let reversed = manager.insert_obj_from_json(
            json!({"name": "b", "calendar": "us", "workday_start": "17:00", "workday_end": "09:00"}),
            &calendars
        );
        assert!(matches!(reversed, Err(ManagerError::InvalidParameter { .. })));

        let malformed = manager.insert_obj_from_json(
            json!({"name": "b", "calendar": "us", "workday_start": "nine"}),
            &calendars
        );
        assert!(matches!(malformed, Err(ManagerError::InvalidParameter { .. })));
    }
}
