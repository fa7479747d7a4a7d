use std::cell::{
    RefCell,
    RefMut
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use log::{
    debug,
    info
};
use serde::Deserialize;

use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::time::calendar::businesscalendar::BusinessCalendar;
use crate::time::calendar::businesscalendarmanager::BusinessCalendarManager;
use crate::time::calendar::calendar::Calendar;
use crate::time::calendar::holidaycalendarmanager::HolidayCalendarManager;


#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    holiday_calendar: Vec<serde_json::Value>,
    #[serde(default)]
    business_calendar: Vec<serde_json::Value>
}

/// Every calendar declared by one or more configuration files.
///
/// Holiday calendars are loaded before business calendars, so a business
/// calendar may refer to a holiday calendar declared in the same file.
pub struct Configuration {
    holiday_calendar_manager_cell: RefCell<Manager<Arc<Calendar>>>,
    business_calendar_manager_cell: RefCell<BusinessCalendarManager>
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            holiday_calendar_manager_cell: RefCell::new(HolidayCalendarManager::new()),
            business_calendar_manager_cell: RefCell::new(BusinessCalendarManager::new())
        }
    }

    pub fn holiday_calendar_manager(&self) -> RefMut<'_, Manager<Arc<Calendar>>> {
        self.holiday_calendar_manager_cell.borrow_mut()
    }

    pub fn business_calendar_manager(&self) -> RefMut<'_, BusinessCalendarManager> {
        self.business_calendar_manager_cell.borrow_mut()
    }

    pub fn holiday_calendar(&self, name: &str) -> Result<Arc<Calendar>, ManagerError> {
        self.holiday_calendar_manager().get(name)
    }

    pub fn business_calendar(&self, name: &str) -> Result<Arc<BusinessCalendar>, ManagerError> {
        self.business_calendar_manager().get(name)
    }

    pub fn from_reader(&self, file_path: impl AsRef<Path>) -> Result<(), ManagerError> {
        let file = File::open(file_path.as_ref())?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        info!("loading configuration {}", file_path.as_ref().display());
        self.load(json_prop)
    }

    pub fn from_str(&self, json: &str) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        self.load(json_prop)
    }

    fn load(&self, json_prop: ConfigurationJsonProp) -> Result<(), ManagerError> {
        let holiday_calendar_manager = self.holiday_calendar_manager_cell.borrow();
        holiday_calendar_manager.insert_obj_from_json_vec(&json_prop.holiday_calendar, &())?;
        let business_calendar_manager = self.business_calendar_manager_cell.borrow();
        business_calendar_manager.insert_obj_from_json_vec(&json_prop.business_calendar, &holiday_calendar_manager)?;
        debug!(
            "{} holiday calendars and {} business calendars declared",
            json_prop.holiday_calendar.len(),
            json_prop.business_calendar.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::time::calendar::holidaycalendar::HolidayCalendar;

    use super::*;

    #[test]
    fn loads_both_kinds_of_calendar() {
        let configuration = Configuration::new();
        configuration.from_str(r#"{
            "holiday_calendar": [
                {"name": "gb", "locations": ["Europe/London"], "builtin_tables": ["gb"]}
            ],
            "business_calendar": [
                {"name": "gb_office", "calendar": "gb", "workday_start": "09:00", "workday_end": "17:30"}
            ]
        }"#).unwrap();

        let boxing_day_2021 = NaiveDate::from_ymd_opt(2021, 12, 28).unwrap();
        let gb = configuration.holiday_calendar("gb").unwrap();
        assert_eq!(gb.is_holiday(boxing_day_2021).name(), Some("Boxing Day"));
        let office = configuration.business_calendar("gb_office").unwrap();
        assert!(!office.is_workday(boxing_day_2021));
        assert!(configuration.business_calendar("gb").is_err());
    }

    #[test]
    fn empty_configuration_is_valid() {
        let configuration = Configuration::new();
        configuration.from_str("{}").unwrap();
        assert!(configuration.holiday_calendar_manager().names().is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Configuration::new().from_reader("no/such/configuration.json");
        assert!(matches!(result, Err(ManagerError::IOError(_))));
    }
}
