pub mod configuration;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod time {
    pub mod utility;
    pub mod juliandate;
    pub mod easter;
    pub mod rangeofdates;

    pub mod holiday {
        pub mod holiday;
        pub mod holidayrule;
        pub mod weekendadjustment;

        pub mod definitions {
            pub mod common;
            pub mod us;
            pub mod gb;
        }
    }

    pub mod calendar {
        pub mod holidaycalendar;
        pub mod holidaycache;
        pub mod calendar;
        pub mod businesscalendar;
        pub mod holidaycalendarmanager;
        pub mod businesscalendarmanager;
    }
}
