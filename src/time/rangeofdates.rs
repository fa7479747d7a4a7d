use chrono::NaiveDate;

/// Inclusive range of dates. The bounds are normalised, so the range is never
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOfDates {
    start_date: NaiveDate,
    end_date: NaiveDate
}

impl RangeOfDates {
    pub fn new(d1: NaiveDate, d2: NaiveDate) -> RangeOfDates {
        if d1 > d2 {
            RangeOfDates { start_date: d2, end_date: d1 }
        } else {
            RangeOfDates { start_date: d1, end_date: d2 }
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn len(&self) -> usize {
        ((self.end_date - self.start_date).num_days() + 1) as usize
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        (d >= self.start_date) && (d <= self.end_date)
    }

    pub fn iter(&self) -> RangeOfDatesIter {
        RangeOfDatesIter {
            next: Some(self.start_date),
            end_date: self.end_date
        }
    }

    /// Number of dates in the range satisfying `predicate`.
    pub fn count_where(&self, predicate: impl Fn(NaiveDate) -> bool) -> usize {
        self.iter().filter(|d| predicate(*d)).count()
    }
}

impl IntoIterator for RangeOfDates {
    type Item = NaiveDate;
    type IntoIter = RangeOfDatesIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct RangeOfDatesIter {
    next: Option<NaiveDate>,
    end_date: NaiveDate
}

impl Iterator for RangeOfDatesIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|d| *d <= self.end_date)?;
        self.next = current.succ_opt();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bounds_are_normalised() {
        let range = RangeOfDates::new(ymd(2021, 3, 2), ymd(2021, 2, 27));
        assert_eq!(range.start_date(), ymd(2021, 2, 27));
        assert_eq!(range.end_date(), ymd(2021, 3, 2));
        assert_eq!(range.len(), 4);
        assert!(range.contains(ymd(2021, 2, 28)));
        assert!(!range.contains(ymd(2021, 3, 3)));
    }

    #[test]
    fn iterates_inclusively() {
        let dates: Vec<NaiveDate> = RangeOfDates::new(ymd(2020, 12, 30), ymd(2021, 1, 2)).into_iter().collect();
        assert_eq!(dates, vec![ymd(2020, 12, 30), ymd(2020, 12, 31), ymd(2021, 1, 1), ymd(2021, 1, 2)]);

        let single = RangeOfDates::new(ymd(2021, 1, 1), ymd(2021, 1, 1));
        assert_eq!(single.iter().count(), 1);
    }

    #[test]
    fn stops_at_the_last_representable_date() {
        let range = RangeOfDates::new(NaiveDate::MAX, NaiveDate::MAX);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![NaiveDate::MAX]);
    }
}
