/// Birth dates are plain calendar dates, no time or zone.
pub type CalendarDate = chrono::NaiveDate;

/// Whole years.
pub type Age = u32;
