//! Calendar computations: month grids, day navigation and date display helpers
//!
//! Everything in here is pure: the only data that is read comes from an [`AppointmentSource`].

use std::error::Error;

use chrono::{Datelike, Local, NaiveDate, NaiveTime};

use crate::appointment::{is_valid_date, Appointment};
use crate::traits::AppointmentSource;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Short day names, in grid order (weeks start on Sunday)
pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The first and last bookable time slots, and the gap between slots
const FIRST_SLOT_HOUR: u32 = 8;
const LAST_SLOT_HOUR: u32 = 18;
const SLOT_MINUTES: u32 = 30;


/// The current date, in the local time zone of this process
pub fn today() -> NaiveDate {
    Local::now().naive_local().date()
}

/// Format a date the way appointments store it (`YYYY-MM-DD`)
pub fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> Result<NaiveDate, Box<dyn Error>> {
    if is_valid_date(date) == false {
        return Err(format!("Invalid date {:?}. Expected YYYY-MM-DD", date).into());
    }
    Ok(NaiveDate::parse_from_str(date, "%Y-%m-%d")?)
}

/// The first day of a month. `month0` is zero-based (0 is January)
pub fn first_of_month(year: i32, month0: u32) -> Result<NaiveDate, Box<dyn Error>> {
    if month0 > 11 {
        return Err(format!("Invalid month index {}. Expected 0 to 11", month0).into());
    }
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .ok_or_else(|| format!("Year {} is out of range", year).into())
}

/// How many days there are in a month. `month0` is zero-based
pub fn days_in_month(year: i32, month0: u32) -> Result<u32, Box<dyn Error>> {
    first_of_month(year, month0)?;
    let (next_year, next_month0) = next_month(year, month0)?;
    // The day before the first of next month is the last day of this month
    let last = first_of_month(next_year, next_month0)?
        .pred_opt()
        .ok_or("Date out of range")?;
    Ok(last.day())
}

/// The weekday of the first day of a month (0 is Sunday). `month0` is zero-based
pub fn first_weekday(year: i32, month0: u32) -> Result<u32, Box<dyn Error>> {
    Ok(first_of_month(year, month0)?.weekday().num_days_from_sunday())
}

/// The month after this one, as a (year, zero-based month) pair
pub fn next_month(year: i32, month0: u32) -> Result<(i32, u32), Box<dyn Error>> {
    if month0 > 11 {
        return Err(format!("Invalid month index {}. Expected 0 to 11", month0).into());
    }
    if month0 == 11 {
        let next_year = year.checked_add(1).ok_or_else(|| format!("No year after {}", year))?;
        Ok((next_year, 0))
    } else {
        Ok((year, month0 + 1))
    }
}

/// The month before this one, as a (year, zero-based month) pair
pub fn previous_month(year: i32, month0: u32) -> Result<(i32, u32), Box<dyn Error>> {
    if month0 > 11 {
        return Err(format!("Invalid month index {}. Expected 0 to 11", month0).into());
    }
    if month0 == 0 {
        let previous_year = year.checked_sub(1).ok_or_else(|| format!("No year before {}", year))?;
        Ok((previous_year, 11))
    } else {
        Ok((year, month0 - 1))
    }
}

/// The day after `date` (a `YYYY-MM-DD` string)
pub fn next_day(date: &str) -> Result<String, Box<dyn Error>> {
    let next = parse_date(date)?
        .succ_opt()
        .ok_or_else(|| format!("No day after {}", date))?;
    Ok(date_string(next))
}

/// The day before `date` (a `YYYY-MM-DD` string)
pub fn previous_day(date: &str) -> Result<String, Box<dyn Error>> {
    let previous = parse_date(date)?
        .pred_opt()
        .ok_or_else(|| format!("No day before {}", date))?;
    Ok(date_string(previous))
}

/// Sort appointments of a same day by time
pub fn sort_by_time(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| a.time().cmp(b.time()));
}

/// The appointments of a single day, sorted by time
pub fn day_schedule<A>(source: &A, date: &str) -> Vec<Appointment>
where
    A: AppointmentSource + ?Sized,
{
    let mut appointments: Vec<Appointment> = source.by_date(date)
        .into_iter()
        .cloned()
        .collect();
    sort_by_time(&mut appointments);
    appointments
}



/// A day in a [`MonthGrid`]
#[derive(Clone, Debug, PartialEq)]
pub struct DayCell {
    /// Day of the month, starting at 1
    pub day: u32,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Sorted by time
    pub appointments: Vec<Appointment>,
    pub is_today: bool,
    pub is_selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GridCell {
    /// Padding before the first day of the month
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn is_blank(&self) -> bool {
        match self {
            GridCell::Blank => true,
            _ => false,
        }
    }

    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Day(d) => Some(d),
            GridCell::Blank => None,
        }
    }
}

/// The cells to display for a month, laid out in rows of 7 starting on Sunday.
///
/// The last row may be incomplete.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    /// Zero-based month (0 is January)
    pub month0: u32,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    /// e.g. "February 2024"
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month0 as usize % 12], self.year)
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_blank()).count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|c| c.as_day())
    }

    /// Returns the cell of a given day of the month
    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|d| d.day == day)
    }

    pub fn weeks(&self) -> std::slice::Chunks<'_, GridCell> {
        self.cells.chunks(7)
    }
}

/// Build the grid of a month. `month0` is zero-based.
///
/// `today` is used to flag the current day, `selected` (a `YYYY-MM-DD` string) flags the day the user picked, if any.
pub fn month_grid<A>(source: &A, year: i32, month0: u32, today: NaiveDate, selected: Option<&str>) -> Result<MonthGrid, Box<dyn Error>>
where
    A: AppointmentSource + ?Sized,
{
    let first = first_of_month(year, month0)?;
    let blanks = first_weekday(year, month0)?;
    let n_days = days_in_month(year, month0)?;

    let mut cells = Vec::with_capacity((blanks + n_days) as usize);
    for _ in 0..blanks {
        cells.push(GridCell::Blank);
    }

    let mut date = first;
    for day in 1..=n_days {
        let date_str = date_string(date);
        cells.push(GridCell::Day(DayCell {
            day,
            appointments: day_schedule(source, &date_str),
            is_today: date == today,
            is_selected: selected == Some(date_str.as_str()),
            date: date_str,
        }));
        date = match date.succ_opt() {
            Some(d) => d,
            None => break,
        };
    }

    Ok(MonthGrid { year, month0, cells })
}



/// Display a `HH:MM` time on a 12-hour clock (e.g. "2:00 PM").
///
/// Malformed times are returned unchanged.
pub fn format_time(time: &str) -> String {
    match NaiveTime::parse_from_str(time, "%H:%M") {
        Ok(t) => t.format("%-I:%M %p").to_string(),
        Err(_) => time.to_string(),
    }
}

/// Display a `YYYY-MM-DD` date in full (e.g. "Thursday, February 29, 2024")
pub fn format_long_date(date: &str) -> Result<String, Box<dyn Error>> {
    Ok(parse_date(date)?.format("%A, %B %-d, %Y").to_string())
}

/// A bookable time, as offered by a time picker
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSlot {
    /// `HH:MM`
    pub value: String,
    /// e.g. "8:30 AM"
    pub label: String,
}

/// Every bookable time of a day, from 8:00 AM to 6:30 PM every 30 minutes
pub fn time_slots() -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    for hour in FIRST_SLOT_HOUR..=LAST_SLOT_HOUR {
        for minute in (0..60).step_by(SLOT_MINUTES as usize) {
            let value = format!("{:02}:{:02}", hour, minute);
            let label = format_time(&value);
            slots.push(TimeSlot { value, label });
        }
    }
    slots
}
