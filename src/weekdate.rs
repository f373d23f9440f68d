use {
    anyhow::Context,
    jiff::{
        ToSpan,
        civil::{Date, Weekday},
    },
};

/// A date's position within a week-numbering year.
///
/// Unlike `jiff::civil::ISOWeekDate`, which always starts weeks on Monday,
/// the first day of the week is configurable. Week one of a year is the
/// first week that has at least four of its days in that Gregorian year.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WeekDate {
    start: Weekday,
    /// The week-numbering year, which may differ from the Gregorian year
    /// for dates near January 1.
    year: i16,
    week: i8,
}

impl WeekDate {
    /// Returns the week date for the given Gregorian date, where weeks begin
    /// on `start`.
    ///
    /// This fails only at the boundaries of Jiff's supported range, where the
    /// first week of the year would begin before `Date::MIN`.
    pub(crate) fn from_date(start: Weekday, date: Date) -> anyhow::Result<WeekDate> {
        let mut start_of_year = week_start_of_year(start, date.year())?;
        if date < start_of_year {
            start_of_year = week_start_of_year(start, date.year() - 1)?;
        } else if let Ok(next) = week_start_of_year(start, date.year() + 1) {
            // Fails for year 9999, but then `date` can't reach the start of
            // the following week year anyway.
            if date >= next {
                start_of_year = next;
            }
        }
        let days = start_of_year
            .until(date)
            .with_context(|| {
                format!("failed to count days from {start_of_year} to {date}")
            })?
            .get_days();
        // `date` is at most 53 weeks past `start_of_year`, so this fits.
        let week = i8::try_from(days / 7 + 1)
            .with_context(|| format!("week number of {date} out of range"))?;
        // The week year always agrees with the Gregorian year on the 4th day
        // after the start of its first week.
        let year = start_of_year
            .checked_add(4.days())
            .with_context(|| format!("week year of {date} out of range"))?
            .year();
        Ok(WeekDate { start, year, week })
    }

    /// The one-indexed week number, in `1..=53`.
    pub(crate) fn week(self) -> i8 {
        self.week
    }

    /// Returns the number of weeks in the week year containing this date.
    pub(crate) fn weeks_in_year(self) -> i8 {
        if is_long_year(self.start, self.year) { 53 } else { 52 }
    }
}

/// Returns true when the given week year, with weeks starting on `start`,
/// has 53 weeks.
fn is_long_year(start: Weekday, year: i16) -> bool {
    // See: https://en.wikipedia.org/wiki/ISO_week_date#Weeks_per_year
    let last = jiff::civil::date(year, 12, 31);
    let weekday = last.weekday();
    weekday == start.wrapping_add(3)
        || (last.in_leap_year() && weekday == start.wrapping_add(4))
}

/// Returns the first date of the first week of `year`.
///
/// The date returned always falls on `start`.
fn week_start_of_year(start: Weekday, year: i16) -> anyhow::Result<Date> {
    // Week one contains at least four days of the year, so it always
    // contains January 4.
    let jan4 = Date::new(year, 1, 4).with_context(|| {
        format!("failed to find first week of `{year}` for weeks starting on {start:?}")
    })?;
    let back = jan4.weekday().since(start);
    jan4.checked_sub(back.days()).with_context(|| {
        format!(
            "first week of `{year}` for weeks starting on {start:?} \
             is out of range",
        )
    })
}
