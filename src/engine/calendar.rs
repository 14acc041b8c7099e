use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{CalendarDayView, CycleEntry, PredictionWindow};

// Sunday-aligned visible range for a month grid, the way the client
// renders it: from the Sunday on or before the 1st through the Saturday
// on or after the month's last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: NaiveDate,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

pub fn month_grid(year: i32, month: u32) -> Option<MonthGrid> {
    let month_start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let month_end = next_month - Duration::days(1);

    let start = month_start
        - Duration::days(i64::from(month_start.weekday().num_days_from_sunday()));
    let end = month_end
        + Duration::days(i64::from(6 - month_end.weekday().num_days_from_sunday()));

    Some(MonthGrid { month: month_start, start, end })
}

pub fn classify_calendar_range(
    start: NaiveDate,
    end: NaiveDate,
    reference_month: NaiveDate,
    entries: &[CycleEntry],
    prediction: Option<&PredictionWindow>,
    today: NaiveDate,
) -> Vec<CalendarDayView> {
    let by_date: BTreeMap<NaiveDate, &CycleEntry> =
        entries.iter().map(|e| (e.date, e)).collect();
    let flow_days: HashSet<NaiveDate> = entries
        .iter()
        .filter(|e| e.is_flow_day())
        .map(|e| e.date)
        .collect();

    let mut days = Vec::new();
    let mut date = start;
    while date <= end {
        let is_period = flow_days.contains(&date);
        // Period edges use exact adjacency, unlike the 3-day-tolerant
        // segmentation: a one-day logging gap shows as two logged runs.
        let is_period_start = is_period && !flow_days.contains(&(date - Duration::days(1)));
        let is_period_end = is_period && !flow_days.contains(&(date + Duration::days(1)));

        let (is_ovulation, is_fertile, is_prediction) = match prediction {
            Some(p) => (
                date == p.ovulation_date,
                date >= p.fertile_start_date && date <= p.fertile_end_date,
                // Logged flow always masks the forecast.
                date >= p.period_start_date && date <= p.period_end_date && !is_period,
            ),
            None => (false, false, false),
        };

        days.push(CalendarDayView {
            date,
            is_period,
            is_period_start,
            is_period_end,
            is_ovulation,
            is_fertile,
            is_prediction,
            is_today: date == today,
            is_current_month: date.year() == reference_month.year()
                && date.month() == reference_month.month(),
            entry: by_date.get(&date).map(|e| (*e).clone()),
        });
        date += Duration::days(1);
    }

    days
}
