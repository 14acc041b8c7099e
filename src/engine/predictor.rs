use chrono::{Duration, NaiveDate};

use crate::models::{Cycle, CycleEntry, CycleSummary, PhaseProjection, PredictionWindow};
use super::{
    segment_cycles, DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_LENGTH, FERTILE_LEAD_DAYS,
    FERTILE_TAIL_DAYS, LUTEAL_PHASE_DAYS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forecast {
    pub prediction: Option<PredictionWindow>,
    pub summary: Option<CycleSummary>,
}

pub fn predict_next_cycle(entries: &[CycleEntry], today: NaiveDate) -> Forecast {
    let cycles = segment_cycles(entries);
    let Some(last) = cycles.last() else {
        // No flow-days logged: no forecast at all, never a zero-filled one.
        return Forecast { prediction: None, summary: None };
    };

    let cycle_length = average_cycle_length(&cycles);
    let period_length = average_period_length(&cycles);

    let period_start_date = last.start_date + Duration::days(cycle_length);
    let period_end_date = period_start_date + Duration::days(period_length - 1);
    let ovulation_date = period_start_date - Duration::days(LUTEAL_PHASE_DAYS);
    let fertile_start_date = ovulation_date - Duration::days(FERTILE_LEAD_DAYS);
    let fertile_end_date = ovulation_date + Duration::days(FERTILE_TAIL_DAYS);

    let window = PredictionWindow {
        period_start_date,
        period_end_date,
        ovulation_date,
        fertile_start_date,
        fertile_end_date,
    };

    let summary = CycleSummary {
        cycle_length,
        period_length,
        current_cycle_day: current_cycle_day(last.start_date, cycle_length, today),
        total_cycle_days: cycle_length,
        next_period: phase("Next Period", short_date(period_start_date), period_start_date, today),
        fertility: phase(
            "Fertility",
            format!("{}-{}", short_date(fertile_start_date), short_date(fertile_end_date)),
            fertile_start_date,
            today,
        ),
        ovulation: phase("Ovulation", short_date(ovulation_date), ovulation_date, today),
    };

    Forecast { prediction: Some(window), summary: Some(summary) }
}

fn average_cycle_length(cycles: &[Cycle]) -> i64 {
    if cycles.len() < 2 {
        return DEFAULT_CYCLE_LENGTH;
    }
    let total: i64 = cycles
        .windows(2)
        .map(|pair| pair[1].start_date.signed_duration_since(pair[0].start_date).num_days())
        .sum();
    round_mean(total, (cycles.len() - 1) as i64)
}

fn average_period_length(cycles: &[Cycle]) -> i64 {
    if cycles.is_empty() {
        return DEFAULT_PERIOD_LENGTH;
    }
    let total: i64 = cycles.iter().map(|c| c.length).sum();
    round_mean(total, cycles.len() as i64)
}

fn round_mean(total: i64, count: i64) -> i64 {
    (total as f64 / count as f64).round() as i64
}

// Day 1 is the start day itself. Once past the expected length the count
// wraps, a display heuristic for histories that drifted past the average.
fn current_cycle_day(last_start: NaiveDate, cycle_length: i64, today: NaiveDate) -> i64 {
    let mut day = today.signed_duration_since(last_start).num_days() + 1;
    if day > cycle_length {
        day %= cycle_length;
        if day == 0 {
            day = cycle_length;
        }
    }
    day
}

fn phase(name: &str, date: String, anchor: NaiveDate, today: NaiveDate) -> PhaseProjection {
    PhaseProjection {
        name: name.to_string(),
        date,
        time_until: time_until(anchor, today),
        days_count: anchor.signed_duration_since(today).num_days(),
    }
}

fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

fn time_until(date: NaiveDate, today: NaiveDate) -> String {
    let days = date.signed_duration_since(today).num_days();
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        d if d > 0 => format!("in {d} days"),
        d => format!("{} days ago", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::PeriodFlow;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn flow_entry(year: i32, month: u32, day: u32) -> CycleEntry {
        CycleEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: date(year, month, day),
            period_flow: Some(PeriodFlow::Medium),
            symptoms: vec![],
            moods: vec![],
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn flow_run(year: i32, month: u32, from: u32, to: u32) -> Vec<CycleEntry> {
        (from..=to).map(|d| flow_entry(year, month, d)).collect()
    }

    #[test]
    fn no_flow_days_means_no_forecast() {
        let forecast = predict_next_cycle(&[], date(2024, 2, 10));
        assert_eq!(forecast.prediction, None);
        assert_eq!(forecast.summary, None);

        // Entries that only carry symptoms or "none" flow count for nothing here.
        let mut quiet = flow_entry(2024, 1, 1);
        quiet.period_flow = Some(PeriodFlow::None);
        let forecast = predict_next_cycle(&[quiet], date(2024, 2, 10));
        assert_eq!(forecast.prediction, None);
        assert_eq!(forecast.summary, None);
    }

    #[test]
    fn two_regular_cycles_project_the_next_one() {
        // Flow on Jan 1-5 and Jan 29 - Feb 2: two 5-day periods, 28 days apart.
        let mut entries = flow_run(2024, 1, 1, 5);
        entries.extend(flow_run(2024, 1, 29, 31));
        entries.extend(flow_run(2024, 2, 1, 2));

        let today = date(2024, 2, 10);
        let forecast = predict_next_cycle(&entries, today);
        let window = forecast.prediction.unwrap();
        let summary = forecast.summary.unwrap();

        assert_eq!(summary.cycle_length, 28);
        assert_eq!(summary.period_length, 5);
        assert_eq!(summary.total_cycle_days, 28);
        assert_eq!(summary.current_cycle_day, 13);

        assert_eq!(window.period_start_date, date(2024, 2, 26));
        assert_eq!(window.period_end_date, date(2024, 3, 1));
        assert_eq!(window.ovulation_date, date(2024, 2, 12));
        assert_eq!(window.fertile_start_date, date(2024, 2, 7));
        assert_eq!(window.fertile_end_date, date(2024, 2, 13));

        assert_eq!(summary.next_period.date, "Feb 26");
        assert_eq!(summary.next_period.time_until, "in 16 days");
        assert_eq!(summary.next_period.days_count, 16);
        assert_eq!(summary.ovulation.time_until, "in 2 days");
        assert_eq!(summary.fertility.date, "Feb 7-Feb 13");
        // Fertile window opened three days ago relative to Feb 10.
        assert_eq!(summary.fertility.days_count, -3);
        assert_eq!(summary.fertility.time_until, "3 days ago");
    }

    #[test]
    fn single_flow_day_falls_back_to_defaults() {
        let entries = vec![flow_entry(2024, 3, 1)];
        let forecast = predict_next_cycle(&entries, date(2024, 3, 5));
        let window = forecast.prediction.unwrap();
        let summary = forecast.summary.unwrap();

        assert_eq!(summary.cycle_length, 28);
        assert_eq!(summary.period_length, 1);
        assert_eq!(window.period_start_date, date(2024, 3, 29));
        assert_eq!(window.period_end_date, date(2024, 3, 29));
    }

    #[test]
    fn window_geometry_invariants_hold() {
        let mut entries = flow_run(2024, 1, 1, 4);
        entries.extend(flow_run(2024, 1, 31, 31));
        entries.extend(flow_run(2024, 2, 1, 3));

        let forecast = predict_next_cycle(&entries, date(2024, 2, 15));
        let window = forecast.prediction.unwrap();
        let summary = forecast.summary.unwrap();

        let period_span = window
            .period_end_date
            .signed_duration_since(window.period_start_date)
            .num_days()
            + 1;
        assert_eq!(period_span, summary.period_length);
        assert_eq!(
            window.ovulation_date,
            window.period_start_date - Duration::days(LUTEAL_PHASE_DAYS)
        );
        assert_eq!(
            window
                .fertile_end_date
                .signed_duration_since(window.fertile_start_date)
                .num_days(),
            6
        );
    }

    #[test]
    fn cycle_day_wraps_past_the_average_length() {
        let entries = vec![flow_entry(2024, 1, 1)];

        // Day 56 of a 28-day cycle wraps to 28, never to 0.
        let wrapped = predict_next_cycle(&entries, date(2024, 2, 25));
        assert_eq!(wrapped.summary.unwrap().current_cycle_day, 28);

        let day_after = predict_next_cycle(&entries, date(2024, 2, 26));
        assert_eq!(day_after.summary.unwrap().current_cycle_day, 1);
    }

    #[test]
    fn time_until_wording() {
        let today = date(2024, 2, 10);
        assert_eq!(time_until(date(2024, 2, 10), today), "today");
        assert_eq!(time_until(date(2024, 2, 11), today), "tomorrow");
        assert_eq!(time_until(date(2024, 2, 9), today), "yesterday");
        assert_eq!(time_until(date(2024, 2, 14), today), "in 4 days");
        assert_eq!(time_until(date(2024, 2, 3), today), "7 days ago");
    }

    #[test]
    fn same_input_same_forecast() {
        let mut entries = flow_run(2024, 1, 1, 5);
        entries.extend(flow_run(2024, 1, 29, 31));
        let today = date(2024, 2, 10);
        assert_eq!(predict_next_cycle(&entries, today), predict_next_cycle(&entries, today));
    }
}
