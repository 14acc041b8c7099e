use chrono::NaiveDate;

use crate::models::{Cycle, CycleEntry};
use super::MAX_INTRA_CYCLE_GAP_DAYS;

pub fn segment_cycles(entries: &[CycleEntry]) -> Vec<Cycle> {
    let mut flow_days: Vec<NaiveDate> = entries
        .iter()
        .filter(|e| e.is_flow_day())
        .map(|e| e.date)
        .collect();
    flow_days.sort_unstable();

    let mut cycles = Vec::new();
    let Some((&first, rest)) = flow_days.split_first() else {
        return cycles;
    };

    let mut start = first;
    let mut last = first;
    let mut length: i64 = 1;

    for &day in rest {
        if day.signed_duration_since(last).num_days() <= MAX_INTRA_CYCLE_GAP_DAYS {
            last = day;
            length += 1;
        } else {
            cycles.push(Cycle { start_date: start, length });
            start = day;
            last = day;
            length = 1;
        }
    }
    cycles.push(Cycle { start_date: start, length });

    cycles
}
