mod calendar;
mod predictor;
mod segmenter;

pub use calendar::{classify_calendar_range, month_grid, MonthGrid};
pub use predictor::{predict_next_cycle, Forecast};
pub use segmenter::segment_cycles;

// Flow-days up to 3 calendar days apart still belong to the same bleed;
// anything further apart starts a new cycle.
pub const MAX_INTRA_CYCLE_GAP_DAYS: i64 = 3;

// Fallbacks when the history is too short to average.
pub const DEFAULT_CYCLE_LENGTH: i64 = 28;
pub const DEFAULT_PERIOD_LENGTH: i64 = 5;

// Luteal phase fixed at 14 days; fertile window spans 5 days before
// ovulation through 1 day after.
pub const LUTEAL_PHASE_DAYS: i64 = 14;
pub const FERTILE_LEAD_DAYS: i64 = 5;
pub const FERTILE_TAIL_DAYS: i64 = 1;
