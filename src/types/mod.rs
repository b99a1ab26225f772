pub mod frequency;
pub mod station;
pub mod time_series;
