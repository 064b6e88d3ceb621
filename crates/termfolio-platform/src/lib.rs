//! Platform service traits and their std implementations.
//!
//! The terminal core never reads the system clock or touches the disk
//! directly; it goes through [`TimeService`] and [`KeyValueStore`] so hosts
//! (and tests) can substitute their own.

mod services;
mod storage;

pub use services::{
    ManualClock, SystemClock, SystemTime, TimeService, day_of_week, days_from_civil,
    days_in_month, days_to_ymd, is_leap,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, load_json, save_json};
