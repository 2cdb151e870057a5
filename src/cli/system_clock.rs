use chrono::{Local, NaiveDateTime};

use exptrack_core::Clock;

/// Wall clock in the user's local timezone; months and "today" follow it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
