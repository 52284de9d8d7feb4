pub type Result<T = ()> = anyhow::Result<T>;
pub type Error = anyhow::Error;
pub use anyhow::Context;

pub mod cmd;
pub mod cron;
pub mod settings;

pub mod email;
pub mod job;
pub mod matching;
pub mod quotes;
pub mod reminders;
pub mod report;
pub mod sheets_report;
pub mod test_dates;
pub mod tz;
