use crate::Result;

pub mod migrate;
pub mod remind;
pub mod report;
pub mod run;
pub mod serve;
pub mod sheets;
pub mod test_dates;

pub fn print_json<T: ?Sized + serde::Serialize>(value: &T) -> Result {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
