use enumber_core::error::EnumberError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), EnumberError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
