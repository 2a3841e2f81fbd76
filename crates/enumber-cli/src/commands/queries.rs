use enumber_core::error::EnumberError;
use enumber_core::store::schema::SAMPLE_QUERIES;

pub fn run() -> Result<(), EnumberError> {
    println!("{SAMPLE_QUERIES}");
    Ok(())
}
