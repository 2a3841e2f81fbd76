pub mod build;
pub mod lookup;
pub mod queries;
pub mod stats;
