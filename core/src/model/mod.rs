pub mod shift;
pub mod stats;
