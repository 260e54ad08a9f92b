pub mod enricher;
pub mod stats_service;
