pub mod reading_service;
pub mod sample;

pub use reading_service::ReadingService;
pub use sample::{generate_sample_series, SAMPLE_DAYS};
