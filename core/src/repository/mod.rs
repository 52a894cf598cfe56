pub mod file;
pub mod memory;
pub mod traits;

// Re-export
pub use file::FileReadingRepository;
pub use memory::InMemoryReadingRepository;
pub use traits::ReadingRepository;
