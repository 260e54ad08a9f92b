pub mod file;
pub mod traits;

pub use file::FileShiftRepository;
pub use traits::ShiftRepository;
