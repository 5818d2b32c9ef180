pub mod error;
pub mod executable;
pub mod temp_dir;

pub use executable::find_executable;
