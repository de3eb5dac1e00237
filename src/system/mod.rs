pub mod executor;
pub mod fs;
