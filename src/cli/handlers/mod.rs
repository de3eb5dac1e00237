pub mod custom;
pub mod make;
pub mod project;
pub mod slate;
