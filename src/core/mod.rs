pub mod generators;
pub mod materializer;
pub mod patcher;
pub mod paths;
pub mod pubspec;
pub mod registry;
pub mod schemas;
pub mod slate;
