pub mod client;
pub mod file;
pub mod demo;

pub use client::{DataOrigin, ProfileSource};
pub use file::JsonFileSource;
pub use demo::DemoSource;
