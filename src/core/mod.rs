pub mod config;
pub mod error;
pub mod files;
pub mod report;
pub mod runner;
pub mod style;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;
