pub mod handler;
pub mod probes;
pub mod runner;
pub mod summary;
