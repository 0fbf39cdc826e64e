pub mod config;
pub mod sol;
pub mod writing;
