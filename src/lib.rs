pub mod app;
pub mod libs;
