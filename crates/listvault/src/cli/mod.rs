pub mod app;
pub mod rules;
pub mod sync;
