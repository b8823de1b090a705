pub mod api;
pub mod config;
pub mod core;
pub mod errors;
pub mod extensions;
pub mod logging;
pub mod notify;
pub mod scheduler;
pub mod sync;
pub mod ui;
