pub mod batch;
pub mod commands;
pub mod logging;
pub mod report;
pub mod settings;
pub mod utils;
