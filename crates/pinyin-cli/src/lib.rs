pub mod commands;
pub mod driver;
pub mod logging;
