pub mod config;
pub mod logging;

pub mod capture;
pub mod extract;
pub mod har;
