pub mod config;

pub use config::{AppConfig, PrinterConfig, Transport};
