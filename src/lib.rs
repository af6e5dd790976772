//! receipt-printer
//!
//! Prints images on ESC/POS thermal receipt printers.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
