pub mod print_service;
pub mod print_sink;
pub mod spool;

pub use print_service::{JobReport, PrintService};
pub use print_sink::{Opener, Payload, PrintSink, RawTarget};
pub use spool::Spool;
