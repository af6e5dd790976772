pub mod print;

pub use print::{handle_print, PrintRequest, PrintResponse, __path_handle_print};
