mod fir_handler;

pub use fir_handler::*;
