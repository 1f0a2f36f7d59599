mod fir;

pub use fir::{Fir, NewFir, Priority, DEFAULT_STATUS};
