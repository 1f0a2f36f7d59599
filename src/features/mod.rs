pub mod firs;
