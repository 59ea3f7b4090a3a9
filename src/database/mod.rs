pub mod bank;
pub mod seed;
