pub mod capture;
pub mod check;
pub mod history;
pub mod synth;
pub mod utils;
pub mod version;

#[cfg(test)]
#[path = "../commands_test.rs"]
mod commands_test;
