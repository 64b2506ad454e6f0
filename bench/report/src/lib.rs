mod prints;
mod types;
mod utils;

pub mod output;
pub mod ranking;

pub use types::*;
