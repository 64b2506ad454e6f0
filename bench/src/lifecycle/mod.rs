pub mod manager;
pub mod process;
pub mod readiness;
pub mod state;
