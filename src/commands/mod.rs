pub mod analyze;
pub mod status;
