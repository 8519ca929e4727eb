// Module exports for models

pub mod error;
pub mod scheduler;
pub mod settings;
pub mod timezone;
