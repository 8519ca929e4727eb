// Service module exports

pub mod app_state;
pub mod catalog;
pub mod grid;
pub mod interaction;
pub mod persistence;
pub mod settings;
pub mod time;
pub mod url_params;
