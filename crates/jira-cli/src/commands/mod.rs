//! Command implementations that do more than call the API.

pub mod configure;
