pub mod access_control;
pub mod app_error;
pub mod claims;
pub mod dh;
pub mod modmath;
pub mod ports;
pub mod token;
pub mod use_cases;
pub mod validators;
