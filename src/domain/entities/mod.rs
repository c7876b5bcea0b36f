pub mod account;
pub mod payment_method;
pub mod payment_mode;
pub mod tier;
