pub mod action;
pub mod builders;
pub mod services;
