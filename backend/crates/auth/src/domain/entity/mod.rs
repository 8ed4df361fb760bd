//! Entity Module

pub mod principal;
pub mod society;
pub mod user;
