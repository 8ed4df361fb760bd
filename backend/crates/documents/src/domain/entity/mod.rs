//! Entity Module

pub mod document;
