//! Core value objects shared across the domain

pub mod pricing;
pub mod role;
