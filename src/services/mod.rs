//! Business logic services.

pub mod dashboard;
pub mod gifts;
pub mod growth;
pub mod presentation;
pub mod proxy;
