//! Request extractors shared by route handlers.

pub mod json_object;
