//! HTTP handlers for the Places domain

pub mod objects;
pub mod places;
