//! Users domain layer: entities, typed queries, authorization rules

pub mod auth;
pub mod entities;
