//! Places domain layer: entities and typed queries

pub mod entities;
