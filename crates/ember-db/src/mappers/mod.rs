//! Entity ↔ model mappers

mod candidate;
mod engagement;
mod reaction;
