//! Storage abstractions for service layer
//!
//! Contains the reusable file-backed map store that the flat-file plant
//! store builds on.

pub mod json_map_store;
