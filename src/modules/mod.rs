//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the record and blob store abstractions and their MongoDB backends.

pub mod storage;
