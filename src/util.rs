//! Shared utility modules used across synfilter components.

pub mod varint;
