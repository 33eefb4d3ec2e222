//! Adapter implementations of the port contracts.

pub mod ai;
pub mod document;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod template;
pub mod tracker;
