//! Planforge - Test Plan Generation Service
//!
//! Orchestrates three external collaborators: an issue tracker, a
//! language-model provider (hosted chat API or local model server), and a
//! document template source. A generation request assembles a prompt from an
//! issue plus a template, calls the configured provider, persists the result,
//! and exposes Markdown/PDF/DOCX export of the stored plan.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
