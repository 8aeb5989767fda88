//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the generator page's surfaces and read shared session
//! state from the Leptos context provider.

pub mod conversation;
pub mod error_display;
pub mod file_links;
pub mod pdf_viewer;
