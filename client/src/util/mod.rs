//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser APIs (blobs, object URLs, the clock) from
//! session and page logic so those stay testable off the browser.

pub mod clock;
pub mod object_url;
