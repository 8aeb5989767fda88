//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The page keeps one `SessionState` in an `RwSignal` provided via context;
//! components read it and the page drives its transitions.

pub mod session;
