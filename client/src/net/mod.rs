//! Networking for the generation backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the multipart request and hands the raw response to
//! `contract::decode_reply`, which owns the wire interpretation.

pub mod api;
