//! # client
//!
//! Leptos + WASM frontend for the presentation generator.
//!
//! This crate contains the generator page, its components, session state,
//! and the HTTP call to the generation backend. Wire interpretation lives in
//! the `contract` crate so the host and CLI share it.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs console logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
