//! Wall-clock access for download filenames.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

/// Milliseconds since the Unix epoch.
///
/// Uses `Date.now()` in the browser; uses `contract::now_millis` elsewhere.
pub fn now_millis() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = js_sys::Date::now().max(0.0) as u64;
        millis
    }
    #[cfg(not(feature = "hydrate"))]
    {
        contract::now_millis()
    }
}
