//! Browser object URLs for files streamed back by the backend.
//!
//! Each binary reply is wrapped in a `Blob` and exposed through
//! `URL.createObjectURL` so it can be embedded or downloaded. Those URLs pin
//! the blob in memory until revoked, so session state owns them and releases
//! the previous one whenever it is replaced.
//!
//! DESIGN
//! ======
//! Session transitions talk to the [`ObjectUrls`] trait rather than `web_sys`
//! directly. The browser implementation is a no-op outside `hydrate`, and
//! tests use [`MemoryObjectUrls`] to assert create/revoke pairing.

#[cfg(test)]
#[path = "object_url_test.rs"]
mod object_url_test;

/// Creates and revokes object URLs for in-memory files.
pub trait ObjectUrls {
    /// Wrap `bytes` in a blob labelled with `mime` (untyped when `None`) and
    /// return a URL that references it.
    ///
    /// # Errors
    ///
    /// Returns an error string if the blob or URL cannot be created.
    fn create(&mut self, bytes: &[u8], mime: Option<&str>) -> Result<String, String>;

    /// Release a URL previously returned by [`ObjectUrls::create`].
    fn revoke(&mut self, url: &str);
}

/// Object URLs backed by the browser's `Blob` / `URL` APIs.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserObjectUrls;

impl ObjectUrls for BrowserObjectUrls {
    fn create(&mut self, bytes: &[u8], mime: Option<&str>) -> Result<String, String> {
        #[cfg(feature = "hydrate")]
        {
            let array = js_sys::Uint8Array::from(bytes);
            let parts = js_sys::Array::of1(&array);
            let options = web_sys::BlobPropertyBag::new();
            if let Some(mime) = mime {
                options.set_type(mime);
            }
            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(|e| format!("blob creation failed: {e:?}"))?;
            web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("object URL creation failed: {e:?}"))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (bytes, mime);
            Err("object URLs are only available in the browser".to_owned())
        }
    }

    fn revoke(&mut self, url: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Err(e) = web_sys::Url::revoke_object_url(url) {
                leptos::logging::warn!("revoking object URL failed: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
        }
    }
}

/// In-memory stand-in that records every call.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryObjectUrls {
    /// `(url, mime, byte length)` per successful create.
    pub created: Vec<(String, Option<String>, usize)>,
    pub revoked: Vec<String>,
    /// When set, `create` fails with this message.
    pub fail_with: Option<String>,
}

#[cfg(test)]
impl MemoryObjectUrls {
    /// URLs created and not yet revoked.
    pub fn live(&self) -> Vec<String> {
        self.created
            .iter()
            .map(|(url, _, _)| url.clone())
            .filter(|url| !self.revoked.contains(url))
            .collect()
    }
}

#[cfg(test)]
impl ObjectUrls for MemoryObjectUrls {
    fn create(&mut self, bytes: &[u8], mime: Option<&str>) -> Result<String, String> {
        if let Some(msg) = &self.fail_with {
            return Err(msg.clone());
        }
        let url = format!("blob:test/{}", self.created.len() + 1);
        self.created.push((url.clone(), mime.map(str::to_owned), bytes.len()));
        Ok(url)
    }

    fn revoke(&mut self, url: &str) {
        self.revoked.push(url.to_owned());
    }
}
