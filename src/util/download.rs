//! Save fetched text as a file download.
//!
//! The export download endpoint needs the bearer header, so a plain link
//! cannot be used. The body is fetched through the API client and handed to
//! the browser as a Blob object URL. Requires a browser environment.

#[cfg(test)]
#[path = "download_test.rs"]
mod download_test;

/// Error raised when the browser refuses to start the download.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("download failed: {0}")]
pub struct DownloadError(pub String);

/// File name offered for export `id`.
pub fn export_file_name(id: i64) -> String {
    format!("ledgerx-export-{id}.csv")
}

/// Run `use_url` against an object URL, then `revoke` it on every path. The
/// first error wins.
#[cfg(any(feature = "csr", test))]
fn with_object_url<E>(
    url: &str,
    use_url: impl FnOnce(&str) -> Result<(), E>,
    revoke: impl FnOnce(&str) -> Result<(), E>,
) -> Result<(), E> {
    let used = use_url(url);
    let revoked = revoke(url);
    used.and(revoked)
}

/// Offer `contents` to the user as a CSV file named `file_name`.
///
/// # Errors
///
/// Returns [`DownloadError`] if any browser API call fails, or always when
/// not running in a browser.
pub fn save_csv(file_name: &str, contents: &str) -> Result<(), DownloadError> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let js_err = |e: wasm_bindgen::JsValue| DownloadError(format!("{e:?}"));

        let parts = js_sys::Array::new();
        parts.push(&wasm_bindgen::JsValue::from_str(contents));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("text/csv");
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        with_object_url(
            &url,
            |url| {
                let document = web_sys::window()
                    .and_then(|w| w.document())
                    .ok_or_else(|| DownloadError("no document".to_owned()))?;
                let anchor = document
                    .create_element("a")
                    .map_err(js_err)?
                    .dyn_into::<web_sys::HtmlAnchorElement>()
                    .map_err(|_| DownloadError("anchor element has unexpected type".to_owned()))?;
                anchor.set_href(url);
                anchor.set_download(file_name);
                anchor.click();
                Ok(())
            },
            |url| web_sys::Url::revoke_object_url(url).map_err(js_err),
        )
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(DownloadError(format!("{file_name} ({} bytes): not available outside the browser", contents.len())))
    }
}
