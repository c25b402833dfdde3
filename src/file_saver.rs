use crate::error::SaveError;

/// Receives the exported image and makes it available to the user
pub trait FileSaver {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), SaveError>;
}

/// Writes downloads into a directory on disk
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectorySaver {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSaver for DirectorySaver {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), SaveError> {
        let path = self.dir.join(file_name);
        let write_err = |source| SaveError::Write {
            path: path.display().to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(write_err)?;
        std::fs::write(&path, bytes).map_err(write_err)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Triggers a browser download through a temporary object URL
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone)]
pub struct BrowserDownload;

#[cfg(target_arch = "wasm32")]
impl FileSaver for BrowserDownload {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), SaveError> {
        use wasm_bindgen::JsCast;

        let js_err = |e: wasm_bindgen::JsValue| SaveError::Browser(format!("{e:?}"));

        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::of1(&array);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("image/jpeg");
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SaveError::Browser("no document".to_owned()))?;
        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| SaveError::Browser("anchor element expected".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
        Ok(())
    }
}

/// Keeps saved files in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySaver {
    pub files: Vec<(String, Vec<u8>)>,
}

impl FileSaver for MemorySaver {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<(), SaveError> {
        self.files.push((file_name.to_owned(), bytes.to_vec()));
        Ok(())
    }
}
