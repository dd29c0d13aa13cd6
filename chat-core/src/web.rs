//! Browser adapters: `localStorage` as a [`KeyValueStore`] and
//! `web_sys::File` as a [`FileSource`].

use async_trait::async_trait;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, Storage};

use crate::error::{ChatError, Result};
use crate::ingest::FileSource;
use crate::store::KeyValueStore;

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| ChatError::MissingRegion("window".to_string()))?
            .local_storage()
            .ok()
            .flatten()
            .ok_or_else(|| ChatError::MissingRegion("localStorage".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| ChatError::Storage(format!("{:?}", e)))
    }
}

pub struct BrowserFile {
    file: File,
}

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self { file }
    }
}

#[async_trait(?Send)]
impl FileSource for BrowserFile {
    fn name(&self) -> String {
        self.file.name()
    }

    fn mime(&self) -> String {
        self.file.type_()
    }

    fn size(&self) -> u64 {
        self.file.size() as u64
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        let buffer = JsFuture::from(self.file.array_buffer())
            .await
            .map_err(|e| ChatError::Read {
                name: self.file.name(),
                reason: format!("{:?}", e),
            })?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}
