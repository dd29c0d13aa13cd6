//! File Ingestion
//!
//! Reads a picked file and embeds it as a base64 data URL so the record is
//! self-contained in persisted state.

use async_trait::async_trait;
use base64::Engine as _;

use crate::error::Result;
use crate::model::FileRecord;

/// A file the user picked, readable asynchronously.
#[async_trait(?Send)]
pub trait FileSource {
    fn name(&self) -> String;
    fn mime(&self) -> String;
    fn size(&self) -> u64;
    async fn read_bytes(&self) -> Result<Vec<u8>>;
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() {
        "application/octet-stream"
    } else {
        mime
    };
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{b64}")
}

/// Time-based id, suffixed when the millisecond is already taken.
pub fn next_file_id(now_millis: i64, existing: &[FileRecord]) -> String {
    unique_file_id(format!("file_{now_millis}"), existing)
}

/// `base` itself if free, otherwise the first free `base_<n>`.
pub fn unique_file_id(base: String, existing: &[FileRecord]) -> String {
    let taken = |candidate: &str| existing.iter().any(|f| f.id == candidate);
    if !taken(&base) {
        return base;
    }
    (1..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}

/// Read `source` and build its record. Read failures propagate unchanged.
pub async fn ingest<F>(source: &F, id: String) -> Result<FileRecord>
where
    F: FileSource + ?Sized,
{
    let name = source.name();
    let mime = source.mime();
    let bytes = source.read_bytes().await?;
    log::debug!("Ingested '{}' ({} bytes) as {}", name, bytes.len(), id);

    Ok(FileRecord {
        id,
        data_url: encode_data_url(&mime, &bytes),
        size: source.size(),
        name,
        mime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;
    use futures::executor::block_on;

    struct StubFile {
        name: &'static str,
        mime: &'static str,
        bytes: Option<Vec<u8>>,
    }

    #[async_trait(?Send)]
    impl FileSource for StubFile {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn mime(&self) -> String {
            self.mime.to_string()
        }

        fn size(&self) -> u64 {
            self.bytes.as_ref().map_or(0, |b| b.len() as u64)
        }

        async fn read_bytes(&self) -> Result<Vec<u8>> {
            self.bytes.clone().ok_or_else(|| ChatError::Read {
                name: self.name.to_string(),
                reason: "permission denied".to_string(),
            })
        }
    }

    fn record(id: &str) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            name: String::new(),
            size: 0,
            mime: String::new(),
            data_url: String::new(),
        }
    }

    #[test]
    fn data_url_embeds_mime_and_payload() {
        assert_eq!(
            encode_data_url("text/plain", b"abc"),
            "data:text/plain;base64,YWJj"
        );
        assert_eq!(
            encode_data_url("", &[0xff]),
            "data:application/octet-stream;base64,/w=="
        );
    }

    #[test]
    fn file_ids_are_unique_within_a_millisecond() {
        assert_eq!(next_file_id(10, &[]), "file_10");
        let existing = vec![record("file_10"), record("file_10_1")];
        assert_eq!(next_file_id(10, &existing), "file_10_2");
        assert_eq!(next_file_id(11, &existing), "file_11");
    }

    #[test]
    fn ingest_builds_record() {
        let file = StubFile {
            name: "notes.txt",
            mime: "text/plain",
            bytes: Some(b"abc".to_vec()),
        };
        let record = block_on(ingest(&file, "file_1".to_string())).unwrap();
        assert_eq!(record.id, "file_1");
        assert_eq!(record.name, "notes.txt");
        assert_eq!(record.size, 3);
        assert_eq!(record.mime, "text/plain");
        assert_eq!(record.data_url, "data:text/plain;base64,YWJj");
    }

    #[test]
    fn read_error_propagates() {
        let file = StubFile {
            name: "locked.bin",
            mime: "",
            bytes: None,
        };
        let err = block_on(ingest(&file, "file_1".to_string())).unwrap_err();
        assert_eq!(
            err,
            ChatError::Read {
                name: "locked.bin".to_string(),
                reason: "permission denied".to_string(),
            }
        );
    }
}
