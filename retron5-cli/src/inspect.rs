//! Header inspection (`--inspect`): report what a container declares without
//! extracting anything

use anyhow::Result;
use retron5_decoder::{parse_header, validate_header, ContainerHeader, HEADER_SIZE};
use serde::Serialize;
use std::path::Path;

/// JSON report for one input file
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub path: String,
    pub file_size: usize,
    pub header: Option<ContainerHeader>,
    /// Header validation outcome; `None` when the header is valid
    pub error: Option<String>,
}

/// Build the inspection report for a container image
pub fn inspect(path: &Path, bytes: &[u8]) -> InspectReport {
    let mut report = InspectReport {
        path: path.display().to_string(),
        file_size: bytes.len(),
        header: None,
        error: None,
    };

    match parse_header(bytes) {
        Ok(header) => {
            let trailing = bytes.len() - HEADER_SIZE;
            report.error = validate_header(&header, trailing)
                .err()
                .map(|e| e.to_string());
            report.header = Some(header);
        }
        Err(e) => report.error = Some(e.to_string()),
    }

    report
}

/// Read and inspect one file; a read failure becomes the report's error
pub fn inspect_file(path: &Path) -> InspectReport {
    match crate::source::read_container(path) {
        Ok(bytes) => inspect(path, &bytes),
        Err(e) => InspectReport {
            path: path.display().to_string(),
            file_size: 0,
            header: None,
            error: Some(format!("{:#}", e)),
        },
    }
}

/// Render a report as pretty-printed JSON
pub fn to_json(report: &InspectReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retron5_decoder::MAGIC;

    fn header_bytes(version: u16, packed: u32) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&MAGIC.to_le_bytes());
        out.extend_from_slice(&version.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&8192u32.to_le_bytes());
        out.extend_from_slice(&packed.to_le_bytes());
        out.extend_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
        out.extend_from_slice(&0xCAFE_BABEu32.to_le_bytes());
        out
    }

    #[test]
    fn test_inspect_valid_header() {
        let mut bytes = header_bytes(1, 3);
        bytes.extend_from_slice(&[1, 2, 3]);

        let report = inspect(Path::new("a.sav"), &bytes);
        assert_eq!(report.file_size, 31);
        assert!(report.error.is_none());
        let header = report.header.unwrap();
        assert_eq!(header.original_size, 8192);
        assert!(header.is_compressed());
    }

    #[test]
    fn test_inspect_reports_validation_error() {
        let bytes = header_bytes(3, 0);
        let report = inspect(Path::new("a.sav"), &bytes);
        assert!(report.header.is_some());
        assert!(report.error.unwrap().contains("Unsupported format version"));
    }

    #[test]
    fn test_inspect_truncated() {
        let report = inspect(Path::new("a.sav"), b"RTN5");
        assert!(report.header.is_none());
        assert!(report.error.unwrap().contains("Truncated header"));
    }

    #[test]
    fn test_unreadable_file_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.sav");
        let present = dir.path().join("present.sav");
        let mut bytes = header_bytes(1, 2);
        bytes.extend_from_slice(&[9, 9]);
        std::fs::write(&present, &bytes).unwrap();

        let reports: Vec<InspectReport> = [&missing, &present]
            .iter()
            .map(|p| inspect_file(p))
            .collect();

        assert!(reports[0].header.is_none());
        assert!(reports[0]
            .error
            .as_deref()
            .unwrap()
            .contains("Failed to read container file"));
        assert!(reports[1].error.is_none());
        assert_eq!(reports[1].file_size, HEADER_SIZE + 2);
    }

    #[test]
    fn test_json_shape() {
        let bytes = header_bytes(1, 0);
        let json = to_json(&inspect(Path::new("a.sav"), &bytes)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["header"]["magic"], MAGIC);
        assert_eq!(value["header"]["crc32"], 0xCAFE_BABEu32);
        assert!(value["error"].is_null());
    }
}
