//! Mapping file loading.
//!
//! Format: one `<sourceKey> <HeaderName>` pair per line, separated by any
//! whitespace. Only fully empty lines are skipped. Every other line must be
//! exactly two tokens, so `#` has no special meaning: `#lang X-Lang` maps the
//! key `#lang` and a longer comment line is rejected. A partially loaded table
//! is never served.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::mapping::table::MappingTable;

/// Errors raised while building the mapping table. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("failed to read mapping file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed mapping on line {line}: expected `<key> <header>`, found {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("mapping table is empty")]
    Empty,
}

/// Parse mapping text into a table.
pub fn parse_mapping(content: &str) -> Result<MappingTable, MappingError> {
    let mut table = MappingTable::new();

    for (idx, line) in content.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(key), Some(header), None) => table.insert(key, header),
            _ => {
                return Err(MappingError::MalformedLine {
                    line: idx + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    Ok(table)
}

/// Read and parse a mapping file.
pub fn load_mapping(path: &Path) -> Result<MappingTable, MappingError> {
    let content = fs::read_to_string(path).map_err(|source| MappingError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_mapping(&content)?;
    tracing::debug!(path = %path.display(), entries = table.len(), "Mapping file parsed");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_whitespace_separated_pairs() {
        let table =
            parse_mapping("auth X-Auth-Token\nlang\tX-Lang\n\n  region   CloudFront-Region  \n").unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("auth"), Some("X-Auth-Token"));
        assert_eq!(table.get("lang"), Some("X-Lang"));
        assert_eq!(table.get("region"), Some("CloudFront-Region"));
    }

    #[test]
    fn test_comment_line_is_rejected() {
        let err = parse_mapping("# promoted keys\nauth X-Auth-Token\n").unwrap_err();
        assert!(matches!(err, MappingError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_hash_prefixed_key_is_a_mapping() {
        let table = parse_mapping("#lang X-Lang\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("#lang"), Some("X-Lang"));
    }

    #[test]
    fn test_whitespace_only_line_is_rejected() {
        let err = parse_mapping("auth X-Auth-Token\n   \n").unwrap_err();
        assert!(matches!(err, MappingError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_single_token_line_is_rejected() {
        let err = parse_mapping("auth X-Auth-Token\nlang\n").unwrap_err();
        match err {
            MappingError::MalformedLine { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "lang");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_three_token_line_is_rejected() {
        let err = parse_mapping("auth X-Auth Token\n").unwrap_err();
        assert!(matches!(err, MappingError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_key_last_line_wins() {
        let table = parse_mapping("auth X-First\nauth X-Second\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("auth"), Some("X-Second"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a X-A").unwrap();
        writeln!(file, "b X-B").unwrap();

        let table = load_mapping(file.path()).unwrap();
        let keys: Vec<&str> = table.iter().map(|e| e.source_key()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_mapping(&dir.path().join("needed_keys.txt")).unwrap_err();
        assert!(matches!(err, MappingError::Io { .. }));
    }
}
