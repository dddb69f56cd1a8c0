//! Bitvavo CSV reader with encoding auto-detection.
//!
//! The input file is decoded to UTF-8 up front, then read lazily
//! one [`InputRow`] at a time.

use std::io::{Cursor, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::error::{ReadError, ReadResult};
use crate::models::{columns, InputRow};

const UTF8_BOM: &str = "\u{feff}";

/// Input text after decoding, with the name of the decoder used.
#[derive(Debug, Clone)]
pub struct DecodedInput {
    pub text: String,
    pub encoding: String,
}

/// Detect the charset label of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(&bytes.to_vec());
    result.0.to_lowercase()
}

/// Decode bytes with the encoding behind a charset label.
///
/// Labels resolve through the WHATWG table, so `iso-8859-1` decodes as
/// `windows-1252`. Unknown labels fall back to `windows-1252`. Returns the
/// text and the canonical name of the decoder.
pub fn decode_content(bytes: &[u8], label: &str) -> (String, &'static str) {
    let encoding = Encoding::for_label(label.as_bytes()).unwrap_or(WINDOWS_1252);
    let text = encoding.decode_without_bom_handling(bytes).0.into_owned();
    (text, encoding.name())
}

/// Decode raw input bytes.
///
/// Valid UTF-8 wins; anything else goes through detection.
/// A leading byte-order mark is dropped.
pub fn decode_input(bytes: &[u8]) -> DecodedInput {
    let (text, encoding) = match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), UTF_8.name()),
        Err(_) => {
            // Bytes already failed UTF-8, so a utf-8 guess means Windows-1252.
            let label = match detect_encoding(bytes).as_str() {
                "utf-8" | "utf8" | "ascii" => WINDOWS_1252.name().to_string(),
                other => other.to_string(),
            };
            decode_content(bytes, &label)
        }
    };

    let text = match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    };

    DecodedInput {
        text,
        encoding: encoding.to_string(),
    }
}

/// Lazy reader over Bitvavo export rows.
///
/// The header is read and checked on construction. Each iteration
/// yields one data row, or the first error encountered.
pub struct RowReader<R: Read> {
    inner: csv::Reader<R>,
    headers: StringRecord,
    record: StringRecord,
}

impl<R: Read> RowReader<R> {
    /// Wrap a comma-delimited source and validate its header.
    pub fn new(source: R) -> ReadResult<Self> {
        let mut inner = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers = inner.headers()?.clone();
        if headers.is_empty() {
            return Err(ReadError::EmptyFile);
        }

        for required in columns::REQUIRED {
            if !headers.iter().any(|h| h == required) {
                return Err(ReadError::MissingColumn(required.to_string()));
            }
        }

        Ok(Self {
            inner,
            headers,
            record: StringRecord::new(),
        })
    }

    /// Column names from the header line.
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    fn next_row(&mut self) -> ReadResult<Option<InputRow>> {
        if !self.inner.read_record(&mut self.record)? {
            return Ok(None);
        }

        let line = self.record.position().map(|p| p.line()).unwrap_or(0);

        if self.record.len() != self.headers.len() {
            return Err(ReadError::MalformedInput {
                line,
                expected: self.headers.len(),
                found: self.record.len(),
            });
        }

        Ok(Some(InputRow::from_record(&self.headers, &self.record, line)))
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = ReadResult<InputRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

/// Read from an in-memory string.
pub fn read_str(content: &str) -> ReadResult<RowReader<Cursor<Vec<u8>>>> {
    RowReader::new(Cursor::new(content.as_bytes().to_vec()))
}

/// An opened input file, ready to be iterated.
pub struct InputFile {
    pub encoding: String,
    pub rows: RowReader<Cursor<Vec<u8>>>,
}

/// Open and decode a Bitvavo export file.
pub fn open_input<P: AsRef<Path>>(path: P) -> ReadResult<InputFile> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = decode_input(&bytes);
    let rows = RowReader::new(Cursor::new(decoded.text.into_bytes()))?;

    Ok(InputFile {
        encoding: decoded.encoding,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Timezone,Date,Time,Type,Currency,Amount,Quote Currency,Quote Price,Received / Paid Currency,Received / Paid Amount,Fee currency,Fee amount,Status";

    fn collect(content: &str) -> ReadResult<Vec<InputRow>> {
        read_str(content)?.collect()
    }

    #[test]
    fn test_rows_keyed_by_header() {
        let csv = format!(
            "{HEADER}\nEurope/Amsterdam,2026-01-14,15:57:09.152,buy,BTC,0.001,EUR,42000.50,EUR,-42.00,EUR,0.10,Completed\n"
        );
        let rows = collect(&csv).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].get("Currency"), Some("BTC"));
        assert_eq!(rows[0].get("Received / Paid Amount"), Some("-42.00"));
        assert_eq!(rows[0].get("Status"), Some("Completed"));
    }

    #[test]
    fn test_header_only() {
        let rows = collect(&format!("{HEADER}\n")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(read_str(""), Err(ReadError::EmptyFile)));
    }

    #[test]
    fn test_missing_required_column() {
        let result = read_str("Date,Time,Quote Currency,Currency\n");
        match result {
            Err(ReadError::MissingColumn(col)) => assert_eq!(col, "Type"),
            _ => panic!("expected missing column error"),
        }
    }

    #[test]
    fn test_numeric_columns_optional() {
        let rows = collect("Type,Date,Time,Quote Currency,Currency\nbuy,2026-01-14,10:00:00,EUR,ETH\n").unwrap();
        assert_eq!(rows[0].get("Amount"), None);
    }

    #[test]
    fn test_field_count_mismatch_fails() {
        let csv = "Type,Date,Time,Quote Currency,Currency\nbuy,2026-01-14,10:00:00,EUR\n";
        let err = collect(csv).unwrap_err();
        match err {
            ReadError::MalformedInput { line, expected, found } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 5);
                assert_eq!(found, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_quoted_values() {
        let csv = "Type,Date,Time,Quote Currency,Currency\n\"buy\",2026-01-14,10:00:00,EUR,\"A,B\"\n";
        let rows = collect(csv).unwrap();
        assert_eq!(rows[0].get("Currency"), Some("A,B"));
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = "Type,Date,Time,Quote Currency,Currency\n\nbuy,2026-01-14,10:00:00,EUR,BTC\n\nsell,2026-01-15,10:00:00,EUR,BTC\n";
        let rows = collect(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("Type"), Some("sell"));
    }

    #[test]
    fn test_bom_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"Type,Date,Time,Quote Currency,Currency\n");
        let decoded = decode_input(&bytes);

        assert_eq!(decoded.encoding, "UTF-8");
        assert!(decoded.text.starts_with("Type,"));
        assert!(read_str(&decoded.text).is_ok());
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let (text, name) = decode_content(bytes, "iso-8859-1");
        assert_eq!(text, "Société");
        assert_eq!(name, "windows-1252");
    }

    #[test]
    fn test_reported_name_matches_decoder() {
        let (text, name) = decode_content(&[0xA4], "iso-8859-1");
        assert_eq!((text.as_str(), name), ("¤", "windows-1252"));

        let (text, name) = decode_content(&[0xA4], "ISO-8859-15");
        assert_eq!((text.as_str(), name), ("€", "ISO-8859-15"));

        let (_, name) = decode_content(&[0xA4], "not-a-charset");
        assert_eq!(name, "windows-1252");
    }

    #[test]
    fn test_invalid_utf8_never_reported_as_utf8() {
        let mut bytes = b"Type,Date,Time,Quote Currency,Currency\nbuy,2026-01-14,10:00:00,EUR,caf".to_vec();
        bytes.push(0xE9);
        let decoded = decode_input(&bytes);

        assert_ne!(decoded.encoding, "UTF-8");
        assert!(decoded.text.starts_with("Type,"));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = open_input(dir.path().join("nope.csv"));
        assert!(matches!(result, Err(ReadError::Open { .. })));
    }
}
