//! Delimited-text reader with encoding and delimiter auto-detection.
//!
//! Turns the raw statistics file into JSON objects of strings keyed by
//! header. No football-specific logic here; typing happens in the cleaner.

use serde_json::{Map, Value};
use std::path::Path;

use crate::api::logs::log_warning;
use crate::error::{LoadError, LoadResult};

/// Candidate delimiters, in tie-break order.
const DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// One JSON object per data row
    pub records: Vec<Value>,
    /// Detected encoding
    pub encoding: String,
    /// Detected delimiter
    pub delimiter: char,
    /// Column headers in file order
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes using the given encoding, falling back to lossy UTF-8.
///
/// Never fails: an encoding label `encoding_rs` does not know is decoded
/// as UTF-8 with replacement characters.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match String::from_utf8(bytes.to_vec()) {
            Ok(s) => s,
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        },
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        other => encoding_rs::Encoding::for_label(other.as_bytes())
            .map(|enc| enc.decode(bytes).0.into_owned())
            .unwrap_or_else(|| {
                log_warning(format!("Unknown encoding '{}', decoding as UTF-8", encoding));
                String::from_utf8_lossy(bytes).into_owned()
            }),
    };

    // A UTF-8 BOM would otherwise end up glued to the first header.
    text.trim_start_matches('\u{feff}').to_string()
}

/// Detect the delimiter by counting occurrences in the header line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let mut best = DELIMITERS[0];
    let mut best_count = 0;
    for &sep in &DELIMITERS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best = sep;
        }
    }
    best
}

/// Parse delimited text with an explicit delimiter.
///
/// # Example
/// ```ignore
/// use pl_analyzer::parser::parse_str;
///
/// let parsed = parse_str("Player,Goals\nSaka,14", ',').unwrap();
/// assert_eq!(parsed.records[0]["Goals"], "14");
/// ```
pub fn parse_str(content: &str, delimiter: char) -> LoadResult<ParseResult> {
    parse_with_encoding(content, delimiter, "utf-8".to_string())
}

fn parse_with_encoding(content: &str, delimiter: char, encoding: String) -> LoadResult<ParseResult> {
    if content.trim().is_empty() {
        return Err(LoadError::DataMalformed("file is empty".to_string()));
    }

    let delimiter_byte = u8::try_from(delimiter)
        .map_err(|_| LoadError::DataMalformed(format!("unsupported delimiter '{}'", delimiter)))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::DataMalformed("no headers found".to_string()));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut obj = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let cell = row.get(i).unwrap_or("");
            obj.insert(header.clone(), Value::String(cell.to_string()));
        }
        records.push(Value::Object(obj));
    }

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}

/// Parse bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> LoadResult<ParseResult> {
    if bytes.is_empty() {
        return Err(LoadError::DataMalformed("file is empty".to_string()));
    }
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    parse_with_encoding(&content, delimiter, encoding)
}

/// Read a file and parse it with auto-detection.
pub fn parse_file_auto<P: AsRef<Path>>(path: P) -> LoadResult<ParseResult> {
    let bytes = read_source(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

/// Read the raw bytes of a source file.
pub fn read_source(path: &Path) -> LoadResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| LoadError::DataUnavailable {
        path: path.display().to_string(),
        source,
    })
}
