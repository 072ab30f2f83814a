//! Line extraction for benchmark logs.
//!
//! Two line shapes are understood: logger output ending in a JSON object
//! (`... {"message": "search", "items": 10, "time/item": 2.5}`) and plain
//! delimited columns (`search 10 2.5`). Every parser returns either one
//! observation or a [`StatsError::MalformedLine`]; [`Extracted`] turns a
//! reader plus a parser into a fail-fast stream of observations.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use stats_core::error::{Result, StatsError};
use stats_core::models::{BenchRecord, CompoundKey, GroupKey, LatencyRow, Observation};
use tracing::debug;

// ── Formats ───────────────────────────────────────────────────────────────────

/// Column layout of a delimited log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedFormat {
    pub delimiter: char,
    pub key_field: usize,
    pub value_field: usize,
}

impl Default for DelimitedFormat {
    /// `keyword <something> value`, space separated.
    fn default() -> Self {
        Self {
            delimiter: ' ',
            key_field: 0,
            value_field: 2,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Open `path` for buffered line reading.
pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|source| StatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Return the trailing `{...}` fragment of a log line, if any.
///
/// Surrounding newlines, carriage returns and tabs are ignored. The fragment runs
/// from the first `{` on the line to the closing `}` that ends it.
pub fn trailing_fragment(line: &str) -> Option<&str> {
    static FRAGMENT: OnceLock<Regex> = OnceLock::new();
    let re = FRAGMENT.get_or_init(|| Regex::new(r"(\{.*\})$").expect("regex is valid"));

    let trimmed = line.trim_matches(['\n', '\t', '\r']);
    re.captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Decode the trailing JSON fragment of `line` into a [`BenchRecord`].
pub fn parse_bench_record(line: &str, line_no: usize) -> Result<BenchRecord> {
    let fragment = trailing_fragment(line)
        .ok_or_else(|| StatsError::malformed(line_no, "missing trailing JSON fragment"))?;

    let record: BenchRecord = serde_json::from_str(fragment)
        .map_err(|e| StatsError::malformed(line_no, format!("invalid JSON fragment: {}", e)))?;

    ensure_finite(record.time_per_item, line_no)?;
    if let Some(time) = record.time {
        ensure_finite(time, line_no)?;
    }
    Ok(record)
}

/// Extract `((message, items), time/item)` from an embedded-JSON line.
pub fn parse_compound_line(line: &str, line_no: usize) -> Result<Observation<CompoundKey>> {
    let record = parse_bench_record(line, line_no)?;
    let message = record
        .message
        .ok_or_else(|| StatsError::malformed(line_no, "missing field `message`"))?;
    Ok(Observation::new(
        CompoundKey::new(message, record.items),
        record.time_per_item,
    ))
}

/// Extract the raw `(time, items, time/item)` tuple from an embedded-JSON line.
pub fn parse_latency_line(line: &str, line_no: usize) -> Result<LatencyRow> {
    let record = parse_bench_record(line, line_no)?;
    let time = record
        .time
        .ok_or_else(|| StatsError::malformed(line_no, "missing field `time`"))?;
    Ok(LatencyRow {
        time,
        items: record.items,
        time_per_item: record.time_per_item,
    })
}

/// Extract `(key, value)` from a delimited line.
///
/// The line is split on every occurrence of the delimiter, so repeated
/// delimiters produce empty columns rather than being collapsed.
pub fn parse_delimited_line(
    line: &str,
    line_no: usize,
    format: &DelimitedFormat,
) -> Result<Observation<GroupKey>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.split(format.delimiter).collect();

    let key = fields
        .get(format.key_field)
        .ok_or_else(|| missing_column(line_no, format.key_field, fields.len()))?;
    let raw_value = fields
        .get(format.value_field)
        .ok_or_else(|| missing_column(line_no, format.value_field, fields.len()))?;

    let value: f64 = raw_value.trim().parse().map_err(|_| {
        StatsError::malformed(line_no, format!("non-numeric value {:?}", raw_value))
    })?;
    ensure_finite(value, line_no)?;

    Ok(Observation::new(GroupKey::parse(key), value))
}

// ── Extracted ─────────────────────────────────────────────────────────────────

/// A lazy, fail-fast stream of parsed lines.
///
/// Yields one item per input line in file order. The first read or parse
/// error is yielded once and ends the stream.
pub struct Extracted<R, F> {
    lines: std::io::Lines<R>,
    parse: F,
    line_no: usize,
    failed: bool,
}

impl<R, F, T> Extracted<R, F>
where
    R: BufRead,
    F: FnMut(&str, usize) -> Result<T>,
{
    pub fn new(reader: R, parse: F) -> Self {
        Self {
            lines: reader.lines(),
            parse,
            line_no: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R, F, T> Iterator for Extracted<R, F>
where
    R: BufRead,
    F: FnMut(&str, usize) -> Result<T>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let line = self.lines.next()?;
        self.line_no += 1;

        let item = match line {
            Ok(l) => (self.parse)(l.as_str(), self.line_no),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                Err(StatsError::malformed(self.line_no, "invalid UTF-8"))
            }
            Err(source) => Err(StatsError::LineRead {
                line: self.line_no,
                source,
            }),
        };
        if let Err(ref e) = item {
            debug!("Extraction stopped at line {}: {}", self.line_no, e);
            self.failed = true;
        }
        Some(item)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn ensure_finite(value: f64, line_no: usize) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StatsError::NonFiniteValue {
            line: line_no,
            value,
        })
    }
}

fn missing_column(line_no: usize, index: usize, available: usize) -> StatsError {
    StatsError::malformed(
        line_no,
        format!("expected column {} but line has {}", index, available),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LOG_LINE: &str = r#"[2018-03-01 10:00:00.123] [Benchmark] [info] {"message": "search", "items": 10, "time": 25.0, "time/item": 2.5}"#;

    // ── trailing_fragment ─────────────────────────────────────────────────────

    #[test]
    fn test_trailing_fragment_found() {
        assert_eq!(
            trailing_fragment(LOG_LINE),
            Some(r#"{"message": "search", "items": 10, "time": 25.0, "time/item": 2.5}"#)
        );
    }

    #[test]
    fn test_trailing_fragment_ignores_trailing_tabs() {
        assert_eq!(trailing_fragment("prefix {\"a\":1}\t\t\n"), Some("{\"a\":1}"));
    }

    #[test]
    fn test_trailing_fragment_must_end_line() {
        assert!(trailing_fragment("prefix {\"a\":1} trailing").is_none());
        assert!(trailing_fragment("no fragment here").is_none());
    }

    // ── parse_compound_line ───────────────────────────────────────────────────

    #[test]
    fn test_parse_compound_line() {
        let obs = parse_compound_line(LOG_LINE, 1).unwrap();
        assert_eq!(obs.key, CompoundKey::new("search", 10));
        assert_eq!(obs.value, 2.5);
    }

    #[test]
    fn test_parse_compound_line_missing_fragment() {
        let err = parse_compound_line("[info] search took 3ms", 4).unwrap_err();
        match err {
            StatsError::MalformedLine { line, reason } => {
                assert_eq!(line, 4);
                assert!(reason.contains("missing trailing JSON"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_compound_line_invalid_json() {
        let err = parse_compound_line("x {\"message\": search}", 2).unwrap_err();
        assert!(matches!(err, StatsError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_parse_compound_line_missing_message() {
        let err = parse_compound_line(r#"x {"items": 1, "time/item": 1.0}"#, 9).unwrap_err();
        assert!(err.to_string().contains("`message`"));
    }

    #[test]
    fn test_parse_compound_line_non_integer_items() {
        let err =
            parse_compound_line(r#"x {"message": "m", "items": "ten", "time/item": 1.0}"#, 1)
                .unwrap_err();
        assert!(matches!(err, StatsError::MalformedLine { .. }));
    }

    // ── parse_latency_line ────────────────────────────────────────────────────

    #[test]
    fn test_parse_latency_line() {
        let row = parse_latency_line(LOG_LINE, 1).unwrap();
        assert_eq!(
            row,
            LatencyRow {
                time: 25.0,
                items: 10,
                time_per_item: 2.5
            }
        );
    }

    #[test]
    fn test_parse_latency_line_requires_time() {
        let err = parse_latency_line(r#"x {"items": 1, "time/item": 1.0}"#, 3).unwrap_err();
        assert!(err.to_string().contains("`time`"));
    }

    // ── parse_delimited_line ──────────────────────────────────────────────────

    #[test]
    fn test_parse_delimited_default_layout() {
        let obs = parse_delimited_line("insert took 12.5 ms", 1, &DelimitedFormat::default()).unwrap();
        assert_eq!(obs.key, GroupKey::Text("insert".to_string()));
        assert_eq!(obs.value, 12.5);
    }

    #[test]
    fn test_parse_delimited_tab_second_column() {
        let format = DelimitedFormat {
            delimiter: '\t',
            key_field: 0,
            value_field: 1,
        };
        let obs = parse_delimited_line("16\t0.75", 1, &format).unwrap();
        assert_eq!(obs.key, GroupKey::Int(16));
        assert_eq!(obs.value, 0.75);
    }

    #[test]
    fn test_parse_delimited_repeated_delimiter_yields_empty_column() {
        // "a  3.0" splits into ["a", "", "3.0"], so column 2 is still 3.0.
        let obs = parse_delimited_line("a  3.0", 1, &DelimitedFormat::default()).unwrap();
        assert_eq!(obs.value, 3.0);
    }

    #[test]
    fn test_parse_delimited_non_numeric() {
        let err = parse_delimited_line("a b c", 5, &DelimitedFormat::default()).unwrap_err();
        match err {
            StatsError::MalformedLine { line, reason } => {
                assert_eq!(line, 5);
                assert!(reason.contains("non-numeric"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_delimited_missing_column() {
        let err = parse_delimited_line("a 1", 2, &DelimitedFormat::default()).unwrap_err();
        assert!(err.to_string().contains("expected column 2"));
    }

    #[test]
    fn test_parse_delimited_rejects_nan_and_inf() {
        let format = DelimitedFormat::default();
        let err = parse_delimited_line("a x NaN", 1, &format).unwrap_err();
        assert!(matches!(err, StatsError::NonFiniteValue { line: 1, .. }));
        let err = parse_delimited_line("a x inf", 2, &format).unwrap_err();
        assert!(matches!(err, StatsError::NonFiniteValue { line: 2, .. }));
    }

    // ── Extracted ─────────────────────────────────────────────────────────────

    #[test]
    fn test_extracted_yields_in_file_order() {
        let input = Cursor::new("a x 1\nb x 2\nc x 3\n");
        let format = DelimitedFormat::default();
        let keys: Vec<String> = Extracted::new(input, |l: &str, n| parse_delimited_line(l, n, &format))
            .map(|r| r.unwrap().key.to_string())
            .collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_extracted_stops_after_first_error() {
        let input = Cursor::new("a x 1\nbroken\nc x 3\n");
        let format = DelimitedFormat::default();
        let mut stream = Extracted::new(input, |l: &str, n| parse_delimited_line(l, n, &format));

        assert!(stream.next().unwrap().is_ok());
        let err = stream.next().unwrap().unwrap_err();
        assert!(matches!(err, StatsError::MalformedLine { line: 2, .. }));
        assert!(stream.next().is_none());
        assert_eq!(stream.lines_read(), 2);
    }

    #[test]
    fn test_extracted_empty_input() {
        let mut stream = Extracted::new(Cursor::new(""), parse_compound_line);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_extracted_trailing_newline_is_not_a_line() {
        let format = DelimitedFormat::default();
        let mut stream = Extracted::new(Cursor::new("a x 1\nb x 2\n"), |l: &str, n| {
            parse_delimited_line(l, n, &format)
        });
        assert_eq!(stream.by_ref().filter(|r| r.is_ok()).count(), 2);
        assert_eq!(stream.lines_read(), 2);
    }

    #[test]
    fn test_extracted_blank_line_mid_file_is_malformed() {
        let input = format!("{}\n\n{}\n", LOG_LINE, LOG_LINE);
        let mut stream = Extracted::new(Cursor::new(input), parse_compound_line);

        assert!(stream.next().unwrap().is_ok());
        let err = stream.next().unwrap().unwrap_err();
        assert!(matches!(err, StatsError::MalformedLine { line: 2, .. }));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_extracted_invalid_utf8_reports_line() {
        let input: &[u8] = b"a x 1\n\xff\xfe x 2\nc x 3\n";
        let format = DelimitedFormat::default();
        let mut stream = Extracted::new(input, |l: &str, n| parse_delimited_line(l, n, &format));

        assert!(stream.next().unwrap().is_ok());
        match stream.next().unwrap().unwrap_err() {
            StatsError::MalformedLine { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(stream.next().is_none());
    }

    struct BrokenPipe;

    impl std::io::Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn test_extracted_read_error_carries_line() {
        let reader = std::io::BufReader::new(BrokenPipe);
        let mut stream = Extracted::new(reader, parse_compound_line);
        let err = stream.next().unwrap().unwrap_err();
        assert!(matches!(err, StatsError::LineRead { line: 1, .. }));
        assert!(err.to_string().contains("line 1"));
        assert!(stream.next().is_none());
    }

    // ── open_input ────────────────────────────────────────────────────────────

    #[test]
    fn test_open_input_missing_file() {
        let err = open_input(Path::new("/tmp/does-not-exist-bench-stats-xyz.log")).unwrap_err();
        assert!(matches!(err, StatsError::FileRead { .. }));
    }
}
