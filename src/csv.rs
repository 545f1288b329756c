use crate::database::Table;
use crate::error::SourceError;
use crate::source::RecordSource;
use core::fmt;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_while};
use nom::character::complete::char;
use nom::combinator::{map, value};
use nom::error::{ErrorKind, ParseError};
use nom::multi::{many0, separated_list1};
use nom::IResult;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// RFC 4180 file whose first record is the header.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> CsvSource {
        CsvSource { path: path.into() }
    }
}

impl RecordSource for CsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_table(&self) -> Result<Table, SourceError> {
        read_csv(&self.path)
    }
}

pub fn read_csv(path: &Path) -> Result<Table, SourceError> {
    let file = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_csv(&file)
}

/// Parses CSV text into a table.
///
/// Blank lines are skipped and not counted: the `record` number in errors is the position
/// among non-blank records (header = 1), which can differ from the file line number.
pub fn parse_csv(text: &str) -> Result<Table, SourceError> {
    let mut input = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows: Vec<Vec<String>> = vec![];

    while !input.is_empty() {
        if let Ok((rest, _)) = line_ending(input) {
            input = rest;
            continue;
        }

        let number = rows.len() + 1;
        let (rest, fields) = record(input).map_err(|e| SourceError::Parse {
            record: number,
            message: match e {
                nom::Err::Error(e) | nom::Err::Failure(e) => e.to_string(),
                nom::Err::Incomplete(_) => "incomplete input".to_owned(),
            },
        })?;

        input = match line_ending(rest) {
            Ok((rest, _)) => rest,
            Err(_) => match rest.chars().next() {
                None => rest,
                Some(c) => {
                    return Err(SourceError::Parse {
                        record: number,
                        message: format!("unexpected character {:?} after field", c),
                    });
                }
            },
        };
        rows.push(fields);
    }

    let mut rows = rows.into_iter();
    let header = match rows.next() {
        None => return Err(SourceError::NoHeader),
        Some(v) => v,
    };

    Table::from_rows(header, rows.collect())
}

#[derive(Debug, PartialEq)]
pub enum CsvParseError {
    CustomError(String),
    NomError(ErrorKind),
}

impl Error for CsvParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl fmt::Display for CsvParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvParseError::CustomError(e) => write!(f, "{}", e),
            CsvParseError::NomError(kind) => write!(f, "nom could not parse input - err: {:?}", kind),
        }
    }
}

impl<I> ParseError<I> for CsvParseError {
    fn from_error_kind(_input: I, kind: ErrorKind) -> Self {
        CsvParseError::NomError(kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

type CsvResult<'a, O> = IResult<&'a str, O, CsvParseError>;

fn line_ending(s: &str) -> CsvResult<&str> {
    alt((tag("\r\n"), tag("\n"), tag("\r")))(s)
}

fn quote(s: &str) -> CsvResult<char> {
    char('"')(s)
}

fn escaped_quote(s: &str) -> CsvResult<&str> {
    value("\"", tag("\"\""))(s)
}

fn quoted_text(s: &str) -> CsvResult<&str> {
    is_not("\"")(s)
}

/// `"..."`, where `""` stands for a literal quote. Commas and line breaks are kept as-is.
fn quoted_field(s: &str) -> CsvResult<String> {
    let (s, _) = quote(s)?;
    let (s, parts) = many0(alt((quoted_text, escaped_quote)))(s)?;
    match quote(s) {
        Ok((s, _)) => Ok((s, parts.concat())),
        Err(_) => Err(nom::Err::Failure(CsvParseError::CustomError(
            "unterminated quoted field".to_owned(),
        ))),
    }
}

/// Quotes are only special at the start of a field; `O"Reilly` is kept verbatim.
fn unquoted_field(s: &str) -> CsvResult<String> {
    map(
        take_while(|c: char| c != ',' && c != '\r' && c != '\n'),
        |f: &str| f.to_owned(),
    )(s)
}

fn field(s: &str) -> CsvResult<String> {
    alt((quoted_field, unquoted_field))(s)
}

fn record(s: &str) -> CsvResult<Vec<String>> {
    separated_list1(char(','), field)(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_with_2_columns() {
        let tempdir = tempfile::tempdir().unwrap();
        let csv_path = tempdir.path().join("data.csv");
        std::fs::write(&csv_path, "col1,col2\n1,2\n2,3").unwrap();

        let table = read_csv(&csv_path).unwrap();
        assert_eq!(table.header(), &["col1".to_owned(), "col2".to_owned()][..]);
        assert_eq!(table.len(), 2);

        assert_eq!(table.records()[0].get("col1").unwrap(), "1");
        assert_eq!(table.records()[0].get("col2").unwrap(), "2");
        assert_eq!(table.records()[1].get("col1").unwrap(), "2");
        assert_eq!(table.records()[1].get("col2").unwrap(), "3");
    }

    #[test]
    fn test_quoted_field_with_comma() {
        let table = parse_csv("name,employer\nQA,\"Enterprise Holdings, Inc\"\n").unwrap();
        assert_eq!(
            table.records()[0].get("employer").unwrap(),
            "Enterprise Holdings, Inc"
        );
    }

    #[test]
    fn test_escaped_quote_and_newline_in_quotes() {
        let table = parse_csv("a,b\n\"say \"\"hi\"\"\",\"line1\nline2\"\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].get("a").unwrap(), "say \"hi\"");
        assert_eq!(table.records()[0].get("b").unwrap(), "line1\nline2");
    }

    #[test]
    fn test_crlf_blank_lines_and_bom() {
        let table = parse_csv("\u{feff}a,b\r\n\r\n1,2\r\n\n3,\r\n").unwrap();
        assert_eq!(table.header(), &["a".to_owned(), "b".to_owned()][..]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].get("a").unwrap(), "3");
        assert_eq!(table.records()[1].get("b").unwrap(), "");
    }

    #[test]
    fn test_quote_inside_unquoted_field() {
        let table = parse_csv("name,employer\nDev,O\"Reilly Media\n").unwrap();
        assert_eq!(table.records()[0].get("employer").unwrap(), "O\"Reilly Media");
    }

    #[test]
    fn test_bare_cr_line_endings() {
        let table = parse_csv("a,b\r1,2\r3,4").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].get("b").unwrap(), "2");
        assert_eq!(table.records()[1].get("a").unwrap(), "3");
    }

    #[test]
    fn test_record_numbers_skip_blank_lines() {
        match parse_csv("a\n\n\nok\n\"open\n") {
            Err(SourceError::Parse { record, .. }) => assert_eq!(record, 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_quoted_field() {
        let table = parse_csv("a,b\n\"\",x").unwrap();
        assert_eq!(table.records()[0].get("a").unwrap(), "");
        assert_eq!(table.records()[0].get("b").unwrap(), "x");
    }

    #[test]
    fn test_header_only() {
        let table = parse_csv("a,b\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_input_has_no_header() {
        assert!(matches!(parse_csv(""), Err(SourceError::NoHeader)));
        assert!(matches!(parse_csv("\n\r\n"), Err(SourceError::NoHeader)));
    }

    #[test]
    fn test_unterminated_quote() {
        match parse_csv("a,b\n1,\"open\n") {
            Err(SourceError::Parse { record, message }) => {
                assert_eq!(record, 2);
                assert_eq!(message, "unterminated quoted field");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_text_after_closing_quote() {
        match parse_csv("a\n\"x\"y\n") {
            Err(SourceError::Parse { record, message }) => {
                assert_eq!(record, 2);
                assert!(message.contains("'y'"), "{}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_inconsistent_row() {
        assert!(matches!(
            parse_csv("a,b\n1,2,3\n"),
            Err(SourceError::InconsistentRow {
                record: 2,
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let source = CsvSource::new(tempdir.path().join("missing.csv"));

        match source.read_table() {
            Err(SourceError::Io { path, source }) => {
                assert_eq!(path, tempdir.path().join("missing.csv"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
