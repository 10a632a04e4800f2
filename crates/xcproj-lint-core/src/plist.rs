//! Parser for the OpenStep property-list dialect used by `project.pbxproj`.
//!
//! Xcode serializes project files as ASCII plists: brace-delimited
//! dictionaries, parenthesized arrays, quoted or bare strings, and both
//! `//` and `/* */` comment styles. Only the subset Xcode actually
//! writes is supported; binary data values (`<...>`) are rejected.

use std::collections::BTreeMap;
use thiserror::Error;

/// A parsed property-list value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A string, whether it was quoted or bare in the source.
    String(String),
    /// An ordered array: `(a, b, c)`.
    Array(Vec<Value>),
    /// A dictionary: `{ key = value; }`. Duplicate keys keep the last value.
    Dict(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the string contents, if this value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, if this value is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries, if this value is a dictionary.
    #[must_use]
    pub fn as_dict(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Dict(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Parse failure with source position.
#[derive(Debug, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    /// 1-indexed line of the failure.
    pub line: usize,
    /// 1-indexed column of the failure.
    pub column: usize,
    /// What went wrong.
    pub message: String,
}

/// Parses a complete property list from `input`.
///
/// # Errors
///
/// Returns a [`ParseError`] on malformed input, including trailing
/// content after the top-level value.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    let mut parser = Parser {
        bytes: input.as_bytes(),
        pos: 0,
    };
    parser.skip_ws()?;
    let value = parser.parse_value()?;
    parser.skip_ws()?;
    if parser.pos < parser.bytes.len() {
        return Err(parser.error("unexpected content after top-level value"));
    }
    Ok(value)
}

/// Bytes allowed in a bare (unquoted) string.
fn is_bare_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'.' | b'/' | b':' | b'-' | b'+' | b'@')
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let mut line = 1;
        let mut column = 1;
        for &b in &self.bytes[..self.pos.min(self.bytes.len())] {
            if b == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: u8) -> Result<(), ParseError> {
        match self.peek() {
            Some(b) if b == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(b) => Err(self.error(format!(
                "expected '{}', found '{}'",
                expected as char, b as char
            ))),
            None => Err(self.error(format!(
                "expected '{}', found end of input",
                expected as char
            ))),
        }
    }

    /// Skips whitespace and both comment styles.
    fn skip_ws(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => {
                    self.pos += 1;
                }
                Some(b'/') => match self.bytes.get(self.pos + 1) {
                    Some(b'/') => {
                        while let Some(b) = self.peek() {
                            if b == b'\n' {
                                break;
                            }
                            self.pos += 1;
                        }
                    }
                    Some(b'*') => {
                        self.pos += 2;
                        loop {
                            match self.peek() {
                                Some(b'*') if self.bytes.get(self.pos + 1) == Some(&b'/') => {
                                    self.pos += 2;
                                    break;
                                }
                                Some(_) => self.pos += 1,
                                None => return Err(self.error("unterminated block comment")),
                            }
                        }
                    }
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            Some(b'{') => self.parse_dict(),
            Some(b'(') => self.parse_array(),
            Some(b'"') => Ok(Value::String(self.parse_quoted()?)),
            Some(b'<') => Err(self.error("data values are not supported")),
            Some(b) if is_bare_byte(b) => Ok(Value::String(self.parse_bare())),
            Some(b) => Err(self.error(format!("unexpected character '{}'", b as char))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_dict(&mut self) -> Result<Value, ParseError> {
        self.expect(b'{')?;
        let mut entries = BTreeMap::new();
        loop {
            self.skip_ws()?;
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(Value::Dict(entries));
            }
            let key = self.parse_string_like()?;
            self.skip_ws()?;
            self.expect(b'=')?;
            self.skip_ws()?;
            let value = self.parse_value()?;
            self.skip_ws()?;
            self.expect(b';')?;
            entries.insert(key, value);
        }
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.expect(b'(')?;
        let mut items = Vec::new();
        loop {
            self.skip_ws()?;
            if self.peek() == Some(b')') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_ws()?;
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b')') => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                Some(b) => {
                    return Err(self.error(format!(
                        "expected ',' or ')' in array, found '{}'",
                        b as char
                    )))
                }
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_string_like(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(b'"') => self.parse_quoted(),
            Some(b) if is_bare_byte(b) => Ok(self.parse_bare()),
            Some(b) => Err(self.error(format!(
                "expected a string, found '{}'",
                b as char
            ))),
            None => Err(self.error("expected a string, found end of input")),
        }
    }

    fn parse_bare(&mut self) -> String {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !is_bare_byte(b) {
                break;
            }
            self.pos += 1;
        }
        // Bare strings are ASCII-only, so the slice is valid UTF-8.
        String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned()
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        self.expect(b'"')?;
        let mut out: Vec<u8> = Vec::new();
        loop {
            match self.bump() {
                Some(b'"') => break,
                Some(b'\\') => match self.bump() {
                    Some(b'n') => out.push(b'\n'),
                    Some(b't') => out.push(b'\t'),
                    Some(b'r') => out.push(b'\r'),
                    Some(b) => out.push(b),
                    None => return Err(self.error("unterminated string escape")),
                },
                Some(b) => out.push(b),
                None => return Err(self.error("unterminated string")),
            }
        }
        String::from_utf8(out).map_err(|_| self.error("invalid UTF-8 in string"))
    }
}
