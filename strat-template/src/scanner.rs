//! Byte cursor over template text.
//!
//! Templates are JSON-like documents whose values may be unquoted
//! placeholder expressions, so they cannot be handed to a JSON parser.
//! The scanner only inspects ASCII structure characters, which keeps
//! every offset it reports on a UTF-8 boundary.

use std::ops::Range;

use crate::{Result, TemplateSource};

/// A quoted string literal found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StringLiteral {
    /// Unescaped contents.
    pub value: String,
    /// Span of the raw contents, without the quotes.
    pub span: Range<usize>,
}

pub(crate) struct Scanner<'a> {
    source: &'a TemplateSource,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a TemplateSource) -> Self {
        Self {
            source,
            bytes: source.text().as_bytes(),
            pos: 0,
        }
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Consume `expected` after optional whitespace.
    pub fn expect(&mut self, expected: u8, what: &str) -> Result<()> {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error_here(format!("expected {}", what)))
        }
    }

    /// Consume `byte` if it is next (after whitespace).
    pub fn eat(&mut self, byte: u8) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn error_here(&self, message: impl Into<String>) -> Box<crate::Error> {
        let end = (self.pos + 1).min(self.bytes.len());
        let span = if self.pos < end {
            Some(self.pos..end)
        } else {
            None
        };
        self.source.malformed(message, span)
    }

    /// Read a double-quoted string literal.
    ///
    /// Accepts the JSON escapes, including `\uXXXX` and surrogate pairs.
    pub fn string(&mut self) -> Result<StringLiteral> {
        self.skip_whitespace();
        let open = self.pos;
        if self.peek() != Some(b'"') {
            return Err(self.error_here("expected a string"));
        }
        self.pos += 1;
        let start = self.pos;
        let mut value = String::new();
        let mut chunk_start = start;

        loop {
            match self.peek() {
                None => {
                    return Err(self
                        .source
                        .malformed("unterminated string", Some(open..self.bytes.len())));
                }
                Some(b'"') => {
                    value.push_str(&self.source.text()[chunk_start..self.pos]);
                    let span = start..self.pos;
                    self.pos += 1;
                    return Ok(StringLiteral { value, span });
                }
                Some(b'\\') => {
                    value.push_str(&self.source.text()[chunk_start..self.pos]);
                    let escaped = self.bytes.get(self.pos + 1).copied();
                    let width = match escaped {
                        Some(b'n') => {
                            value.push('\n');
                            2
                        }
                        Some(b't') => {
                            value.push('\t');
                            2
                        }
                        Some(b'r') => {
                            value.push('\r');
                            2
                        }
                        Some(b'b') => {
                            value.push('\u{8}');
                            2
                        }
                        Some(b'f') => {
                            value.push('\u{c}');
                            2
                        }
                        Some(c @ (b'"' | b'\\' | b'/')) => {
                            value.push(c as char);
                            2
                        }
                        Some(b'u') => {
                            let Some((c, width)) = self.unicode_escape() else {
                                let end = (self.pos + 6).min(self.bytes.len());
                                return Err(self
                                    .source
                                    .malformed("invalid unicode escape", Some(self.pos..end)));
                            };
                            value.push(c);
                            width
                        }
                        _ => {
                            let end = (self.pos + 2).min(self.bytes.len());
                            return Err(self
                                .source
                                .malformed("unsupported escape sequence", Some(self.pos..end)));
                        }
                    };
                    self.pos += width;
                    chunk_start = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Decode `\uXXXX` at the cursor, joining a surrogate pair.
    ///
    /// Returns the character and the number of bytes consumed.
    fn unicode_escape(&self) -> Option<(char, usize)> {
        let high = self.hex4(self.pos + 2)?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(u32::from(high)).map(|c| (c, 6));
        }

        if self.bytes.get(self.pos + 6..self.pos + 8) != Some(b"\\u".as_slice()) {
            return None;
        }
        let low = self.hex4(self.pos + 8)?;
        let c = char::decode_utf16([high, low]).next()?.ok()?;
        Some((c, 12))
    }

    fn hex4(&self, at: usize) -> Option<u16> {
        let digits = self.bytes.get(at..at + 4)?;
        if !digits.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        u16::from_str_radix(std::str::from_utf8(digits).ok()?, 16).ok()
    }

    /// Skip over one value of any shape.
    ///
    /// Stops before the `,`, `}` or `]` that ends the value at nesting
    /// depth zero. Handles unquoted placeholder expressions such as
    /// `$util.toJson($ctx.args.version)`.
    pub fn skip_value(&mut self) -> Result<()> {
        self.skip_whitespace();
        let start = self.pos;
        let mut depth = 0usize;

        while let Some(b) = self.peek() {
            match b {
                b'"' => {
                    self.string()?;
                    continue;
                }
                b'{' | b'[' | b'(' => depth += 1,
                b'}' | b']' | b')' if depth > 0 => depth -= 1,
                b',' | b'}' | b']' if depth == 0 => break,
                b')' => return Err(self.error_here("unbalanced ')'")),
                _ => {}
            }
            self.pos += 1;
        }

        if depth > 0 {
            return Err(self
                .source
                .malformed("unterminated value", Some(start..self.bytes.len())));
        }
        if self.pos == start {
            return Err(self.error_here("expected a value"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(text: &str) -> TemplateSource {
        TemplateSource::new("test", text)
    }

    #[test]
    fn test_string_literal() {
        let src = source(r#"  "SELECT \"x\" FROM t" rest"#);
        let mut scanner = Scanner::new(&src);
        let lit = scanner.string().unwrap();
        assert_eq!(lit.value, r#"SELECT "x" FROM t"#);
        assert_eq!(&src.text()[lit.span.clone()], r#"SELECT \"x\" FROM t"#);
    }

    #[test]
    fn test_unterminated_string() {
        let src = source(r#""SELECT"#);
        let mut scanner = Scanner::new(&src);
        assert!(scanner.string().is_err());
    }

    #[test]
    fn test_unicode_escapes() {
        let src = source(r#""caf\u00e9 \ud83d\ude00""#);
        let mut scanner = Scanner::new(&src);
        assert_eq!(scanner.string().unwrap().value, "café 😀");
    }

    #[test]
    fn test_lone_surrogate_is_rejected() {
        let src = source(r#""\ud83d x""#);
        let mut scanner = Scanner::new(&src);
        let err = scanner.string().unwrap_err();
        assert!(matches!(*err, crate::Error::MalformedTemplate { ref message, .. } if message == "invalid unicode escape"));
    }

    #[test]
    fn test_trailing_backslash_span_stays_in_text() {
        let src = source("\"abc\\");
        let mut scanner = Scanner::new(&src);
        let err = scanner.string().unwrap_err();
        match *err {
            crate::Error::MalformedTemplate { span, .. } => {
                let span = span.unwrap();
                assert!(span.offset() + span.len() <= src.text().len());
            }
            other => panic!("expected MalformedTemplate, got {:?}", other),
        }
    }

    #[test]
    fn test_skip_placeholder_value() {
        let src = source("$util.toJson($util.autoId()), next");
        let mut scanner = Scanner::new(&src);
        scanner.skip_value().unwrap();
        assert_eq!(scanner.peek(), Some(b','));
    }

    #[test]
    fn test_skip_value_unbalanced() {
        let src = source("$util.toJson($util.autoId()");
        let mut scanner = Scanner::new(&src);
        assert!(scanner.skip_value().is_err());
    }
}
