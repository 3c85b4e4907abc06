//! Parser for the `angular-plural-extract` attribute value.
//!
//! The attribute holds a bracketed list of quoted strings, for example
//! `['one item', '{{count}} items']`. The value is parsed as data only: any
//! content that is not a string literal is rejected.

use super::error::PluralLiteralError;

/// Maximum number of elements: singular, plural and an optional trailer.
const MAX_ELEMENTS: usize = 3;

/// Parse a bracketed list of up to three single- or double-quoted strings.
pub fn parse_string_array(input: &str) -> Result<Vec<String>, PluralLiteralError> {
    let mut parser = Parser {
        chars: input.char_indices().collect(),
        pos: 0,
        len: input.len(),
    };
    parser.array()
}

/// Format the ICU plural default value for a parsed literal.
///
/// Returns `None` when fewer than two elements were given.
pub fn plural_default(elements: &[String]) -> Option<String> {
    match elements {
        [one, other, rest @ ..] => {
            let trailer = match rest.first() {
                Some(extra) if !extra.is_empty() => format!(" {extra}"),
                _ => String::new(),
            };
            Some(format!("{{NB, plural, one{{{one}}} other{{{other}}}{trailer}}}"))
        }
        _ => None,
    }
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
    len: usize,
}

impl Parser {
    fn offset(&self) -> usize {
        self.chars.get(self.pos).map_or(self.len, |(i, _)| *i)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PluralLiteralError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(PluralLiteralError::Expected {
                expected,
                offset: self.offset(),
            })
        }
    }

    fn array(&mut self) -> Result<Vec<String>, PluralLiteralError> {
        let mut elements = Vec::new();

        self.skip_whitespace();
        self.expect('[')?;
        self.skip_whitespace();

        while self.peek() != Some(']') {
            elements.push(self.string()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    self.skip_whitespace();
                }
                Some(']') => {}
                _ => {
                    return Err(PluralLiteralError::Expected {
                        expected: ']',
                        offset: self.offset(),
                    });
                }
            }
        }
        self.expect(']')?;

        self.skip_whitespace();
        if self.peek().is_some() {
            return Err(PluralLiteralError::TrailingContent {
                offset: self.offset(),
            });
        }
        if elements.len() > MAX_ELEMENTS {
            return Err(PluralLiteralError::TooManyElements {
                count: elements.len(),
            });
        }

        Ok(elements)
    }

    fn string(&mut self) -> Result<String, PluralLiteralError> {
        let start = self.offset();
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(PluralLiteralError::NotAString { offset: start }),
        };
        self.pos += 1;

        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(PluralLiteralError::Unterminated { offset: start }),
                Some(c) if c == quote => return Ok(value),
                Some('\\') => value.push(self.escape(start)?),
                Some(c) => value.push(c),
            }
        }
    }

    fn escape(&mut self, string_start: usize) -> Result<char, PluralLiteralError> {
        let offset = self.offset();
        let c = self
            .bump()
            .ok_or(PluralLiteralError::Unterminated {
                offset: string_start,
            })?;
        Ok(match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            'u' => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = self
                        .bump()
                        .and_then(|d| d.to_digit(16))
                        .ok_or(PluralLiteralError::InvalidEscape { offset })?;
                    code = code * 16 + digit;
                }
                char::from_u32(code).ok_or(PluralLiteralError::InvalidEscape { offset })?
            }
            other => other,
        })
    }
}
