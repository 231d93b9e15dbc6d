// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Parsing of the genre description embedded in a track row.
//!
//! The field holds a list of dictionaries written with single-quoted strings,
//! for example:
//!
//! ```text
//! [{'genre_id': '21', 'genre_title': 'Hip-Hop', 'genre_url': 'http://...'}]
//! ```
//!
//! Strings may also be double-quoted (used when a title itself contains an
//! apostrophe) and values may be bare tokens such as numbers.

use std::{collections::HashMap, iter::Peekable, str::CharIndices};

use thiserror::Error;

use crate::model::Genre;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum GenreParseError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected '{found}' at byte {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),
}

type Entry = HashMap<String, String>;

/// Parses a genre description into genres.
///
/// An empty field yields no genres. A malformed field is logged and also
/// yields no genres. Entries without a numeric `genre_id` or a `genre_title`
/// are skipped individually.
pub(crate) fn parse_genres(field: &str) -> Vec<Genre> {
    let field = field.trim();
    if field.is_empty() {
        return Vec::new();
    }

    match parse_entries(field) {
        Ok(entries) => entries.iter().filter_map(genre_from_entry).collect(),
        Err(e) => {
            tracing::warn!("Ignoring malformed genre description {:?}: {}", field, e);
            Vec::new()
        }
    }
}

fn genre_from_entry(entry: &Entry) -> Option<Genre> {
    let id = entry.get("genre_id")?.trim().parse::<i64>().ok()?;
    let title = entry.get("genre_title")?;
    Genre::new(id, title).ok()
}

pub(crate) fn parse_entries(input: &str) -> Result<Vec<Entry>, GenreParseError> {
    let mut parser = Parser {
        chars: input.char_indices().peekable(),
    };

    let entries = parser.list()?;

    match parser.peek() {
        None => Ok(entries),
        Some((position, found)) => Err(GenreParseError::UnexpectedChar { found, position }),
    }
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl Parser<'_> {
    /// Peeks at the next non-whitespace character.
    fn peek(&mut self) -> Option<(usize, char)> {
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.chars.next();
        }
        self.chars.peek().copied()
    }

    fn next(&mut self) -> Result<(usize, char), GenreParseError> {
        self.peek();
        self.chars.next().ok_or(GenreParseError::UnexpectedEnd)
    }

    fn expect(&mut self, want: char) -> Result<(), GenreParseError> {
        match self.next()? {
            (_, c) if c == want => Ok(()),
            (position, found) => Err(GenreParseError::UnexpectedChar { found, position }),
        }
    }

    /// Consumes `close` if it is next, allowing empty and trailing-comma lists.
    fn try_close(&mut self, close: char) -> bool {
        if matches!(self.peek(), Some((_, c)) if c == close) {
            self.chars.next();
            return true;
        }
        false
    }

    /// After an element: `true` when `close` ended the sequence.
    fn separator(&mut self, close: char) -> Result<bool, GenreParseError> {
        match self.next()? {
            (_, ',') => Ok(self.try_close(close)),
            (_, c) if c == close => Ok(true),
            (position, found) => Err(GenreParseError::UnexpectedChar { found, position }),
        }
    }

    fn list(&mut self) -> Result<Vec<Entry>, GenreParseError> {
        self.expect('[')?;

        let mut entries = Vec::new();
        if self.try_close(']') {
            return Ok(entries);
        }

        loop {
            entries.push(self.dict()?);
            if self.separator(']')? {
                return Ok(entries);
            }
        }
    }

    fn dict(&mut self) -> Result<Entry, GenreParseError> {
        self.expect('{')?;

        let mut entry = Entry::new();
        if self.try_close('}') {
            return Ok(entry);
        }

        loop {
            let key = self.scalar()?;
            self.expect(':')?;
            let value = self.scalar()?;
            entry.insert(key, value);

            if self.separator('}')? {
                return Ok(entry);
            }
        }
    }

    fn scalar(&mut self) -> Result<String, GenreParseError> {
        match self.peek() {
            Some((start, quote @ ('\'' | '"'))) => {
                self.chars.next();
                self.string(start, quote)
            }
            Some((position, c)) if !is_bare(c) => {
                Err(GenreParseError::UnexpectedChar { found: c, position })
            }
            Some(_) => {
                let mut value = String::new();
                while let Some(&(_, c)) = self.chars.peek() {
                    if !is_bare(c) {
                        break;
                    }
                    value.push(c);
                    self.chars.next();
                }
                Ok(value)
            }
            None => Err(GenreParseError::UnexpectedEnd),
        }
    }

    fn string(&mut self, start: usize, quote: char) -> Result<String, GenreParseError> {
        let mut value = String::new();
        loop {
            match self.chars.next() {
                None => return Err(GenreParseError::UnterminatedString(start)),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => return Err(GenreParseError::UnterminatedString(start)),
                },
                Some((_, c)) if c == quote => return Ok(value),
                Some((_, c)) => value.push(c),
            }
        }
    }
}

fn is_bare(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '+' | '.' | '_')
}
