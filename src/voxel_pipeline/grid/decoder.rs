//! Parser for serialized voxel maps.
//!
//! Accepts the `return { {0,1,..}, .. }` table literal produced by
//! [`GridEncoder`](super::GridEncoder), with `--` line comments, arbitrary
//! whitespace and optional trailing commas, the way the consuming
//! interpreter would read it.

use crate::voxel_pipeline::common::error::{ConversionError, Result};
use crate::voxel_pipeline::grid::types::{Voxel, VoxelGrid};

/// Parses a serialized map back into a grid.
pub fn parse_map(text: &str) -> Result<VoxelGrid> {
    let mut parser = Parser::new(text);

    parser.skip_trivia();
    parser.expect_keyword("return")?;
    let rows = parser.parse_table(|p| p.parse_row())?;
    if rows.is_empty() {
        return Err(parser.error("table has no rows"));
    }
    parser.skip_trivia();
    if !parser.at_end() {
        return Err(parser.error("unexpected content after table"));
    }

    let width = rows[0].1.len();
    if let Some((line, row)) = rows.iter().find(|(_, row)| row.len() != width) {
        return Err(ConversionError::ParseError {
            line: *line,
            reason: format!("row has {} cells, expected {}", row.len(), width),
        });
    }

    let rows = rows.into_iter().map(|(_, row)| row).collect();
    VoxelGrid::from_rows(rows).ok_or_else(|| parser.error("grid is empty or ragged"))
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) {
        if self.peek() == Some(b'\n') {
            self.line += 1;
        }
        self.pos += 1;
    }

    fn error(&self, reason: impl Into<String>) -> ConversionError {
        ConversionError::ParseError {
            line: self.line,
            reason: reason.into(),
        }
    }

    /// Skips whitespace and `--` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => self.bump(),
                Some(b'-') if self.bytes.get(self.pos + 1) == Some(&b'-') => {
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.bump();
                    }
                }
                _ => return,
            }
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.bytes[self.pos..].starts_with(keyword.as_bytes()) {
            self.pos += keyword.len();
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", keyword)))
        }
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        self.skip_trivia();
        if self.peek() == Some(byte) {
            self.bump();
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", byte as char)))
        }
    }

    /// Parses `{ item, item, ... }` with an optional trailing comma.
    fn parse_table<T>(&mut self, mut item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        self.expect(b'{')?;
        let mut items = Vec::new();

        loop {
            self.skip_trivia();
            if self.peek() == Some(b'}') {
                self.bump();
                return Ok(items);
            }

            items.push(item(self)?);

            self.skip_trivia();
            match self.peek() {
                Some(b',') => self.bump(),
                Some(b'}') => {}
                Some(other) => {
                    return Err(self.error(format!("expected `,` or `}}`, found `{}`", other as char)));
                }
                None => return Err(self.error("unterminated table")),
            }
        }
    }

    /// Returns the row together with the line its opening brace is on.
    fn parse_row(&mut self) -> Result<(usize, Vec<Voxel>)> {
        self.skip_trivia();
        let line = self.line;
        let row = self.parse_table(|p| p.parse_voxel())?;
        if row.is_empty() {
            return Err(ConversionError::ParseError {
                line,
                reason: "empty row".to_string(),
            });
        }
        Ok((line, row))
    }

    fn parse_voxel(&mut self) -> Result<Voxel> {
        self.skip_trivia();
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.bump();
        }
        // Digits are ASCII, so the slice is valid UTF-8.
        let token = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or_default();
        if token.is_empty() {
            return Err(self.error("expected a cell value"));
        }
        token
            .parse::<u8>()
            .ok()
            .and_then(Voxel::from_digit)
            .ok_or_else(|| self.error(format!("cell value `{}` is not 0 or 1", token)))
    }
}
