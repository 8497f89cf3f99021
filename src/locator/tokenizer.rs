// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! corbaloc tokenizer using Pest.
//!
//! The input is split on the structural characters `: @ / . , #`. Delimiters
//! are kept as tokens so the parser can walk the sequence left to right.
//! Concatenating the text of all tokens gives back the input.

use pest::Parser;
use pest_derive::Parser;

use crate::core::{OrbError, Result};

/// Pest parser for the corbaloc token grammar.
#[derive(Parser)]
#[grammar = "locator/locator.pest"] // Path relative to src/ directory
struct LocatorLexer;

/// Kind of a locator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// One of `: @ / . , #`
    Delimiter,
    /// A run of non-structural characters
    Word,
    /// A bracketed IPv6 literal such as `[::1]`
    Bracketed,
}

/// A slice of the locator string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// True if this token is the delimiter `c`.
    pub fn is(&self, c: char) -> bool {
        self.kind == TokenKind::Delimiter && self.text.len() == 1 && self.text.starts_with(c)
    }

    /// True if this token is a word equal to `keyword`, ignoring ASCII case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(keyword)
    }

    /// Host text of the token: brackets are stripped from IPv6 literals.
    pub fn host_text(&self) -> &'a str {
        match self.kind {
            TokenKind::Bracketed => &self.text[1..self.text.len() - 1],
            _ => self.text,
        }
    }
}

/// Split `input` into tokens, preserving delimiters.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>> {
    let mut pairs = LocatorLexer::parse(Rule::tokens, input)
        .map_err(|e| OrbError::invalid_token(format!("cannot tokenize locator: {e}"), input))?;

    let Some(root) = pairs.next() else {
        return Ok(Vec::new());
    };

    let tokens = root
        .into_inner()
        .filter_map(|pair| {
            let kind = match pair.as_rule() {
                Rule::delimiter => TokenKind::Delimiter,
                Rule::word => TokenKind::Word,
                Rule::bracketed => TokenKind::Bracketed,
                _ => return None,
            };
            Some(Token {
                kind,
                text: pair.as_str(),
            })
        })
        .collect();
    Ok(tokens)
}
