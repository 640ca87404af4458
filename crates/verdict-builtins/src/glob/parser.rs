// SPDX-License-Identifier: Apache-2.0

//! Glob pattern parser.
//!
//! Builds the pattern AST from the token stream: a sequence of literal
//! text, wildcard and class nodes, with brace alternation parsed as a
//! group of alternative sub-patterns.

use std::collections::VecDeque;

use super::lexer::Token;

/// Pattern AST node.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum Node {
    /// A sequence of nodes.
    Pattern(Vec<Node>),
    Text(String),
    /// `*`: any run of non-delimiter characters.
    Any,
    /// `**`: any run of anything.
    Super,
    /// `?`: one non-delimiter character.
    Single,
    /// `[abc]` / `[!abc]`
    List { chars: String, negated: bool },
    /// `[a-z]` / `[!a-z]`
    Range { lo: char, hi: char, negated: bool },
    /// `{a,b}`: alternative patterns.
    AnyOf(Vec<Node>),
}

/// Parse failure with a static reason.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GlobError(pub &'static str);

impl core::fmt::Display for GlobError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a sub-pattern ended.
enum End {
    Eof,
    Separator,
    TermsClose,
}

/// Parse a token stream into a pattern tree.
pub(crate) fn parse(mut tokens: VecDeque<Token>) -> Result<Node, GlobError> {
    let (nodes, _) = parse_pattern(&mut tokens, false)?;
    Ok(Node::Pattern(nodes))
}

fn parse_pattern(
    tokens: &mut VecDeque<Token>,
    in_terms: bool,
) -> Result<(Vec<Node>, End), GlobError> {
    let mut nodes = Vec::new();

    loop {
        let token = tokens.pop_front().unwrap_or(Token::Eof);
        match token {
            Token::Eof => {
                if in_terms {
                    return Err(GlobError("unexpected end"));
                }
                return Ok((nodes, End::Eof));
            }
            Token::Error(err) => return Err(GlobError(err)),
            Token::Text(text) => nodes.push(Node::Text(text)),
            Token::Any => nodes.push(Node::Any),
            Token::Super => nodes.push(Node::Super),
            Token::Single => nodes.push(Node::Single),
            Token::RangeOpen => nodes.push(parse_range(tokens)?),
            Token::TermsOpen => {
                let mut alternatives = Vec::new();
                loop {
                    let (alt, end) = parse_pattern(tokens, true)?;
                    alternatives.push(Node::Pattern(alt));
                    match end {
                        End::Separator => {}
                        End::TermsClose => break,
                        End::Eof => return Err(GlobError("unexpected end")),
                    }
                }
                nodes.push(Node::AnyOf(alternatives));
            }
            Token::Separator if in_terms => return Ok((nodes, End::Separator)),
            Token::TermsClose if in_terms => return Ok((nodes, End::TermsClose)),
            _ => return Err(GlobError("unexpected token")),
        }
    }
}

/// Parse the tokens of one character class: either a chars list or a
/// lo-hi range, optionally negated.
fn parse_range(tokens: &mut VecDeque<Token>) -> Result<Node, GlobError> {
    let mut negated = false;
    let mut lo: Option<char> = None;
    let mut hi: Option<char> = None;
    let mut chars = String::new();

    loop {
        let token = tokens.pop_front().unwrap_or(Token::Eof);
        match token {
            Token::Eof => return Err(GlobError("unexpected end")),
            Token::Error(err) => return Err(GlobError(err)),
            Token::Not => negated = true,
            Token::RangeLo(c) => lo = Some(c),
            Token::RangeBetween => {}
            Token::RangeHi(c) => {
                if lo.is_some_and(|lo| c < lo) {
                    return Err(GlobError("hi character should be greater than lo character"));
                }
                hi = Some(c);
            }
            Token::Text(text) => chars = text,
            Token::RangeClose => {
                let is_range = lo.is_some() && hi.is_some();
                let is_chars = !chars.is_empty();
                if is_range == is_chars {
                    return Err(GlobError("could not parse range"));
                }
                return Ok(if is_range {
                    Node::Range {
                        lo: lo.unwrap_or_default(),
                        hi: hi.unwrap_or_default(),
                        negated,
                    }
                } else {
                    Node::List { chars, negated }
                });
            }
            _ => return Err(GlobError("unexpected token")),
        }
    }
}
