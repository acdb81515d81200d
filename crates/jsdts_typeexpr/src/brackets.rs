//! Bracket matching over token sequences.

use crate::tokenizer::Token;

/// A bracket pair that delimits a nested part of a type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// `<` `>`: generic arguments.
    Angle,
    /// `(` `)`: unions and function parameters.
    Paren,
    /// `{` `}`: object literals.
    Brace,
}

impl Bracket {
    pub fn open(self) -> &'static str {
        match self {
            Bracket::Angle => "<",
            Bracket::Paren => "(",
            Bracket::Brace => "{",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Bracket::Angle => ">",
            Bracket::Paren => ")",
            Bracket::Brace => "}",
        }
    }

    pub fn from_open(text: &str) -> Option<Bracket> {
        match text {
            "<" => Some(Bracket::Angle),
            "(" => Some(Bracket::Paren),
            "{" => Some(Bracket::Brace),
            _ => None,
        }
    }

    pub fn from_close(text: &str) -> Option<Bracket> {
        match text {
            ">" => Some(Bracket::Angle),
            ")" => Some(Bracket::Paren),
            "}" => Some(Bracket::Brace),
            _ => None,
        }
    }
}

/// Find the index of the token closing the bracket opened at or after `start`.
///
/// Only tokens of the given bracket kind are counted; the first closing token
/// that brings the depth back to zero wins. Returns `None` when the brackets
/// never balance.
pub fn find_matching_bracket(tokens: &[Token<'_>], start: usize, bracket: Bracket) -> Option<usize> {
    let mut depth = 0u32;
    for (i, token) in tokens.iter().enumerate().skip(start) {
        if token.is(bracket.open()) {
            depth += 1;
        } else if token.is(bracket.close()) {
            // A closer before any opener cannot match.
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Split `tokens` on `separator` tokens that are not nested in any bracket.
///
/// Separators themselves are dropped, and so are empty segments.
pub fn split_top_level<'t, 's>(tokens: &'t [Token<'s>], separator: &str) -> Vec<&'t [Token<'s>]> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if Bracket::from_open(token.text).is_some() {
            depth += 1;
        } else if Bracket::from_close(token.text).is_some() {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && token.is(separator) {
            if start < i {
                segments.push(&tokens[start..i]);
            }
            start = i + 1;
        }
    }
    if start < tokens.len() {
        segments.push(&tokens[start..]);
    }
    segments
}

/// The exclusive end of the single type term starting at `start`.
///
/// A term is one plain token, or a bracketed or generic construct starting
/// there together with its closing bracket. Function terms include their
/// return type, and module references run to the end of the sequence. An
/// unbalanced term runs to the end so that its parse reports the problem.
pub fn term_end(tokens: &[Token<'_>], mut start: usize) -> usize {
    // A chain of `function(): function(): ...` return types is followed
    // link by link.
    loop {
        let Some(first) = tokens.get(start) else {
            return start;
        };
        let next = tokens.get(start + 1);
        let next_is = |text: &str| next.is_some_and(|t| t.is(text));

        let close = match first.text {
            "(" => find_matching_bracket(tokens, start, Bracket::Paren),
            "{" => find_matching_bracket(tokens, start, Bracket::Brace),
            text if text.eq_ignore_ascii_case("module") && next_is(":") => return tokens.len(),
            text if text.eq_ignore_ascii_case("function") && next_is("(") => {
                match find_matching_bracket(tokens, start + 1, Bracket::Paren) {
                    Some(close) if tokens.get(close + 1).is_some_and(|t| t.is(":")) => {
                        start = close + 2;
                        continue;
                    }
                    other => other,
                }
            }
            _ if next_is("<") => find_matching_bracket(tokens, start + 1, Bracket::Angle),
            _ => Some(start),
        };
        return close.map_or(tokens.len(), |close| close + 1);
    }
}
