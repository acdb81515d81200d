//! Splits a type expression into significant tokens.

use jsdts_core::text::TextRange;
use std::fmt;

/// Characters that split a type expression and are kept as tokens of their own.
pub const DELIMITERS: [char; 9] = ['<', '>', ',', '(', ')', '|', '{', '}', ':'];

/// A non-empty, whitespace-trimmed fragment of a type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    pub text: &'s str,
    pub range: TextRange,
}

impl Token<'_> {
    /// Whether this token is exactly `text`.
    #[inline]
    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }

    /// Whether this token is one of the [`DELIMITERS`].
    #[inline]
    pub fn is_delimiter(&self) -> bool {
        let mut chars = self.text.chars();
        matches!((chars.next(), chars.next()), (Some(ch), None) if DELIMITERS.contains(&ch))
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Tokenize a type expression.
///
/// Never fails: any string, including the empty string, yields a (possibly
/// empty) token sequence in source order.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (i, ch) in source.char_indices() {
        if DELIMITERS.contains(&ch) {
            push_fragment(source, start, i, &mut tokens);
            tokens.push(Token {
                text: &source[i..i + 1],
                range: TextRange::new(i as u32, (i + 1) as u32),
            });
            start = i + 1;
        }
    }
    push_fragment(source, start, source.len(), &mut tokens);
    tokens
}

fn push_fragment<'s>(source: &'s str, start: usize, end: usize, tokens: &mut Vec<Token<'s>>) {
    let fragment = &source[start..end];
    let text = fragment.trim();
    if text.is_empty() {
        return;
    }
    let pos = start + (fragment.len() - fragment.trim_start().len());
    tokens.push(Token {
        text,
        range: TextRange::new(pos as u32, (pos + text.len()) as u32),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<&str> {
        tokenize(source).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_tokenize_generic() {
        assert_eq!(texts("Array.<string>"), vec!["Array.", "<", "string", ">"]);
    }

    #[test]
    fn test_tokenize_trims_whitespace() {
        assert_eq!(
            texts(" function( a ,  b ) : boolean "),
            vec!["function", "(", "a", ",", "b", ")", ":", "boolean"]
        );
    }

    #[test]
    fn test_tokenize_object_and_module() {
        assert_eq!(
            texts("{a: string}|module:foo/bar~Baz"),
            vec!["{", "a", ":", "string", "}", "|", "module", ":", "foo/bar~Baz"]
        );
    }

    #[test]
    fn test_tokenize_empty_and_blank() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn test_token_ranges_point_into_source() {
        let source = "Object.< string , number >";
        for token in tokenize(source) {
            assert_eq!(token.range.text(source), token.text);
        }
        let tokens = tokenize(source);
        assert_eq!(tokens[2].range.pos, 9);
        assert!(tokens[1].is_delimiter());
        assert!(!tokens[2].is_delimiter());
        assert!(tokens[2].is("string"));
    }

    #[test]
    fn test_tokenize_keeps_inner_spaces_and_unicode() {
        assert_eq!(texts("Größe | my type"), vec!["Größe", "|", "my type"]);
    }
}
