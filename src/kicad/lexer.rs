//! Tokenizer for KiCad s-expression files.

use std::iter::Peekable;
use std::str::CharIndices;

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    /// Bare word or unquoted string literal.
    Atom(String),
}

/// Lexing failure with the byte offset where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub offset: usize,
    pub message: String,
}

/// Streaming tokenizer over the file contents.
///
/// Bare atoms end at whitespace or a parenthesis. Quoted atoms support the
/// `\"` and `\\` escapes; other escapes are kept verbatim.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn quoted(&mut self, start: usize) -> Result<Token, LexError> {
        let mut value = String::new();
        while let Some((_, c)) = self.chars.next() {
            match c {
                '"' => return Ok(Token::Atom(value)),
                '\\' => match self.chars.next() {
                    Some((_, '"')) => value.push('"'),
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, other)) => {
                        value.push('\\');
                        value.push(other);
                    }
                    None => break,
                },
                _ => value.push(c),
            }
        }
        Err(LexError {
            offset: start,
            message: "unterminated string".to_string(),
        })
    }

    fn bare(&mut self, start: usize) -> Token {
        let mut end = self.input.len();
        while let Some(&(i, c)) = self.chars.peek() {
            if c.is_whitespace() || c == '(' || c == ')' {
                end = i;
                break;
            }
            self.chars.next();
        }
        Token::Atom(self.input[start..end].to_string())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let (i, c) = self.chars.next()?;
        Some(match c {
            '(' => Ok(Token::Open),
            ')' => Ok(Token::Close),
            '"' => self.quoted(i),
            _ => Ok(self.bare(i)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::new(input).collect::<Result<_, _>>().unwrap()
    }

    fn atom(s: &str) -> Token {
        Token::Atom(s.to_string())
    }

    #[test]
    fn test_parens_split_from_words() {
        assert_eq!(
            lex("(layer F.Cu)"),
            vec![Token::Open, atom("layer"), atom("F.Cu"), Token::Close]
        );
        assert_eq!(
            lex("((a)b)"),
            vec![
                Token::Open,
                Token::Open,
                atom("a"),
                Token::Close,
                atom("b"),
                Token::Close
            ]
        );
    }

    #[test]
    fn test_quoted_strings() {
        assert_eq!(
            lex(r#"(property "Reference" "R 1" "a\"b\\c")"#),
            vec![
                Token::Open,
                atom("property"),
                atom("Reference"),
                atom("R 1"),
                atom("a\"b\\c"),
                Token::Close
            ]
        );
        assert_eq!(lex(r#""""#), vec![atom("")]);
        assert_eq!(lex(r#""(x)""#), vec![atom("(x)")]);
    }

    #[test]
    fn test_whitespace_and_newlines() {
        assert_eq!(lex("  \n\t(pad\n 1 \r\n smd)  "), lex("(pad 1 smd)"));
        assert!(lex("   ").is_empty());
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("(a \"oops)")
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert_eq!(err.offset, 3);
    }
}
