//! Splits markup into text runs and tags.
//!
//! A `[` opens a tag only when its body (up to the next `]`) starts with a
//! lowercase ASCII letter, `#`, `@` or `/` and contains no other `[`.
//! Anything else, like `array[0]` or `[ x ]`, stays literal text. A `\[`
//! is always a literal `[`.

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Literal text, escapes already removed.
    Text(&'a str),
    /// `[spec]`
    Open(&'a str),
    /// `[/]` (None) or `[/spec]`.
    Close(Option<&'a str>),
}

/// Tokenizer over a markup string, yielding each token with its byte offset.
pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the tag body if a valid tag starts at the beginning of `s`.
    fn tag_body(s: &str) -> Option<&str> {
        let close = s.find(']')?;
        let body = &s[1..close];
        let first = body.chars().next()?;
        let starts_ok = first.is_ascii_lowercase() || matches!(first, '#' | '@' | '/');
        if starts_ok && !body.contains('[') {
            Some(body)
        } else {
            None
        }
    }

    /// Finds the end of a literal text run: the next `[` or `\[`.
    fn text_end(s: &str) -> usize {
        let bytes = s.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'[' => return i,
                b'\\' if bytes.get(i + 1) == Some(&b'[') => return i,
                _ => i += 1,
            }
        }
        bytes.len()
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = (usize, Token<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let start = self.pos;
        let remaining = &self.input[start..];

        if remaining.starts_with("\\[") {
            self.pos += 2;
            return Some((start, Token::Text(&remaining[1..2])));
        }

        if remaining.starts_with('[') {
            return match Self::tag_body(remaining) {
                Some(body) => {
                    self.pos += body.len() + 2;
                    let token = match body.strip_prefix('/') {
                        Some(spec) if spec.trim().is_empty() => Token::Close(None),
                        Some(spec) => Token::Close(Some(spec.trim())),
                        None => Token::Open(body),
                    };
                    Some((start, token))
                }
                None => {
                    self.pos += 1;
                    Some((start, Token::Text(&remaining[..1])))
                }
            };
        }

        let end = Self::text_end(remaining);
        self.pos += end;
        Some((start, Token::Text(&remaining[..end])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        Tokenizer::new(input).map(|(_, t)| t).collect()
    }

    #[test]
    fn plain_text() {
        assert_eq!(tokens("hello world"), vec![Token::Text("hello world")]);
        assert!(tokens("").is_empty());
    }

    #[test]
    fn open_and_close() {
        assert_eq!(
            tokens("[bold red]hi[/bold red]"),
            vec![
                Token::Open("bold red"),
                Token::Text("hi"),
                Token::Close(Some("bold red")),
            ]
        );
        assert_eq!(
            tokens("[#ff0000]x[/]"),
            vec![Token::Open("#ff0000"), Token::Text("x"), Token::Close(None)]
        );
    }

    #[test]
    fn non_tags_are_literal() {
        assert_eq!(
            tokens("array[0]"),
            vec![Token::Text("array"), Token::Text("["), Token::Text("0]")]
        );
        assert_eq!(
            tokens("[ x ]"),
            vec![Token::Text("["), Token::Text(" x ]")]
        );
        assert_eq!(tokens("[Bold]"), vec![Token::Text("["), Token::Text("Bold]")]);
        assert_eq!(tokens("[]"), vec![Token::Text("["), Token::Text("]")]);
        assert_eq!(tokens("[bold"), vec![Token::Text("["), Token::Text("bold")]);
    }

    #[test]
    fn nested_bracket_in_body_is_literal() {
        assert_eq!(
            tokens("[[bold]x"),
            vec![Token::Text("["), Token::Open("bold"), Token::Text("x")]
        );
    }

    #[test]
    fn escaped_bracket() {
        assert_eq!(
            tokens("a\\[bold]b"),
            vec![Token::Text("a"), Token::Text("["), Token::Text("bold]b")]
        );
        assert_eq!(
            tokens("a\\b"),
            vec![Token::Text("a\\b")]
        );
    }

    #[test]
    fn offsets_point_at_tokens() {
        let offsets: Vec<usize> = Tokenizer::new("ab[i]c[/i]")
            .map(|(offset, _)| offset)
            .collect();
        assert_eq!(offsets, vec![0, 2, 5, 6]);
    }

    #[test]
    fn multibyte_text() {
        assert_eq!(
            tokens("日本[b]語[/b]"),
            vec![
                Token::Text("日本"),
                Token::Open("b"),
                Token::Text("語"),
                Token::Close(Some("b")),
            ]
        );
    }
}
