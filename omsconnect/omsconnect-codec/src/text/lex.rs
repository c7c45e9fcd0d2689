//! Delimiter-aware tokenizer over the source text.
//!
//! Tokens are either a single delimiter (`{ } [ ] : , "`) or a maximal run of
//! other characters. A backslash escapes the following character, so an
//! escaped delimiter stays inside its token. Token text is compared after
//! trimming, and whitespace-only runs are skipped.

pub(crate) const DELIMITERS: [char; 7] = ['{', '}', '[', ']', ':', ',', '"'];

pub(crate) fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    /// Trimmed token text.
    pub text: &'a str,
    /// Byte offset of the trimmed text.
    pub start: usize,
    /// Byte offset just past the raw token.
    pub end: usize,
}

impl Token<'_> {
    pub fn is_delimiter(&self) -> bool {
        let mut chars = self.text.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if is_delimiter(c))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn rewind(&mut self, position: usize) {
        self.pos = position;
    }

    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.rest().trim().is_empty()
    }

    /// End offset of the raw token starting at `start`.
    fn raw_end(&self, start: usize) -> usize {
        let mut escaped = false;
        for (offset, c) in self.src[start..].char_indices() {
            if c == '\\' {
                escaped = !escaped;
                continue;
            }
            if is_delimiter(c) && !escaped {
                return if offset == 0 { start + c.len_utf8() } else { start + offset };
            }
            escaped = false;
        }
        self.src.len()
    }

    /// Next non-blank token without consuming it.
    pub fn peek(&self) -> Option<Token<'a>> {
        let mut start = self.pos;
        while start < self.src.len() {
            let end = self.raw_end(start);
            let raw = &self.src[start..end];
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                let leading = raw.len() - raw.trim_start().len();
                return Some(Token {
                    text: trimmed,
                    start: start + leading,
                    end,
                });
            }
            start = end;
        }
        None
    }

    pub fn next_token(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.pos = token.end;
        Some(token)
    }

    /// Consume the next token if its trimmed text equals `expected`.
    pub fn can_consume(&mut self, expected: &str) -> bool {
        match self.peek() {
            Some(token) if token.text == expected => {
                self.pos = token.end;
                true
            }
            _ => false,
        }
    }

    /// Read the body of a quoted string whose opening quote was just
    /// consumed, up to and including the closing quote.
    ///
    /// `\\` and `\"` are unescaped; any other backslash is kept as is.
    pub fn quoted_body(&mut self) -> Option<String> {
        let mut out = String::new();
        let mut chars = self.src[self.pos..].char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            match c {
                '\\' => match chars.peek() {
                    Some(&(_, next @ ('\\' | '"'))) => {
                        out.push(next);
                        chars.next();
                    }
                    _ => out.push('\\'),
                },
                '"' => {
                    self.pos += offset + 1;
                    return Some(out);
                }
                _ => out.push(c),
            }
        }
        None
    }
}

/// Undo backslash escaping in a bare token.
pub(crate) fn unescape(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\\' || is_delimiter(next) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<&str> {
        let mut lexer = Lexer::new(src);
        std::iter::from_fn(|| lexer.next_token().map(|t| t.text)).collect()
    }

    #[test]
    fn splits_on_delimiters_and_skips_blanks() {
        assert_eq!(
            tokens(r#"{"a" : [1, 2 ]}"#),
            vec!["{", "\"", "a", "\"", ":", "[", "1", ",", "2", "]", "}"]
        );
    }

    #[test]
    fn escaped_delimiter_stays_in_token() {
        assert_eq!(tokens(r"a\,b,c"), vec![r"a\,b", ",", "c"]);
        assert_eq!(unescape(r"a\,b"), "a,b");
        assert_eq!(unescape(r"a\nb"), r"a\nb");
    }

    #[test]
    fn quoted_body_unescapes() {
        let mut lexer = Lexer::new(r#"a \"b\" \\ c" tail"#);
        assert_eq!(lexer.quoted_body().as_deref(), Some(r#"a "b" \ c"#));
        assert_eq!(lexer.rest(), " tail");

        let mut open = Lexer::new("never closed");
        assert_eq!(open.quoted_body(), None);
    }
}
