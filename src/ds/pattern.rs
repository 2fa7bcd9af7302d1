use crate::Error;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::OnceLock;

/// A regular expression along with the body and flags it was written with.
///
/// The textual form is `/body/flags`, the same shape a JavaScript `RegExp` prints as. The body is
/// compiled with the [`regex`] crate. Flags `i`, `m`, `s` and `x` configure the compiled
/// expression; `g`, `u` and `y` have no meaning to `regex` and are only carried through the
/// textual form.
///
/// # Example
/// ```rust
/// # use dserd::*;
/// let p = Pattern::parse("/ab+c/i").unwrap();
/// assert_eq!(p.body(), "ab+c");
/// assert_eq!(p.flags(), "i");
/// assert!(p.regex().is_match("xABBC"));
/// assert_eq!(p.to_string(), "/ab+c/i");
///
/// assert!(Pattern::parse("ab+c").is_err());
/// ```
#[derive(Clone)]
pub struct Pattern {
    body: String,
    flags: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a new pattern from a body and flags.
    pub fn new<B: Into<String>, F: Into<String>>(body: B, flags: F) -> Result<Self, Error> {
        let body = body.into();
        let flags = flags.into();

        let mut builder = RegexBuilder::new(&body);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                _ => &mut builder,
            };
        }
        let regex = builder.build()?;

        Ok(Self { body, flags, regex })
    }

    /// Parse the `/body/flags` textual form.
    ///
    /// Text not of that shape is [`Error::MalformedPattern`]; flags are optional.
    pub fn parse(text: &str) -> Result<Self, Error> {
        static SHAPE: OnceLock<Regex> = OnceLock::new();
        let shape = SHAPE.get_or_init(|| {
            Regex::new(r"^/(.*?)/([gimsuxy]*)$").expect("pattern shape regex is valid")
        });

        let caps = shape
            .captures(text)
            .ok_or_else(|| Error::MalformedPattern(text.to_owned()))?;
        let body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let flags = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

        Pattern::new(body, flags)
    }

    /// The expression source.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The flags, possibly empty.
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// The compiled expression.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Patterns are equal if they were written the same.
impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body && self.flags == other.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "/{}/{}", self.body, self.flags)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pattern({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_takes_everything_up_to_the_last_slash() {
        let p = Pattern::parse("/a/b/gm").unwrap();
        assert_eq!(p.body(), "a/b");
        assert_eq!(p.flags(), "gm");
        assert!(p.regex().is_match("x\na/b"));
    }

    #[test]
    fn flags_default_to_empty() {
        let p = Pattern::parse("/^x$/").unwrap();
        assert_eq!(p.flags(), "");
        assert!(p.regex().is_match("x"));
        assert!(!p.regex().is_match("X"));
    }

    #[test]
    fn malformed_text() {
        assert!(matches!(
            Pattern::parse("no slashes"),
            Err(Error::MalformedPattern(_))
        ));
        assert!(matches!(
            Pattern::parse("/abc/q"),
            Err(Error::MalformedPattern(_))
        ));
        assert!(matches!(Pattern::parse("/(/"), Err(Error::Pattern(_))));
    }
}
