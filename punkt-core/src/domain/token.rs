//! Token model for the Punkt pipeline
//!
//! A token is one scanned substring together with its normalized type and
//! the boolean annotations written by the annotation passes.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Sentinel type shared by all numeral-like tokens
pub const NUMBER_TYPE: &str = "##number##";

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-?[.,]?\d[\d,.\-]*\.?$").expect("number pattern is a valid regex")
    })
}

/// Normalize a raw token value into its type
///
/// Lowercases the value and maps numerals (optional sign or leading
/// separator, digits, interior separators, optional final period) to
/// [`NUMBER_TYPE`].
pub fn normalize_type(value: &str) -> String {
    let lowered = value.to_lowercase();
    if number_pattern().is_match(&lowered) {
        NUMBER_TYPE.to_string()
    } else {
        lowered
    }
}

/// Annotation flags of a token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TokenFlags(u8);

impl TokenFlags {
    pub const NONE: Self = Self(0);
    pub const PARAGRAPH_START: Self = Self(1 << 0);
    pub const LINE_START: Self = Self(1 << 1);
    pub const SENTENCE_BREAK: Self = Self(1 << 2);
    pub const ABBR: Self = Self(1 << 3);
    pub const ELLIPSIS: Self = Self(1 << 4);

    /// Check if every flag set in `other` is set in `self`
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set or clear the flags in `other`
    pub fn set(&mut self, other: Self, value: bool) {
        if value {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl std::ops::BitOr for TokenFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Case of the first character of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterCase {
    Upper,
    Lower,
    None,
}

/// A classified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    typ: String,
    flags: TokenFlags,
}

impl Token {
    /// Create a token from its surface text
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let typ = normalize_type(&value);
        Self {
            value,
            typ,
            flags: TokenFlags::NONE,
        }
    }

    /// Create a token with initial flags
    pub fn with_flags(value: impl Into<String>, flags: TokenFlags) -> Self {
        let mut token = Self::new(value);
        token.flags = flags;
        token
    }

    /// Surface text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Normalized type
    pub fn typ(&self) -> &str {
        &self.typ
    }

    pub fn flags(&self) -> TokenFlags {
        self.flags
    }

    pub fn is_paragraph_start(&self) -> bool {
        self.flags.contains(TokenFlags::PARAGRAPH_START)
    }

    pub fn set_paragraph_start(&mut self, value: bool) {
        self.flags.set(TokenFlags::PARAGRAPH_START, value);
    }

    pub fn is_line_start(&self) -> bool {
        self.flags.contains(TokenFlags::LINE_START)
    }

    pub fn set_line_start(&mut self, value: bool) {
        self.flags.set(TokenFlags::LINE_START, value);
    }

    pub fn is_sentence_break(&self) -> bool {
        self.flags.contains(TokenFlags::SENTENCE_BREAK)
    }

    pub fn set_sentence_break(&mut self, value: bool) {
        self.flags.set(TokenFlags::SENTENCE_BREAK, value);
    }

    pub fn is_abbr(&self) -> bool {
        self.flags.contains(TokenFlags::ABBR)
    }

    pub fn set_abbr(&mut self, value: bool) {
        self.flags.set(TokenFlags::ABBR, value);
    }

    pub fn is_ellipsis(&self) -> bool {
        self.flags.contains(TokenFlags::ELLIPSIS)
    }

    pub fn set_ellipsis(&mut self, value: bool) {
        self.flags.set(TokenFlags::ELLIPSIS, value);
    }

    /// Type with one trailing period removed (types longer than one char)
    pub fn type_without_period(&self) -> &str {
        if self.typ.len() > 1 {
            if let Some(stripped) = self.typ.strip_suffix('.') {
                return stripped;
            }
        }
        &self.typ
    }

    /// Type used for lookups: the period is dropped only for sentence ends
    ///
    /// An abbreviation keeps its period in the key, a real sentence end
    /// does not.
    pub fn type_without_sentence_period(&self) -> &str {
        if self.is_sentence_break() {
            self.type_without_period()
        } else {
            &self.typ
        }
    }

    pub fn ends_with_period(&self) -> bool {
        self.value.ends_with('.')
    }

    pub fn first_upper(&self) -> bool {
        self.value.chars().next().is_some_and(char::is_uppercase)
    }

    pub fn first_lower(&self) -> bool {
        self.value.chars().next().is_some_and(char::is_lowercase)
    }

    pub fn first_case(&self) -> LetterCase {
        if self.first_lower() {
            LetterCase::Lower
        } else if self.first_upper() {
            LetterCase::Upper
        } else {
            LetterCase::None
        }
    }

    /// Two or more periods and nothing else
    pub fn matches_ellipsis(&self) -> bool {
        self.value.len() >= 2 && self.value.chars().all(|c| c == '.')
    }

    pub fn is_number(&self) -> bool {
        self.typ.starts_with(NUMBER_TYPE)
    }

    /// A single letter followed by a period, e.g. `C.`
    ///
    /// Letters are Unicode alphabetic characters; `_` is not a letter here.
    pub fn is_initial(&self) -> bool {
        let mut chars = self.value.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(c), Some('.'), None) if c.is_alphabetic()
        )
    }

    /// Letters only (Unicode alphabetic, no `_`)
    pub fn is_alpha(&self) -> bool {
        !self.value.is_empty() && self.value.chars().all(char::is_alphabetic)
    }

    /// Type contains at least one letter
    ///
    /// Numbers count as non-punctuation, since their type is [`NUMBER_TYPE`].
    pub fn is_non_punctuation(&self) -> bool {
        self.typ.chars().any(char::is_alphabetic)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.value)?;
        if self.is_abbr() {
            f.write_str("<A>")?;
        }
        if self.is_ellipsis() {
            f.write_str("<E>")?;
        }
        if self.is_sentence_break() {
            f.write_str("<S>")?;
        }
        f.write_str(">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_has_no_flags() {
        let token = Token::new("Test");
        assert!(!token.is_abbr());
        assert!(!token.is_sentence_break());
        assert_eq!(token.flags(), TokenFlags::NONE);
    }

    #[test]
    fn test_flags() {
        let mut token = Token::new("Test");
        token.set_abbr(true);
        assert!(token.is_abbr());
        token.set_abbr(false);
        assert!(!token.is_abbr());

        let token = Token::with_flags("Test", TokenFlags::LINE_START | TokenFlags::PARAGRAPH_START);
        assert!(token.is_line_start());
        assert!(token.is_paragraph_start());
        assert!(!token.is_ellipsis());
    }

    #[test]
    fn test_type_attributes() {
        assert_eq!(Token::new("Test").typ(), "test");
        assert_eq!(Token::new("Test.").typ(), "test.");
        assert_eq!(Token::new("Índico").typ(), "índico");
    }

    #[test]
    fn test_number_types() {
        assert_eq!(Token::new("123").typ(), NUMBER_TYPE);
        assert_eq!(Token::new("123.").typ(), NUMBER_TYPE);
        assert_eq!(Token::new("-1,000.50").typ(), NUMBER_TYPE);
        assert_eq!(Token::new(".5").typ(), NUMBER_TYPE);
        assert_eq!(Token::new("1990s").typ(), "1990s");
        assert!(Token::new("42").is_number());
    }

    #[test]
    fn test_type_without_period() {
        assert_eq!(Token::new("Test").type_without_period(), "test");
        assert_eq!(Token::new("Test.").type_without_period(), "test");
        assert_eq!(Token::new("123.").type_without_period(), NUMBER_TYPE);
        assert_eq!(Token::new(".").type_without_period(), ".");
    }

    #[test]
    fn test_type_without_period_round_trip() {
        for value in ["apple", "Índico", "self-conscious", "42", ",", "..foo"] {
            let token = Token::new(value);
            assert_eq!(token.type_without_period(), token.typ());
        }
    }

    #[test]
    fn test_type_without_sentence_period() {
        let token = Token::new("Test");
        assert_eq!(token.type_without_sentence_period(), "test");

        let mut token = Token::new("Test.");
        assert_eq!(token.type_without_sentence_period(), "test.");
        token.set_sentence_break(true);
        assert_eq!(token.type_without_sentence_period(), "test");
    }

    #[test]
    fn test_ends_with_period() {
        assert!(!Token::new("Test").ends_with_period());
        assert!(Token::new("Test.").ends_with_period());
    }

    #[test]
    fn test_first_case() {
        assert!(Token::new("Test").first_upper());
        assert!(Token::new("Índico").first_upper());
        assert!(!Token::new("test.").first_upper());

        assert!(!Token::new("Test").first_lower());
        assert!(Token::new("índico").first_lower());
        assert!(Token::new("test.").first_lower());

        assert_eq!(Token::new("Über").first_case(), LetterCase::Upper);
        assert_eq!(Token::new("über").first_case(), LetterCase::Lower);
        assert_eq!(Token::new("42").first_case(), LetterCase::None);
    }

    #[test]
    fn test_ellipsis() {
        assert!(Token::new("...").matches_ellipsis());
        assert!(Token::new("..").matches_ellipsis());
        assert!(!Token::new(".").matches_ellipsis());
        assert!(!Token::new("..foo").matches_ellipsis());
    }

    #[test]
    fn test_initial() {
        assert!(Token::new("C.").is_initial());
        assert!(Token::new("É.").is_initial());
        assert!(!Token::new("B.M.").is_initial());
        assert!(!Token::new("4.").is_initial());
        assert!(!Token::new("_.").is_initial());
    }

    #[test]
    fn test_alpha_and_non_punctuation() {
        assert!(Token::new("foo").is_alpha());
        assert!(!Token::new("!").is_alpha());
        assert!(!Token::new("foo.").is_alpha());

        assert!(Token::new("foo").is_non_punctuation());
        assert!(Token::new("e.g.").is_non_punctuation());
        assert!(!Token::new("!").is_non_punctuation());
        // The number sentinel contains letters
        assert!(Token::new("123").is_non_punctuation());
        assert!(Token::new("5.").is_non_punctuation());
    }

    #[test]
    fn test_display() {
        let mut token = Token::new("foo");
        token.set_abbr(true);
        token.set_sentence_break(true);
        token.set_ellipsis(true);
        assert_eq!(token.to_string(), "<foo<A><E><S>>");
        assert_eq!(Token::new("bar").to_string(), "<bar>");
    }
}
