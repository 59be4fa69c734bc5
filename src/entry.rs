// entry.rs

use std::borrow::Borrow;
use std::fmt;

/// One recorded line of input.
///
/// Entries are never mutated once stored. Prefix comparisons count Unicode
/// scalar values, not bytes, so a prefix length of 2 on `"éa"` covers both
/// characters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Entry {
    text: String,
}

impl Entry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// UTF-8 form written to the history file.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of characters in the entry.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the first `n` characters of `prefix` open this entry.
    ///
    /// If `prefix` is shorter than `n` characters, the whole of `prefix` is
    /// used.
    pub fn starts_with_chars(&self, prefix: &str, n: usize) -> bool {
        let mut own = self.text.chars();
        prefix.chars().take(n).all(|c| own.next() == Some(c))
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Entry {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl AsRef<str> for Entry {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Borrow<str> for Entry {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for Entry {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Entry {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
