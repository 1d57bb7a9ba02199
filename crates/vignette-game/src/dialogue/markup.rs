//! Inline dialogue markup
//!
//! Messages may contain single-character style tags: `[b]bold[/b]`. The
//! parser strips them and records, for every remaining character, the set
//! of tags open at that point. Anything that does not match the tag shape
//! is kept as literal text.

use std::collections::BTreeSet;

/// Known style identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextStyle {
    /// `s`: pulsing scale
    ScalePulse,
    /// `w`: wobble
    Wobble,
    /// `u`: vertical bob
    Bob,
    /// `b`
    Bold,
    /// `i`
    Italic,
}

impl TextStyle {
    /// Map a tag identifier to a style. Unknown identifiers return `None`
    /// but are still tracked by the parser.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            's' => Some(Self::ScalePulse),
            'w' => Some(Self::Wobble),
            'u' => Some(Self::Bob),
            'b' => Some(Self::Bold),
            'i' => Some(Self::Italic),
            _ => None,
        }
    }

    pub fn tag(&self) -> char {
        match self {
            Self::ScalePulse => 's',
            Self::Wobble => 'w',
            Self::Bob => 'u',
            Self::Bold => 'b',
            Self::Italic => 'i',
        }
    }
}

/// Set of tag identifiers active on one character
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<char>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tag: char) -> bool {
        self.0.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Recognized styles, skipping unknown identifiers
    pub fn styles(&self) -> impl Iterator<Item = TextStyle> + '_ {
        self.0.iter().filter_map(|&c| TextStyle::from_tag(c))
    }

    fn insert(&mut self, tag: char) {
        self.0.insert(tag);
    }

    fn remove(&mut self, tag: char) {
        self.0.remove(&tag);
    }
}

impl<const N: usize> From<[char; N]> for TagSet {
    fn from(tags: [char; N]) -> Self {
        Self(tags.into_iter().collect())
    }
}

/// A message with markup removed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedMessage {
    /// Plain text, one entry per character
    pub text: Vec<char>,
    /// Active tags per character; same length as `text`
    pub formats: Vec<TagSet>,
}

impl ParsedMessage {
    /// Number of plain-text characters
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The plain text as a `String`
    pub fn plain_text(&self) -> String {
        self.text.iter().collect()
    }
}

/// Parse a raw message into plain text plus per-character tag sets.
pub fn parse(raw: &str) -> ParsedMessage {
    let chars: Vec<char> = raw.chars().collect();
    let mut active = TagSet::new();
    let mut parsed = ParsedMessage::default();

    let mut i = 0;
    while i < chars.len() {
        let at = |offset: usize| chars.get(i + offset).copied();
        let open = (chars[i] == '[' && at(2) == Some(']')).then(|| at(1)).flatten();
        let close = (chars[i] == '[' && at(1) == Some('/') && at(3) == Some(']'))
            .then(|| at(2))
            .flatten();

        if let Some(tag) = open {
            active.insert(tag);
            i += 3;
        } else if let Some(tag) = close {
            active.remove(tag);
            i += 4;
        } else {
            parsed.text.push(chars[i]);
            parsed.formats.push(active.clone());
            i += 1;
        }
    }

    parsed
}
