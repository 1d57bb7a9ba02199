//! Presentation projection of the active message
//!
//! The presentation layer lays letters out word by word so a word never
//! breaks mid-reveal; it gets the words up to the end of the word currently
//! being revealed, each letter tagged with its index, style set and whether
//! it is shown yet.

use super::engine::DialoguePhase;
use super::markup::{ParsedMessage, TagSet};

/// One letter of the active message
#[derive(Debug, Clone, PartialEq)]
pub struct Letter<'a> {
    /// Index into the plain text; drives per-letter animation offsets
    pub index: usize,
    pub ch: char,
    pub tags: &'a TagSet,
    pub shown: bool,
}

/// A whitespace-delimited run of letters
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Word<'a> {
    pub letters: Vec<Letter<'a>>,
}

impl Word<'_> {
    /// The word's characters, shown or not
    pub fn text(&self) -> String {
        self.letters.iter().map(|l| l.ch).collect()
    }
}

/// Snapshot of what the dialogue box should display this frame
#[derive(Debug, Clone)]
pub struct DialogueView<'a> {
    pub phase: DialoguePhase,
    pub message_index: usize,
    pub message_count: usize,
    pub words: Vec<Word<'a>>,
    /// Choices may be offered: the last message is fully revealed
    pub choices_visible: bool,
}

impl<'a> DialogueView<'a> {
    /// Words of `message` up to the end of the word containing `reveal_index`
    pub fn words(message: &'a ParsedMessage, reveal_index: i64) -> Vec<Word<'a>> {
        if reveal_index < 0 {
            return Vec::new();
        }
        let cursor = (reveal_index as usize).min(message.len());
        let end = message.text[cursor..]
            .iter()
            .position(|c| c.is_whitespace())
            .map_or(message.len(), |offset| cursor + offset);

        let mut words = Vec::new();
        let mut counter = 0;
        for chunk in message.text[..end].split(|c| c.is_whitespace()) {
            let letters = chunk
                .iter()
                .enumerate()
                .map(|(i, &ch)| {
                    let index = counter + i;
                    Letter {
                        index,
                        ch,
                        tags: &message.formats[index],
                        shown: index as i64 <= reveal_index,
                    }
                })
                .collect();
            words.push(Word { letters });
            counter += chunk.len() + 1;
        }
        words
    }

    /// Text of every shown letter, words joined by single spaces
    pub fn shown_text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.letters.iter().filter(|l| l.shown).map(|l| l.ch).collect::<String>())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
