//! Typewriter dialogue: markup parsing, reveal pacing and the session engine

mod engine;
mod markup;
mod reveal;
mod view;

pub use engine::{DialogueEngine, DialogueEvent, DialoguePhase};
pub use markup::{parse, ParsedMessage, TagSet, TextStyle};
pub use reveal::{RevealConfig, RevealHandle, RevealTimer};
pub use view::{DialogueView, Letter, Word};
