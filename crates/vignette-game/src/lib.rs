//! Vignette Game - movement, interaction and dialogue
//!
//! Provides the kinematic player body, proximity triggers, the typewriter
//! dialogue engine and action-based input handling.

pub mod appearance;
pub mod dialogue;
pub mod input;
pub mod interaction;
pub mod player;

pub use appearance::{Appearance, AppearanceConfig};
pub use dialogue::{
    DialogueEngine, DialogueEvent, DialoguePhase, DialogueView, ParsedMessage, RevealConfig,
    TagSet, TextStyle,
};
pub use input::{InputAction, InputBinding, InputBindings, InputHandler, InputState};
pub use interaction::{
    EntryId, InteractAction, Interaction, PromptChange, ProximityEntry, ProximityTrigger,
    TriggerConfig, TriggerMode, TriggerOutcome,
};
pub use player::{DirectionInput, FrictionMode, KinematicBody, MovementConfig};
