//! Proximity triggers for authored interaction points
//!
//! Each frame the body's position is tested against every registered point.
//! While any point is in range the host shows an "interact" prompt; when the
//! player requests an interaction, every in-range point fires and its action
//! is handed back to the caller. The registry never touches UI or dialogue
//! state itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Trigger radius shared by every authored point
pub const DEFAULT_TRIGGER_RADIUS: f32 = 0.5;

/// Identifier of a registered proximity entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u32);

/// What happens when an entry fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractAction {
    /// Open a dialogue session with these raw (marked-up) messages
    OpenDialogue { speaker: String, messages: Vec<String> },
    /// A host-defined event, identified by key
    Custom { key: String },
}

/// How the interact request is sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerMode {
    /// Fire on every update the request is held while in range
    Level,
    /// Fire only on the update where the request goes from released to held
    Edge,
}

/// Trigger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Radius given to points added with [`ProximityTrigger::add_point`]
    pub radius: f32,
    /// Interact request sampling
    pub mode: TriggerMode,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_TRIGGER_RADIUS,
            mode: TriggerMode::Edge,
        }
    }
}

/// An authored world point with an attached action
#[derive(Debug, Clone)]
pub struct ProximityEntry {
    pub origin: Vec2,
    pub radius: f32,
    pub action: InteractAction,
}

impl ProximityEntry {
    /// Whether `position` is strictly inside the trigger radius
    pub fn contains(&self, position: Vec2) -> bool {
        position.distance(self.origin) < self.radius
    }
}

/// Change to the "interact available" prompt produced by an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChange {
    Shown,
    Hidden,
    Unchanged,
}

/// An entry that fired this update
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub id: EntryId,
    pub action: InteractAction,
}

/// Result of one trigger update
#[derive(Debug, Clone)]
pub struct TriggerOutcome {
    pub prompt: PromptChange,
    pub fired: Vec<Interaction>,
}

/// Registry of proximity entries
#[derive(Debug, Default)]
pub struct ProximityTrigger {
    pub config: TriggerConfig,
    entries: Vec<ProximityEntry>,
    in_range: Vec<EntryId>,
    prompt_visible: bool,
    last_request: bool,
}

impl ProximityTrigger {
    /// Create an empty registry with default config
    pub fn new() -> Self {
        Self::with_config(TriggerConfig::default())
    }

    /// Create an empty registry with custom config
    pub fn with_config(config: TriggerConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            in_range: Vec::new(),
            prompt_visible: false,
            last_request: false,
        }
    }

    /// Register an entry
    pub fn add(&mut self, entry: ProximityEntry) -> EntryId {
        let id = EntryId(self.entries.len() as u32);
        self.entries.push(entry);
        id
    }

    /// Register a point with the configured radius
    pub fn add_point(&mut self, origin: Vec2, action: InteractAction) -> EntryId {
        self.add(ProximityEntry {
            origin,
            radius: self.config.radius,
            action,
        })
    }

    /// Number of registered entries
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Look up an entry
    pub fn entry(&self, id: EntryId) -> Option<&ProximityEntry> {
        self.entries.get(id.0 as usize)
    }

    /// Entries in range as of the last update
    pub fn in_range(&self) -> &[EntryId] {
        &self.in_range
    }

    /// Whether the interact prompt is currently shown
    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    /// Withdraw the prompt without an update (e.g. when a dialogue opens)
    pub fn hide_prompt(&mut self) -> PromptChange {
        if self.prompt_visible {
            self.prompt_visible = false;
            PromptChange::Hidden
        } else {
            PromptChange::Unchanged
        }
    }

    /// Test `position` against every entry and fire the in-range ones if
    /// an interaction is requested.
    pub fn update(&mut self, position: Vec2, interact_requested: bool) -> TriggerOutcome {
        self.in_range = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.contains(position))
            .map(|(i, _)| EntryId(i as u32))
            .collect();

        let fire = match self.config.mode {
            TriggerMode::Level => interact_requested,
            TriggerMode::Edge => interact_requested && !self.last_request,
        };
        self.last_request = interact_requested;

        let any_in_range = !self.in_range.is_empty();
        let prompt = match (any_in_range, self.prompt_visible) {
            (true, false) => PromptChange::Shown,
            (false, true) => PromptChange::Hidden,
            _ => PromptChange::Unchanged,
        };
        self.prompt_visible = any_in_range;
        if prompt != PromptChange::Unchanged {
            debug!("Interact prompt {:?}", prompt);
        }

        let mut fired = Vec::new();
        if fire {
            for &id in &self.in_range {
                let entry = &self.entries[id.0 as usize];
                info!("Interaction {:?} fired at ({:.2}, {:.2})", id, entry.origin.x, entry.origin.y);
                fired.push(Interaction {
                    id,
                    action: entry.action.clone(),
                });
            }
        }

        TriggerOutcome { prompt, fired }
    }
}
