//! Authored content: the opening lines, the NPCs and what they say
//!
//! Also generates a stand-in world raster for running without map assets.

use glam::Vec2;
use vignette_game::{InteractAction, ProximityTrigger};
use vignette_world::{Raster, WorldConfig, WorldError};

/// Shown as soon as the player wakes up
pub const STARTER_DIALOGUE: [&str; 2] = [
    "[i]You awaken in an unfamiliar place.[/i]",
    "[i]Perhaps you might find somebody to guide you?[/i]",
];

/// An NPC standing in the world
#[derive(Debug, Clone)]
pub struct NpcScript {
    pub name: &'static str,
    /// Where the sprite stands
    pub position: Vec2,
    /// Where the player must stand to talk
    pub trigger: Vec2,
    /// Sprite scale
    pub scale: f32,
    pub lines: &'static [&'static str],
}

impl NpcScript {
    pub fn messages(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.to_string()).collect()
    }

    pub fn action(&self) -> InteractAction {
        InteractAction::OpenDialogue {
            speaker: self.name.to_string(),
            messages: self.messages(),
        }
    }
}

/// The six NPCs, in the order the autopilot visits them
pub fn npcs() -> Vec<NpcScript> {
    vec![
        NpcScript {
            name: "Greeter",
            position: Vec2::new(5.0, 0.5),
            trigger: Vec2::new(5.0, 0.5),
            scale: 0.55,
            lines: &[
                "Hello there, little soul.",
                "Are you lost?",
                "You look lost.",
                "You should discover yourself. It's a beautiful thing.",
                "You can't keep wandering around as a blank slate like that,",
                "It's unsightly.",
                "Go find out what you want to be, and commit to it.",
            ],
        },
        NpcScript {
            name: "Watcher",
            position: Vec2::new(12.0, 0.4),
            trigger: Vec2::new(12.0, 0.4),
            scale: 0.55,
            lines: &[
                "I look above to the canopies,",
                "I see the branches and the leaves.",
                "I see the birds and the squirrels.",
                "And I wish,",
                "That I could join them.",
                "What would it have been like, had I chosen to be a bird, or a squirrel?",
                "Would I be happier?",
                "I don't know.",
                "And I'm too scared to find out.",
            ],
        },
        NpcScript {
            name: "Doubter",
            position: Vec2::new(19.5, 8.6),
            trigger: Vec2::new(19.5, 8.6),
            scale: 0.55,
            lines: &[
                "I discovered myself once.",
                "[b]...[/b]",
                "Or at least, I thought I did.",
                "But I can't help but feel as though it might not be me.",
                "Perhaps it was... at some point,",
                "Or perhaps I just chose because I was told I must.",
                "Perhaps...",
                "I should open myself up to the possibility of discovering myself anew.",
                "The others would not approve.",
                "No, they would not.",
                "Perhaps I should just stay as I am.",
                "Yes, that's what I'll do.",
                "[b]...[/b]",
            ],
        },
        NpcScript {
            name: "Nothing",
            position: Vec2::new(-12.0, 2.0),
            trigger: Vec2::new(-12.0, 2.0),
            scale: 0.40,
            lines: &[
                "I have been many things in my death.",
                "Despite the frustration of my peers.",
                "Unburdened by the weight of their expectations.",
                "They will tell you of things such as fear, or regret.",
                "But I have known neither.",
                "There is no regret, if there are no mistakes",
                "And there are no mistakes, if you are not afraid.",
                "And I am not afraid.",
                "For I am nothing.",
                "And nothing is everything.",
            ],
        },
        NpcScript {
            name: "Certain",
            position: Vec2::new(-12.4, -6.2),
            trigger: Vec2::new(-12.2, -6.2),
            scale: 0.55,
            lines: &[
                "You are not like me, are you?",
                "You do not know exactly who you are.",
                "Perhaps even, you are many things.",
                "Such a concept is foreign to me.",
                "I am one thing, and one thing only.",
                "And I am happy.",
                "But you, you are not.",
                "Why can't you just decide?",
                "You must decide.",
            ],
        },
        NpcScript {
            name: "Elder",
            position: Vec2::new(-27.2, 2.24),
            trigger: Vec2::new(-27.2, 2.24),
            scale: 0.55,
            lines: &[
                "You...",
                "You reject to choose?",
                "You reject to be known?",
                "What is this... lack of choice?",
                "Is this weakness that you cling to so dearly?",
                "Or is it strength?",
                "Perhaps...",
                "Perhaps I have been too hasty.",
                "Perhaps I should not push those around me to choose their lives so swiftly.",
                "Perhaps I should let them be.",
                "Very well, little soul.",
                "You may go, and be nothing.",
                "And everything.",
                "And anything.",
                "And if you discover that you are perhaps, one thing,",
                "your true thing, if it exists,",
                "I will be here.",
                "To allow you to choose.",
                "-",
                "Made by Auri Collings (@Aurailus). Most of the environmental textures (the best looking ones) by Rose (@silentrkgk.bsky.social)",
                "Thank you for playing!!!",
            ],
        },
    ]
}

/// Register every NPC's talk point
pub fn register(trigger: &mut ProximityTrigger, npcs: &[NpcScript]) {
    for npc in npcs {
        trigger.add_point(npc.trigger, npc.action());
    }
}

/// Side of the generated raster in cells
pub const FALLBACK_SIDE: u32 = 512;
/// Tree border thickness in cells
const BORDER: u32 = 8;
/// Rows spacing of the decorative groves
const GROVE_SPACING: u32 = 6;

/// A square RGBA map: a ring of trees at the edge and groves of trunks in
/// the far north and south, leaving the band the NPCs live in clear.
pub fn fallback_raster(config: &WorldConfig) -> Result<Raster, WorldError> {
    let side = FALLBACK_SIDE;
    let mut raster = Raster::new(side, 4, vec![0; (side * side * 4) as usize])?;

    // Rows within this many world units of y = 0 stay clear
    let clear_band = 12.0;
    let half = (side / 2) as f32;

    for row in 0..side {
        let world_y = (row as f32 - half) * config.cell_size;
        for col in 0..side {
            let edge = row < BORDER || col < BORDER || row >= side - BORDER || col >= side - BORDER;
            let grove = world_y.abs() > clear_band
                && row % GROVE_SPACING == 0
                && (col + row / GROVE_SPACING * 3) % 11 == 0;
            if edge || grove {
                raster.set(col, row, 0, 255);
            }
            // Undergrowth everywhere; never exceeds its threshold
            raster.set(col, row, 1, ((col ^ row) % 200) as u8);
        }
    }
    Ok(raster)
}
