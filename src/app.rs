//! The host: owns every component and steps them once per frame

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use glam::Vec2;
use tracing::{info, trace, Level};

use vignette_core::GameTime;
use vignette_game::{
    Appearance, AppearanceConfig, DialogueEngine, DialogueEvent, InputAction, InputBindings,
    InputHandler, InteractAction, KinematicBody, ProximityTrigger,
};
use vignette_world::CollisionField;

use crate::autopilot::{Autopilot, Observation};
use crate::config::{HostConfig, VignetteConfig};
use crate::presenter::TerminalPresenter;
use crate::script::{self, NpcScript, STARTER_DIALOGUE};
use crate::settings::GameSettings;

/// A standing NPC sprite
struct NpcProp {
    position: Vec2,
    appearance: Appearance,
}

/// Where and how a renderer should draw one figure this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub position: Vec2,
    /// Negative `x` when mirrored
    pub scale: Vec2,
    pub flipped: bool,
}

impl Sprite {
    fn of(position: Vec2, appearance: &Appearance) -> Self {
        Self {
            position,
            scale: appearance.scale(),
            flipped: appearance.flipped(),
        }
    }
}

pub struct Vignette<W: Write> {
    world: CollisionField,
    body: KinematicBody,
    npcs: Vec<NpcProp>,
    trigger: ProximityTrigger,
    dialogue: DialogueEngine,
    input: InputHandler,
    time: GameTime,
    presenter: TerminalPresenter<W>,
}

impl<W: Write> Vignette<W> {
    pub fn new(
        world: CollisionField,
        config: &VignetteConfig,
        settings: &GameSettings,
        npcs: &[NpcScript],
        presenter: TerminalPresenter<W>,
    ) -> Self {
        let mut trigger = ProximityTrigger::with_config(config.trigger.clone());
        script::register(&mut trigger, npcs);

        let props = npcs
            .iter()
            .map(|npc| NpcProp {
                position: npc.position,
                appearance: Appearance::with_base_scale(AppearanceConfig::npc(), Vec2::splat(npc.scale)),
            })
            .collect();

        let mut dialogue = DialogueEngine::with_config(config.reveal.clone());
        dialogue.open(STARTER_DIALOGUE.iter().map(|line| line.to_string()).collect());

        Self {
            world,
            body: KinematicBody::with_config(config.spawn, config.movement.clone()),
            npcs: props,
            trigger,
            dialogue,
            input: InputHandler::new(InputBindings::for_layout(settings.input.alternate_layout)),
            time: GameTime::new(config.time.clone()),
            presenter,
        }
    }

    #[cfg(test)]
    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    #[cfg(test)]
    pub fn position(&self) -> Vec2 {
        self.body.position()
    }

    #[cfg(test)]
    pub fn dialogue(&self) -> &DialogueEngine {
        &self.dialogue
    }

    /// The player's sprite followed by one per NPC
    pub fn sprites(&self) -> Vec<Sprite> {
        std::iter::once(Sprite::of(self.body.render_position(), &self.body.appearance))
            .chain(self.npcs.iter().map(|npc| Sprite::of(npc.position, &npc.appearance)))
            .collect()
    }

    pub fn observe(&self) -> Observation {
        Observation {
            position: self.body.position(),
            dialogue_active: self.dialogue.is_active(),
            prompt_visible: self.trigger.prompt_visible(),
        }
    }

    /// Step every component by one frame of `raw_dt` seconds
    pub fn tick(&mut self, raw_dt: f32) -> Result<()> {
        self.time.update(raw_dt);
        let dt = self.time.delta_time;

        self.dialogue.update(self.time.delta());
        if self.input.state.is_just_pressed(InputAction::Advance) && self.dialogue.is_active() {
            self.dialogue.activate();
        }
        for event in self.dialogue.take_events() {
            match event {
                DialogueEvent::Dismissed { .. } => self.presenter.finish_line()?,
                DialogueEvent::Closed { selection } => {
                    info!("Dialogue closed (selection: {:?}), movement resumed", selection);
                }
                _ => {}
            }
        }

        let in_dialogue = self.dialogue.is_active();
        self.body.input = self.input.state.direction();
        self.body.update(dt, in_dialogue, &self.world);

        if !in_dialogue {
            let outcome = self.trigger.update(
                self.body.position(),
                self.input.state.is_held(InputAction::Interact),
            );
            self.presenter.prompt(outcome.prompt)?;
            for interaction in outcome.fired {
                match interaction.action {
                    InteractAction::OpenDialogue { speaker, messages } => {
                        self.presenter.speaker(&speaker)?;
                        self.dialogue.open(messages);
                        self.trigger.hide_prompt();
                    }
                    InteractAction::Custom { key } => info!("Unhandled interaction '{}'", key),
                }
            }
        }

        let player_x = self.body.position().x;
        for npc in &mut self.npcs {
            npc.appearance.face_towards(dt, player_x - npc.position.x);
        }

        if tracing::enabled!(Level::TRACE) {
            for sprite in self.sprites() {
                trace!(
                    "Sprite at ({:.3}, {:.3}) scale ({:.4}, {:.4}) flipped {}",
                    sprite.position.x,
                    sprite.position.y,
                    sprite.scale.x,
                    sprite.scale.y,
                    sprite.flipped
                );
            }
        }

        self.presenter.present(&self.dialogue.view())?;
        self.input.end_frame();
        Ok(())
    }

    /// Run frames until the autopilot is done or the frame limit is hit
    pub fn run(&mut self, host: &HostConfig, autopilot: &mut Autopilot) -> Result<()> {
        let frame = Duration::from_secs_f32(1.0 / host.frame_rate.max(1.0));
        let mut last = Instant::now();
        let mut frames = 0u64;

        loop {
            let raw_dt = if host.realtime {
                let now = Instant::now();
                let elapsed = now.duration_since(last).as_secs_f32();
                last = now;
                elapsed
            } else {
                frame.as_secs_f32()
            };

            let seen = self.observe();
            if autopilot.drive(raw_dt.clamp(0.0, self.time.config.max_delta_time.max(0.0)), seen, &mut self.input) {
                info!("Every NPC visited after {} frames", frames);
                break;
            }
            self.tick(raw_dt)?;

            frames += 1;
            if host.max_frames.is_some_and(|max| frames >= max) {
                info!("Frame limit reached");
                break;
            }
            if host.realtime {
                thread::sleep(frame);
            }
        }

        self.presenter.finish_line()?;
        Ok(())
    }
}
