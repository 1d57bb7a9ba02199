//! Scripted player for the headless host
//!
//! Produces the same winit key and mouse events a person would: walks to
//! each NPC with the arrow keys, taps Space once in range, and clicks
//! through the dialogue at a steady pace.

use std::collections::HashSet;

use glam::Vec2;
use tracing::{info, warn};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{Key, KeyCode, NamedKey, PhysicalKey};

use vignette_game::InputHandler;

/// Distance per axis below which the autopilot stops pushing that way
const DEADZONE: f32 = 0.08;

/// What the autopilot sees of the world each frame
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    pub position: Vec2,
    pub dialogue_active: bool,
    pub prompt_visible: bool,
}

#[derive(Debug)]
pub struct Autopilot {
    targets: Vec<Vec2>,
    current: usize,
    /// Closer than this to the target counts as arrived
    reach: f32,
    advance_interval: f32,
    leg_timeout: f32,
    leg_time: f32,
    click_cooldown: f32,
    talking: bool,
    held: HashSet<KeyCode>,
    mouse_down: bool,
}

impl Autopilot {
    pub fn new(targets: Vec<Vec2>, reach: f32, advance_interval: f32, leg_timeout: f32) -> Self {
        Self {
            targets,
            current: 0,
            reach,
            advance_interval,
            leg_timeout,
            leg_time: 0.0,
            click_cooldown: advance_interval,
            talking: false,
            held: HashSet::new(),
            mouse_down: false,
        }
    }

    /// Index of the NPC being walked to
    #[cfg(test)]
    pub fn current(&self) -> usize {
        self.current
    }

    #[cfg(test)]
    pub fn finished(&self) -> bool {
        self.current >= self.targets.len()
    }

    /// Feed this frame's input events. Returns true once every target has
    /// been visited and no dialogue is open.
    pub fn drive(&mut self, dt: f32, seen: Observation, input: &mut InputHandler) -> bool {
        if self.mouse_down {
            input.handle_mouse_button(MouseButton::Left, ElementState::Released);
            self.mouse_down = false;
        }

        if seen.dialogue_active {
            self.release_all(input);
            self.click_cooldown -= dt;
            if self.click_cooldown <= 0.0 {
                input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
                self.mouse_down = true;
                self.click_cooldown = self.advance_interval;
            }
            return false;
        }
        self.click_cooldown = self.advance_interval;

        if self.talking {
            self.talking = false;
            self.next_leg();
        }

        let Some(&target) = self.targets.get(self.current) else {
            self.release_all(input);
            return true;
        };

        self.leg_time += dt;
        if self.leg_time > self.leg_timeout {
            warn!("Autopilot could not reach target {} at ({:.2}, {:.2})", self.current, target.x, target.y);
            self.next_leg();
            return false;
        }

        let delta = target - seen.position;
        if delta.length() < self.reach && seen.prompt_visible {
            for code in [KeyCode::ArrowUp, KeyCode::ArrowDown, KeyCode::ArrowLeft, KeyCode::ArrowRight] {
                self.set_key(input, code, false);
            }
            if self.held.contains(&KeyCode::Space) {
                // Released for a frame so the next press is a fresh edge
                self.set_key(input, KeyCode::Space, false);
            } else {
                self.set_key(input, KeyCode::Space, true);
                self.talking = true;
            }
            return false;
        }

        self.set_key(input, KeyCode::Space, false);
        self.set_key(input, KeyCode::ArrowLeft, delta.x < -DEADZONE);
        self.set_key(input, KeyCode::ArrowRight, delta.x > DEADZONE);
        // Up is towards -Y
        self.set_key(input, KeyCode::ArrowUp, delta.y < -DEADZONE);
        self.set_key(input, KeyCode::ArrowDown, delta.y > DEADZONE);
        false
    }

    fn next_leg(&mut self) {
        self.current += 1;
        self.leg_time = 0.0;
        if let Some(target) = self.targets.get(self.current) {
            info!("Autopilot heading to ({:.2}, {:.2})", target.x, target.y);
        }
    }

    fn release_all(&mut self, input: &mut InputHandler) {
        let held: Vec<KeyCode> = self.held.iter().copied().collect();
        for code in held {
            self.set_key(input, code, false);
        }
    }

    fn set_key(&mut self, input: &mut InputHandler, code: KeyCode, down: bool) {
        if self.held.contains(&code) == down {
            return;
        }
        let state = if down {
            ElementState::Pressed
        } else {
            ElementState::Released
        };
        input.handle_key(PhysicalKey::Code(code), &named_key(code), state);
        if down {
            self.held.insert(code);
        } else {
            self.held.remove(&code);
        }
    }
}

fn named_key(code: KeyCode) -> Key {
    match code {
        KeyCode::ArrowUp => Key::Named(NamedKey::ArrowUp),
        KeyCode::ArrowDown => Key::Named(NamedKey::ArrowDown),
        KeyCode::ArrowLeft => Key::Named(NamedKey::ArrowLeft),
        KeyCode::ArrowRight => Key::Named(NamedKey::ArrowRight),
        KeyCode::Space => Key::Named(NamedKey::Space),
        _ => Key::Unidentified(winit::keyboard::NativeKey::Unidentified),
    }
}
