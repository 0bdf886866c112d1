use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// How long a press must be held, without dragging, to place a flag.
    pub long_press_ms: u32,
    /// Movement along either axis that cancels a pending long press, in host units.
    pub drag_threshold: f32,
}

impl GestureConfig {
    pub const DEFAULT_LONG_PRESS_MS: u32 = 500;

    pub const fn new(drag_threshold: f32) -> Self {
        Self {
            long_press_ms: Self::DEFAULT_LONG_PRESS_MS,
            drag_threshold,
        }
    }
}

impl Default for GestureConfig {
    /// Positions measured in cells: a drag of 0.3 cell cancels the long press.
    fn default() -> Self {
        Self::new(0.3)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct PendingPress {
    coords: Coord2,
    origin: (f32, f32),
    held_ms: u32,
    long_press_armed: bool,
}

/// Turns raw press/drag/release input into at most one [`PlayerInput`] per gesture.
///
/// Outside marking mode a press arms a long-press timer that the host advances with
/// [`GestureTracker::update`]; if it fires the gesture becomes a flag, otherwise releasing
/// reveals the pressed cell. Dragging only disarms the timer. In marking mode the press itself
/// resolves to a mark.
#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    config: GestureConfig,
    pending: Option<PendingPress>,
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    pub fn config(&self) -> GestureConfig {
        self.config
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn press(
        &mut self,
        coords: Coord2,
        position: (f32, f32),
        marking_mode: bool,
    ) -> Option<PlayerInput> {
        if marking_mode {
            self.pending = None;
            return Some(PlayerInput::new(coords, PlayerAction::Mark));
        }

        self.pending = Some(PendingPress {
            coords,
            origin: position,
            held_ms: 0,
            long_press_armed: true,
        });
        None
    }

    pub fn drag(&mut self, position: (f32, f32)) {
        let threshold = self.config.drag_threshold;
        let Some(press) = self.pending.as_mut() else {
            return;
        };

        if press.long_press_armed
            && (exceeds(position.0, press.origin.0, threshold)
                || exceeds(position.1, press.origin.1, threshold))
        {
            log::trace!("Long press on {:?} cancelled by drag", press.coords);
            press.long_press_armed = false;
        }
    }

    /// Advances the long-press timer by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<PlayerInput> {
        let press = self.pending.as_mut()?;
        if !press.long_press_armed {
            return None;
        }

        press.held_ms = press.held_ms.saturating_add(elapsed_ms);
        if press.held_ms < self.config.long_press_ms {
            return None;
        }

        let coords = press.coords;
        self.pending = None;
        Some(PlayerInput::new(coords, PlayerAction::Flag))
    }

    pub fn release(&mut self) -> Option<PlayerInput> {
        self.pending
            .take()
            .map(|press| PlayerInput::new(press.coords, PlayerAction::Reveal))
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

fn exceeds(a: f32, b: f32, threshold: f32) -> bool {
    a - b > threshold || b - a > threshold
}
