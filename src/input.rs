//! Abstract input signal fed to the simulation
//!
//! Key events arrive asynchronously from the host. They only ever touch the
//! `InputSignal`; the simulation reads it once per step.

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Reset,
}

impl Action {
    /// Map a DOM `KeyboardEvent.code` to an action
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::MoveLeft),
            "ArrowRight" | "KeyD" => Some(Action::MoveRight),
            "Space" | "ArrowUp" | "KeyW" => Some(Action::Jump),
            "KeyR" => Some(Action::Reset),
            _ => None,
        }
    }
}

/// Edge detector for the jump key
///
/// `Released -> Pressed (emits edge) -> Held -> Released`. Auto-repeat
/// key-downs move `Pressed` to `Held` and never emit a second edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpLatch {
    #[default]
    Released,
    Pressed,
    Held,
}

impl JumpLatch {
    /// Feed a key-down. Returns true when this press is a new edge.
    pub fn press(&mut self) -> bool {
        match self {
            JumpLatch::Released => {
                *self = JumpLatch::Pressed;
                true
            }
            JumpLatch::Pressed | JumpLatch::Held => {
                *self = JumpLatch::Held;
                false
            }
        }
    }

    pub fn release(&mut self) {
        *self = JumpLatch::Released;
    }

    pub fn is_down(self) -> bool {
        self != JumpLatch::Released
    }
}

/// Input state read by the resolver each step
#[derive(Debug, Clone, Default)]
pub struct InputSignal {
    pub left: bool,
    pub right: bool,
    pub jump_held: bool,
    /// One-shot jump request, cleared by the resolver
    pub jump_edge: bool,
    latch: JumpLatch,
}

impl InputSignal {
    /// Directional keys held, nothing else
    pub fn with_keys(left: bool, right: bool) -> Self {
        Self {
            left,
            right,
            ..Self::default()
        }
    }

    /// Apply a key-down. Returns true for `Action::Reset`, which the caller
    /// handles outside the simulation.
    pub fn key_down(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.left = true,
            Action::MoveRight => self.right = true,
            Action::Jump => {
                if self.latch.press() {
                    self.jump_edge = true;
                }
                self.jump_held = self.latch.is_down();
            }
            Action::Reset => return true,
        }
        false
    }

    pub fn key_up(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.left = false,
            Action::MoveRight => self.right = false,
            Action::Jump => {
                self.latch.release();
                self.jump_held = false;
            }
            Action::Reset => {}
        }
    }

    /// Read and clear the pending jump request
    pub fn take_jump_edge(&mut self) -> bool {
        std::mem::take(&mut self.jump_edge)
    }

    /// Drop any pending one-shot request (held keys stay held)
    pub fn clear_edges(&mut self) {
        self.jump_edge = false;
    }

    /// Release everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
