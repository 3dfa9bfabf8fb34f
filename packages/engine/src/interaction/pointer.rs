//! Drag session state for pointer editing

/// Modifier keys held during a pointer event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false };

    #[inline]
    pub fn any(self) -> bool {
        self.shift || self.ctrl
    }
}

/// What a pointer-down does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stroke {
    Toggle,
    Glider,
    Pulsar,
}

impl Stroke {
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.shift {
            Stroke::Pulsar
        } else if modifiers.ctrl {
            Stroke::Glider
        } else {
            Stroke::Toggle
        }
    }
}

/// Tracks a held pointer between down and up.
///
/// Stamps fire once on press. Dragging paints whatever the press did, as
/// long as the move itself carries no modifier.
#[derive(Debug, Default)]
pub struct PointerSession {
    active: Option<Stroke>,
}

impl PointerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, modifiers: Modifiers) -> Stroke {
        let stroke = Stroke::from_modifiers(modifiers);
        self.active = Some(stroke);
        stroke
    }

    /// Should this move paint a cell alive?
    pub fn drag(&self, modifiers: Modifiers) -> bool {
        self.is_held() && !modifiers.any()
    }

    pub fn release(&mut self) {
        self.active = None;
    }

    pub fn is_held(&self) -> bool {
        self.active.is_some()
    }
}
