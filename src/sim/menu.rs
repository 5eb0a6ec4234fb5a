//! Menu button layout and hit testing
//!
//! Buttons are full-width horizontal bands around the screen centre; only
//! the pointer's y coordinate matters.

/// Clickable entries on the title screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Play,
    Instructions,
}

impl MenuButton {
    pub const ALL: [MenuButton; 2] = [MenuButton::Play, MenuButton::Instructions];

    /// Vertical extent `(top, bottom)` for a viewport of the given height
    pub fn band(self, height: f32) -> (f32, f32) {
        let mid = height / 2.0;
        match self {
            MenuButton::Play => (mid - 40.0, mid),
            MenuButton::Instructions => (mid + 20.0, mid + 60.0),
        }
    }

    /// Text baseline inside the band
    pub fn baseline(self, height: f32) -> f32 {
        let (_, bottom) = self.band(height);
        bottom - 10.0
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuButton::Play => "PLAY NOW",
            MenuButton::Instructions => "INSTRUCTIONS",
        }
    }

    /// Bands are open intervals
    pub fn contains(self, y: f32, height: f32) -> bool {
        let (top, bottom) = self.band(height);
        y > top && y < bottom
    }

    /// Button under the pointer, if any
    pub fn at(y: f32, height: f32) -> Option<MenuButton> {
        Self::ALL.into_iter().find(|b| b.contains(y, height))
    }
}
