//! Transient player settings.
//!
//! Kept in memory only; nothing is saved between runs.

use serde::{Serialize, Deserialize};

/// Default pointer sensitivity in radians per pixel.
pub const DEFAULT_SENSITIVITY: f32 = 0.003;

/// Sensitivity range.
pub const SENSITIVITY_RANGE: (f32, f32) = (0.0005, 0.02);

/// Sensitivity change per adjustment.
pub const SENSITIVITY_STEP: f32 = 0.0005;

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV: f32 = 60.0;

/// Field of view range in degrees.
pub const FOV_RANGE: (f32, f32) = (40.0, 110.0);

/// Field of view change per adjustment.
pub const FOV_STEP: f32 = 5.0;

/// Which setting the settings menu has highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum SettingsField {
    /// Pointer sensitivity
    #[default]
    Sensitivity,
    /// Field of view
    FieldOfView,
    /// Cursor lock
    CursorLock,
}

impl SettingsField {
    const ORDER: [SettingsField; 3] = [
        SettingsField::Sensitivity,
        SettingsField::FieldOfView,
        SettingsField::CursorLock,
    ];

    fn position(self) -> usize {
        self as usize
    }

    /// Field below, stopping at the last.
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1).min(Self::ORDER.len() - 1)]
    }

    /// Field above, stopping at the first.
    pub fn previous(self) -> Self {
        Self::ORDER[self.position().saturating_sub(1)]
    }
}

/// Player-adjustable settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Radians of look per pixel of pointer motion
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees
    pub field_of_view: f32,
    /// Pointer captured by the window while in the arena
    pub cursor_locked: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            field_of_view: DEFAULT_FOV,
            cursor_locked: true,
        }
    }
}

impl Settings {
    /// Nudge a field by `steps` increments. Numeric fields clamp to
    /// their range; any nonzero step flips the cursor lock.
    pub fn adjust(&mut self, field: SettingsField, steps: i32) {
        if steps == 0 {
            return;
        }
        match field {
            SettingsField::Sensitivity => {
                let (lo, hi) = SENSITIVITY_RANGE;
                self.mouse_sensitivity =
                    (self.mouse_sensitivity + steps as f32 * SENSITIVITY_STEP).clamp(lo, hi);
            }
            SettingsField::FieldOfView => {
                let (lo, hi) = FOV_RANGE;
                self.field_of_view = (self.field_of_view + steps as f32 * FOV_STEP).clamp(lo, hi);
            }
            SettingsField::CursorLock => {
                self.cursor_locked = !self.cursor_locked;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.mouse_sensitivity, 0.003);
        assert_eq!(s.field_of_view, 60.0);
        assert!(s.cursor_locked);
    }

    #[test]
    fn test_adjust_clamps() {
        let mut s = Settings::default();
        s.adjust(SettingsField::FieldOfView, 100);
        assert_eq!(s.field_of_view, 110.0);
        s.adjust(SettingsField::FieldOfView, -100);
        assert_eq!(s.field_of_view, 40.0);

        s.adjust(SettingsField::Sensitivity, -100);
        assert_eq!(s.mouse_sensitivity, 0.0005);
        s.adjust(SettingsField::Sensitivity, 100);
        assert_eq!(s.mouse_sensitivity, 0.02);
    }

    #[test]
    fn test_cursor_toggle() {
        let mut s = Settings::default();
        s.adjust(SettingsField::CursorLock, 0);
        assert!(s.cursor_locked);
        s.adjust(SettingsField::CursorLock, -1);
        assert!(!s.cursor_locked);
        s.adjust(SettingsField::CursorLock, 1);
        assert!(s.cursor_locked);
    }

    #[test]
    fn test_field_cursor_does_not_wrap() {
        assert_eq!(SettingsField::Sensitivity.previous(), SettingsField::Sensitivity);
        assert_eq!(SettingsField::Sensitivity.next(), SettingsField::FieldOfView);
        assert_eq!(SettingsField::CursorLock.next(), SettingsField::CursorLock);
    }
}
