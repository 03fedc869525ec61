//! Status icons keyed by module string ids

use serde::{Deserialize, Serialize};

/// Status display collaborator surface
///
/// `duration` of 0 means persistent until explicitly cleared.
pub trait StatusDisplay {
    fn show_status(&mut self, id: &str, icon: &str, duration: f32);
    fn clear_status(&mut self, id: &str);
}

/// No-op display for integrations without a HUD
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHud;

impl StatusDisplay for NullHud {
    fn show_status(&mut self, _id: &str, _icon: &str, _duration: f32) {}
    fn clear_status(&mut self, _id: &str) {}
}

/// A visible status icon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusIcon {
    pub id: String,
    /// Icon asset name
    pub icon: String,
    /// 0 = persistent
    pub duration: f32,
    remaining: f32,
}

impl StatusIcon {
    fn new(id: &str, icon: &str, duration: f32) -> Self {
        Self {
            id: id.to_string(),
            icon: icon.to_string(),
            duration,
            remaining: duration,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.duration <= 0.0
    }

    /// Radial cooldown mask fill: 1 when freshly shown, 0 for persistent
    pub fn fill_ratio(&self) -> f32 {
        if self.is_persistent() {
            0.0
        } else {
            (self.remaining / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// The status icon area of the HUD
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StatusBoard {
    /// Insertion order is display order
    icons: Vec<StatusIcon>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible icons in display order
    pub fn icons(&self) -> &[StatusIcon] {
        &self.icons
    }

    pub fn get(&self, id: &str) -> Option<&StatusIcon> {
        self.icons.iter().find(|i| i.id == id)
    }

    /// Tick timed icons and drop the expired ones
    pub fn update(&mut self, dt: f32) {
        for icon in &mut self.icons {
            if !icon.is_persistent() {
                icon.remaining -= dt;
            }
        }
        self.icons
            .retain(|i| i.is_persistent() || i.remaining > 0.0);
    }
}

impl StatusDisplay for StatusBoard {
    fn show_status(&mut self, id: &str, icon: &str, duration: f32) {
        // Re-showing an existing id refreshes it in place
        if let Some(existing) = self.icons.iter_mut().find(|i| i.id == id) {
            existing.icon = icon.to_string();
            existing.duration = duration;
            existing.remaining = duration;
            return;
        }
        self.icons.push(StatusIcon::new(id, icon, duration));
    }

    fn clear_status(&mut self, id: &str) {
        self.icons.retain(|i| i.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistent_until_cleared() {
        let mut board = StatusBoard::new();
        board.show_status("happy", "icons/happy", 0.0);
        board.update(100.0);
        assert!(board.get("happy").is_some());

        board.clear_status("happy");
        assert!(board.get("happy").is_none());
    }

    #[test]
    fn test_timed_icon_expires() {
        let mut board = StatusBoard::new();
        board.show_status("anxious", "icons/anxious", 3.0);
        board.update(1.0);
        let fill = board.get("anxious").unwrap().fill_ratio();
        assert!((fill - 2.0 / 3.0).abs() < 1e-5);
        board.update(2.5);
        assert!(board.get("anxious").is_none());
    }

    #[test]
    fn test_reshow_refreshes_duration() {
        let mut board = StatusBoard::new();
        board.show_status("excited_buff", "icons/excited", 1.5);
        board.update(1.0);
        board.show_status("excited_buff", "icons/excited", 1.5);
        board.update(1.0);
        // Refreshed, so still visible after 2s total
        assert!(board.get("excited_buff").is_some());
        assert_eq!(board.icons().len(), 1);
    }

    #[test]
    fn test_clear_unknown_id_is_noop() {
        let mut board = StatusBoard::new();
        board.clear_status("nothing");
        assert!(board.icons().is_empty());
    }
}
