use bevy::color::Color;

/// Shared radius of every ball, in world units.
pub const DEFAULT_RADIUS: f32 = 32.0;
/// Velocity multiplier applied on a boundary bounce.
pub const DEFAULT_DAMPING: f32 = 0.45;

/// Physics constants for a [`World`](super::World).
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    pub radius: f32,
    pub damping: f32,
    /// Colors handed to the renderer by body index.
    pub palette: Vec<Color>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            damping: DEFAULT_DAMPING,
            palette: vec![Color::srgb(1.0, 0.0, 0.0), Color::srgb(0.0, 1.0, 0.0)],
        }
    }
}

impl WorldConfig {
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Inset from each edge used by boundary confinement.
    pub fn half_radius(&self) -> f32 {
        self.radius * 0.5
    }

    /// Center distance below which two balls are in contact.
    pub fn min_separation(&self) -> f32 {
        2.0 * self.radius
    }

    /// Palette entry for body `index`, cycling past the end.
    pub fn color_for(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::WHITE;
        }
        self.palette[index % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_distances() {
        let cfg = WorldConfig::default();
        assert_eq!(cfg.half_radius(), 16.0);
        assert_eq!(cfg.min_separation(), 64.0);
    }

    #[test]
    fn palette_cycles() {
        let cfg = WorldConfig::default();
        assert_eq!(cfg.color_for(2), cfg.color_for(0));
        assert_eq!(cfg.color_for(3), cfg.color_for(1));
        assert_ne!(cfg.color_for(0), cfg.color_for(1));
    }

    #[test]
    fn empty_palette_falls_back_to_white() {
        let cfg = WorldConfig {
            palette: Vec::new(),
            ..WorldConfig::default()
        };
        assert_eq!(cfg.color_for(5), Color::WHITE);
    }
}
