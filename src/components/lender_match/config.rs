// Visual and animation tunables for the lender match canvas.
//
// Classifier thresholds and the spiral formulae are fixed in `classify` and
// `layout`; everything that only changes how the graph looks or moves lives
// here.

use super::types::Tier;

/// Fixed frame step fed to the animation, in seconds.
pub const FRAME_DT: f64 = 0.016;

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub background: &'static str,
	pub gray: &'static str,
	pub muted: &'static str,
	pub mid: &'static str,
	pub high: &'static str,
	pub mesh: &'static str,
	pub ring: &'static str,
	pub label: &'static str,
	pub caption: &'static str,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			background: "#f8fafc",
			gray: "#cbd5e1",
			muted: "#93c5fd",
			mid: "#f59e0b",
			high: "#10b981",
			mesh: "rgba(100, 116, 139, 0.08)",
			ring: "#0f172a",
			label: "#ffffff",
			caption: "#64748b",
		}
	}
}

impl Palette {
	pub fn color(&self, tier: Tier) -> &'static str {
		match tier {
			Tier::Gray => self.gray,
			Tier::Muted => self.muted,
			Tier::Mid => self.mid,
			Tier::High => self.high,
		}
	}
}

/// Size and spacing of the floating detail card, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardGeometry {
	pub width: f64,
	pub height: f64,
	/// Gap between the node's edge and the card.
	pub gap: f64,
	/// Minimum distance kept from the container edges.
	pub padding: f64,
}

impl Default for CardGeometry {
	fn default() -> Self {
		Self {
			width: 260.0,
			height: 180.0,
			gap: 12.0,
			padding: 8.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
	/// Share of the remaining distance covered per frame.
	pub easing: f64,
	/// Above this many nodes the background mesh is thinned.
	pub dense_link_threshold: usize,
	/// Draw every n-th background pair once thinned.
	pub dense_link_stride: usize,
	/// Extra pointer forgiveness around each disc.
	pub hit_margin: f64,
	pub pulse_amplitude: f64,
	/// Radians per second.
	pub pulse_speed: f64,
	/// Per-frame chance that a high-tier node emits a spoke particle.
	pub spoke_particle_chance: f64,
	/// Per-frame chance that the hovered node emits a particle.
	pub hover_particle_chance: f64,
	/// Hovered nodes must score above this to emit particles.
	pub hover_particle_score: f64,
	pub max_particles: usize,
	/// Minimum score before an active node gets its initial drawn.
	pub label_score: f64,
	pub card: CardGeometry,
	pub palette: Palette,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			easing: 0.032,
			dense_link_threshold: 50,
			dense_link_stride: 3,
			hit_margin: 3.0,
			pulse_amplitude: 0.12,
			pulse_speed: 4.0,
			spoke_particle_chance: 0.02,
			hover_particle_chance: 0.3,
			hover_particle_score: 0.5,
			max_particles: 300,
			label_score: 0.2,
			card: CardGeometry::default(),
			palette: Palette::default(),
		}
	}
}
