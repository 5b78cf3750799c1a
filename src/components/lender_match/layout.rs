use std::collections::HashMap;
use std::f64::consts::PI;

use super::types::{Activation, Candidate};

/// Fraction of the half-extent the outermost band may reach.
const MAX_RADIUS_FRACTION: f64 = 0.9;

pub const ACTIVE_NODE_RADIUS: f64 = 10.0;
pub const ACTIVE_NODE_RADIUS_SCORE_GAIN: f64 = 4.0;
pub const INACTIVE_NODE_RADIUS: f64 = 8.0;

pub fn golden_angle() -> f64 {
	PI * (3.0 - 5f64.sqrt())
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
	pub width: f64,
	pub height: f64,
}

impl Extent {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// False until the surface has been sized.
	pub fn is_ready(&self) -> bool {
		self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	pub fn max_radius(&self) -> f64 {
		self.width.min(self.height) / 2.0 * MAX_RADIUS_FRACTION
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutTarget {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
}

/// Places candidates on a golden-angle spiral.
///
/// Active candidates collect on an inner ring, closer to the center the higher
/// they score. Inactive ones scatter over an outer band using only their index,
/// so the cloud is identical for identical input order. Returns `None` when the
/// extent has no area yet.
pub fn solve(
	candidates: &[Candidate],
	activations: &[Activation],
	extent: Extent,
) -> Option<HashMap<String, LayoutTarget>> {
	if !extent.is_ready() {
		return None;
	}

	let (cx, cy) = extent.center();
	let max_radius = extent.max_radius();
	let golden = golden_angle();

	let targets = candidates
		.iter()
		.zip(activations)
		.enumerate()
		.map(|(i, (candidate, activation))| {
			let fi = i as f64;
			let score = candidate.score();
			let (distance, radius) = if activation.active {
				(
					0.2 + (1.0 - score) * 0.3,
					ACTIVE_NODE_RADIUS + score * ACTIVE_NODE_RADIUS_SCORE_GAIN,
				)
			} else {
				(
					0.55 + (i % 5) as f64 * 0.08 + fi.sin() * 0.05,
					INACTIVE_NODE_RADIUS,
				)
			};
			let angle = fi * golden;
			let target = LayoutTarget {
				x: cx + angle.cos() * distance * max_radius,
				y: cy + angle.sin() * distance * max_radius,
				radius,
			};
			(candidate.id.clone(), target)
		})
		.collect();

	Some(targets)
}
