use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::classify::{HIGH_TIER_SCORE, classify};
use super::config::EngineConfig;
use super::layout::{self, Extent, INACTIVE_NODE_RADIUS};
use super::types::{Activation, Candidate, FilterSelection, Tier};

/// Per-candidate render state, keyed by candidate id in [`MatchGraphState`].
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRenderState {
	/// Position of the candidate in the input list.
	pub order: usize,
	pub x: f64,
	pub y: f64,
	pub target_x: f64,
	pub target_y: f64,
	pub radius: f64,
	/// Radius after the pulse, used for drawing and hit-testing.
	pub display_radius: f64,
	pub pulse_phase: f64,
	pub color: &'static str,
	pub tier: Tier,
	pub is_visually_active: bool,
	pub score: f64,
	pub label: Option<char>,
	placed: bool,
}

impl NodeRenderState {
	fn new(order: usize) -> Self {
		Self {
			order,
			x: 0.0,
			y: 0.0,
			target_x: 0.0,
			target_y: 0.0,
			radius: INACTIVE_NODE_RADIUS,
			display_radius: INACTIVE_NODE_RADIUS,
			pulse_phase: order as f64,
			color: "",
			tier: Tier::Gray,
			is_visually_active: false,
			score: 0.0,
			label: None,
			placed: false,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub color: &'static str,
	pub age: u32,
	pub max_age: u32,
}

impl Particle {
	/// Remaining life in `[0, 1]`, used as draw opacity.
	pub fn life(&self) -> f64 {
		1.0 - self.age as f64 / self.max_age.max(1) as f64
	}
}

/// Everything the frame loop mutates: the node arena and the particle pool.
///
/// Layout writes only target fields through [`MatchGraphState::sync`] and
/// [`MatchGraphState::resize`]; displayed positions move only in `tick`.
pub struct MatchGraphState {
	pub config: EngineConfig,
	pub extent: Extent,
	nodes: HashMap<String, NodeRenderState>,
	order: Vec<String>,
	candidates: Vec<Candidate>,
	activations: Vec<Activation>,
	particles: Vec<Particle>,
	rng: SmallRng,
}

impl MatchGraphState {
	pub fn new(config: EngineConfig, seed: u64) -> Self {
		Self {
			config,
			extent: Extent::default(),
			nodes: HashMap::new(),
			order: Vec::new(),
			candidates: Vec::new(),
			activations: Vec::new(),
			particles: Vec::new(),
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// Reclassifies every candidate and retargets the arena.
	///
	/// Nodes for new ids are created, nodes for vanished ids dropped, and
	/// surviving nodes keep their displayed position as the start of the next
	/// transition. Duplicate ids keep their first occurrence.
	pub fn sync(&mut self, candidates: &[Candidate], filters: &FilterSelection) {
		let mut seen = HashSet::new();
		let unique: Vec<Candidate> = candidates
			.iter()
			.filter(|c| seen.insert(c.id.clone()))
			.cloned()
			.collect();
		let activations: Vec<Activation> = unique.iter().map(|c| classify(c, filters)).collect();

		self.nodes.retain(|id, _| seen.contains(id));
		for (i, (candidate, activation)) in unique.iter().zip(&activations).enumerate() {
			let color = self.config.palette.color(activation.tier);
			let node = self
				.nodes
				.entry(candidate.id.clone())
				.or_insert_with(|| NodeRenderState::new(i));
			node.order = i;
			node.color = color;
			node.tier = activation.tier;
			node.is_visually_active = activation.active;
			node.score = candidate.score();
			node.label = initial(&candidate.name);
		}

		debug!(
			"synced {} candidates, {} active",
			unique.len(),
			activations.iter().filter(|a| a.active).count()
		);

		self.order = unique.iter().map(|c| c.id.clone()).collect();
		self.candidates = unique;
		self.activations = activations;
		self.relayout();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		let extent = Extent::new(width, height);
		if extent == self.extent {
			return;
		}
		self.extent = extent;
		self.relayout();
	}

	fn relayout(&mut self) {
		let Some(targets) = layout::solve(&self.candidates, &self.activations, self.extent) else {
			return;
		};
		let (cx, cy) = self.extent.center();
		for (id, target) in targets {
			let Some(node) = self.nodes.get_mut(&id) else {
				continue;
			};
			node.target_x = target.x;
			node.target_y = target.y;
			node.radius = target.radius;
			if !node.placed {
				node.x = cx;
				node.y = cy;
				node.placed = true;
			}
			if !node.is_visually_active {
				node.display_radius = node.radius;
			}
		}
	}

	/// Advances one frame: easing, pulse, and particles.
	pub fn tick(&mut self, dt: f64, hovered: Option<&str>) {
		if !self.is_ready() {
			return;
		}

		for p in &mut self.particles {
			p.x += p.vx;
			p.y += p.vy;
			p.age += 1;
		}
		self.particles.retain(|p| p.age < p.max_age);

		let config = &self.config;
		let center = self.extent.center();
		for id in &self.order {
			let Some(node) = self.nodes.get_mut(id) else {
				continue;
			};
			node.x += (node.target_x - node.x) * config.easing;
			node.y += (node.target_y - node.y) * config.easing;

			let is_hovered = hovered == Some(id.as_str());
			if node.is_visually_active {
				// only the hovered node keeps pulsing while something is hovered
				if hovered.is_none() || is_hovered {
					node.pulse_phase += dt * config.pulse_speed;
				}
				node.display_radius = node.radius * (1.0 + config.pulse_amplitude * node.pulse_phase.sin());
			} else {
				node.display_radius = node.radius;
			}

			if self.particles.len() >= config.max_particles {
				continue;
			}
			if node.is_visually_active
				&& node.score >= HIGH_TIER_SCORE
				&& self.rng.gen_bool(config.spoke_particle_chance.clamp(0.0, 1.0))
			{
				self.particles.push(spoke_particle(&mut self.rng, center, node));
			}
			if is_hovered
				&& node.score > config.hover_particle_score
				&& self.rng.gen_bool(config.hover_particle_chance.clamp(0.0, 1.0))
			{
				self.particles.push(burst_particle(&mut self.rng, node));
			}
		}
	}

	pub fn is_ready(&self) -> bool {
		self.extent.is_ready()
	}

	pub fn node(&self, id: &str) -> Option<&NodeRenderState> {
		self.nodes.get(id)
	}

	/// Nodes in input order.
	pub fn nodes(&self) -> impl Iterator<Item = (&str, &NodeRenderState)> {
		self.order
			.iter()
			.filter_map(|id| self.nodes.get(id).map(|n| (id.as_str(), n)))
	}

	#[cfg(test)]
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn candidate(&self, id: &str) -> Option<&Candidate> {
		self.node(id).and_then(|n| self.candidates.get(n.order))
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}
}

fn initial(name: &str) -> Option<char> {
	name.chars()
		.find(|c| c.is_alphanumeric())
		.and_then(|c| c.to_uppercase().next())
}

fn spoke_particle(rng: &mut SmallRng, (cx, cy): (f64, f64), node: &NodeRenderState) -> Particle {
	let (dx, dy) = (node.x - cx, node.y - cy);
	let len = (dx * dx + dy * dy).sqrt();
	let (ux, uy) = if len > f64::EPSILON {
		(dx / len, dy / len)
	} else {
		let a = rng.gen_range(0.0..2.0 * PI);
		(a.cos(), a.sin())
	};
	let t = rng.gen_range(0.15..0.95);
	let speed = rng.gen_range(0.3..0.9);
	Particle {
		x: cx + dx * t,
		y: cy + dy * t,
		vx: ux * speed,
		vy: uy * speed,
		size: rng.gen_range(1.0..2.5),
		color: node.color,
		age: 0,
		max_age: rng.gen_range(40..90),
	}
}

fn burst_particle(rng: &mut SmallRng, node: &NodeRenderState) -> Particle {
	let angle = rng.gen_range(0.0..2.0 * PI);
	let speed = rng.gen_range(0.4..1.2);
	Particle {
		x: node.x,
		y: node.y,
		vx: angle.cos() * speed,
		vy: angle.sin() * speed,
		size: rng.gen_range(1.5..3.0),
		color: node.color,
		age: 0,
		max_age: rng.gen_range(30..60),
	}
}
