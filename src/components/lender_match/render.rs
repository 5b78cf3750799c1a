use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::EngineConfig;
use super::state::{MatchGraphState, NodeRenderState};
use super::types::Tier;

const EMPTY_CAPTION: &str = "Select filters to highlight matching lenders";

/// Per-frame inputs that live outside the node arena.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInputs<'a> {
	pub hovered: Option<&'a str>,
	pub selected: Option<&'a str>,
	pub any_filter_applied: bool,
}

pub fn render(state: &MatchGraphState, ctx: &CanvasRenderingContext2d, inputs: FrameInputs<'_>) {
	if !state.is_ready() {
		return;
	}
	let (width, height) = (state.extent.width, state.extent.height);
	ctx.clear_rect(0.0, 0.0, width, height);
	ctx.set_fill_style_str(state.config.palette.background);
	ctx.fill_rect(0.0, 0.0, width, height);

	let nodes: Vec<&NodeRenderState> = state.nodes().map(|(_, n)| n).collect();
	draw_mesh(state, &nodes, ctx);
	draw_active_links(state, &nodes, ctx);
	draw_particles(state, ctx);
	draw_nodes(state, ctx, inputs);

	if !inputs.any_filter_applied {
		ctx.set_fill_style_str(state.config.palette.caption);
		ctx.set_font("13px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(EMPTY_CAPTION, width / 2.0, height / 2.0);
	}
}

/// Index pairs joined by the background mesh. Above the density threshold
/// only every `dense_link_stride`-th pair is kept.
fn mesh_pairs(count: usize, config: &EngineConfig) -> impl Iterator<Item = (usize, usize)> {
	let stride = if count > config.dense_link_threshold {
		config.dense_link_stride.max(1)
	} else {
		1
	};
	(0..count)
		.flat_map(move |i| (i + 1..count).map(move |j| (i, j)))
		.step_by(stride)
}

fn draw_mesh(state: &MatchGraphState, nodes: &[&NodeRenderState], ctx: &CanvasRenderingContext2d) {
	let config = &state.config;
	ctx.set_stroke_style_str(config.palette.mesh);
	ctx.set_line_width(0.5);
	ctx.begin_path();
	for (i, j) in mesh_pairs(nodes.len(), config) {
		ctx.move_to(nodes[i].x, nodes[i].y);
		ctx.line_to(nodes[j].x, nodes[j].y);
	}
	ctx.stroke();
}

fn draw_active_links(state: &MatchGraphState, nodes: &[&NodeRenderState], ctx: &CanvasRenderingContext2d) {
	let active: Vec<&NodeRenderState> = nodes
		.iter()
		.copied()
		.filter(|n| n.is_visually_active)
		.collect();
	if active.is_empty() {
		return;
	}

	// spokes from the center; spoke particles travel along these
	let (cx, cy) = state.extent.center();
	ctx.set_stroke_style_str("rgba(148, 163, 184, 0.25)");
	ctx.set_line_width(0.75);
	ctx.begin_path();
	for n in &active {
		ctx.move_to(cx, cy);
		ctx.line_to(n.x, n.y);
	}
	ctx.stroke();

	for (i, a) in active.iter().enumerate() {
		for b in &active[i + 1..] {
			let avg = (a.score + b.score) / 2.0;
			ctx.set_stroke_style_str(&format!("rgba(16, 185, 129, {})", 0.15 + avg * 0.35));
			ctx.set_line_width(0.5 + avg * 2.0);
			ctx.begin_path();
			ctx.move_to(a.x, a.y);
			ctx.line_to(b.x, b.y);
			ctx.stroke();
		}
	}
}

fn draw_particles(state: &MatchGraphState, ctx: &CanvasRenderingContext2d) {
	for p in state.particles() {
		ctx.set_global_alpha(p.life());
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.size, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(p.color);
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &MatchGraphState, ctx: &CanvasRenderingContext2d, inputs: FrameInputs<'_>) {
	let config = &state.config;
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for (id, node) in state.nodes() {
		let radius = node.display_radius.max(0.0);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color);
		ctx.fill();

		if inputs.hovered == Some(id) || inputs.selected == Some(id) {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, radius + 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(config.palette.ring);
			ctx.set_line_width(2.0);
			ctx.stroke();
		}

		if node.tier != Tier::Gray && node.score > config.label_score {
			if let Some(label) = node.label {
				ctx.set_fill_style_str(config.palette.label);
				ctx.set_font(&format!("bold {}px sans-serif", radius.max(10.0).round()));
				let _ = ctx.fill_text(label.encode_utf8(&mut [0; 4]), node.x, node.y + 0.5);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mesh_joins_every_pair_up_to_threshold() {
		let config = EngineConfig::default();
		let pairs: Vec<_> = mesh_pairs(50, &config).collect();
		assert_eq!(pairs.len(), 50 * 49 / 2);
		assert_eq!(pairs[..2], [(0, 1), (0, 2)]);
	}

	#[test]
	fn dense_mesh_keeps_every_third_pair() {
		let config = EngineConfig::default();
		let pairs: Vec<_> = mesh_pairs(51, &config).collect();
		assert_eq!(pairs.len(), (51 * 50 / 2usize).div_ceil(3));
		assert_eq!(pairs[..3], [(0, 1), (0, 4), (0, 7)]);
	}

	#[test]
	fn tiny_meshes() {
		let config = EngineConfig::default();
		assert_eq!(mesh_pairs(0, &config).count(), 0);
		assert_eq!(mesh_pairs(1, &config).count(), 0);
	}
}
