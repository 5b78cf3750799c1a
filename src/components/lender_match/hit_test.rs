use super::state::NodeRenderState;

/// Finds the node under the pointer.
///
/// Smaller discs are tested first so a small node drawn over a large one stays
/// reachable; equal radii fall back to input order. Recomputed from scratch on
/// every call.
pub fn hit_test<'a>(
	px: f64,
	py: f64,
	nodes: impl IntoIterator<Item = (&'a str, &'a NodeRenderState)>,
	margin: f64,
) -> Option<&'a str> {
	let mut candidates: Vec<_> = nodes.into_iter().collect();
	candidates.sort_by(|(_, a), (_, b)| {
		a.display_radius
			.total_cmp(&b.display_radius)
			.then(a.order.cmp(&b.order))
	});

	candidates
		.into_iter()
		.find(|(_, node)| {
			let (dx, dy) = (px - node.x, py - node.y);
			(dx * dx + dy * dy).sqrt() <= node.display_radius + margin
		})
		.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::lender_match::config::EngineConfig;
	use crate::components::lender_match::state::MatchGraphState;
	use crate::components::lender_match::types::{Candidate, FilterCategory, FilterSelection};

	fn node(order: usize, x: f64, y: f64, radius: f64) -> NodeRenderState {
		let mut state = MatchGraphState::new(EngineConfig::default(), 0);
		state.resize(100.0, 100.0);
		state.sync(
			&[Candidate {
				id: "n".into(),
				..Default::default()
			}],
			&FilterSelection::default(),
		);
		let mut n = state.node("n").unwrap().clone();
		n.order = order;
		n.x = x;
		n.y = y;
		n.radius = radius;
		n.display_radius = radius;
		n
	}

	#[test]
	fn smaller_disc_wins_overlap() {
		let big = node(0, 50.0, 50.0, 14.0);
		let small = node(1, 50.0, 50.0, 8.0);
		let nodes = [("big", &big), ("small", &small)];
		assert_eq!(hit_test(52.0, 51.0, nodes, 3.0), Some("small"));
		// outside the small disc but inside the big one
		assert_eq!(hit_test(62.0, 50.0, nodes, 3.0), Some("big"));
	}

	#[test]
	fn margin_extends_hit_area() {
		let n = node(0, 0.0, 0.0, 8.0);
		assert_eq!(hit_test(10.5, 0.0, [("a", &n)], 3.0), Some("a"));
		assert_eq!(hit_test(11.5, 0.0, [("a", &n)], 3.0), None);
	}

	#[test]
	fn equal_radius_prefers_input_order() {
		let first = node(0, 0.0, 0.0, 8.0);
		let second = node(1, 2.0, 0.0, 8.0);
		assert_eq!(hit_test(1.0, 0.0, [("b", &second), ("a", &first)], 3.0), Some("a"));
	}

	#[test]
	fn miss_returns_none() {
		assert_eq!(hit_test(1.0, 1.0, std::iter::empty(), 3.0), None);
	}

	#[test]
	fn follows_moving_nodes() {
		let mut state = MatchGraphState::new(EngineConfig::default(), 0);
		state.resize(400.0, 400.0);
		let mut filters = FilterSelection::default();
		filters.toggle(FilterCategory::AssetTypes, "Office");
		state.sync(
			&[Candidate {
				id: "a".into(),
				asset_types: Some(vec!["Office".into()]),
				match_score: 0.9,
				..Default::default()
			}],
			&filters,
		);
		// nodes spawn at the center
		assert_eq!(hit_test(200.0, 200.0, state.nodes(), 3.0), Some("a"));
		for _ in 0..400 {
			state.tick(0.016, None);
		}
		let n = state.node("a").unwrap();
		let (tx, ty) = (n.target_x, n.target_y);
		assert_eq!(hit_test(tx, ty, state.nodes(), 3.0), Some("a"));
		assert_eq!(hit_test(200.0, 200.0, state.nodes(), 3.0), None);
	}
}
