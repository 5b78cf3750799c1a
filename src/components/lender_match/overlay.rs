use super::config::CardGeometry;

/// The hosting container's bounding box in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerRect {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

/// Card offset from the container's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayPosition {
	pub relative_x: f64,
	pub relative_y: f64,
}

/// Where a node is drawn, in container coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeGeometry {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum OverlayState {
	#[default]
	Hidden,
	Anchored {
		id: String,
		position: OverlayPosition,
		/// Viewport position, refreshed whenever the container moves.
		screen: (f64, f64),
	},
}

/// Pins the detail card to a node identity rather than to the pointer.
///
/// The relative offset is computed once per newly selected node. Repeated
/// selections of the same node and container moves never change it.
#[derive(Clone, Debug, Default)]
pub struct OverlayManager {
	card: CardGeometry,
	state: OverlayState,
}

impl OverlayManager {
	pub fn new(card: CardGeometry) -> Self {
		Self {
			card,
			state: OverlayState::Hidden,
		}
	}

	/// Anchors to `id` unless already anchored there. Returns whether anything changed.
	pub fn node_selected(&mut self, id: &str, node: NodeGeometry, container: ContainerRect) -> bool {
		if self.anchored_id() == Some(id) {
			return false;
		}
		let position = self.place(node, container);
		self.state = OverlayState::Anchored {
			id: id.to_string(),
			position,
			screen: screen_of(position, container),
		};
		true
	}

	pub fn container_moved(&mut self, container: ContainerRect) {
		if let OverlayState::Anchored {
			position, screen, ..
		} = &mut self.state
		{
			*screen = screen_of(*position, container);
		}
	}

	pub fn hide(&mut self) {
		self.state = OverlayState::Hidden;
	}

	#[cfg(test)]
	pub fn state(&self) -> &OverlayState {
		&self.state
	}

	pub fn anchored_id(&self) -> Option<&str> {
		match &self.state {
			OverlayState::Anchored { id, .. } => Some(id),
			OverlayState::Hidden => None,
		}
	}

	#[cfg(test)]
	pub fn position(&self) -> Option<OverlayPosition> {
		match &self.state {
			OverlayState::Anchored { position, .. } => Some(*position),
			OverlayState::Hidden => None,
		}
	}

	pub fn screen(&self) -> Option<(f64, f64)> {
		match &self.state {
			OverlayState::Anchored { screen, .. } => Some(*screen),
			OverlayState::Hidden => None,
		}
	}

	// Right of the node and above it; flip left on right-edge overflow, then clamp.
	fn place(&self, node: NodeGeometry, container: ContainerRect) -> OverlayPosition {
		let CardGeometry {
			width,
			height,
			gap,
			padding,
		} = self.card;

		let mut x = node.x + node.radius + gap;
		if x + width > container.width - padding {
			x = node.x - node.radius - gap - width;
		}
		let y = node.y - node.radius - gap - height;

		OverlayPosition {
			relative_x: clamp_axis(x, width, container.width, padding),
			relative_y: clamp_axis(y, height, container.height, padding),
		}
	}
}

// Keeps `[v, v + size]` inside `[padding, extent - padding]`, pinning to the
// leading edge when the card is larger than the container.
fn clamp_axis(v: f64, size: f64, extent: f64, padding: f64) -> f64 {
	let max = extent - padding - size;
	v.min(max).max(padding)
}

fn screen_of(position: OverlayPosition, container: ContainerRect) -> (f64, f64) {
	(
		container.left + position.relative_x,
		container.top + position.relative_y,
	)
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn container() -> ContainerRect {
		ContainerRect {
			left: 100.0,
			top: 50.0,
			width: 800.0,
			height: 600.0,
		}
	}

	fn geometry(x: f64, y: f64) -> NodeGeometry {
		NodeGeometry { x, y, radius: 10.0 }
	}

	#[test]
	fn anchors_right_and_above() {
		let mut m = OverlayManager::new(CardGeometry::default());
		assert!(m.node_selected("a", geometry(200.0, 400.0), container()));
		let p = m.position().unwrap();
		assert_eq!(p.relative_x, 200.0 + 10.0 + 12.0);
		assert_eq!(p.relative_y, 400.0 - 10.0 - 12.0 - 180.0);
		assert_eq!(m.screen(), Some((100.0 + p.relative_x, 50.0 + p.relative_y)));
	}

	#[test]
	fn flips_left_near_right_edge() {
		let mut m = OverlayManager::new(CardGeometry::default());
		m.node_selected("a", geometry(700.0, 400.0), container());
		assert_eq!(m.position().unwrap().relative_x, 700.0 - 10.0 - 12.0 - 260.0);
	}

	#[test]
	fn clamps_inside_container() {
		let mut m = OverlayManager::new(CardGeometry::default());
		m.node_selected("a", geometry(30.0, 20.0), container());
		let p = m.position().unwrap();
		assert_eq!(p.relative_y, 8.0);
		assert!(p.relative_x >= 8.0);

		let tiny = ContainerRect {
			width: 100.0,
			height: 100.0,
			..container()
		};
		m.node_selected("b", geometry(50.0, 50.0), tiny);
		assert_eq!(m.position(), Some(OverlayPosition { relative_x: 8.0, relative_y: 8.0 }));
	}

	#[test]
	fn same_node_is_a_noop() {
		let mut m = OverlayManager::new(CardGeometry::default());
		m.node_selected("a", geometry(200.0, 400.0), container());
		let before = m.state().clone();
		// pointer jitter reports the node slightly elsewhere
		assert!(!m.node_selected("a", geometry(205.0, 397.0), container()));
		assert_eq!(m.state(), &before);
	}

	#[test]
	fn container_move_keeps_relative_offset() {
		let mut m = OverlayManager::new(CardGeometry::default());
		m.node_selected("a", geometry(200.0, 400.0), container());
		let relative = m.position();
		let moved = ContainerRect {
			left: 40.0,
			top: -120.0,
			..container()
		};
		m.container_moved(moved);
		assert_eq!(m.position(), relative);
		let p = relative.unwrap();
		assert_eq!(m.screen(), Some((40.0 + p.relative_x, -120.0 + p.relative_y)));
	}

	#[test]
	fn hide_then_reselect_recomputes() {
		let mut m = OverlayManager::new(CardGeometry::default());
		m.node_selected("a", geometry(200.0, 400.0), container());
		m.hide();
		assert_eq!(m.state(), &OverlayState::Hidden);
		m.container_moved(container());
		assert_eq!(m.state(), &OverlayState::Hidden);
		assert!(m.node_selected("a", geometry(300.0, 400.0), container()));
		assert_eq!(m.position().unwrap().relative_x, 322.0);
	}

	proptest! {
		#[test]
		fn repeated_selection_never_moves(
			x in 0.0f64..800.0,
			y in 0.0f64..600.0,
			jitter in proptest::collection::vec((-5.0f64..5.0, -5.0f64..5.0), 1..20),
			ox in 0.0f64..800.0,
			oy in 0.0f64..600.0,
		) {
			let mut m = OverlayManager::new(CardGeometry::default());
			m.node_selected("a", geometry(x, y), container());
			let anchored = m.position();
			for (dx, dy) in jitter {
				m.node_selected("a", geometry(x + dx, y + dy), container());
				prop_assert_eq!(m.position(), anchored);
			}
			prop_assert!(m.node_selected("b", geometry(ox, oy), container()));
			prop_assert_eq!(m.anchored_id(), Some("b"));
		}
	}
}
