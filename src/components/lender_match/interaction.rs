use super::config::CardGeometry;
use super::overlay::{ContainerRect, NodeGeometry, OverlayManager};
use super::state::MatchGraphState;

/// What the host should show next to the canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayDisplay {
	Hidden,
	/// Full detail card at a viewport position.
	Detail {
		id: String,
		left: f64,
		top: f64,
		accent: &'static str,
	},
	/// "Select more filters" prompt, centered on the surface.
	Hint { left: f64, top: f64 },
}

/// Hover, click-to-pin, and overlay gating for the canvas.
///
/// Reads node geometry from [`MatchGraphState`] but never writes to it.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	hovered: Option<String>,
	selected: Option<String>,
	overlay: OverlayManager,
}

impl InteractionController {
	pub fn new(card: CardGeometry) -> Self {
		Self {
			hovered: None,
			selected: None,
			overlay: OverlayManager::new(card),
		}
	}

	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	#[cfg(test)]
	pub fn overlay(&self) -> &OverlayManager {
		&self.overlay
	}

	/// Node whose details are on display: the hovered one, else the pinned one.
	fn focus(&self) -> Option<&str> {
		self.hovered.as_deref().or(self.selected.as_deref())
	}

	/// Feeds the latest hit-test result. Returns `false` when the hovered node
	/// did not change, in which case nothing else was touched.
	pub fn hover(&mut self, hit: Option<&str>, nodes: &MatchGraphState, container: ContainerRect) -> bool {
		if self.hovered.as_deref() == hit {
			return false;
		}
		self.hovered = hit.map(str::to_string);
		self.reanchor(nodes, container);
		true
	}

	/// Pins the hovered node, or unpins it if it is already pinned. Clicking
	/// empty space unpins. Returns the new selection when it changed.
	pub fn click(&mut self, nodes: &MatchGraphState, container: ContainerRect) -> Option<Option<String>> {
		let next = match &self.hovered {
			Some(h) if self.selected.as_ref() == Some(h) => None,
			Some(h) => Some(h.clone()),
			None => None,
		};
		if next == self.selected {
			return None;
		}
		self.selected = next.clone();
		self.reanchor(nodes, container);
		Some(next)
	}

	/// Pointer left the canvas or the card. Crossing from one to the other
	/// (`still_inside`) keeps everything as is.
	pub fn leave_surface(&mut self, still_inside: bool) -> Option<Option<String>> {
		if still_inside {
			return None;
		}
		self.close()
	}

	/// Clears hover, selection and overlay.
	pub fn close(&mut self) -> Option<Option<String>> {
		self.hovered = None;
		self.overlay.hide();
		self.selected.take().map(|_| None)
	}

	pub fn container_moved(&mut self, container: ContainerRect) {
		self.overlay.container_moved(container);
	}

	/// Drops references to nodes that no longer exist, then re-anchors the
	/// card on whatever is still in focus.
	pub fn prune(&mut self, nodes: &MatchGraphState, container: ContainerRect) -> Option<Option<String>> {
		let stale = |id: Option<&str>| id.is_some_and(|id| nodes.node(id).is_none());
		if stale(self.hovered.as_deref()) {
			self.hovered = None;
		}
		let change = if stale(self.selected.as_deref()) {
			self.selected = None;
			Some(None)
		} else {
			None
		};
		if stale(self.overlay.anchored_id()) {
			self.reanchor(nodes, container);
		}
		change
	}

	fn reanchor(&mut self, nodes: &MatchGraphState, container: ContainerRect) {
		let focus = self.focus().map(str::to_string);
		match focus.as_deref().and_then(|id| nodes.node(id).map(|n| (id, n))) {
			Some((id, node)) => {
				let geometry = NodeGeometry {
					x: node.x,
					y: node.y,
					radius: node.display_radius,
				};
				self.overlay.node_selected(id, geometry, container);
			}
			None => self.overlay.hide(),
		}
	}

	/// Applies the gating rule to the focused node.
	///
	/// Details need every filter category satisfied and a positive score. With
	/// a positive score but unsatisfied filters only the hint is shown.
	pub fn display(&self, nodes: &MatchGraphState, container: ContainerRect, all_satisfied: bool) -> OverlayDisplay {
		let Some(id) = self.focus() else {
			return OverlayDisplay::Hidden;
		};
		let Some(node) = nodes.node(id) else {
			return OverlayDisplay::Hidden;
		};
		if node.score <= 0.0 {
			return OverlayDisplay::Hidden;
		}
		if !all_satisfied {
			return OverlayDisplay::Hint {
				left: container.left + container.width / 2.0,
				top: container.top + container.height / 2.0,
			};
		}
		match (self.overlay.anchored_id(), self.overlay.screen()) {
			(Some(anchored), Some((left, top))) if anchored == id => OverlayDisplay::Detail {
				id: id.to_string(),
				left,
				top,
				accent: node.color,
			},
			_ => OverlayDisplay::Hidden,
		}
	}
}
