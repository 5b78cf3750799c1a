use serde::{Deserialize, Serialize};

/// Location value that matches every selected location.
pub const NATIONWIDE: &str = "nationwide";

/// A scored lender profile handed to the engine by the ranking collaborator.
///
/// Category lists are optional: a missing list simply never matches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub asset_types: Option<Vec<String>>,
	#[serde(default)]
	pub deal_types: Option<Vec<String>>,
	#[serde(default)]
	pub capital_types: Option<Vec<String>>,
	#[serde(default)]
	pub debt_ranges: Option<Vec<String>>,
	#[serde(default)]
	pub locations: Option<Vec<String>>,
	#[serde(default)]
	pub min_deal_size: Option<f64>,
	#[serde(default)]
	pub max_deal_size: Option<f64>,
	#[serde(default)]
	pub match_score: f64,
}

impl Candidate {
	pub fn values(&self, category: FilterCategory) -> &[String] {
		let list = match category {
			FilterCategory::AssetTypes => &self.asset_types,
			FilterCategory::DealTypes => &self.deal_types,
			FilterCategory::CapitalTypes => &self.capital_types,
			FilterCategory::DebtRanges => &self.debt_ranges,
			FilterCategory::Locations => &self.locations,
		};
		list.as_deref().unwrap_or_default()
	}

	/// Score clamped to `[0, 1]`, NaN read as zero.
	pub fn score(&self) -> f64 {
		if self.match_score.is_nan() {
			0.0
		} else {
			self.match_score.clamp(0.0, 1.0)
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterCategory {
	AssetTypes,
	DealTypes,
	CapitalTypes,
	DebtRanges,
	Locations,
}

impl FilterCategory {
	pub const ALL: [FilterCategory; 5] = [
		FilterCategory::AssetTypes,
		FilterCategory::DealTypes,
		FilterCategory::CapitalTypes,
		FilterCategory::DebtRanges,
		FilterCategory::Locations,
	];

	pub fn label(self) -> &'static str {
		match self {
			FilterCategory::AssetTypes => "Asset types",
			FilterCategory::DealTypes => "Deal types",
			FilterCategory::CapitalTypes => "Capital types",
			FilterCategory::DebtRanges => "Debt ranges",
			FilterCategory::Locations => "Locations",
		}
	}
}

/// The host UI's current filter choices, one list per category.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
	#[serde(default)]
	pub asset_types: Vec<String>,
	#[serde(default)]
	pub deal_types: Vec<String>,
	#[serde(default)]
	pub capital_types: Vec<String>,
	#[serde(default)]
	pub debt_ranges: Vec<String>,
	#[serde(default)]
	pub locations: Vec<String>,
}

impl FilterSelection {
	pub fn selected(&self, category: FilterCategory) -> &[String] {
		match category {
			FilterCategory::AssetTypes => &self.asset_types,
			FilterCategory::DealTypes => &self.deal_types,
			FilterCategory::CapitalTypes => &self.capital_types,
			FilterCategory::DebtRanges => &self.debt_ranges,
			FilterCategory::Locations => &self.locations,
		}
	}

	fn selected_mut(&mut self, category: FilterCategory) -> &mut Vec<String> {
		match category {
			FilterCategory::AssetTypes => &mut self.asset_types,
			FilterCategory::DealTypes => &mut self.deal_types,
			FilterCategory::CapitalTypes => &mut self.capital_types,
			FilterCategory::DebtRanges => &mut self.debt_ranges,
			FilterCategory::Locations => &mut self.locations,
		}
	}

	/// Adds `value` to the category if absent, removes it otherwise.
	pub fn toggle(&mut self, category: FilterCategory, value: &str) {
		let list = self.selected_mut(category);
		if let Some(pos) = list.iter().position(|v| v == value) {
			list.remove(pos);
		} else {
			list.push(value.to_string());
		}
	}

	/// Categories with at least one selected value.
	pub fn live_categories(&self) -> impl Iterator<Item = FilterCategory> + '_ {
		FilterCategory::ALL
			.into_iter()
			.filter(|&c| !self.selected(c).is_empty())
	}

	pub fn any_applied(&self) -> bool {
		self.live_categories().next().is_some()
	}

	pub fn all_satisfied(&self) -> bool {
		FilterCategory::ALL
			.iter()
			.all(|&c| !self.selected(c).is_empty())
	}
}

/// Coarse color bucket. `Muted` is active but scored below the mid tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tier {
	#[default]
	Gray,
	Muted,
	Mid,
	High,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Activation {
	pub active: bool,
	pub tier: Tier,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_and_null_category_lists_deserialize() {
		let candidate: Candidate = serde_json::from_str(
			r#"{"id":"l1","name":"Harbor Capital","assetTypes":null,"matchScore":0.7}"#,
		)
		.unwrap();
		assert!(candidate.values(FilterCategory::AssetTypes).is_empty());
		assert!(candidate.values(FilterCategory::Locations).is_empty());
		assert_eq!(candidate.min_deal_size, None);
	}

	#[test]
	fn score_is_clamped() {
		let mut c = Candidate {
			match_score: 1.7,
			..Default::default()
		};
		assert_eq!(c.score(), 1.0);
		c.match_score = -0.2;
		assert_eq!(c.score(), 0.0);
		c.match_score = f64::NAN;
		assert_eq!(c.score(), 0.0);
	}

	#[test]
	fn toggle_adds_then_removes() {
		let mut filters = FilterSelection::default();
		filters.toggle(FilterCategory::Locations, "Northeast");
		assert_eq!(filters.locations, vec!["Northeast".to_string()]);
		assert!(filters.any_applied());
		filters.toggle(FilterCategory::Locations, "Northeast");
		assert!(!filters.any_applied());
	}

	#[test]
	fn all_satisfied_needs_every_category() {
		let mut filters = FilterSelection::default();
		for category in FilterCategory::ALL {
			assert!(!filters.all_satisfied());
			filters.toggle(category, "x");
		}
		assert!(filters.all_satisfied());
		assert_eq!(filters.live_categories().count(), 5);
	}
}
