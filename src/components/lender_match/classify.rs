use super::types::{Activation, Candidate, FilterCategory, FilterSelection, NATIONWIDE, Tier};

pub const HIGH_TIER_SCORE: f64 = 0.8;
pub const MID_TIER_SCORE: f64 = 0.5;

/// Decides whether a candidate lights up under the current filters.
///
/// A candidate is active only when it hits every live category. The external
/// score picks the tier but never the activation.
pub fn classify(candidate: &Candidate, filters: &FilterSelection) -> Activation {
	let mut live = 0;
	let mut hits = 0;
	for category in filters.live_categories() {
		live += 1;
		if category_hit(candidate, filters, category) {
			hits += 1;
		}
	}

	if live == 0 || hits != live {
		return Activation::default();
	}

	Activation {
		active: true,
		tier: tier_for(candidate.score()),
	}
}

fn tier_for(score: f64) -> Tier {
	if score >= HIGH_TIER_SCORE {
		Tier::High
	} else if score >= MID_TIER_SCORE {
		Tier::Mid
	} else {
		Tier::Muted
	}
}

fn category_hit(candidate: &Candidate, filters: &FilterSelection, category: FilterCategory) -> bool {
	let selected = filters.selected(category);
	let values = candidate.values(category);
	match category {
		FilterCategory::Locations => {
			values.iter().any(|v| v.eq_ignore_ascii_case(NATIONWIDE)) || intersects(values, selected)
		}
		// debt ranges are pre-bucketed labels, so plain intersection applies
		_ => intersects(values, selected),
	}
}

fn intersects(values: &[String], selected: &[String]) -> bool {
	values.iter().any(|v| selected.contains(v))
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn office_northeast(score: f64) -> Candidate {
		Candidate {
			id: "l1".into(),
			name: "Summit Bridge".into(),
			asset_types: Some(vec!["Office".into(), "Retail".into()]),
			locations: Some(vec!["Northeast".into()]),
			match_score: score,
			..Default::default()
		}
	}

	fn filters(assets: &[&str], locations: &[&str]) -> FilterSelection {
		FilterSelection {
			asset_types: assets.iter().map(|s| s.to_string()).collect(),
			locations: locations.iter().map(|s| s.to_string()).collect(),
			..Default::default()
		}
	}

	#[test]
	fn no_live_categories_means_inactive() {
		let a = classify(&office_northeast(0.95), &FilterSelection::default());
		assert!(!a.active);
		assert_eq!(a.tier, Tier::Gray);
	}

	#[test]
	fn requires_every_live_category() {
		let c = office_northeast(0.9);
		assert!(classify(&c, &filters(&["Office"], &["Northeast"])).active);
		assert!(!classify(&c, &filters(&["Industrial"], &["Northeast"])).active);
		assert!(!classify(&c, &filters(&["Office"], &["Southwest"])).active);
	}

	#[test]
	fn nationwide_matches_any_location() {
		let mut c = office_northeast(0.9);
		c.locations = Some(vec!["Nationwide".into()]);
		assert!(classify(&c, &filters(&["Office"], &["Pacific"])).active);
	}

	#[test]
	fn debt_ranges_intersect() {
		let mut c = office_northeast(0.6);
		c.debt_ranges = Some(vec!["$5M-$25M".into()]);
		let mut f = FilterSelection::default();
		f.toggle(FilterCategory::DebtRanges, "$5M-$25M");
		assert!(classify(&c, &f).active);
		f.toggle(FilterCategory::DebtRanges, "$5M-$25M");
		f.toggle(FilterCategory::DebtRanges, "$100M+");
		assert!(!classify(&c, &f).active);
	}

	#[test]
	fn missing_category_list_never_matches() {
		let mut c = office_northeast(0.9);
		c.asset_types = None;
		assert!(!classify(&c, &filters(&["Office"], &[])).active);
	}

	#[test]
	fn tiers_follow_score_when_active() {
		let f = filters(&["Office"], &["Northeast"]);
		assert_eq!(classify(&office_northeast(0.85), &f).tier, Tier::High);
		assert_eq!(classify(&office_northeast(0.6), &f).tier, Tier::Mid);
		let low = classify(&office_northeast(0.3), &f);
		assert!(low.active);
		assert_eq!(low.tier, Tier::Muted);

		for score in [0.85, 0.6, 0.3] {
			let a = classify(&office_northeast(score), &FilterSelection::default());
			assert_eq!(a, Activation::default());
		}
	}

	#[test]
	fn high_score_does_not_rescue_a_category_miss() {
		let c = office_northeast(1.0);
		assert!(!classify(&c, &filters(&["Multifamily"], &[])).active);
	}

	fn arb_list() -> impl Strategy<Value = Option<Vec<String>>> {
		proptest::option::of(proptest::collection::vec("[a-c]{1,2}", 0..4))
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(200))]

		#[test]
		fn classify_is_total_and_idempotent(
			assets in arb_list(),
			locations in arb_list(),
			debt in arb_list(),
			score in proptest::num::f64::ANY,
			sel_assets in proptest::collection::vec("[a-c]{1,2}", 0..3),
			sel_locations in proptest::collection::vec("[a-c]{1,2}", 0..3),
		) {
			let c = Candidate {
				asset_types: assets,
				locations,
				debt_ranges: debt,
				match_score: score,
				..Default::default()
			};
			let f = FilterSelection {
				asset_types: sel_assets,
				locations: sel_locations,
				..Default::default()
			};
			let first = classify(&c, &f);
			prop_assert_eq!(first, classify(&c, &f));
			if !f.any_applied() {
				prop_assert!(!first.active);
			}
			if !first.active {
				prop_assert_eq!(first.tier, Tier::Gray);
			}
		}
	}
}
