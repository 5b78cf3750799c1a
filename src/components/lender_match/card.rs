use leptos::prelude::*;

use super::types::{Candidate, FilterCategory};

fn format_amount(value: f64) -> String {
	let (scaled, suffix) = if value >= 1e9 {
		(value / 1e9, "B")
	} else if value >= 1e6 {
		(value / 1e6, "M")
	} else if value >= 1e3 {
		(value / 1e3, "K")
	} else {
		(value, "")
	};
	if scaled.fract().abs() < 0.05 {
		format!("${:.0}{suffix}", scaled)
	} else {
		format!("${:.1}{suffix}", scaled)
	}
}

fn deal_range(min: Option<f64>, max: Option<f64>) -> String {
	match (min, max) {
		(Some(min), Some(max)) => format!("{} - {}", format_amount(min), format_amount(max)),
		(Some(min), None) => format!("{}+", format_amount(min)),
		(None, Some(max)) => format!("Up to {}", format_amount(max)),
		(None, None) => "Not specified".to_string(),
	}
}

fn joined(values: &[String]) -> String {
	if values.is_empty() {
		"None listed".to_string()
	} else {
		values.join(", ")
	}
}

/// Detail card for the focused lender.
#[component]
pub fn MatchDetailCard(
	candidate: Candidate,
	accent: &'static str,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	let percent = (candidate.score() * 100.0).round() as u32;
	let rows = [
		(
			"Deal size",
			deal_range(candidate.min_deal_size, candidate.max_deal_size),
		),
		(
			FilterCategory::AssetTypes.label(),
			joined(candidate.values(FilterCategory::AssetTypes)),
		),
		(
			FilterCategory::CapitalTypes.label(),
			joined(candidate.values(FilterCategory::CapitalTypes)),
		),
		(
			FilterCategory::Locations.label(),
			joined(candidate.values(FilterCategory::Locations)),
		),
	];

	view! {
		<div class="match-card" style=format!("border-top: 4px solid {accent};")>
			<div class="match-card__header">
				<h3>{candidate.name.clone()}</h3>
				<button class="match-card__close" on:click=move |_| on_close.run(())>
					"×"
				</button>
			</div>
			<p class="match-card__score" style=format!("color: {accent};")>
				{format!("{percent}% match")}
			</p>
			<dl class="match-card__facts">
				{rows
					.into_iter()
					.map(|(term, value)| view! {
						<dt>{term}</dt>
						<dd>{value}</dd>
					})
					.collect_view()}
			</dl>
		</div>
	}
}

#[component]
pub fn SelectFiltersHint() -> impl IntoView {
	view! {
		<div class="match-hint">
			"Select at least one option in every filter category to see lender details"
		</div>
	}
}
