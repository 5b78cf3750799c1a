use leptos::prelude::*;
use log::error;

use crate::components::lender_match::{
	Candidate, FilterCategory, FilterSelection, LenderMatchCanvas,
};

const SAMPLE_LENDERS: &str = include_str!("sample_lenders.json");

/// Values offered per filter category on the demo page.
fn filter_options(category: FilterCategory) -> &'static [&'static str] {
	match category {
		FilterCategory::AssetTypes => &["Office", "Retail", "Multifamily", "Industrial", "Hospitality"],
		FilterCategory::DealTypes => &["Acquisition", "Refinance", "Construction", "Bridge"],
		FilterCategory::CapitalTypes => &["Senior Debt", "Mezzanine", "Preferred Equity", "Equity"],
		FilterCategory::DebtRanges => &["$1M-$5M", "$5M-$25M", "$25M-$100M", "$100M+"],
		FilterCategory::Locations => &["Northeast", "Southeast", "Midwest", "Southwest", "West Coast"],
	}
}

fn load_sample_lenders() -> Vec<Candidate> {
	serde_json::from_str(SAMPLE_LENDERS).unwrap_or_else(|err| {
		error!("sample lenders failed to parse: {err}");
		Vec::new()
	})
}

#[component]
fn FilterPanel(filters: RwSignal<FilterSelection>) -> impl IntoView {
	FilterCategory::ALL
		.into_iter()
		.map(|category| {
			view! {
				<fieldset class="filter-group">
					<legend>{category.label()}</legend>
					{filter_options(category)
						.iter()
						.map(|&value| {
							let checked = move || {
								filters.with(|f| f.selected(category).iter().any(|v| v == value))
							};
							view! {
								<label class="filter-chip">
									<input
										type="checkbox"
										prop:checked=checked
										on:change=move |_| filters.update(|f| f.toggle(category, value))
									/>
									{value}
								</label>
							}
						})
						.collect_view()}
				</fieldset>
			}
		})
		.collect_view()
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let lenders = Signal::stored(load_sample_lenders());
	let filters = RwSignal::new(FilterSelection::default());
	let (pinned, set_pinned) = signal(None::<String>);

	let on_selection_change =
		Callback::new(move |lender: Option<Candidate>| set_pinned.set(lender.map(|l| l.name)));

	view! {
		<div class="match-page">
			<aside class="match-filters">
				<h1>"Lender Matches"</h1>
				<p class="subtitle">
					"Pick at least one option per category. Hover a lender for details, click to pin it."
				</p>
				<FilterPanel filters=filters />
				<button on:click=move |_| filters.set(FilterSelection::default())>
					"Clear filters"
				</button>
				<p class="pinned">
					{move || {
						pinned
							.get()
							.map(|name| format!("Pinned: {name}"))
							.unwrap_or_else(|| "Nothing pinned".to_string())
					}}
				</p>
			</aside>
			<main class="match-graph">
				<LenderMatchCanvas
					candidates=lenders
					filters=filters
					on_selection_change=on_selection_change
				/>
			</main>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_lenders_parse() {
		let lenders = load_sample_lenders();
		assert_eq!(lenders.len(), 12);
		let tidewater = lenders.iter().find(|l| l.id == "tidewater").unwrap();
		assert!(tidewater.values(FilterCategory::AssetTypes).is_empty());
	}

	#[test]
	fn every_category_has_options() {
		for category in FilterCategory::ALL {
			assert!(!filter_options(category).is_empty());
		}
	}
}
