use leptos::prelude::*;

use super::details::NodeDetails;

#[component]
pub fn DetailsPanel(#[prop(into)] details: Signal<Option<NodeDetails>>) -> impl IntoView {
	view! {
		<div class="iograph-details">
			{move || {
				details
					.get()
					.map(|d| {
						view! {
							<span class="iograph-details-title">{d.title}</span>
							<br />
							{match d.shrug {
								Some(shrug) => view! { <h2>{shrug}</h2> }.into_any(),
								None => d
									.links
									.into_iter()
									.map(|link| {
										view! {
											<a href=link.url target="_blank">{link.title}</a>
											"\u{a0}\u{a0}\u{a0}"
										}
									})
									.collect_view()
									.into_any(),
							}}
						}
					})
			}}
		</div>
	}
}
