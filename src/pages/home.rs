use leptos::prelude::*;
use log::warn;

use crate::components::position_canvas::PositionCanvas;
use crate::net::api;

/// Fetches the node list once and hands it to the canvas. A failed fetch
/// leaves the page without a canvas.
#[component]
pub fn Home() -> impl IntoView {
	let positions = LocalResource::new(api::fetch_positions);

	view! {
		<div class="position-editor">
			<div class="position-overlay">
				<h1>"Node Positions"</h1>
				<p class="subtitle">
					"Drag nodes to move them. Use the corner handles to scale and the top handle to rotate."
				</p>
				<button on:click=move |_| positions.refetch()>"Reload"</button>
			</div>
			<Suspense fallback=|| ()>
				{move || {
					positions
						.get()
						.map(|result| match result {
							Ok(records) => view! { <PositionCanvas records=records /> }.into_any(),
							Err(err) => {
								warn!("could not load positions: {}", err);
								().into_any()
							}
						})
				}}
			</Suspense>
		</div>
	}
}
