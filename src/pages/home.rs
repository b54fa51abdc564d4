use leptos::prelude::*;

use crate::components::circle_plot::{CirclePlot, NodeKey, PlotData};

/// The nine-node demo set: three groups of three, labelled a to i.
fn sample_data() -> PlotData {
	PlotData {
		nodes: (0..9_i64).map(NodeKey::from).collect(),
		links: vec![
			[0, 1],
			[0, 2],
			[3, 5],
			[2, 4],
			[1, 2],
			[3, 4],
			[1, 5],
			[1, 6],
			[2, 7],
			[2, 8],
			[3, 8],
			[8, 7],
		],
		labels: Some(
			["a", "b", "c", "d", "e", "f", "g", "h", "i"]
				.map(String::from)
				.to_vec(),
		),
		group: Some(vec![vec![0, 0, 0, 1, 1, 1, 2, 2, 2]]),
		color: None,
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let plot_data = Signal::derive(sample_data);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="plot-page">
				<h1>"Circle Plot"</h1>
				<p class="subtitle">
					"Click a label to highlight its links. Click an inner arc to isolate a group. Focus the plot and use up/down to change bundling tension."
				</p>
				<CirclePlot data=plot_data width=Some(600.0) height=Some(400.0) />
			</div>
		</ErrorBoundary>
	}
}
