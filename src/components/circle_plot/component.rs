use leptos::prelude::*;
use leptos_meta::Style;
use log::{debug, error};
use web_sys::KeyboardEvent;

use super::render::STYLE;
use super::state::{CirclePlotState, Key, LINK_OPACITY};
use super::types::{PlotData, PlotOptions};

const FALLBACK_WIDTH: f64 = 800.0;
const FALLBACK_HEIGHT: f64 = 600.0;

fn build(data: &PlotData, options: &PlotOptions) -> CirclePlotState {
	CirclePlotState::new(data, options).unwrap_or_else(|e| {
		error!("{e}");
		CirclePlotState {
			default_color: options.default_color,
			..CirclePlotState::default()
		}
	})
}

/// Interactive circle plot of `data`. Fills the parent element unless both
/// `width` and `height` are given.
#[component]
pub fn CirclePlot(
	#[prop(into)] data: Signal<PlotData>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let size = RwSignal::new((
		width.unwrap_or(FALLBACK_WIDTH),
		height.unwrap_or(FALLBACK_HEIGHT),
	));
	let state = RwSignal::new(CirclePlotState::default());

	// Without an explicit size, fill the parent element.
	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		if width.is_some() && height.is_some() {
			return;
		}
		let parent = container.parent_element();
		let measure = |f: fn(&web_sys::Element) -> i32, fallback: f64| {
			parent
				.as_ref()
				.map(|p| f(p) as f64)
				.filter(|v| *v > 0.0)
				.unwrap_or(fallback)
		};
		let measured = (
			width.unwrap_or_else(|| measure(web_sys::Element::client_width, FALLBACK_WIDTH)),
			height.unwrap_or_else(|| measure(web_sys::Element::client_height, FALLBACK_HEIGHT)),
		);
		debug!("measured plot area {}x{}", measured.0, measured.1);
		size.set(measured);
	});

	Effect::new(move |_| {
		let (w, h) = size.get();
		let plot = data.with(|d| build(d, &PlotOptions::sized(w, h)));
		state.set(plot);
	});

	let counts = Memo::new(move |_| state.with(|s| (s.links.len(), s.labels.len(), s.arcs.len())));

	let links = move || {
		(0..counts.get().0)
			.map(|i| {
				view! {
					<path
						class=move || state.with(|s| s.links.get(i).map(|l| l.class()).unwrap_or_default())
						d=move || {
							state.with(|s| if i < s.links.len() { s.link_path(i) } else { String::new() })
						}
						style=move || {
							state.with(|s| {
								if i < s.links.len() {
									format!("stroke: {}; opacity: {}", s.link_stroke(i), LINK_OPACITY)
								} else {
									String::new()
								}
							})
						}
					/>
				}
			})
			.collect_view()
	};

	let labels = move || {
		(0..counts.get().1)
			.map(|i| {
				view! {
					<text
						class=move || state.with(|s| s.labels.get(i).map_or("node", |l| l.class()))
						dy=".31em"
						transform=move || state.with(|s| s.labels.get(i).map(|l| l.transform.clone()).unwrap_or_default())
						style=move || {
							state.with(|s| {
								s.labels
									.get(i)
									.map(|l| format!("text-anchor: {}; fill: {}", l.anchor, s.label_fill(i)))
									.unwrap_or_default()
							})
						}
						on:click=move |_| state.update(|s| s.click_label(i))
					>
						{move || state.with(|s| s.labels.get(i).map(|l| l.text.clone()).unwrap_or_default())}
					</text>
				}
			})
			.collect_view()
	};

	let arcs = move || {
		(0..counts.get().2)
			.map(|i| {
				view! {
					<path
						class=move || state.with(|s| s.arcs.get(i).map_or("arc", |a| a.class()))
						d=move || state.with(|s| s.arcs.get(i).map(|a| a.d.clone()).unwrap_or_default())
						style=move || {
							state.with(|s| {
								s.arcs
									.get(i)
									.map(|a| format!("fill: {}", s.color_of(a.node)))
									.unwrap_or_default()
							})
						}
						on:click=move |_| state.update(|s| s.click_arc(i))
					/>
				}
			})
			.collect_view()
	};

	let on_keydown = move |ev: KeyboardEvent| {
		let Some(key) = Key::from_key_name(&ev.key()) else {
			return;
		};
		if state.try_update(|s| s.handle_key(key)).unwrap_or(false) {
			ev.prevent_default();
		}
	};

	let diameter = move || state.with(|s| s.geometry.diameter.to_string());
	let transform = move || state.with(|s| format!("translate({r},{r})", r = s.geometry.radius));

	view! {
		<Style>{STYLE}</Style>
		<div
			node_ref=container_ref
			class="circle-plot-container"
			tabindex="-1"
			on:keydown=on_keydown
			style="outline: none;"
		>
			<svg width=diameter height=diameter class="circle-plot">
				<g transform=transform>
					<g>{links}</g>
					<g>{labels}</g>
					<g>{arcs}</g>
				</g>
			</svg>
		</div>
	}
}
