//! Standalone SVG serialisation of a plot, classes included, plus the
//! stylesheet the live component injects.

use std::fmt::Write;

use super::path::Num;
use super::state::{CirclePlotState, LINK_OPACITY};

/// Styles for the plot classes and their toggled states.
pub const STYLE: &str = r#"
.circle-plot .node {
	font: 300 11px "Helvetica Neue", Helvetica, Arial, sans-serif;
	cursor: pointer;
}
.circle-plot .node:hover,
.circle-plot .node--highlight--stick {
	font-weight: 700;
}
.circle-plot .link {
	fill: none;
	stroke-width: 1.5px;
	transition: opacity 0.2s;
}
.circle-plot .link--fade--out {
	opacity: 0.05 !important;
}
.circle-plot .link--highlight {
	stroke: #d62333 !important;
	stroke-width: 2.5px;
	opacity: 1 !important;
}
.circle-plot .arc {
	cursor: pointer;
	opacity: 0.9;
}
.circle-plot .arc:hover,
.circle-plot .arc--highlight--stick {
	opacity: 1;
	stroke: #555;
	stroke-width: 1px;
}
"#;

fn escape_xml_into(out: &mut String, text: &str) {
	for ch in text.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(ch),
		}
	}
}

/// The plot as an SVG document, in the same element order as the live view:
/// links, labels, then arcs.
pub fn to_svg(state: &CirclePlotState) -> String {
	let g = state.geometry;
	let mut out = String::new();
	let _ = write!(
		out,
		r#"<svg xmlns="http://www.w3.org/2000/svg" width="{d}" height="{d}" class="circle-plot"><style>{STYLE}</style><g transform="translate({r},{r})">"#,
		d = Num(g.diameter),
		r = Num(g.radius),
	);

	out.push_str("<g>");
	for (i, link) in state.links.iter().enumerate() {
		let _ = write!(
			out,
			r#"<path class="{}" d="{}" style="stroke: {}; opacity: {LINK_OPACITY}"/>"#,
			link.class(),
			state.link_path(i),
			state.link_stroke(i),
		);
	}
	out.push_str("</g><g>");
	for (i, label) in state.labels.iter().enumerate() {
		let _ = write!(
			out,
			r#"<text class="{}" dy=".31em" transform="{}" style="text-anchor: {}; fill: {}">"#,
			label.class(),
			label.transform,
			label.anchor,
			state.label_fill(i),
		);
		escape_xml_into(&mut out, &label.text);
		out.push_str("</text>");
	}
	out.push_str("</g><g>");
	for arc in &state.arcs {
		let _ = write!(
			out,
			r#"<path class="{}" d="{}" style="fill: {}"/>"#,
			arc.class(),
			arc.d,
			state.color_of(arc.node),
		);
	}
	out.push_str("</g></g></svg>");
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::circle_plot::types::{PlotData, PlotOptions};

	fn state() -> CirclePlotState {
		let data: PlotData = serde_json::from_str(
			r#"{
				"nodes": [0, 1, 2, 3],
				"links": [[0, 1], [2, 3]],
				"labels": ["a", "b", "c&d", "<e>"],
				"group": [[0, 0, 1, 1]]
			}"#,
		)
		.unwrap();
		CirclePlotState::new(&data, &PlotOptions::sized(600.0, 400.0)).unwrap()
	}

	#[test]
	fn document_has_every_element() {
		let svg = to_svg(&state());
		assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="480" height="480" class="circle-plot">"#));
		assert!(svg.contains(r#"<g transform="translate(240,240)">"#));
		assert_eq!(svg.matches(r#"class="link""#).count(), 2);
		assert_eq!(svg.matches(r#"<text class="node""#).count(), 4);
		assert_eq!(svg.matches(r#"class="arc""#).count(), 2);
		assert!(svg.contains(">c&amp;d</text>"));
		assert!(svg.contains(">&lt;e&gt;</text>"));
		assert!(svg.ends_with("</g></g></svg>"));
	}

	#[test]
	fn toggled_state_shows_in_classes() {
		let mut s = state();
		s.click_label(0);
		s.click_arc(1);
		let svg = to_svg(&s);
		assert!(svg.contains(r#"class="link link--fade--out link--highlight""#));
		assert!(svg.contains(r#"class="link link--fade--stick""#));
		assert!(svg.contains(r#"class="node node--highlight--stick""#));
		assert!(svg.contains(r#"class="arc arc--highlight--stick""#));
	}
}
