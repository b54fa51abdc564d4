//! SVG path data for bundled links, ring arcs and label placement.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::{self, Write};

use super::layout::Point;

/// Uniform cubic B-spline weights: first control, second control, end point.
const BASIS_C1: [f64; 4] = [0.0, 2.0 / 3.0, 1.0 / 3.0, 0.0];
const BASIS_C2: [f64; 4] = [0.0, 1.0 / 3.0, 2.0 / 3.0, 0.0];
const BASIS_END: [f64; 4] = [0.0, 1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0];

const FULL_CIRCLE: f64 = TAU - 1e-6;

/// Path-friendly number: three decimals at most, no negative zero.
#[derive(Clone, Copy, Debug)]
pub struct Num(pub f64);

impl fmt::Display for Num {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let v = (self.0 * 1000.0).round() / 1000.0;
		if !v.is_finite() || v == 0.0 {
			return f.write_str("0");
		}
		write!(f, "{v}")
	}
}

fn to_cartesian(p: Point) -> (f64, f64) {
	let a = p.x.to_radians() - FRAC_PI_2;
	(p.y * a.cos(), p.y * a.sin())
}

fn dot4(w: [f64; 4], v: [f64; 4]) -> f64 {
	w[0] * v[0] + w[1] * v[1] + w[2] * v[2] + w[3] * v[3]
}

/// Link curve through polar control points.
///
/// Control points are pulled toward the straight chord between the two ends
/// by `1 - tension`, then smoothed with a cubic B-spline. With fewer than
/// three points the result is a polyline.
pub fn radial_bundle(points: &[Point], tension: f64) -> String {
	let mut pts: Vec<(f64, f64)> = points.iter().copied().map(to_cartesian).collect();
	let Some(&(x0, y0)) = pts.first() else {
		return String::new();
	};
	let n = pts.len() - 1;
	if n > 0 {
		let (dx, dy) = (pts[n].0 - x0, pts[n].1 - y0);
		for (i, p) in pts.iter_mut().enumerate() {
			let t = i as f64 / n as f64;
			p.0 = tension * p.0 + (1.0 - tension) * (x0 + t * dx);
			p.1 = tension * p.1 + (1.0 - tension) * (y0 + t * dy);
		}
	}
	basis(&pts)
}

fn basis(pts: &[(f64, f64)]) -> String {
	let mut out = String::new();
	if pts.len() < 3 {
		for (i, &(x, y)) in pts.iter().enumerate() {
			let cmd = if i == 0 { 'M' } else { 'L' };
			let _ = write!(out, "{cmd}{},{}", Num(x), Num(y));
		}
		return out;
	}

	let (x0, y0) = pts[0];
	let mut px = [x0, x0, x0, pts[1].0];
	let mut py = [y0, y0, y0, pts[1].1];
	let _ = write!(
		out,
		"M{},{}L{},{}",
		Num(x0),
		Num(y0),
		Num(dot4(BASIS_END, px)),
		Num(dot4(BASIS_END, py))
	);

	let last = pts[pts.len() - 1];
	for &(x, y) in pts[2..].iter().chain(std::iter::once(&last)) {
		px.rotate_left(1);
		px[3] = x;
		py.rotate_left(1);
		py[3] = y;
		let _ = write!(
			out,
			"C{},{},{},{},{},{}",
			Num(dot4(BASIS_C1, px)),
			Num(dot4(BASIS_C1, py)),
			Num(dot4(BASIS_C2, px)),
			Num(dot4(BASIS_C2, py)),
			Num(dot4(BASIS_END, px)),
			Num(dot4(BASIS_END, py))
		);
	}
	let _ = write!(out, "L{},{}", Num(last.0), Num(last.1));
	out
}

fn circle(r: f64, sweep: u8) -> String {
	format!(
		"M0,{r}A{r},{r} 0 1,{sweep} 0,{neg}A{r},{r} 0 1,{sweep} 0,{r}",
		r = Num(r),
		neg = Num(-r),
	)
}

/// Annular sector between radii, angles in radians clockwise from 12 o'clock.
pub fn annular_sector(inner: f64, outer: f64, start: f64, end: f64) -> String {
	let (r0, r1) = if outer < inner {
		(outer.max(0.0), inner)
	} else {
		(inner.max(0.0), outer)
	};
	let (a0, a1) = (start - FRAC_PI_2, end - FRAC_PI_2);
	let sweep: u8 = if a0 > a1 { 0 } else { 1 };
	let da = (a1 - a0).abs();

	if da >= FULL_CIRCLE {
		let mut out = circle(r1, sweep);
		if r0 > 0.0 {
			out.push_str(&circle(r0, 1 - sweep));
		}
		out.push('Z');
		return out;
	}

	let large = if da <= PI { 0 } else { 1 };
	let mut out = format!(
		"M{},{}A{r},{r} 0 {large},{sweep} {},{}",
		Num(r1 * a0.cos()),
		Num(r1 * a0.sin()),
		Num(r1 * a1.cos()),
		Num(r1 * a1.sin()),
		r = Num(r1),
	);
	if r0 > 0.0 {
		let _ = write!(
			out,
			"L{},{}A{r},{r} 0 {large},{} {},{}",
			Num(r0 * a1.cos()),
			Num(r0 * a1.sin()),
			1 - sweep,
			Num(r0 * a0.cos()),
			Num(r0 * a0.sin()),
			r = Num(r0),
		);
	} else {
		out.push_str("L0,0");
	}
	out.push('Z');
	out
}

/// Transform placing a leaf label just outside the outermost ring. Labels on
/// the left half are flipped so they read left to right.
pub fn label_transform(p: Point, max_depth: usize) -> String {
	let offset = p.y + max_depth as f64 * 10.0 + 10.0;
	let flip = if p.x < 180.0 { "" } else { "rotate(180)" };
	format!("rotate({})translate({},0){flip}", Num(p.x - 90.0), Num(offset))
}

/// Text anchor for a label at `p`.
pub fn label_anchor(p: Point) -> &'static str {
	if p.x < 180.0 { "start" } else { "end" }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pt(x: f64, y: f64) -> Point {
		Point { x, y }
	}

	#[test]
	fn numbers_are_trimmed() {
		assert_eq!(Num(1.0).to_string(), "1");
		assert_eq!(Num(0.1 + 0.2).to_string(), "0.3");
		assert_eq!(Num(-1e-12).to_string(), "0");
		assert_eq!(Num(-2.5).to_string(), "-2.5");
	}

	#[test]
	fn two_points_make_a_line() {
		let d = radial_bundle(&[pt(0.0, 10.0), pt(90.0, 10.0)], 0.7);
		assert_eq!(d, "M0,-10L10,0");
	}

	#[test]
	fn single_point_is_a_move() {
		assert_eq!(radial_bundle(&[pt(90.0, 5.0)], 0.7), "M5,0");
		assert_eq!(radial_bundle(&[], 0.7), "");
	}

	#[test]
	fn spline_has_one_segment_per_point_after_the_first() {
		let pts = [pt(0.0, 10.0), pt(45.0, 5.0), pt(0.0, 0.0), pt(180.0, 5.0), pt(180.0, 10.0)];
		let d = radial_bundle(&pts, 0.7);
		assert!(d.starts_with("M0,-10L"));
		assert!(d.ends_with("L0,10"));
		assert_eq!(d.matches('C').count(), pts.len() - 1);
	}

	#[test]
	fn zero_tension_is_the_straight_chord() {
		let pts = [pt(0.0, 10.0), pt(0.0, 0.0), pt(180.0, 10.0)];
		let d = radial_bundle(&pts, 0.0);
		// Every control point lies on x = 0.
		for seg in d.split(['M', 'L', 'C']).filter(|s| !s.is_empty()) {
			let coords: Vec<&str> = seg.split(',').collect();
			for x in coords.iter().step_by(2) {
				assert_eq!(*x, "0", "{d}");
			}
		}
	}

	#[test]
	fn quarter_sector() {
		let d = annular_sector(10.0, 20.0, 0.0, FRAC_PI_2);
		assert_eq!(d, "M0,-20A20,20 0 0,1 20,0L10,0A10,10 0 0,0 0,-10Z");
	}

	#[test]
	fn full_ring_is_two_circles() {
		let d = annular_sector(10.0, 20.0, 0.0, TAU);
		assert!(d.starts_with("M0,20A20,20 0 1,1 0,-20"));
		assert!(d.contains("M0,10A10,10 0 1,0 0,-10"));
		assert!(d.ends_with('Z'));
	}

	#[test]
	fn labels_flip_on_the_left_half() {
		assert_eq!(label_transform(pt(90.0, 100.0), 2), "rotate(0)translate(130,0)");
		assert_eq!(
			label_transform(pt(270.0, 100.0), 2),
			"rotate(180)translate(130,0)rotate(180)"
		);
		assert_eq!(label_anchor(pt(179.9, 0.0)), "start");
		assert_eq!(label_anchor(pt(180.0, 0.0)), "end");
	}
}
