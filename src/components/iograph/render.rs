use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::Column;
use super::state::IoGraphState;

const LINK_DASHES: &[(f64, f64, f64)] = &[(4.0, 1.0, 8.0), (3.0, 2.0, 7.0), (2.0, 3.0, 6.0), (1.0, 4.0, 5.0)];

fn dash(ctx: &CanvasRenderingContext2d, on: f64, off: f64) {
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(on),
		&JsValue::from_f64(off),
	));
}

pub fn render(state: &IoGraphState, ctx: &CanvasRenderingContext2d, timestamp: f64) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	if state.flags.marching {
		ctx.set_line_dash_offset(timestamp / -190.0);
	}

	let columns = state.layout.columns();
	for (i, column) in columns.iter().enumerate() {
		draw_column(state, ctx, column, columns.get(i + 1));
	}

	if state.flags.debug {
		ctx.set_fill_style_str("red");
		ctx.set_font("8px Arial");
		ctx.set_text_align("left");
		let _ = ctx.fill_text(&state.frame_count.to_string(), 20.0, 10.0);
		if let Some((x, y)) = state.cursor {
			ctx.set_text_align("center");
			let _ = ctx.fill_text("+", x, y);
		}
	}
}

fn draw_column(
	state: &IoGraphState,
	ctx: &CanvasRenderingContext2d,
	column: &Column,
	next: Option<&Column>,
) {
	let thickness = state.layout.config().widget_height;
	let half = thickness / 2.0;

	ctx.set_line_width(1.0);
	if state.flags.debug {
		ctx.set_stroke_style_str("#DDDDDD");
		ctx.stroke_rect(column.x, 0.0, column.width, column.height);
	}

	ctx.set_line_cap("square");
	if let Some(next) = next {
		draw_links(state, ctx, column, next, half);
	}

	// Plain items first with square ends, created items on top with round ends.
	for created in [false, true] {
		ctx.begin_path();
		for widget in column.widgets() {
			if state.store.get(widget.node).created == created {
				ctx.move_to(column.x + half, widget.y + half);
				ctx.line_to(column.x + column.width - half, widget.y + half);
			}
		}
		ctx.set_line_cap(if created { "round" } else { "square" });
		ctx.set_line_width(thickness + 3.0);
		ctx.set_stroke_style_str("white");
		ctx.stroke();
		ctx.set_line_width(thickness);
		ctx.set_stroke_style_str("gray");
		ctx.stroke();
		ctx.set_line_width(thickness - 6.0);
		ctx.set_stroke_style_str(if created { "white" } else { "#FBFBFB" });
		ctx.stroke();
	}

	let baseline = half + half * 0.25;
	let max_text_width = column.width - thickness * 0.75;
	ctx.set_fill_style_str("black");
	for widget in column.widgets() {
		if state.is_selected(widget.node) {
			ctx.begin_path();
			ctx.move_to(column.x + half, widget.y + half);
			ctx.line_to(column.x + column.width - half, widget.y + half);
			ctx.set_line_width(thickness - 6.0);
			let created = state.store.get(widget.node).created;
			ctx.set_line_cap(if created { "round" } else { "square" });
			ctx.set_stroke_style_str("yellow");
			ctx.stroke();
		}

		ctx.set_font("14px Arial");
		ctx.set_text_align("left");
		let _ = ctx.fill_text_with_max_width(
			&widget.label,
			column.x + half,
			widget.y + baseline,
			max_text_width,
		);

		ctx.set_font("16px Arial");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&widget.icon, column.x + 2.0, widget.y + baseline + 1.0);

		if state.flags.debug {
			ctx.set_line_width(1.0);
			ctx.set_stroke_style_str("red");
			ctx.stroke_rect(column.x, widget.y, column.width, thickness);
		}
	}
}

/// Dotted lines from each widget's right end to its targets in `next`,
/// layered so the dots taper.
fn draw_links(
	state: &IoGraphState,
	ctx: &CanvasRenderingContext2d,
	column: &Column,
	next: &Column,
	half: f64,
) {
	let left_x = column.x + column.width - half;
	let right_x = next.x;
	for widget in column.widgets() {
		for link in &widget.links {
			let target = state.layout.widget(link.target);
			ctx.begin_path();
			ctx.set_stroke_style_str(link.style.color());
			ctx.move_to(left_x, widget.y + half);
			ctx.line_to(right_x, target.y + half);
			for &(width, on, off) in LINK_DASHES {
				ctx.set_line_width(width);
				dash(ctx, on, off);
				ctx.stroke();
			}
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}
