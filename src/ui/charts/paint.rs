// src/ui/charts/paint.rs
use bevy_egui::egui::{self, Align2, Color32, CornerRadius, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};

use super::model::{nice_ticks, palette_color, BarChart};
use crate::dataset::definitions::format_number;
use crate::dataset::systems::analysis::{BoxSummary, Histogram};

const AXIS_LEFT: f32 = 64.0;
const AXIS_BOTTOM: f32 = 42.0;
const TOP_PAD: f32 = 12.0;
const RIGHT_PAD: f32 = 12.0;
const MIN_SLOT_WIDTH: f32 = 6.0;
const LEGEND_LIMIT: usize = 40;

fn small_font() -> FontId {
    FontId::proportional(11.0)
}

/// Shortens a label to roughly fit `width` pixels at the small font size.
fn fit_label(label: &str, width: f32) -> String {
    let max_chars = ((width / 6.0).floor() as usize).max(1);
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn draw_y_axis(painter: &egui::Painter, plot: Rect, lo: f64, hi: f64, text_color: Color32, grid: Color32) {
    let span = (hi - lo).max(f64::EPSILON);
    for tick in nice_ticks(lo, hi, 5) {
        let y = plot.bottom() - ((tick - lo) / span) as f32 * plot.height();
        painter.line_segment([Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)], Stroke::new(0.5, grid));
        painter.text(
            Pos2::new(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            format_number(tick),
            small_font(),
            text_color,
        );
    }
    painter.line_segment([plot.left_bottom(), plot.left_top()], Stroke::new(1.0, text_color));
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], Stroke::new(1.0, text_color));
}

pub fn show_legend(ui: &mut egui::Ui, title: &str, entries: &[(String, Color32)]) {
    if entries.len() < 2 {
        return;
    }
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(format!("{}:", title)).strong());
        for (name, color) in entries.iter().take(LEGEND_LIMIT) {
            let (swatch, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
            ui.painter().rect_filled(swatch, CornerRadius::same(2), *color);
            ui.label(name);
        }
        if entries.len() > LEGEND_LIMIT {
            ui.weak(format!("+{} more", entries.len() - LEGEND_LIMIT));
        }
    });
}

/// Vertical bars, one group per x value, one slot per series.
pub fn draw_bar_chart(ui: &mut egui::Ui, id_salt: &str, chart: &BarChart, height: f32) {
    ui.label(egui::RichText::new(&chart.title).heading());
    if chart.groups.is_empty() {
        ui.weak("No data to plot.");
        return;
    }
    if chart.slots > 1 {
        let title = chart.legend_title.as_deref().unwrap_or("Series");
        show_legend(ui, title, &chart.legend);
    }

    let visible_width = ui.available_width().max(200.0);
    let min_group_width = chart.slots as f32 * MIN_SLOT_WIDTH + 8.0;
    let plot_width = (visible_width - AXIS_LEFT - RIGHT_PAD).max(chart.groups.len() as f32 * min_group_width);
    let size = Vec2::new(plot_width + AXIS_LEFT + RIGHT_PAD, height);

    egui::ScrollArea::horizontal().id_salt(id_salt).show(ui, |ui| {
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let frame = response.rect;
        let plot = Rect::from_min_max(
            Pos2::new(frame.left() + AXIS_LEFT, frame.top() + TOP_PAD),
            Pos2::new(frame.right() - RIGHT_PAD, frame.bottom() - AXIS_BOTTOM),
        );
        let text_color = ui.visuals().text_color();
        let grid = ui.visuals().weak_text_color().gamma_multiply(0.4);

        let lo = chart.min_value();
        let hi = chart.max_value().max(lo + 1.0);
        let span = hi - lo;
        draw_y_axis(&painter, plot, lo, hi, text_color, grid);
        let y_of = |v: f64| plot.bottom() - ((v - lo) / span) as f32 * plot.height();
        let zero_y = y_of(0.0);

        let group_width = plot.width() / chart.groups.len() as f32;
        let inner = group_width * 0.8;
        let slot_width = inner / chart.slots as f32;
        let mut hovered: Option<String> = None;
        let pointer = response.hover_pos();

        for (g, group) in chart.groups.iter().enumerate() {
            let group_left = plot.left() + g as f32 * group_width + (group_width - inner) / 2.0;
            for bar in &group.bars {
                let left = group_left + bar.slot as f32 * slot_width;
                let top = y_of(bar.value);
                let rect = Rect::from_two_pos(Pos2::new(left, top), Pos2::new(left + slot_width, zero_y));
                painter.rect_filled(rect, CornerRadius::same(0), bar.color);
                if pointer.is_some_and(|p| rect.expand2(Vec2::new(0.0, 2.0)).contains(p)) {
                    painter.rect_stroke(rect, CornerRadius::same(0), Stroke::new(1.5, text_color), StrokeKind::Outside);
                    hovered = Some(match &bar.series {
                        Some(series) => format!(
                            "{}: {}\n{}: {}\n{}: {}",
                            chart.x_label,
                            group.label,
                            chart.legend_title.as_deref().unwrap_or("Series"),
                            series,
                            chart.y_label,
                            format_number(bar.value)
                        ),
                        None => format!(
                            "{}: {}\n{}: {}",
                            chart.x_label,
                            group.label,
                            chart.y_label,
                            format_number(bar.value)
                        ),
                    });
                }
            }
            painter.text(
                Pos2::new(plot.left() + (g as f32 + 0.5) * group_width, plot.bottom() + 4.0),
                Align2::CENTER_TOP,
                fit_label(&group.label, group_width),
                small_font(),
                text_color,
            );
        }

        painter.text(
            Pos2::new(plot.center().x, frame.bottom() - 4.0),
            Align2::CENTER_BOTTOM,
            &chart.x_label,
            small_font(),
            text_color,
        );
        painter.text(
            Pos2::new(frame.left() + 2.0, plot.top() - TOP_PAD + 2.0),
            Align2::LEFT_TOP,
            &chart.y_label,
            small_font(),
            text_color,
        );

        if let Some(text) = hovered {
            response.on_hover_text_at_pointer(text);
        }
    });
}

/// Histogram with a box-plot strip above it.
pub fn draw_histogram(
    ui: &mut egui::Ui,
    title: &str,
    column: &str,
    histogram: &Histogram,
    summary: Option<&BoxSummary>,
    height: f32,
) {
    ui.label(egui::RichText::new(title).heading());
    let width = ui.available_width().max(200.0);
    let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
    let frame = response.rect;
    let text_color = ui.visuals().text_color();
    let grid = ui.visuals().weak_text_color().gamma_multiply(0.4);
    let color = palette_color(0);

    let box_height = if summary.is_some() { 36.0 } else { 0.0 };
    let plot = Rect::from_min_max(
        Pos2::new(frame.left() + AXIS_LEFT, frame.top() + TOP_PAD + box_height),
        Pos2::new(frame.right() - RIGHT_PAD, frame.bottom() - AXIS_BOTTOM),
    );

    let x_lo = histogram.edges.first().copied().unwrap_or(0.0);
    let x_hi = histogram.edges.last().copied().unwrap_or(1.0);
    let x_span = (x_hi - x_lo).max(f64::EPSILON);
    let x_of = |v: f64| plot.left() + ((v - x_lo) / x_span) as f32 * plot.width();
    let y_hi = histogram.max_count().max(1) as f64;
    let y_of = |c: f64| plot.bottom() - (c / y_hi) as f32 * plot.height();

    draw_y_axis(&painter, plot, 0.0, y_hi, text_color, grid);

    let pointer = response.hover_pos();
    let mut hovered: Option<String> = None;
    for (i, count) in histogram.counts.iter().enumerate() {
        let (left, right) = (histogram.edges[i], histogram.edges[i + 1]);
        let rect = Rect::from_two_pos(
            Pos2::new(x_of(left), y_of(*count as f64)),
            Pos2::new(x_of(right), plot.bottom()),
        );
        painter.rect_filled(rect, CornerRadius::same(0), color);
        painter.rect_stroke(rect, CornerRadius::same(0), Stroke::new(0.5, grid), StrokeKind::Inside);
        let column_rect = Rect::from_x_y_ranges(rect.x_range(), plot.y_range());
        if pointer.is_some_and(|p| column_rect.contains(p)) {
            hovered = Some(format!(
                "{}: {} - {}\ncount: {}",
                column,
                format_number(left),
                format_number(right),
                count
            ));
        }
    }

    for tick in nice_ticks(x_lo, x_hi, 6) {
        let x = x_of(tick);
        painter.line_segment([Pos2::new(x, plot.bottom()), Pos2::new(x, plot.bottom() + 3.0)], Stroke::new(1.0, text_color));
        painter.text(Pos2::new(x, plot.bottom() + 4.0), Align2::CENTER_TOP, format_number(tick), small_font(), text_color);
    }
    painter.text(
        Pos2::new(plot.center().x, frame.bottom() - 4.0),
        Align2::CENTER_BOTTOM,
        column,
        small_font(),
        text_color,
    );
    painter.text(
        Pos2::new(frame.left() + 2.0, frame.top() + TOP_PAD + box_height),
        Align2::LEFT_TOP,
        "count",
        small_font(),
        text_color,
    );

    if let Some(summary) = summary {
        let mid = frame.top() + TOP_PAD + box_height / 2.0 - 4.0;
        let half = 10.0;
        let stroke = Stroke::new(1.2, color);
        let box_rect = Rect::from_min_max(
            Pos2::new(x_of(summary.q1), mid - half),
            Pos2::new(x_of(summary.q3), mid + half),
        );
        painter.rect_filled(box_rect, CornerRadius::same(0), color.gamma_multiply(0.35));
        painter.rect_stroke(box_rect, CornerRadius::same(0), stroke, StrokeKind::Middle);
        let median = x_of(summary.median);
        painter.line_segment([Pos2::new(median, mid - half), Pos2::new(median, mid + half)], stroke);
        let low = x_of(summary.lower_whisker);
        let high = x_of(summary.upper_whisker);
        painter.line_segment([Pos2::new(low, mid), Pos2::new(box_rect.left(), mid)], stroke);
        painter.line_segment([Pos2::new(box_rect.right(), mid), Pos2::new(high, mid)], stroke);
        painter.line_segment([Pos2::new(low, mid - half / 2.0), Pos2::new(low, mid + half / 2.0)], stroke);
        painter.line_segment([Pos2::new(high, mid - half / 2.0), Pos2::new(high, mid + half / 2.0)], stroke);
        for outlier in &summary.outliers {
            painter.circle_stroke(Pos2::new(x_of(*outlier), mid), 2.5, stroke);
        }
        let strip = Rect::from_x_y_ranges(plot.x_range(), (mid - half)..=(mid + half));
        if pointer.is_some_and(|p| strip.contains(p)) {
            hovered = Some(format!(
                "min fence: {}\nq1: {}\nmedian: {}\nq3: {}\nmax fence: {}",
                format_number(summary.lower_whisker),
                format_number(summary.q1),
                format_number(summary.median),
                format_number(summary.q3),
                format_number(summary.upper_whisker)
            ));
        }
    }

    if let Some(text) = hovered {
        response.on_hover_text_at_pointer(text);
    }
}
