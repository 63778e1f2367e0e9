// src/ui/charts/model.rs
//! Chart geometry that does not need a painter: bar layout, colors, ticks.

use std::collections::HashMap;

use bevy_egui::egui::Color32;

use crate::dataset::systems::analysis::GroupedView;

/// Qualitative palette, cycled when there are more series than colors.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(0x63, 0x6E, 0xFA),
    Color32::from_rgb(0xEF, 0x55, 0x3B),
    Color32::from_rgb(0x00, 0xCC, 0x96),
    Color32::from_rgb(0xAB, 0x63, 0xFA),
    Color32::from_rgb(0xFF, 0xA1, 0x5A),
    Color32::from_rgb(0x19, 0xD3, 0xF3),
    Color32::from_rgb(0xFF, 0x66, 0x92),
    Color32::from_rgb(0xB6, 0xE8, 0x80),
    Color32::from_rgb(0xFF, 0x97, 0xFF),
    Color32::from_rgb(0xFE, 0xCB, 0x52),
];

pub fn palette_color(i: usize) -> Color32 {
    PALETTE[i % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Position within the group; one slot per legend entry.
    pub slot: usize,
    pub series: Option<String>,
    pub value: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub groups: Vec<BarGroup>,
    pub legend: Vec<(String, Color32)>,
    pub legend_title: Option<String>,
    /// Slots per group: 1 when bars are not split by series.
    pub slots: usize,
}

impl BarChart {
    /// One bar per category, each category in its own color.
    pub fn from_counts(title: String, column: &str, counts: &[(String, usize)]) -> Self {
        let legend: Vec<(String, Color32)> = counts
            .iter()
            .enumerate()
            .map(|(i, (value, _))| (value.clone(), palette_color(i)))
            .collect();
        let groups = counts
            .iter()
            .enumerate()
            .map(|(i, (value, n))| BarGroup {
                label: value.clone(),
                bars: vec![Bar {
                    slot: 0,
                    series: None,
                    value: *n as f64,
                    color: palette_color(i),
                }],
            })
            .collect();
        Self {
            title,
            x_label: column.to_string(),
            y_label: "count".to_string(),
            groups,
            legend,
            legend_title: Some(column.to_string()),
            slots: 1,
        }
    }

    /// Grouped bars from an aggregate. Groups and series keep the order they
    /// first appear in the (value-sorted) rows.
    pub fn from_grouped(view: &GroupedView) -> Self {
        let mut series_index: HashMap<&str, usize> = HashMap::new();
        let mut legend: Vec<(String, Color32)> = Vec::new();
        let mut group_index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<BarGroup> = Vec::new();

        for row in &view.rows {
            let (slot, color) = match row.series.as_deref() {
                Some(series) => {
                    let next = legend.len();
                    let slot = *series_index.entry(series).or_insert_with(|| next);
                    if slot == next {
                        legend.push((series.to_string(), palette_color(slot)));
                    }
                    (slot, palette_color(slot))
                }
                None => (0, palette_color(0)),
            };
            let next_group = groups.len();
            let g = *group_index.entry(row.x.as_str()).or_insert(next_group);
            if g == next_group {
                groups.push(BarGroup {
                    label: row.x.clone(),
                    bars: Vec::new(),
                });
            }
            groups[g].bars.push(Bar {
                slot,
                series: row.series.clone(),
                value: row.value,
                color,
            });
        }
        for group in &mut groups {
            group.bars.sort_by_key(|b| b.slot);
        }

        Self {
            title: view.title.clone(),
            x_label: view.x_column.clone(),
            y_label: view.value_label.clone(),
            groups,
            slots: legend.len().max(1),
            legend,
            legend_title: view.series_column.clone(),
        }
    }

    pub fn max_value(&self) -> f64 {
        self.groups
            .iter()
            .flat_map(|g| g.bars.iter().map(|b| b.value))
            .fold(0.0, f64::max)
    }

    pub fn min_value(&self) -> f64 {
        self.groups
            .iter()
            .flat_map(|g| g.bars.iter().map(|b| b.value))
            .fold(0.0, f64::min)
    }
}

/// A 1-2-5 step close to `raw`.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick positions at a nice step covering `[lo, hi]`, about `target` of them.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo {
        return vec![lo];
    }
    let step = nice_step((hi - lo) / target.max(1) as f64);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}
