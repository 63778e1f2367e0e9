// src/ui/elements/insight_panel.rs
use bevy::prelude::*;
use bevy_egui::egui;

use super::notices::{notice_frame, NoticeKind};
use crate::ai::control_handler::PendingInsight;
use crate::ai::events::AiInsightRequested;
use crate::ai::{AiInsightCache, InsightKey};

/// How a stored answer is framed under its chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightStyle {
    Info,
    Success,
    /// Headed block without a frame.
    Heading,
}

/// What a view needs to request and show AI insights.
pub struct InsightControls<'a, 'w> {
    pub cache: &'a AiInsightCache,
    pub pending: &'a PendingInsight,
    pub requests: &'a mut EventWriter<'w, AiInsightRequested>,
}

impl InsightControls<'_, '_> {
    /// The prompt is built only when the button is clicked. Every button is
    /// disabled while any request is in flight.
    pub fn analyze_button(
        &mut self,
        ui: &mut egui::Ui,
        label: &str,
        key: InsightKey,
        spinner_text: &str,
        build_prompt: impl FnOnce() -> String,
    ) {
        let busy = self.pending.is_busy();
        let this_pending = self.pending.is_pending(&key);
        let clicked = ui
            .horizontal(|ui| {
                let clicked = ui.add_enabled(!busy, egui::Button::new(label)).clicked();
                if this_pending {
                    ui.spinner();
                    ui.label(spinner_text);
                } else if busy {
                    ui.weak("Waiting for another AI request to finish…");
                }
                clicked
            })
            .inner;
        if clicked {
            let prompt = build_prompt();
            debug!("Requesting AI insight '{}' ({} chars).", key, prompt.len());
            self.requests.write(AiInsightRequested { key, prompt });
        }
    }

    pub fn show_insight(&self, ui: &mut egui::Ui, key: &InsightKey, style: InsightStyle) {
        let Some(insight) = self.cache.get(key) else {
            return;
        };
        let stamp = format!("Generated {}", insight.generated_at.format("%H:%M:%S"));
        match style {
            InsightStyle::Info | InsightStyle::Success => {
                let kind = if style == InsightStyle::Info {
                    NoticeKind::Info
                } else {
                    NoticeKind::Success
                };
                notice_frame(ui, kind, |ui| {
                    ui.label(&insight.text);
                    ui.small(stamp);
                });
            }
            InsightStyle::Heading => {
                ui.label(egui::RichText::new("🤖 AI Insight:").heading());
                ui.label(&insight.text);
                ui.small(stamp);
            }
        }
    }
}
