// src/ui/elements/notices.rs
use bevy_egui::egui::{self, Color32, CornerRadius, Margin, Stroke};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn accent(self) -> Color32 {
        match self {
            NoticeKind::Info => Color32::from_rgb(0x1C, 0x83, 0xE1),
            NoticeKind::Success => Color32::from_rgb(0x21, 0xC3, 0x54),
            NoticeKind::Warning => Color32::from_rgb(0xFF, 0xBD, 0x45),
            NoticeKind::Error => Color32::from_rgb(0xFF, 0x4B, 0x4B),
        }
    }
}

/// Tinted box in the accent color of `kind`.
pub fn notice_frame<R>(
    ui: &mut egui::Ui,
    kind: NoticeKind,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let accent = kind.accent();
    egui::Frame::new()
        .fill(accent.gamma_multiply(0.15))
        .stroke(Stroke::new(1.0, accent.gamma_multiply(0.6)))
        .corner_radius(CornerRadius::same(6))
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

pub fn notice(ui: &mut egui::Ui, kind: NoticeKind, text: &str) {
    notice_frame(ui, kind, |ui| {
        ui.label(text);
    });
}

pub fn warning(ui: &mut egui::Ui, text: &str) {
    notice(ui, NoticeKind::Warning, &format!("⚠ {}", text));
}

pub fn error(ui: &mut egui::Ui, text: &str) {
    notice(ui, NoticeKind::Error, text);
}
