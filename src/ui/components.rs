//! Reusable UI components
//!
//! Standalone widgets drawn with the painter: the word cloud canvas and the
//! category buttons.

use crate::cloud::{CloudLayout, TextMetrics};
use crate::theme;
use eframe::egui;

/// Measures cloud words with the same fonts the canvas paints them in
pub struct EguiMetrics<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiMetrics<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

/// Text is laid out at most this big and scaled up; layout rasterizes glyphs
/// into the font atlas, which has a fixed side.
const MEASURE_MAX_SIZE: f32 = 64.0;

impl TextMetrics for EguiMetrics<'_> {
    fn measure(&self, text: &str, font_size: f32) -> (f32, f32) {
        let measured = font_size.min(MEASURE_MAX_SIZE);
        let size = self.ctx.fonts(|f| {
            f.layout_no_wrap(
                text.to_owned(),
                egui::FontId::proportional(measured),
                egui::Color32::WHITE,
            )
            .size()
        });
        let scale = font_size / measured;
        (size.x * scale, size.y * scale)
    }
}

/// Paint the cloud scaled to the available width. Returns the clicked word.
pub fn word_cloud(ui: &mut egui::Ui, layout: &CloudLayout, placeholder: &str) -> Option<String> {
    let scale = (ui.available_width() / layout.width).clamp(0.25, 1.5);
    let size = egui::vec2(layout.width, layout.height) * scale;
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    if !ui.is_rect_visible(rect) {
        return None;
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_ELEVATED);
    painter.rect_stroke(
        rect,
        theme::RADIUS_LARGE,
        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE),
        egui::StrokeKind::Inside,
    );

    if layout.words.is_empty() {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            placeholder,
            egui::FontId::proportional(theme::FONT_BODY),
            theme::TEXT_DIM,
        );
        return None;
    }

    let hover = response.hover_pos();
    let mut clicked = None;

    for word in &layout.words {
        let center = rect.center() + egui::vec2(word.x, word.y) * scale;
        let (bw, bh) = word.extent();
        let hit = egui::Rect::from_center_size(center, egui::vec2(bw, bh) * scale);
        let hovered = hover.is_some_and(|p| hit.contains(p));

        let [r, g, b] = word.color;
        let color = if hovered {
            theme::TEXT_PRIMARY
        } else {
            egui::Color32::from_rgb(r, g, b)
        };
        let galley = painter.layout_no_wrap(
            word.text.clone(),
            egui::FontId::proportional(word.size * scale),
            color,
        );

        // TextShape rotates around its top-left corner; shift so the rotation is about the centre
        let angle = word.rotate.to_radians();
        let (sin, cos) = angle.sin_cos();
        let half = galley.size() / 2.0;
        let offset = egui::vec2(half.x * cos - half.y * sin, half.x * sin + half.y * cos);
        painter.add(egui::epaint::TextShape::new(center - offset, galley, color).with_angle(angle));

        if hovered {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            if response.clicked() {
                clicked = Some(word.text.clone());
            }
        }
    }

    clicked
}

/// Category button; the active category is drawn in the accent colour.
pub fn category_button(ui: &mut egui::Ui, label: &str, active: bool) -> egui::Response {
    let button = if active {
        theme::button_accent(label)
    } else {
        theme::button(label)
    };
    let response = ui.add(button.min_size(egui::vec2(0.0, theme::BUTTON_HEIGHT)));
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response
}
