//! Modal dialogs (settings) and toast notifications

use super::App;
use crate::constants::MAX_CLOUD_SIDE;
use crate::settings::Settings;
use crate::theme;
use crate::types::Backend;
use eframe::egui;

/// Editable copy of the settings while the modal is open
#[derive(Debug, Clone)]
pub struct SettingsDraft {
    pub settings: Settings,
    pub categories_text: String,
}

impl SettingsDraft {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
            categories_text: settings.categories.join("\n"),
        }
    }

    /// Merge the draft onto `current`, keeping state the modal doesn't edit.
    pub fn to_settings(&self, current: &Settings) -> Settings {
        let categories: Vec<String> = self
            .categories_text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Settings {
            window_x: current.window_x,
            window_y: current.window_y,
            window_w: current.window_w,
            window_h: current.window_h,
            last_category: current.last_category.clone(),
            server_url: self.settings.server_url.trim().to_string(),
            categories,
            ..self.settings.clone()
        }
    }
}

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(egui::RichText::new(text).size(theme::FONT_LABEL).color(theme::ACCENT))
            .selectable(false),
    );
    ui.add_space(2.0);
}

fn field_row(ui: &mut egui::Ui, label: &str, add: impl FnOnce(&mut egui::Ui)) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [120.0, 20.0],
            egui::Label::new(egui::RichText::new(label).color(theme::TEXT_MUTED)).selectable(false),
        );
        add(ui);
    });
}

impl App {
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }

    pub fn open_settings(&mut self) {
        self.settings_draft = SettingsDraft::from_settings(&self.settings);
        self.show_settings = true;
    }

    pub(crate) fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let mut apply = false;

        let modal_response = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(380.0);

                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(egui::RichText::new("Settings").size(theme::FONT_HEADING).strong())
                            .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let (rect, response) =
                            ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::click());
                        let close_color = if response.hovered() {
                            ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                            theme::STATUS_ERROR
                        } else {
                            theme::TEXT_DIM
                        };
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            egui_phosphor::regular::X,
                            egui::FontId::proportional(16.0),
                            close_color,
                        );
                        if response.clicked() {
                            self.show_settings = false;
                        }
                    });
                });
                ui.add_space(4.0);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                let draft = &mut self.settings_draft;

                // — Server —
                section_label(ui, "Server");
                theme::input_frame().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut draft.settings.server_url)
                            .hint_text("http://127.0.0.1:5000")
                            .frame(false)
                            .desired_width(ui.available_width())
                            .font(egui::FontId::proportional(theme::FONT_LABEL)),
                    );
                });
                ui.add_space(theme::SPACING_SM);
                let mut classic = draft.settings.backend == Backend::Classic;
                if theme::segmented_toggle(
                    ui,
                    Backend::Classic.label(),
                    Backend::NewsApi.label(),
                    &mut classic,
                ) {
                    draft.settings.backend = if classic { Backend::Classic } else { Backend::NewsApi };
                }
                if draft.settings.backend == Backend::NewsApi {
                    field_row(ui, "Recent days", |ui| {
                        ui.add(egui::DragValue::new(&mut draft.settings.recent_days).range(0..=365));
                    });
                    field_row(ui, "Article limit", |ui| {
                        ui.add(egui::DragValue::new(&mut draft.settings.article_limit).range(1..=500));
                    });
                }
                field_row(ui, "Timeout (s)", |ui| {
                    ui.add(egui::DragValue::new(&mut draft.settings.request_timeout_secs).range(1..=300));
                });

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // — Categories —
                section_label(ui, "Categories (one per line)");
                theme::input_frame().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut draft.categories_text)
                            .frame(false)
                            .desired_rows(4)
                            .desired_width(ui.available_width()),
                    );
                });

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // — Word cloud —
                section_label(ui, "Word Cloud");
                field_row(ui, "Canvas", |ui| {
                    ui.add(egui::DragValue::new(&mut draft.settings.cloud_width).range(100.0..=MAX_CLOUD_SIDE).suffix(" w"));
                    ui.add(egui::DragValue::new(&mut draft.settings.cloud_height).range(100.0..=MAX_CLOUD_SIDE).suffix(" h"));
                });
                field_row(ui, "Padding", |ui| {
                    ui.add(egui::DragValue::new(&mut draft.settings.cloud_padding).range(0.0..=40.0));
                });
                field_row(ui, "Size multiplier", |ui| {
                    ui.add(
                        egui::DragValue::new(&mut draft.settings.size_multiplier)
                            .range(0.1..=50.0)
                            .speed(0.1),
                    );
                });
                field_row(ui, "Layout seed", |ui| {
                    ui.add(egui::DragValue::new(&mut draft.settings.layout_seed));
                });

                ui.add_space(theme::SPACING_LG);
                ui.horizontal(|ui| {
                    if ui.add(theme::button_accent("Apply")).clicked() {
                        apply = true;
                    }
                    if ui.add(theme::button("Reset to defaults")).clicked() {
                        *draft = SettingsDraft::from_settings(&Settings::default());
                    }
                });
            });

        if apply {
            self.apply_settings(ctx);
            self.show_settings = false;
        } else if modal_response.should_close() {
            self.show_settings = false;
        }
    }

    /// Toast at the bottom-right of the central panel, 3s visible then fade, paused on hover
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(msg), Some(panel_rect)) = (self.toast_message.clone(), self.central_panel_rect) else {
            return;
        };
        let visible_duration = 3.0;
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let margin = 12.0;

        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);
        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
                let alpha = if elapsed > visible_duration {
                    ((total_duration - elapsed) / fade_duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };

                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0x1a, 0x1a, 0x1e, (230.0 * alpha) as u8))
                    .stroke(egui::Stroke::new(
                        1.0,
                        egui::Color32::from_rgba_unmultiplied(
                            theme::ACCENT.r(),
                            theme::ACCENT.g(),
                            theme::ACCENT.b(),
                            (100.0 * alpha) as u8,
                        ),
                    ))
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.set_max_width(420.0);
                        ui.label(egui::RichText::new(&msg).color(egui::Color32::from_rgba_unmultiplied(
                            255,
                            255,
                            255,
                            (255.0 * alpha) as u8,
                        )));
                    });
            });

        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_parses_categories() {
        let mut draft = SettingsDraft::from_settings(&Settings::default());
        draft.categories_text = "  경제 \n\nIT/과학\n   \nsports".to_string();
        let settings = draft.to_settings(&Settings::default());
        assert_eq!(settings.categories, vec!["경제", "IT/과학", "sports"]);
    }

    #[test]
    fn test_draft_keeps_untouched_state() {
        let current = Settings {
            window_w: Some(1200.0),
            last_category: Some("세계".into()),
            ..Settings::default()
        };
        let mut draft = SettingsDraft::from_settings(&Settings::default());
        draft.settings.server_url = "  http://crawler.local:8000/ ".into();
        draft.settings.backend = Backend::NewsApi;

        let merged = draft.to_settings(&current);
        assert_eq!(merged.window_w, Some(1200.0));
        assert_eq!(merged.last_category.as_deref(), Some("세계"));
        assert_eq!(merged.server_url, "http://crawler.local:8000/");
        assert_eq!(merged.backend, Backend::NewsApi);
    }

    #[test]
    fn test_draft_round_trips_categories() {
        let settings = Settings::default();
        let draft = SettingsDraft::from_settings(&settings);
        assert_eq!(draft.to_settings(&settings).categories, settings.categories);
    }
}
