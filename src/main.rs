#![windows_subsystem = "windows"]
//! Word Cloud Explorer - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod cloud;
mod constants;
mod error;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::{App, Status};
use constants::*;
use eframe::egui;
use tracing::{error, info};
use utils::{get_data_dir, rasterize_icon};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "word-cloud-explorer.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,word_cloud_explorer=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Guard must live for the entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Word Cloud Explorer starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1280.0, 760.0)))
        .with_min_inner_size([1040.0, 640.0])
        .with_title(APP_NAME);

    match rasterize_icon(64) {
        Some((rgba, width, height)) => {
            let icon = egui::IconData { rgba, width, height };
            viewport = viewport.with_icon(std::sync::Arc::new(icon));
        }
        None => error!("Failed to rasterize window icon"),
    }

    let needs_center = win_pos.is_none();
    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir)?;
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Reopen the category from last session
        if !self.initial_load_done {
            self.initial_load_done = true;
            if let Some(category) = self.settings.last_category.clone() {
                self.load_category(ctx, &category);
            }
        }

        self.poll_events(ctx);
        self.render_settings_modal(ctx);

        // Left sidebar must be added BEFORE CentralPanel
        self.render_sidebar(ctx);
        self.render_results_panel(ctx);
        self.render_cloud_panel(ctx);

        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}

// ============================================================================
// PANELS
// ============================================================================

fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_SECTION)
                .color(theme::TEXT_MUTED)
                .strong(),
        )
        .selectable(false),
    );
    ui.add_space(theme::SPACING_SM);
}

impl App {
    /// Categories, search box and settings
    fn render_sidebar(&mut self, ctx: &egui::Context) {
        let mut category_clicked: Option<String> = None;
        let mut submit = false;
        let mut open_settings = false;

        egui::SidePanel::left("category_panel")
            .exact_width(theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin { left: 16, right: 0, top: 0, bottom: 0 }),
            )
            .show(ctx, |ui| {
                ui.set_max_width(theme::SIDEBAR_WIDTH - 16.0);
                ui.add_space(21.0);

                // Header with icon and title
                ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                    if self.icon_texture.is_none() {
                        self.icon_texture = rasterize_icon(theme::ICON_SIZE as u32 * 2).map(|(pixels, w, h)| {
                            ctx.load_texture(
                                "icon",
                                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                                egui::TextureOptions::LINEAR,
                            )
                        });
                    }
                    if let Some(texture) = &self.icon_texture {
                        ui.image(egui::load::SizedTexture::new(
                            texture.id(),
                            egui::vec2(theme::ICON_SIZE, theme::ICON_SIZE),
                        ));
                    }
                    ui.add_space(4.0);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("WORD CLOUD EXPLORER")
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                });
                ui.add_space(theme::SPACING_LG);

                theme::section_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    section_heading(ui, "CATEGORY");
                    if self.settings.categories.is_empty() {
                        ui.label(
                            egui::RichText::new("No categories configured")
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        );
                    }
                    ui.horizontal_wrapped(|ui| {
                        for category in &self.settings.categories {
                            let active = self.session.active_category.as_deref() == Some(category.as_str());
                            if ui::components::category_button(ui, category, active).clicked() {
                                category_clicked = Some(category.clone());
                            }
                        }
                    });
                });
                ui.add_space(theme::SPACING_LG);

                theme::section_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    section_heading(ui, "SEARCH");
                    theme::input_frame().show(ui, |ui| {
                        ui.spacing_mut().item_spacing.x = 4.0;
                        ui.horizontal(|ui| {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS)
                                        .size(theme::FONT_BODY)
                                        .color(theme::TEXT_DIM),
                                )
                                .selectable(false),
                            );
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut self.search_query)
                                    .id(ui.make_persistent_id("search_box"))
                                    .hint_text("Search articles...")
                                    .frame(false)
                                    .desired_width(ui.available_width()),
                            );
                            if self.focus_search {
                                self.focus_search = false;
                                response.request_focus();
                            }
                            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                                submit = true;
                                self.focus_search = true;
                            }
                        });
                    });
                    ui.add_space(theme::SPACING_MD);
                    let label = format!("{} Search", egui_phosphor::regular::MAGNIFYING_GLASS);
                    let button = theme::button_accent(label)
                        .min_size(egui::vec2(ui.available_width(), theme::BUTTON_HEIGHT));
                    if ui.add(button).clicked() {
                        submit = true;
                    }
                });

                // Bottom: settings gear and version
                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    ui.add_space(theme::SPACING_MD);
                    ui.horizontal(|ui| {
                        let gear = egui::Button::new(
                            egui::RichText::new(egui_phosphor::regular::GEAR_SIX).size(theme::FONT_HEADING),
                        )
                        .fill(egui::Color32::TRANSPARENT)
                        .frame(false);
                        if ui.add(gear).on_hover_text("Settings").clicked() {
                            open_settings = true;
                        }
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format!("v{}", APP_VERSION))
                                    .size(theme::FONT_CAPTION)
                                    .color(theme::TEXT_DIM),
                            )
                            .selectable(false),
                        );
                    });
                });
            });

        if let Some(category) = category_clicked {
            self.load_category(ctx, &category);
        }
        if submit {
            self.submit_search(ctx);
        }
        if open_settings {
            self.open_settings();
        }
    }

    /// Search results list
    fn render_results_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("results_panel")
            .exact_width(theme::RESULTS_PANEL_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin { left: 0, right: 16, top: 16, bottom: 16 }),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    section_heading(ui, "ARTICLES");
                    if !self.session.links.is_empty() {
                        ui.label(
                            egui::RichText::new(self.session.links.len().to_string())
                                .size(theme::FONT_SMALL)
                                .color(theme::ACCENT),
                        );
                    }
                    if self.session.is_searching() {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.spinner();
                        });
                    }
                });
                if let Some(word) = &self.session.last_search {
                    let shown = if word.is_empty() { "(empty query)" } else { word.as_str() };
                    ui.label(
                        egui::RichText::new(utils::truncate_chars(shown, 40))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    );
                }
                if let Status::Failed(msg) = &self.session.search_status {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(msg)
                                .size(theme::FONT_SMALL)
                                .color(theme::STATUS_ERROR),
                        )
                        .wrap(),
                    );
                }
                ui.add_space(theme::SPACING_SM);

                egui::ScrollArea::vertical()
                    .id_salt("results_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if self.session.links.is_empty() && !self.session.is_searching() {
                            ui.label(
                                egui::RichText::new("Search a word to list articles")
                                    .size(theme::FONT_SMALL)
                                    .color(theme::TEXT_DIM),
                            );
                        }
                        self.session.links.show(ui);
                    });
            });
    }

    /// Word cloud canvas, export actions and the word list
    fn render_cloud_panel(&mut self, ctx: &egui::Context) {
        let mut word_clicked: Option<String> = None;
        let mut export_svg = false;
        let mut export_png = false;

        // CentralPanel must be added LAST after all side panels
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                // Store panel rect for toast positioning
                self.central_panel_rect = Some(ui.max_rect());

                ui.horizontal(|ui| {
                    let title = self.session.active_category.as_deref().unwrap_or("No category");
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(title)
                                .size(theme::FONT_TITLE)
                                .color(theme::TEXT_PRIMARY)
                                .strong(),
                        )
                        .selectable(false),
                    );

                    let (text, color) = match &self.session.category_status {
                        Status::Idle => ("Pick a category".to_string(), theme::TEXT_DIM),
                        Status::Loading(msg) => (msg.clone(), theme::STATUS_WARNING),
                        Status::Ready(msg) => {
                            let at = self
                                .session
                                .loaded_at
                                .map(|t| format!(" at {}", t.format("%H:%M:%S")))
                                .unwrap_or_default();
                            (format!("{}{}", msg, at), theme::STATUS_SUCCESS)
                        }
                        Status::Failed(msg) => (msg.clone(), theme::STATUS_ERROR),
                    };
                    if self.session.is_loading_category() {
                        ui.spinner();
                    }
                    ui.label(egui::RichText::new(text).size(theme::FONT_SMALL).color(color));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let has_cloud = !self.session.cloud.is_empty();
                        let png = theme::button(format!("{} PNG", egui_phosphor::regular::IMAGE));
                        if ui.add_enabled(has_cloud, png).on_hover_text("Export as PNG").clicked() {
                            export_png = true;
                        }
                        let svg = theme::button(format!("{} SVG", egui_phosphor::regular::FILE_SVG));
                        if ui.add_enabled(has_cloud, svg).on_hover_text("Export as SVG").clicked() {
                            export_svg = true;
                        }
                    });
                });
                ui.add_space(theme::SPACING_MD);

                let placeholder = if self.session.is_loading_category() {
                    "Loading..."
                } else {
                    "No words to show"
                };
                if let Some(word) =
                    ui::components::word_cloud(ui, self.session.cloud.layout(), placeholder)
                {
                    word_clicked = Some(word);
                }
                ui.add_space(theme::SPACING_LG);

                theme::card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        section_heading(ui, "TOP WORDS");
                        if !self.session.word_list.is_empty() {
                            ui.label(
                                egui::RichText::new(self.session.word_list.len().to_string())
                                    .size(theme::FONT_SMALL)
                                    .color(theme::ACCENT),
                            );
                        }
                    });
                    egui::ScrollArea::vertical()
                        .id_salt("word_list_scroll")
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            if let Some(word) = self.session.word_list.show(ui) {
                                word_clicked = Some(word);
                            }
                        });
                });
            });

        if let Some(word) = word_clicked {
            self.search_for(ctx, &word);
        }
        if export_svg {
            self.export_svg();
        }
        if export_png {
            self.export_png();
        }
    }
}
