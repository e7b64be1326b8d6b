//! App module - contains the main application state and logic

mod export;
mod loader;
mod modals;
mod search;
mod session;
mod views;

pub use session::{AppEvent, Outcome, Session, Status};

use crate::api::ApiClient;
use crate::cloud::LayoutConfig;
use crate::error::AppError;
use crate::settings::Settings;
use crate::theme;
use crate::ui::components::EguiMetrics;
use eframe::egui;
use modals::SettingsDraft;
use std::path::PathBuf;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) client: ApiClient,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) events_tx: UnboundedSender<AppEvent>,
    pub(crate) events_rx: UnboundedReceiver<AppEvent>,
    pub(crate) session: Session,
    pub(crate) category_cancel: Option<CancellationToken>,
    pub(crate) search_cancel: Option<CancellationToken>,
    pub(crate) search_query: String,
    pub(crate) focus_search: bool,
    pub(crate) icon_texture: Option<egui::TextureHandle>,
    // Settings modal
    pub(crate) show_settings: bool,
    pub(crate) settings_draft: SettingsDraft,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) initial_load_done: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

/// Families searched for a Hangul/CJK fallback, most specific first
const CJK_FONT_FAMILIES: &[&str] = &[
    "NanumGothic",
    "Malgun Gothic",
    "Apple SD Gothic Neo",
    "Noto Sans CJK KR",
    "Noto Sans KR",
    "Source Han Sans KR",
    "Noto Sans CJK JP",
];

/// egui's bundled fonts have no Hangul; borrow one from the system.
fn load_cjk_fallback() -> Option<egui::FontData> {
    use resvg::usvg::fontdb;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    for &family in CJK_FONT_FAMILIES {
        let families = [fontdb::Family::Name(family)];
        let query = fontdb::Query {
            families: &families,
            ..fontdb::Query::default()
        };
        let Some(id) = db.query(&query) else {
            continue;
        };
        let font = db.with_face_data(id, |data, index| {
            let mut font = egui::FontData::from_owned(data.to_vec());
            font.index = index;
            font
        });
        if font.is_some() {
            debug!(family = %family, "Using system CJK font");
            return font;
        }
    }
    None
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, AppError> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

        match load_cjk_fallback() {
            Some(font) => {
                fonts.font_data.insert("cjk".to_owned(), std::sync::Arc::new(font));
                for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                    if let Some(list) = fonts.families.get_mut(&family) {
                        list.push("cjk".to_owned());
                    }
                }
            }
            None => info!("No system CJK font found, Hangul may not render"),
        }
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let client = ApiClient::new(&settings)?;
        let runtime = tokio::runtime::Runtime::new()?;
        let (events_tx, events_rx) = unbounded_channel();
        let session = Session::new(LayoutConfig::from_settings(&settings));
        let settings_draft = SettingsDraft::from_settings(&settings);

        info!(server = %client.base_url(), backend = ?settings.backend, "App initialized");

        Ok(Self {
            settings,
            data_dir,
            client,
            runtime,
            events_tx,
            events_rx,
            session,
            category_cancel: None,
            search_cancel: None,
            search_query: String::new(),
            focus_search: false,
            icon_texture: None,
            show_settings: false,
            settings_draft,
            toast_message: None,
            toast_start: None,
            central_panel_rect: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            initial_load_done: false,
        })
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }

    /// Drain finished requests into the session
    pub(crate) fn poll_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.events_rx.try_recv() {
            let metrics = EguiMetrics::new(ctx);
            match self.session.apply(event, &metrics) {
                Outcome::Applied => {
                    // Reopen only categories that actually loaded
                    if self.session.active_category.is_some() {
                        self.settings.last_category = self.session.active_category.clone();
                    }
                }
                Outcome::Stale => {}
                Outcome::Failed(msg) => self.show_toast(msg),
            }
        }
    }

    /// Adopt the settings modal's draft: new client, new layout, saved to disk
    pub(crate) fn apply_settings(&mut self, ctx: &egui::Context) {
        let next = self.settings_draft.to_settings(&self.settings);
        match ApiClient::new(&next) {
            Ok(client) => self.client = client,
            Err(e) => {
                error!(error = %e, "Failed to rebuild HTTP client");
                self.show_toast(format!("Settings not applied: {}", e));
                return;
            }
        }
        let layout_changed = LayoutConfig::from_settings(&next) != *self.session.cloud.config();
        self.settings = next;
        if layout_changed {
            self.session
                .relayout(LayoutConfig::from_settings(&self.settings), &EguiMetrics::new(ctx));
        }
        self.save_settings();
        info!(server = %self.client.base_url(), backend = ?self.settings.backend, "Settings applied");
    }
}
