//! Category loading

use super::session::AppEvent;
use super::App;
use eframe::egui;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

impl App {
    /// Fetch top words for `category`. Supersedes any category request still in flight.
    pub fn load_category(&mut self, ctx: &egui::Context, category: &str) {
        if let Some(previous) = self.category_cancel.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        self.category_cancel = Some(token.clone());

        let seq = self.session.begin_category(category);
        info!(category = %category, seq, "Loading category");

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        let category = category.to_string();

        self.runtime.spawn(async move {
            let label = category.clone();
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(category = %category, seq, "Category request superseded");
                }
                result = client.top_words(&label) => {
                    tx.send(AppEvent::TopWords { seq, category, result }).ok();
                    ctx.request_repaint();
                }
            }
        });
    }
}
