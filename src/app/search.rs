//! Article search

use super::session::AppEvent;
use super::App;
use eframe::egui;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

impl App {
    /// Search articles for the current query. Empty queries are sent too.
    pub fn submit_search(&mut self, ctx: &egui::Context) {
        if let Some(previous) = self.search_cancel.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        self.search_cancel = Some(token.clone());

        let word = self.search_query.clone();
        let seq = self.session.begin_search(&word);
        info!(word = %word, seq, "Submitting search");

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let term = word.clone();
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(word = %word, seq, "Search superseded");
                }
                result = client.search(&term) => {
                    tx.send(AppEvent::Search { seq, word, result }).ok();
                    ctx.request_repaint();
                }
            }
        });
    }

    /// Put `word` in the search box and search for it
    pub fn search_for(&mut self, ctx: &egui::Context, word: &str) {
        self.search_query = word.to_string();
        self.submit_search(ctx);
    }
}
