//! Word list and article link views

use crate::theme;
use crate::types::{SearchResult, WordFrequency};
use crate::utils::truncate_chars;
use eframe::egui;
use tracing::{info, warn};

/// Top words, one item per word, in server order
#[derive(Debug, Default)]
pub struct WordList {
    items: Vec<String>,
}

impl WordList {
    pub fn render(&mut self, data: &[WordFrequency]) {
        self.items.clear();
        self.items.extend(data.iter().map(|d| d.word.clone()));
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the word the user clicked, if any.
    pub fn show(&self, ui: &mut egui::Ui) -> Option<String> {
        let mut clicked = None;
        for (rank, word) in self.items.iter().enumerate() {
            let (rect, response) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), 24.0),
                egui::Sense::click(),
            );
            let painter = ui.painter();
            if response.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_HOVER);
            }
            painter.text(
                rect.left_center() + egui::vec2(8.0, 0.0),
                egui::Align2::LEFT_CENTER,
                format!("{:>2}", rank + 1),
                egui::FontId::monospace(theme::FONT_SMALL),
                theme::TEXT_DIM,
            );
            painter.text(
                rect.left_center() + egui::vec2(36.0, 0.0),
                egui::Align2::LEFT_CENTER,
                word,
                egui::FontId::proportional(theme::FONT_BODY),
                if response.hovered() { theme::ACCENT_LIGHT } else { theme::TEXT_SECONDARY },
            );
            if response.clicked() {
                clicked = Some(word.clone());
            }
        }
        clicked
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub href: String,
    pub text: String,
}

/// Search results as clickable links that open in the system browser
#[derive(Debug, Default)]
pub struct LinkList {
    entries: Vec<LinkEntry>,
}

impl LinkList {
    pub fn render(&mut self, results: &[SearchResult]) {
        self.entries.clear();
        self.entries.extend(results.iter().map(|r| LinkEntry {
            href: r.link.clone(),
            text: r.title.clone(),
        }));
    }

    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        for entry in &self.entries {
            let response = theme::card_frame()
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(&entry.text)
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_PRIMARY),
                        )
                        .wrap(),
                    );
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(truncate_chars(&entry.href, 56))
                                .size(theme::FONT_CAPTION)
                                .color(theme::TEXT_DIM),
                        )
                        .truncate(),
                    );
                })
                .response
                .interact(egui::Sense::click())
                .on_hover_text(entry.href.as_str());

            if response.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            if response.clicked() {
                info!(link = %entry.href, "Opening article");
                if let Err(e) = open::that(&entry.href) {
                    warn!(link = %entry.href, error = %e, "Failed to open link");
                }
            }
            ui.add_space(theme::SPACING_SM);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list_one_item_per_word() {
        let mut list = WordList::default();
        list.render(&[WordFrequency::new("stock", 12.0), WordFrequency::new("market", 9.0)]);
        assert_eq!(list.items(), ["stock".to_string(), "market".to_string()]);

        list.render(&[WordFrequency::new("election", 3.0)]);
        assert_eq!(list.items(), ["election".to_string()]);
    }

    #[test]
    fn test_word_list_keeps_duplicates_and_order() {
        let mut list = WordList::default();
        list.render(&[
            WordFrequency::new("b", 1.0),
            WordFrequency::new("a", 5.0),
            WordFrequency::new("b", 1.0),
        ]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.items()[1], "a");
    }

    #[test]
    fn test_link_list_maps_title_and_link() {
        let mut links = LinkList::default();
        links.render(&[
            SearchResult { title: "A".into(), link: "http://x".into() },
            SearchResult { title: "B".into(), link: "http://y".into() },
        ]);
        assert_eq!(
            links.entries(),
            [
                LinkEntry { href: "http://x".into(), text: "A".into() },
                LinkEntry { href: "http://y".into(), text: "B".into() },
            ]
        );

        links.render(&[]);
        assert!(links.is_empty());
    }
}
