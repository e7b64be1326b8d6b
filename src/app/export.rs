//! Save dialogs for the current word cloud

use super::App;
use crate::cloud::export::{self, ExportError};
use std::path::PathBuf;
use tracing::error;

const PNG_SCALE: f32 = 2.0;

/// File name stem for an exported cloud, safe on every platform
pub fn export_stem(category: Option<&str>) -> String {
    let name: String = category
        .unwrap_or("")
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let name = name.trim_matches('_');
    if name.is_empty() {
        "wordcloud".to_string()
    } else {
        format!("wordcloud-{}", name)
    }
}

impl App {
    pub fn export_svg(&mut self) {
        let Some(path) = self.pick_export_path("svg", "SVG image") else {
            return;
        };
        let result = export::write_svg(self.session.cloud.svg(), &path);
        self.report_export(result, path);
    }

    pub fn export_png(&mut self) {
        let Some(path) = self.pick_export_path("png", "PNG image") else {
            return;
        };
        let result = export::write_png(self.session.cloud.svg(), &path, PNG_SCALE);
        self.report_export(result, path);
    }

    fn pick_export_path(&self, ext: &str, label: &str) -> Option<PathBuf> {
        let stem = export_stem(self.session.active_category.as_deref());
        let dialog = rfd::FileDialog::new()
            .set_file_name(format!("{}.{}", stem, ext))
            .add_filter(label, &[ext]);
        let dialog = match dirs::picture_dir() {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        };
        dialog.save_file()
    }

    fn report_export(&mut self, result: Result<(), ExportError>, path: PathBuf) {
        match result {
            Ok(()) => self.show_toast(format!("Saved {}", path.display())),
            Err(e) => {
                error!(error = %e, path = %path.display(), "Export failed");
                self.show_toast(format!("Export failed: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_stem() {
        assert_eq!(export_stem(Some("IT/과학")), "wordcloud-IT_과학");
        assert_eq!(export_stem(Some("news")), "wordcloud-news");
        assert_eq!(export_stem(Some("//")), "wordcloud");
        assert_eq!(export_stem(None), "wordcloud");
    }
}
