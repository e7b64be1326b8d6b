//! Word cloud rendering: sized tokens, seeded spiral layout, SVG output

mod color;
pub mod export;
mod layout;
mod prng;
mod svg;

#[cfg(test)]
pub use layout::ApproxMetrics;
pub use layout::{CloudLayout, LayoutConfig, TextMetrics};

use layout::compute_layout;

use crate::types::WordFrequency;
use tracing::debug;

/// The rendered cloud. Each `render` replaces whatever was drawn before.
pub struct WordCloud {
    config: LayoutConfig,
    layout: CloudLayout,
    svg: String,
}

impl WordCloud {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            layout: CloudLayout {
                width: config.width,
                height: config.height,
                ..CloudLayout::default()
            },
            svg: String::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    pub fn render(&mut self, data: &[WordFrequency], metrics: &dyn TextMetrics) {
        self.clear();
        self.layout = compute_layout(data, &self.config, metrics);
        self.svg = svg::to_svg(&self.layout);
        debug!(
            placed = self.layout.words.len(),
            dropped = self.layout.dropped,
            "Word cloud laid out"
        );
    }

    pub fn clear(&mut self) {
        self.layout = CloudLayout {
            width: self.config.width,
            height: self.config.height,
            ..CloudLayout::default()
        };
        self.svg.clear();
    }

    pub fn layout(&self) -> &CloudLayout {
        &self.layout
    }

    /// Empty until the first render
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn is_empty(&self) -> bool {
        self.layout.words.is_empty()
    }
}
