//! Spiral placement of sized words on a fixed canvas
//!
//! Words are placed largest first. Each word starts near the middle of the
//! canvas and walks an Archimedean spiral until its padded box fits inside the
//! canvas without touching an already placed word. Words that never fit are
//! dropped.

use super::color::interpolate_rainbow;
use super::prng::Prng;
use crate::constants::*;
use crate::settings::Settings;
use crate::types::WordFrequency;

/// Text extents used for collision boxes.
pub trait TextMetrics {
    /// Unrotated `(width, height)` of `text` set at `font_size` px
    fn measure(&self, text: &str, font_size: f32) -> (f32, f32);
}

/// Deterministic estimate: full-width for CJK and Hangul, narrower Latin.
#[cfg(test)]
pub struct ApproxMetrics;

#[cfg(test)]
impl TextMetrics for ApproxMetrics {
    fn measure(&self, text: &str, font_size: f32) -> (f32, f32) {
        let ems: f32 = text
            .chars()
            .map(|c| {
                if is_wide(c) {
                    1.0
                } else if c.is_uppercase() {
                    0.62
                } else {
                    0.5
                }
            })
            .sum();
        (ems * font_size, font_size)
    }
}

#[cfg(test)]
fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub size_multiplier: f32,
    pub seed: u64,
    /// Only the largest `max_words` tokens are laid out
    pub max_words: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: CLOUD_WIDTH,
            height: CLOUD_HEIGHT,
            padding: CLOUD_PADDING,
            size_multiplier: SIZE_MULTIPLIER,
            seed: DEFAULT_LAYOUT_SEED,
            max_words: MAX_CLOUD_WORDS,
        }
    }
}

impl LayoutConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            width: settings.cloud_width.clamp(1.0, MAX_CLOUD_SIDE),
            height: settings.cloud_height.clamp(1.0, MAX_CLOUD_SIDE),
            padding: settings.cloud_padding.max(0.0),
            size_multiplier: settings.size_multiplier,
            seed: settings.layout_seed,
            max_words: MAX_CLOUD_WORDS,
        }
    }
}

/// A word with its final position. `x`/`y` is the centre of the text,
/// relative to the canvas centre.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    /// Degrees, clockwise: 0 or 90
    pub rotate: f32,
    pub width: f32,
    pub height: f32,
    pub color: [u8; 3],
}

impl PlacedWord {
    /// Width and height of the box the word occupies after rotation
    pub fn extent(&self) -> (f32, f32) {
        if self.rotate == 0.0 {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloudLayout {
    pub width: f32,
    pub height: f32,
    pub words: Vec<PlacedWord>,
    /// Tokens that could not be placed or had no usable size
    pub dropped: usize,
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

impl Rect {
    fn overlaps(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}

fn archimedean(t: f32, aspect: f32) -> (f32, f32) {
    let t = t * 0.1;
    (aspect * t * t.cos(), t * t.sin())
}

pub fn compute_layout(
    data: &[WordFrequency],
    config: &LayoutConfig,
    metrics: &dyn TextMetrics,
) -> CloudLayout {
    let (w, h) = (config.width, config.height);
    let mut rng = Prng::new(config.seed);

    // A glyph taller than the longest canvas side can never be placed, so it
    // is dropped before it reaches the font system
    let max_size = w.max(h) - 2.0 * config.padding;

    let mut tokens: Vec<(&str, f32)> = Vec::with_capacity(data.len());
    let mut dropped = 0;
    for entry in data {
        let size = entry.count as f32 * config.size_multiplier;
        if entry.word.is_empty() || !size.is_finite() || size <= 0.0 || size > max_size {
            dropped += 1;
            continue;
        }
        tokens.push((entry.word.as_str(), size));
    }
    // Stable: equal sizes keep server order
    tokens.sort_by(|a, b| b.1.total_cmp(&a.1));
    if tokens.len() > config.max_words {
        dropped += tokens.len() - config.max_words;
        tokens.truncate(config.max_words);
    }

    let aspect = w / h;
    let max_delta = (w * w + h * h).sqrt();
    let mut boxes: Vec<Rect> = Vec::with_capacity(tokens.len());
    let mut words: Vec<PlacedWord> = Vec::with_capacity(tokens.len());

    for (text, size) in tokens {
        let rotate = if rng.coin() { 0.0 } else { 90.0 };
        let (tw, th) = metrics.measure(text, size);
        let (bw, bh) = if rotate == 0.0 { (tw, th) } else { (th, tw) };
        let half_w = bw / 2.0 + config.padding;
        let half_h = bh / 2.0 + config.padding;

        let start_x = ((w * (rng.next_f32_01() + 0.5)) / 2.0).floor();
        let start_y = ((h * (rng.next_f32_01() + 0.5)) / 2.0).floor();
        let step = if rng.coin() { 1.0 } else { -1.0 };

        let mut t = 0.0_f32;
        let mut spot = None;
        loop {
            let (dx, dy) = archimedean(t, aspect);
            let (dx, dy) = (dx.trunc(), dy.trunc());
            if dx.abs().min(dy.abs()) >= max_delta {
                break;
            }
            t += step;

            let (cx, cy) = (start_x + dx, start_y + dy);
            let rect = Rect {
                x0: cx - half_w,
                y0: cy - half_h,
                x1: cx + half_w,
                y1: cy + half_h,
            };
            if rect.x0 < 0.0 || rect.y0 < 0.0 || rect.x1 > w || rect.y1 > h {
                continue;
            }
            if boxes.iter().any(|b| b.overlaps(&rect)) {
                continue;
            }
            spot = Some((cx, cy, rect));
            break;
        }

        match spot {
            Some((cx, cy, rect)) => {
                boxes.push(rect);
                words.push(PlacedWord {
                    text: text.to_string(),
                    size,
                    x: cx - w / 2.0,
                    y: cy - h / 2.0,
                    rotate,
                    width: tw,
                    height: th,
                    color: [0, 0, 0],
                });
            }
            None => dropped += 1,
        }
    }

    let n = words.len() as f64;
    for (i, word) in words.iter_mut().enumerate() {
        word.color = interpolate_rainbow(i as f64 / n);
    }

    CloudLayout {
        width: w,
        height: h,
        words,
        dropped,
    }
}
