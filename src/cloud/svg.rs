//! SVG rendition of a cloud layout

use super::color::css;
use super::layout::CloudLayout;
use crate::constants::CLOUD_FONT_FAMILY;
use std::fmt::Write;

/// Each word is stretched to the width it was measured at, so the export keeps
/// the canvas layout whichever face the viewer substitutes for the family.
pub fn to_svg(layout: &CloudLayout) -> String {
    let (w, h) = (layout.width, layout.height);
    let mut svg = String::with_capacity(256 + layout.words.len() * 160);
    // Writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(svg, r#"  <g transform="translate({},{})">"#, w / 2.0, h / 2.0);
    for word in &layout.words {
        let _ = writeln!(
            svg,
            r#"    <text text-anchor="middle" dominant-baseline="central" transform="translate({},{})rotate({})" font-size="{}px" font-family="{}" fill="{}" textLength="{}" lengthAdjust="spacingAndGlyphs">{}</text>"#,
            word.x,
            word.y,
            word.rotate,
            word.size,
            CLOUD_FONT_FAMILY,
            css(word.color),
            word.width,
            escape(&word.text)
        );
    }
    svg.push_str("  </g>\n</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::layout::PlacedWord;

    fn placed(text: &str, x: f32, y: f32, rotate: f32) -> PlacedWord {
        PlacedWord {
            text: text.into(),
            size: 24.0,
            x,
            y,
            rotate,
            width: 60.0,
            height: 24.0,
            color: [110, 64, 170],
        }
    }

    #[test]
    fn test_svg_structure() {
        let layout = CloudLayout {
            width: 600.0,
            height: 400.0,
            words: vec![placed("stock", -12.0, 30.0, 0.0), placed("market", 40.0, -5.0, 90.0)],
            dropped: 0,
        };
        let svg = to_svg(&layout);

        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="400""#));
        assert!(svg.contains(r#"<g transform="translate(300,200)">"#));
        assert_eq!(svg.matches("<text ").count(), 2);
        assert!(svg.contains(r#"transform="translate(-12,30)rotate(0)""#));
        assert!(svg.contains(r#"transform="translate(40,-5)rotate(90)""#));
        assert!(svg.contains(r#"font-size="24px" font-family="Impact" fill="rgb(110, 64, 170)""#));
    }

    #[test]
    fn test_svg_pins_measured_width() {
        let mut word = placed("반도체", 0.0, 0.0, 90.0);
        word.width = 72.5;
        let layout = CloudLayout {
            width: 600.0,
            height: 400.0,
            words: vec![word],
            dropped: 0,
        };
        let svg = to_svg(&layout);
        assert!(svg.contains(r#"textLength="72.5" lengthAdjust="spacingAndGlyphs">반도체</text>"#));
    }

    #[test]
    fn test_svg_escapes_text() {
        let layout = CloudLayout {
            width: 10.0,
            height: 10.0,
            words: vec![placed("R&D <\"AI\">", 0.0, 0.0, 0.0)],
            dropped: 0,
        };
        assert!(to_svg(&layout).contains(r#"lengthAdjust="spacingAndGlyphs">R&amp;D &lt;&quot;AI&quot;&gt;</text>"#));
    }

    #[test]
    fn test_empty_layout_has_no_text() {
        let svg = to_svg(&CloudLayout {
            width: 600.0,
            height: 400.0,
            ..CloudLayout::default()
        });
        assert!(!svg.contains("<text"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
