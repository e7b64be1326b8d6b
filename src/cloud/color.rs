//! Rainbow colour scale for cloud words (cubehelix "sinebow" variant)

const A: f64 = -0.14861;
const B: f64 = 1.78277;
const C: f64 = -0.29227;
const D: f64 = -0.90649;
const E: f64 = 1.97294;

/// Colour at position `t` along the cyclical rainbow. Values outside [0,1] wrap.
pub fn interpolate_rainbow(t: f64) -> [u8; 3] {
    let t = if (0.0..=1.0).contains(&t) { t } else { t - t.floor() };
    let ts = (t - 0.5).abs();
    cubehelix(360.0 * t - 100.0, 1.5 - 1.5 * ts, 0.8 - 0.9 * ts)
}

fn cubehelix(h: f64, s: f64, l: f64) -> [u8; 3] {
    let h = (h + 120.0).to_radians();
    let a = s * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();
    [
        channel(l + a * (A * cos_h + B * sin_h)),
        channel(l + a * (C * cos_h + D * sin_h)),
        channel(l + a * (E * cos_h)),
    ]
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// CSS colour string, e.g. `rgb(110, 64, 170)`
pub fn css(rgb: [u8; 3]) -> String {
    format!("rgb({}, {}, {})", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rainbow_endpoints() {
        assert_eq!(interpolate_rainbow(0.0), [110, 64, 170]);
        assert_eq!(interpolate_rainbow(0.5), [175, 240, 91]);
        assert_eq!(interpolate_rainbow(1.0), interpolate_rainbow(0.0));
    }

    #[test]
    fn test_rainbow_wraps() {
        assert_eq!(interpolate_rainbow(1.25), interpolate_rainbow(0.25));
        assert_eq!(interpolate_rainbow(-0.75), interpolate_rainbow(0.25));
    }

    #[test]
    fn test_css() {
        assert_eq!(css([110, 64, 170]), "rgb(110, 64, 170)");
    }
}
