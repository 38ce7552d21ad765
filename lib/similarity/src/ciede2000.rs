//! CIEDE2000 color difference
//!
//! sRGB is linearized, converted to XYZ under the D65 white point and then to
//! CIE L*a*b*. The difference formula follows Sharma, Wu and Dalal (2005).

use pigment_core::color::round4;
use pigment_core::RgbColor;
use serde::Serialize;
use std::f64::consts::{PI, TAU};

const WHITE_X: f64 = 0.95047;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.08883;

const EPSILON: f64 = 0.008856;
const KAPPA: f64 = 903.3;

// 25^7
const POW25_7: f64 = 6_103_515_625.0;

/// A color in CIE L*a*b* space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    pub fn from_rgb(rgb: RgbColor) -> Self {
        let r = pivot_rgb(rgb.r());
        let g = pivot_rgb(rgb.g());
        let b = pivot_rgb(rgb.b());

        let x = (r * 0.4124564 + g * 0.3575761 + b * 0.1804375) / WHITE_X;
        let y = (r * 0.2126729 + g * 0.7151522 + b * 0.0721750) / WHITE_Y;
        let z = (r * 0.0193339 + g * 0.1191920 + b * 0.9503041) / WHITE_Z;

        let fx = pivot_lab(x);
        let fy = pivot_lab(y);
        let fz = pivot_lab(z);

        Self {
            l: (116.0 * fy - 16.0).max(0.0),
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<RgbColor> for Lab {
    fn from(rgb: RgbColor) -> Self {
        Lab::from_rgb(rgb)
    }
}

/// CIEDE2000 distance between two sRGB colors, rounded to 4 decimal places.
///
/// 0 means identical; values under ~1 are not perceptible, and black against
/// white is 100.
pub fn ciede2000(a: RgbColor, b: RgbColor) -> f64 {
    round4(ciede2000_lab(Lab::from_rgb(a), Lab::from_rgb(b)))
}

/// Unrounded CIEDE2000 distance between two Lab colors.
///
/// Hue angles are carried in radians; degree constants are converted where
/// they enter the formula.
pub fn ciede2000_lab(lab1: Lab, lab2: Lab) -> f64 {
    let c1 = lab1.a.hypot(lab1.b);
    let c2 = lab2.a.hypot(lab2.b);
    let avg_c = (c1 + c2) / 2.0;

    let avg_c7 = avg_c.powi(7);
    let g = 0.5 * (1.0 - (avg_c7 / (avg_c7 + POW25_7)).sqrt());

    let a1p = lab1.a * (1.0 + g);
    let a2p = lab2.a * (1.0 + g);
    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);
    let h1p = hue_angle(lab1.b, a1p);
    let h2p = hue_angle(lab2.b, a2p);

    let delta_lp = lab2.l - lab1.l;
    let delta_cp = c2p - c1p;

    let chroma_product = c1p * c2p;
    let delta_hp = if chroma_product == 0.0 {
        0.0
    } else {
        let d = h2p - h1p;
        if d > PI {
            d - TAU
        } else if d < -PI {
            d + TAU
        } else {
            d
        }
    };
    let delta_big_hp = 2.0 * chroma_product.sqrt() * (delta_hp / 2.0).sin();

    let avg_lp = (lab1.l + lab2.l) / 2.0;
    let avg_cp = (c1p + c2p) / 2.0;
    let avg_hp = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() > PI {
        if h1p + h2p < TAU {
            (h1p + h2p + TAU) / 2.0
        } else {
            (h1p + h2p - TAU) / 2.0
        }
    } else {
        (h1p + h2p) / 2.0
    };

    let t = 1.0 - 0.17 * (avg_hp - 30f64.to_radians()).cos()
        + 0.24 * (2.0 * avg_hp).cos()
        + 0.32 * (3.0 * avg_hp + 6f64.to_radians()).cos()
        - 0.20 * (4.0 * avg_hp - 63f64.to_radians()).cos();

    // Gaussian centered at 275 degrees with a 25 degree width
    let hue_offset = (avg_hp.to_degrees() - 275.0) / 25.0;
    let delta_theta = 30f64.to_radians() * (-hue_offset.powi(2)).exp();
    let avg_cp7 = avg_cp.powi(7);
    let rc = 2.0 * (avg_cp7 / (avg_cp7 + POW25_7)).sqrt();

    let l_offset = (avg_lp - 50.0).powi(2);
    let sl = 1.0 + 0.015 * l_offset / (20.0 + l_offset).sqrt();
    let sc = 1.0 + 0.045 * avg_cp;
    let sh = 1.0 + 0.015 * avg_cp * t;
    let rt = -(2.0 * delta_theta).sin() * rc;

    let dl = delta_lp / sl;
    let dc = delta_cp / sc;
    let dh = delta_big_hp / sh;

    (dl * dl + dc * dc + dh * dh + rt * dc * dh).sqrt()
}

fn pivot_rgb(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

fn pivot_lab(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

// Hue angle in [0, 2pi)
fn hue_angle(b: f64, a_prime: f64) -> f64 {
    if b == 0.0 && a_prime == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a_prime);
    if h < 0.0 {
        h + TAU
    } else {
        h
    }
}
