use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A length in CSS pixels.
///
/// Wrap widths, measured widths and height limits all travel as `Pt`. Non-finite
/// inputs collapse to zero on conversion, so a `Pt` is always a usable number.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Pt(pub(crate) f32);

impl Display for Pt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px", self.0)
    }
}

impl PartialEq for Pt {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Pt {}

impl PartialOrd for Pt {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pt {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Pt {
    pub const ZERO: Pt = Pt(0.0);

    pub fn as_f32(self) -> f32 {
        self.0
    }

    /// True for a strictly positive width. Zero, negative and NaN are all "no width".
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    pub(crate) fn to_u32_floor(self) -> u32 {
        let v = if self.0.is_finite() { self.0 } else { 0.0 };
        if v <= 0.0 {
            0
        } else {
            v.floor().min(u32::MAX as f32) as u32
        }
    }
}

impl From<Pt> for f32 {
    fn from(value: Pt) -> Self {
        value.0
    }
}

impl From<u32> for Pt {
    fn from(value: u32) -> Self {
        Pt(value as f32)
    }
}

impl From<f32> for Pt {
    fn from(value: f32) -> Self {
        let v = if value.is_finite() { value } else { 0.0 };
        Pt(v)
    }
}

impl From<f64> for Pt {
    fn from(value: f64) -> Self {
        let v = if value.is_finite() { value } else { 0.0 };
        Pt(v as f32)
    }
}

impl std::ops::Mul<f32> for Pt {
    type Output = Pt;
    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl std::ops::Div<f32> for Pt {
    type Output = Pt;
    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}
