use std::fmt;

/// Exact frame rate as a numerator/denominator pair.
///
/// NTSC rates stay fractional (`30000/1001`, not `29.97`) so the converter
/// can compute frame numbers without drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRate {
    num: u32,
    den: u32,
}

impl FrameRate {
    /// Fallback when the host has no usable frame rate configured.
    pub const DEFAULT: Self = Self { num: 60, den: 1 };

    /// Build a rate from an explicit pair.
    ///
    /// A zero denominator becomes `1`; a zero numerator yields
    /// [`FrameRate::DEFAULT`].
    pub fn new(num: u32, den: u32) -> Self {
        if num == 0 {
            return Self::DEFAULT;
        }
        Self {
            num,
            den: den.max(1),
        }
    }

    /// Look up one of the host's named common rates.
    pub fn from_common(name: &str) -> Option<Self> {
        let (num, den) = match name.trim() {
            "60" => (60, 1),
            "59.94" => (60000, 1001),
            "30" => (30, 1),
            "29.97" => (30000, 1001),
            "25" => (25, 1),
            "24" => (24, 1),
            "23.976" => (24000, 1001),
            _ => return None,
        };
        Some(Self { num, den })
    }

    /// Numerator.
    pub fn numerator(&self) -> u32 {
        self.num
    }

    /// Denominator, never zero.
    pub fn denominator(&self) -> u32 {
        self.den
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
