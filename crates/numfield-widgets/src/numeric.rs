#![forbid(unsafe_code)]

//! Numeric text normalization and validation.
//!
//! Pure, total functions shared by the number input's commit path. Raw typed
//! text goes through [`normalize`] → [`parse_number`] → [`clamp`]; each
//! stage always produces a defined result, worst case an empty string, a
//! `None`, or zero.

/// Measurement mode for the number input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    /// Percentage, bounded to 0–100.
    #[default]
    Percent,
    /// Pixels, bounded below by 0 only.
    Pixel,
}

impl Unit {
    /// Upper bound for this unit, if any.
    #[must_use]
    pub const fn max(self) -> Option<f64> {
        match self {
            Self::Percent => Some(100.0),
            Self::Pixel => None,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Pixel => "px",
        }
    }
}

/// Canonicalize raw typed text into a numeric string.
///
/// - Empty or whitespace-only input yields the empty string.
/// - Commas become dots.
/// - Anything that is not an ASCII digit or a dot is removed.
/// - Only the first dot survives; later dots are spliced out and their
///   surrounding digits concatenated ("12.4.5" → "12.45").
#[must_use]
pub fn normalize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(raw.len());
    let mut seen_dot = false;
    for c in raw.chars() {
        let c = if c == ',' { '.' } else { c };
        if c.is_ascii_digit() {
            out.push(c);
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            out.push('.');
        }
    }
    out
}

/// Parse normalized text into a number.
///
/// The empty string and a lone "." carry no numeric content yet and yield
/// `None`. Parse failures after normalization shouldn't happen, but resolve
/// to `None` rather than an error.
#[must_use]
pub fn parse_number(normalized: &str) -> Option<f64> {
    if normalized.is_empty() || normalized == "." {
        return None;
    }
    normalized.parse::<f64>().ok()
}

/// Constrain a parsed value into the legal range for the unit.
///
/// `None` and NaN resolve to 0. Negative values resolve to 0. Percent values
/// above 100 resolve to 100. This is the general validator policy; the
/// commit path's revert-to-previous rule for over-limit typed entries under
/// Percent deliberately overrides it (see `NumberInput::commit`).
#[must_use]
pub fn clamp(value: Option<f64>, unit: Unit) -> f64 {
    let Some(v) = value else { return 0.0 };
    if v.is_nan() || v < 0.0 {
        return 0.0;
    }
    match unit.max() {
        Some(max) if v > max => max,
        _ => v,
    }
}

/// Canonical display form of a committed value.
///
/// Rust's `f64` `Display` is the shortest round-trip form (1.0 → "1",
/// 12.45 → "12.45"), matching what the field shows whenever it is not
/// being edited.
#[must_use]
pub fn format_value(v: f64) -> String {
    v.to_string()
}
