//! Status-to-color lookup for report cells.

use std::collections::{BTreeMap, HashMap};

/// Cell fill colors keyed by status literal, with prefix rules for the
/// time-carrying late statuses.
///
/// # Example
///
/// ```
/// use attendance_engine::render::Palette;
///
/// let palette = Palette::default();
/// assert_eq!(palette.color_for("WOff"), Some(0xD3D3D3));
/// assert_eq!(palette.color_for("GSL 09:50"), Some(0xD8AAF2));
/// assert_eq!(palette.color_for("unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    exact: HashMap<String, u32>,
    /// Longest prefix first, so the most specific rule wins.
    prefixes: Vec<(String, u32)>,
}

const DEFAULT_EXACT: &[(&str, u32)] = &[
    ("HD", 0xB0C4DE),
    ("WOff", 0xD3D3D3),
    ("PL", 0x98FB98),
    ("CL", 0xADD8E6),
    ("LL", 0xFFA07A),
    ("LWP", 0xFF4500),
    ("WFH", 0xFFFACD),
    ("PT", 0x00FF00),
    ("Not Enrolled", 0xEB4D4D),
    ("Half Day", 0xFFFF00),
    ("Half Day Leave", 0xFFFF00),
    ("Punch Miss", 0x6969F0),
    ("Morning Punch Miss", 0xFFD700),
    ("Evening Punch Miss", 0xFFA500),
    ("AT", 0xFF6347),
];

const DEFAULT_PREFIXES: &[(&str, u32)] = &[("GSL ", 0xD8AAF2), ("ESL ", 0x83F7F0)];

impl Palette {
    /// Builds a palette from already-parsed colors.
    pub fn new(
        exact: impl IntoIterator<Item = (String, u32)>,
        prefixes: impl IntoIterator<Item = (String, u32)>,
    ) -> Self {
        let mut prefixes: Vec<(String, u32)> = prefixes.into_iter().collect();
        prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self {
            exact: exact.into_iter().collect(),
            prefixes,
        }
    }

    /// Builds a palette from `RRGGBB` hex strings (an optional leading `#` is
    /// accepted). Returns the offending value on failure.
    pub fn from_hex(
        exact: &BTreeMap<String, String>,
        prefixes: &BTreeMap<String, String>,
    ) -> Result<Self, String> {
        let parse_all = |map: &BTreeMap<String, String>| -> Result<Vec<(String, u32)>, String> {
            map.iter()
                .map(|(key, hex)| {
                    parse_hex_color(hex)
                        .map(|color| (key.clone(), color))
                        .ok_or_else(|| format!("invalid color '{hex}' for '{key}'"))
                })
                .collect()
        };
        Ok(Self::new(parse_all(exact)?, parse_all(prefixes)?))
    }

    /// The fill color for a status literal, if any.
    pub fn color_for(&self, literal: &str) -> Option<u32> {
        if let Some(color) = self.exact.get(literal) {
            return Some(*color);
        }
        self.prefixes
            .iter()
            .find(|(prefix, _)| literal.starts_with(prefix.as_str()))
            .map(|(_, color)| *color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXACT.iter().map(|(k, c)| (k.to_string(), *c)),
            DEFAULT_PREFIXES.iter().map(|(k, c)| (k.to_string(), *c)),
        )
    }
}

/// Parses `RRGGBB` or `#RRGGBB`.
fn parse_hex_color(hex: &str) -> Option<u32> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
