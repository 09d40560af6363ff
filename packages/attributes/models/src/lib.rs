#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Attribute metadata types for the tract choropleth.
//!
//! An [`AttributeSpec`] describes one selectable numeric column of the
//! American Community Survey housing table: its stable key, the title shown
//! in the attribute selector, the chart axis label, and how values are
//! formatted for display.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// How values of an attribute are rendered as text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ValueKind {
    /// Whole dollars with thousands separators (`$1,234`).
    Currency,
    /// Up to two decimals, trailing zeros trimmed (`1952`, `2.45`).
    PlainNumber,
}

impl ValueKind {
    /// Formats a single value for labels and axis ticks.
    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Currency => format_currency(value),
            Self::PlainNumber => format_plain(value),
        }
    }

    /// Formats a half-open value range, e.g. `"$1,000 to $1,250"`.
    #[must_use]
    pub fn format_range(self, lower: f64, upper: f64) -> String {
        format!("{} to {}", self.format(lower), self.format(upper))
    }
}

/// Display metadata for one selectable attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSpec {
    /// Stable column key (e.g. `"median_rent"`).
    pub name: String,
    /// Title shown in the attribute selector and chart heading.
    pub title: String,
    /// Label for the chart's value axis.
    pub axis_label: String,
    /// Display format for values of this attribute.
    pub value_kind: ValueKind,
}

impl AttributeSpec {
    /// Formats a value of this attribute, or `"No data"` when missing.
    #[must_use]
    pub fn format_value(&self, value: Option<f64>) -> String {
        value.map_or_else(|| NO_DATA_TEXT.to_string(), |v| self.value_kind.format(v))
    }
}

/// Text shown in place of a missing value.
pub const NO_DATA_TEXT: &str = "No data";

#[allow(clippy::cast_possible_truncation)]
fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let whole = rounded.abs() as u64;
    format!("{sign}${}", group_thousands(whole))
}

fn format_plain(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
