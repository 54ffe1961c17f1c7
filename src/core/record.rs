//! # Country Records
//!
//! The domain record the rest of Atlas works with. Wire formats are translated
//! into `CountryRecord` at the data boundary (see `countries::types`), so
//! nothing past that point knows about REST payload shapes.
//!
//! Optional fields stay optional here. Display fallbacks (`"N/A"`, the
//! synthetic gini entry) are derived on demand and never written back.

use std::collections::BTreeMap;

/// Year key used when a record carries no gini data at all.
pub const PLACEHOLDER_GINI_YEAR: &str = "2000";

/// Text shown for values the API did not supply.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct Language {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub symbol: Option<String>,
}

impl Currency {
    /// `"Euro (€)"`, or just the name when no symbol is known.
    pub fn label(&self) -> String {
        match &self.symbol {
            Some(symbol) => format!("{} ({})", self.name, symbol),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountryRecord {
    /// ISO 3166-1 alpha-3 code, used for navigation between countries.
    pub code: String,
    /// Common English name, used for display, filtering and sorting.
    pub name: String,
    pub official_name: String,
    /// Common name in the first native language, may equal `name`.
    pub native_name: String,
    pub region: String,
    pub subregion: String,
    pub capital: Vec<String>,
    pub demonym: String,
    pub population: Option<u64>,
    pub area: Option<f64>,
    /// Year → percentage. Years sort numerically since they are all four digits.
    pub gini: Option<BTreeMap<String, f64>>,
    pub flag_url: String,
    /// Flag emoji, the terminal stand-in for `flag_url`.
    pub flag: String,
    pub timezones: Vec<String>,
    pub languages: Vec<Language>,
    pub currencies: Vec<Currency>,
    pub border_codes: Vec<String>,
}

/// The gini figure a record displays: the first year present, or the
/// placeholder entry when the record has none.
#[derive(Debug, Clone, PartialEq)]
pub struct GiniDisplay {
    pub year: String,
    pub value: f64,
    /// True when no real data existed and the placeholder was used.
    pub synthetic: bool,
}

impl CountryRecord {
    pub fn gini_display(&self) -> GiniDisplay {
        self.gini
            .as_ref()
            .and_then(|map| map.iter().next())
            .map(|(year, value)| GiniDisplay {
                year: year.clone(),
                value: *value,
                synthetic: false,
            })
            .unwrap_or_else(|| GiniDisplay {
                year: PLACEHOLDER_GINI_YEAR.to_string(),
                value: 0.0,
                synthetic: true,
            })
    }

    /// Area for the listing table, where a missing area shows as 0.
    pub fn area_or_zero(&self) -> f64 {
        self.area.unwrap_or(0.0)
    }

    /// True when the native-language name differs from the display name.
    pub fn has_distinct_native_name(&self) -> bool {
        !self.native_name.is_empty() && self.native_name != self.name
    }

    pub fn population_label(&self) -> String {
        match self.population {
            Some(population) if population > 0 => format_thousands(population),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn area_label(&self) -> String {
        match self.area {
            Some(area) if area > 0.0 => format_decimal(area),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    /// Detail-page gini: `"41.2%"`, or `"N/A"` without inventing a value.
    pub fn gini_label(&self) -> String {
        let display = self.gini_display();
        if display.synthetic {
            NOT_AVAILABLE.to_string()
        } else {
            format!("{}%", format_decimal(display.value))
        }
    }

    pub fn capital_label(&self) -> String {
        if self.capital.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            self.capital.join(", ")
        }
    }
}

/// Groups digits in threes: `1234567` → `"1,234,567"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// English-locale number formatting: grouped integer part, at most three
/// fraction digits, trailing zeros dropped.
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');
    let grouped = int_part
        .parse::<u64>()
        .map(format_thousands)
        .unwrap_or_else(|_| int_part.to_string());
    let sign = if value < 0.0 && (grouped != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Joins items as an English conjunction list: `"A"`, `"A and B"`,
/// `"A, B, and C"`.
pub fn conjunction_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
