//! Wire types for the restcountries v3.1 JSON shape.
//!
//! Every field is optional on the wire: the listing endpoint only returns the
//! fields it was asked for, and plenty of territories lack capitals, gini
//! data, currencies or borders. Missing values fall back to empty/`None`.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::core::record::{CountryRecord, Currency, Language};

/// A JSON object kept as a list of entries in document order.
///
/// Language and currency objects are keyed by code, and the first entry is the
/// primary one, so the order has to survive deserialization.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct WireNativeName {
    #[serde(default)]
    pub official: String,
    #[serde(default)]
    pub common: String,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireName {
    #[serde(default)]
    pub common: String,
    #[serde(default)]
    pub official: String,
    #[serde(default)]
    pub native_name: OrderedMap<WireNativeName>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct WireCurrency {
    #[serde(default)]
    pub name: String,
    pub symbol: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct WireDemonym {
    #[serde(default)]
    pub f: String,
    #[serde(default)]
    pub m: String,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct WireFlags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct WireCountry {
    #[serde(default)]
    pub name: WireName,
    #[serde(default)]
    pub cca3: String,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: String,
    #[serde(default)]
    pub languages: OrderedMap<String>,
    #[serde(default)]
    pub currencies: OrderedMap<WireCurrency>,
    #[serde(default)]
    pub borders: Vec<String>,
    pub area: Option<f64>,
    #[serde(default)]
    pub demonyms: OrderedMap<WireDemonym>,
    #[serde(default)]
    pub flag: String,
    pub population: Option<u64>,
    pub gini: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub timezones: Vec<String>,
    #[serde(default)]
    pub flags: WireFlags,
}

impl WireCountry {
    /// English demonym if present, otherwise the first one listed.
    fn demonym(&self) -> String {
        let entries = &self.demonyms.0;
        entries
            .iter()
            .find(|(lang, _)| lang == "eng")
            .or_else(|| entries.first())
            .map(|(_, d)| if d.m.is_empty() { d.f.clone() } else { d.m.clone() })
            .unwrap_or_default()
    }
}

impl From<WireCountry> for CountryRecord {
    fn from(wire: WireCountry) -> Self {
        let demonym = wire.demonym();
        let native_name = wire
            .name
            .native_name
            .0
            .first()
            .map(|(_, native)| native.common.clone())
            .unwrap_or_default();
        let flag_url = if wire.flags.png.is_empty() {
            wire.flags.svg
        } else {
            wire.flags.png
        };

        CountryRecord {
            code: wire.cca3,
            name: wire.name.common,
            official_name: wire.name.official,
            native_name,
            region: wire.region,
            subregion: wire.subregion,
            capital: wire.capital,
            demonym,
            population: wire.population,
            area: wire.area,
            gini: wire.gini,
            flag_url,
            flag: wire.flag,
            timezones: wire.timezones,
            languages: wire
                .languages
                .0
                .into_iter()
                .map(|(code, name)| Language { code, name })
                .collect(),
            currencies: wire
                .currencies
                .0
                .into_iter()
                .map(|(code, c)| Currency {
                    code,
                    name: c.name,
                    symbol: c.symbol,
                })
                .collect(),
            border_codes: wire.borders,
        }
    }
}

/// The alpha endpoint answers with an array; older deployments return a bare
/// object. Accept both.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum OneOrMany {
    Many(Vec<WireCountry>),
    One(Box<WireCountry>),
}

impl OneOrMany {
    pub fn into_first(self) -> Option<WireCountry> {
        match self {
            OneOrMany::Many(list) => list.into_iter().next(),
            OneOrMany::One(country) => Some(*country),
        }
    }
}
