//! Reply templates per interface language.
//!
//! Templates use `{city}` and `{count}` placeholders. The table is built
//! once at startup and shared read-only.

use std::collections::HashMap;

use crate::language::DEFAULT_LANGUAGE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub not_found_place: &'static str,
    pub not_found_venues: &'static str,
    pub found_header: &'static str,
    pub overflow: &'static str,
}

pub const ENGLISH: Templates = Templates {
    not_found_place: "Sorry, I couldn't find the city '{city}' on the map.",
    not_found_venues: "I found the city '{city}', but I couldn't find any Bitcoin-friendly bars there on BTCmap.",
    found_header: "Here are the Bitcoin-friendly bars in {city}:",
    overflow: "... and {count} more. Check https://btcmap.org",
};

pub const SPANISH: Templates = Templates {
    not_found_place: "Lo siento, no pude encontrar la ciudad '{city}' en el mapa.",
    not_found_venues: "Encontré la ciudad '{city}', pero no encontré bares Bitcoin-friendly ahí en BTCmap.",
    found_header: "Aquí están los bares Bitcoin-friendly de tu ciudad ({city}):",
    overflow: "... y {count} más. Revisa https://btcmap.org",
};

impl Templates {
    pub fn not_found_place(&self, city: &str) -> String {
        fill(self.not_found_place, &[("city", city)])
    }

    pub fn not_found_venues(&self, city: &str) -> String {
        fill(self.not_found_venues, &[("city", city)])
    }

    pub fn found_header(&self, city: &str) -> String {
        fill(self.found_header, &[("city", city)])
    }

    pub fn overflow(&self, count: usize) -> String {
        fill(self.overflow, &[("count", &count.to_string())])
    }
}

/// Replaces each `{name}` with its value. Unknown placeholders stay as-is.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

#[derive(Debug, Clone)]
pub struct Localization {
    table: HashMap<&'static str, Templates>,
}

impl Localization {
    pub fn new() -> Self {
        let mut table = HashMap::new();
        table.insert("en", ENGLISH);
        table.insert("es", SPANISH);
        Self { table }
    }

    /// Templates for `lang`, or the English set for anything unsupported.
    pub fn templates(&self, lang: &str) -> &Templates {
        self.table
            .get(lang)
            .or_else(|| self.table.get(DEFAULT_LANGUAGE))
            .unwrap_or(&ENGLISH)
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.table.contains_key(lang)
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::new()
    }
}
