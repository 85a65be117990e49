use crate::component::{AntoineConstants, ComponentSpec, ComponentTable};
use crate::error::ThermoResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub antoine: AntoineConstants,
    /// g/mol
    pub molar_mass: f64,
    pub acentric_factor: f64,
}

impl CatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    fn is_named(&self, id: &str) -> bool {
        let id = id.trim();
        self.canonical_id.eq_ignore_ascii_case(id)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(id))
    }

    pub fn to_spec(&self) -> ComponentSpec {
        ComponentSpec::new(self.canonical_id, self.antoine)
            .with_molar_mass(self.molar_mass)
            .with_acentric_factor(self.acentric_factor)
    }
}

const BUILTIN_CATALOG: [CatalogEntry; 5] = [
    CatalogEntry {
        canonical_id: "benzene",
        display_name: "Benzene",
        aliases: &["c6h6"],
        antoine: AntoineConstants::new(6.90565, 1211.033, 220.79),
        molar_mass: 78.11,
        acentric_factor: 0.210,
    },
    CatalogEntry {
        canonical_id: "toluene",
        display_name: "Toluene",
        aliases: &["c7h8", "methylbenzene"],
        antoine: AntoineConstants::new(6.95464, 1344.8, 219.482),
        molar_mass: 92.14,
        acentric_factor: 0.264,
    },
    CatalogEntry {
        canonical_id: "propane",
        display_name: "Propane",
        aliases: &["c3h8", "n-propane"],
        antoine: AntoineConstants::new(6.82973, 803.997, 246.99),
        molar_mass: 44.10,
        acentric_factor: 0.152,
    },
    CatalogEntry {
        canonical_id: "butane",
        display_name: "n-Butane",
        aliases: &["n-butane", "c4h10"],
        antoine: AntoineConstants::new(6.83029, 945.906, 240.0),
        molar_mass: 58.12,
        acentric_factor: 0.200,
    },
    CatalogEntry {
        canonical_id: "pentane",
        display_name: "n-Pentane",
        aliases: &["n-pentane", "c5h12"],
        antoine: AntoineConstants::new(6.85221, 1064.840, 232.014),
        molar_mass: 72.15,
        acentric_factor: 0.252,
    },
];

pub fn builtin_catalog() -> &'static [CatalogEntry] {
    &BUILTIN_CATALOG
}

pub fn filter_catalog(query: &str) -> Vec<CatalogEntry> {
    builtin_catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

/// Resolve an id or alias (case-insensitive) to a component spec.
pub fn lookup(id: &str) -> Option<ComponentSpec> {
    builtin_catalog()
        .iter()
        .find(|entry| entry.is_named(id))
        .map(CatalogEntry::to_spec)
}

/// Every built-in component, in catalog order, validated like any other table.
pub fn builtin_table() -> ThermoResult<ComponentTable> {
    let items = builtin_catalog().iter().map(CatalogEntry::to_spec).collect();
    ComponentTable::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn canonical_ids_are_unique() {
        let mut seen = HashSet::new();
        for entry in builtin_catalog() {
            assert!(
                seen.insert(entry.canonical_id),
                "duplicate canonical id: {}",
                entry.canonical_id
            );
        }
    }

    #[test]
    fn builtin_table_has_every_entry() {
        let table = builtin_table().expect("built-in catalog should validate");
        assert_eq!(table.len(), builtin_catalog().len());
        for entry in builtin_catalog() {
            assert!(table.get(entry.canonical_id).is_some(), "{}", entry.canonical_id);
        }
    }

    #[test]
    fn lookup_accepts_aliases() {
        let spec = lookup("N-Butane").expect("butane should resolve by alias");
        assert_eq!(spec.id(), "butane");
        assert_eq!(spec.molar_mass(), Some(58.12));
        assert!(lookup("unobtainium").is_none());
    }

    #[test]
    fn search_finds_aromatics() {
        let results = filter_catalog("benz");
        assert!(results.iter().any(|entry| entry.canonical_id == "benzene"));
        assert!(results.iter().any(|entry| entry.canonical_id == "toluene"));
    }
}
