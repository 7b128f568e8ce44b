//! Fixed reference data seeded once at init: supported languages and move
//! damage classes. Extractors receive the registry by reference; there is
//! no ambient global state.

use std::collections::HashMap;

use crate::db::{insert_many, Database, Record, SqlValue};
use crate::error::Result;
use crate::schema::{tables, TableSchema};

struct LanguageDef {
    /// Internal row id in the languages table
    id: i64,
    /// Language id in the pokeapi csv data
    external_id: i64,
    code: &'static str,
    name: &'static str,
}

const LANGUAGE_DEFS: &[LanguageDef] = &[
    LanguageDef {
        id: 1,
        external_id: 5,
        code: "fr",
        name: "Français",
    },
    LanguageDef {
        id: 2,
        external_id: 9,
        code: "en",
        name: "English",
    },
];

impl Record for LanguageDef {
    fn schema() -> &'static TableSchema {
        &tables::LANGUAGES
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.id),
            SqlValue::Text(self.code.to_string()),
            SqlValue::Text(self.name.to_string()),
        ]
    }
}

struct DamageClassDef {
    id: i64,
    name: &'static str,
    image: &'static str,
}

const DAMAGE_CLASS_DEFS: &[DamageClassDef] = &[
    DamageClassDef {
        id: 1,
        name: "physical",
        image: "physical.png",
    },
    DamageClassDef {
        id: 2,
        name: "special",
        image: "special.png",
    },
    DamageClassDef {
        id: 3,
        name: "status",
        image: "status.png",
    },
];

impl Record for DamageClassDef {
    fn schema() -> &'static TableSchema {
        &tables::DAMAGE_CLASSES
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.id),
            SqlValue::Text(self.name.to_string()),
            SqlValue::Text(self.image.to_string()),
        ]
    }
}

/// Read-only lookup tables shared by all extractors.
pub struct Registry {
    languages: HashMap<i64, i64>,
    damage_classes: HashMap<i64, &'static str>,
}

impl Registry {
    pub fn new() -> Self {
        let languages = LANGUAGE_DEFS
            .iter()
            .map(|def| (def.external_id, def.id))
            .collect();
        let damage_classes = DAMAGE_CLASS_DEFS
            .iter()
            .map(|def| (def.id, def.name))
            .collect();

        Self {
            languages,
            damage_classes,
        }
    }

    /// Create and populate the languages and damage_classes tables, then
    /// return the in-memory registry over them.
    pub fn seed(db: &mut Database) -> Result<Self> {
        db.create_tables(&[&tables::LANGUAGES, &tables::DAMAGE_CLASSES])?;

        let capacity = db.capacity();
        let tx = db.transaction()?;
        insert_many(&tx, capacity, LANGUAGE_DEFS)?;
        insert_many(&tx, capacity, DAMAGE_CLASS_DEFS)?;
        tx.commit()?;

        Ok(Self::new())
    }

    /// Map an external (pokeapi) language id to the internal languages row
    /// id. Returns None for unsupported languages.
    pub fn lang(&self, external_id: i64) -> Option<i64> {
        self.languages.get(&external_id).copied()
    }

    /// Name of a damage class by its fixed id.
    pub fn damage_class(&self, id: i64) -> Option<&'static str> {
        self.damage_classes.get(&id).copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_languages() {
        let registry = Registry::new();
        assert_eq!(registry.lang(5), Some(1)); // fr
        assert_eq!(registry.lang(9), Some(2)); // en
        assert_eq!(registry.lang(1), None); // ja is not supported
    }

    #[test]
    fn test_damage_classes() {
        let registry = Registry::new();
        assert_eq!(registry.damage_class(1), Some("physical"));
        assert_eq!(registry.damage_class(2), Some("special"));
        assert_eq!(registry.damage_class(3), Some("status"));
        assert_eq!(registry.damage_class(4), None);
    }
}
