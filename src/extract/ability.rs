//! Abilities and their localized names, with effect text merged in from the
//! flavor-text table.
//!
//! Effect text exists per (ability, version group, language); only the
//! canonical version group is complete, so all other rows are excluded. An
//! ability whose flavor rows are all non-canonical keeps its translation
//! row with a NULL effect.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::db::{Record, SqlValue};
use crate::error::{Error, Result};
use crate::extract::{is_placeholder, CANONICAL_VERSION_GROUP};
use crate::registry::Registry;
use crate::schema::{tables, TableSchema};
use crate::source::{field, int_field, open_table};

const ABILITIES_CSV: &str = "abilities.csv";
const ABILITY_NAMES_CSV: &str = "ability_names.csv";
const ABILITY_FLAVOR_TEXT_CSV: &str = "ability_flavor_text.csv";

#[derive(Debug, PartialEq)]
pub struct Ability {
    pub id: i64,
    pub generation: i64,
}

impl Record for Ability {
    fn schema() -> &'static TableSchema {
        &tables::ABILITIES
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.id),
            SqlValue::Integer(self.generation),
        ]
    }
}

#[derive(Debug, PartialEq)]
pub struct AbilityTranslation {
    pub ability_id: i64,
    pub lang_id: i64,
    pub name: String,
    pub effect: Option<String>,
}

impl Record for AbilityTranslation {
    fn schema() -> &'static TableSchema {
        &tables::ABILITY_TRANSLATIONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.ability_id),
            SqlValue::Integer(self.lang_id),
            SqlValue::Text(self.name.clone()),
            match &self.effect {
                Some(effect) => SqlValue::Text(effect.clone()),
                None => SqlValue::Null,
            },
        ]
    }
}

pub fn extract(
    csv_dir: &Path,
    registry: &Registry,
) -> Result<(Vec<Ability>, Vec<AbilityTranslation>)> {
    let abilities = read_abilities(csv_dir)?;
    let known: HashSet<i64> = abilities.iter().map(|a| a.id).collect();

    let mut translations = read_ability_names(csv_dir, &known, registry)?;
    merge_effects(csv_dir, &mut translations, registry)?;

    Ok((abilities, translations.into_values().collect()))
}

fn read_abilities(csv_dir: &Path) -> Result<Vec<Ability>> {
    // abilities.csv: id, identifier, generation_id
    let mut abilities = Vec::new();
    let mut reader = open_table(csv_dir, ABILITIES_CSV)?;
    for row in reader.records() {
        let row = row?;
        let id = int_field(ABILITIES_CSV, &row, 0)?;
        if is_placeholder(id) {
            continue;
        }

        abilities.push(Ability {
            id,
            generation: int_field(ABILITIES_CSV, &row, 2)?,
        });
    }

    Ok(abilities)
}

fn read_ability_names(
    csv_dir: &Path,
    known: &HashSet<i64>,
    registry: &Registry,
) -> Result<BTreeMap<(i64, i64), AbilityTranslation>> {
    // ability_names.csv: ability_id, local_language_id, name
    let mut translations = BTreeMap::new();
    let mut reader = open_table(csv_dir, ABILITY_NAMES_CSV)?;
    for row in reader.records() {
        let row = row?;
        let ability_id = int_field(ABILITY_NAMES_CSV, &row, 0)?;
        if is_placeholder(ability_id) {
            continue;
        }

        let Some(lang_id) = registry.lang(int_field(ABILITY_NAMES_CSV, &row, 1)?) else {
            continue;
        };
        if !known.contains(&ability_id) {
            return Err(Error::Unresolved {
                table: ABILITY_NAMES_CSV,
                id: ability_id,
            });
        }

        translations.insert(
            (ability_id, lang_id),
            AbilityTranslation {
                ability_id,
                lang_id,
                name: field(ABILITY_NAMES_CSV, &row, 2)?.to_string(),
                effect: None,
            },
        );
    }

    Ok(translations)
}

/// Attach canonical-version effect text to the in-flight translations.
/// Raw newlines in the effect text are collapsed to spaces.
fn merge_effects(
    csv_dir: &Path,
    translations: &mut BTreeMap<(i64, i64), AbilityTranslation>,
    registry: &Registry,
) -> Result<()> {
    // ability_flavor_text.csv: ability_id, version_group_id, language_id, flavor_text
    let mut reader = open_table(csv_dir, ABILITY_FLAVOR_TEXT_CSV)?;
    for row in reader.records() {
        let row = row?;
        if int_field(ABILITY_FLAVOR_TEXT_CSV, &row, 1)? != CANONICAL_VERSION_GROUP {
            continue;
        }

        let ability_id = int_field(ABILITY_FLAVOR_TEXT_CSV, &row, 0)?;
        if is_placeholder(ability_id) {
            continue;
        }
        let Some(lang_id) = registry.lang(int_field(ABILITY_FLAVOR_TEXT_CSV, &row, 2)?)
        else {
            continue;
        };

        let translation = translations.get_mut(&(ability_id, lang_id)).ok_or(
            Error::Unresolved {
                table: ABILITY_FLAVOR_TEXT_CSV,
                id: ability_id,
            },
        )?;
        translation.effect =
            Some(field(ABILITY_FLAVOR_TEXT_CSV, &row, 3)?.replace('\n', " "));
    }

    Ok(())
}
