//! Moves and their localized names and effects.
//!
//! A move's type is resolved against the already-committed types table, so
//! this stage hard-depends on the types stage having run. The damage class
//! comes from the fixed registry lookup.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::db::{Database, Record, SqlValue};
use crate::error::{Error, Result};
use crate::extract::{is_placeholder, CANONICAL_VERSION_GROUP};
use crate::registry::Registry;
use crate::schema::{tables, TableSchema};
use crate::source::{field, int_field, open_table};

const MOVES_CSV: &str = "moves.csv";
const MOVE_NAMES_CSV: &str = "move_names.csv";
const MOVE_FLAVOR_TEXT_CSV: &str = "move_flavor_text.csv";

#[derive(Debug, PartialEq)]
pub struct Move {
    pub id: i64,
    pub generation: i64,
    pub type_id: i64,
    pub power: i64,
    pub pp: i64,
    pub accuracy: i64,
    pub priority: i64,
    pub damage_class: &'static str,
}

impl Record for Move {
    fn schema() -> &'static TableSchema {
        &tables::MOVES
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.id),
            SqlValue::Integer(self.generation),
            SqlValue::Integer(self.type_id),
            SqlValue::Integer(self.power),
            SqlValue::Integer(self.pp),
            SqlValue::Integer(self.accuracy),
            SqlValue::Integer(self.priority),
            SqlValue::Text(self.damage_class.to_string()),
        ]
    }
}

#[derive(Debug, PartialEq)]
pub struct MoveTranslation {
    pub move_id: i64,
    pub lang_id: i64,
    pub name: String,
    pub effect: Option<String>,
}

impl Record for MoveTranslation {
    fn schema() -> &'static TableSchema {
        &tables::MOVE_TRANSLATIONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.move_id),
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
    db: &Database,
) -> Result<(Vec<Move>, Vec<MoveTranslation>)> {
    let moves = read_moves(csv_dir, registry, db)?;
    let known: HashSet<i64> = moves.iter().map(|m| m.id).collect();

    let mut translations = read_move_names(csv_dir, &known, registry)?;
    merge_effects(csv_dir, &mut translations, registry)?;

    Ok((moves, translations.into_values().collect()))
}

fn read_moves(csv_dir: &Path, registry: &Registry, db: &Database) -> Result<Vec<Move>> {
    // moves.csv: id, identifier, generation_id, type_id, power, pp,
    //            accuracy, priority, target_id, damage_class_id
    let mut moves = Vec::new();
    let mut reader = open_table(csv_dir, MOVES_CSV)?;
    for row in reader.records() {
        let row = row?;
        let id = int_field(MOVES_CSV, &row, 0)?;
        if is_placeholder(id) {
            continue;
        }

        let type_id = int_field(MOVES_CSV, &row, 3)?;
        if !db.contains("types", type_id)? {
            return Err(Error::Unresolved {
                table: "types",
                id: type_id,
            });
        }

        let damage_class_id = int_field(MOVES_CSV, &row, 9)?;
        let damage_class =
            registry
                .damage_class(damage_class_id)
                .ok_or(Error::Unresolved {
                    table: "damage_classes",
                    id: damage_class_id,
                })?;

        moves.push(Move {
            id,
            generation: int_field(MOVES_CSV, &row, 2)?,
            type_id,
            power: int_field(MOVES_CSV, &row, 4)?,
            pp: int_field(MOVES_CSV, &row, 5)?,
            accuracy: int_field(MOVES_CSV, &row, 6)?,
            priority: int_field(MOVES_CSV, &row, 7)?,
            damage_class,
        });
    }

    Ok(moves)
}

fn read_move_names(
    csv_dir: &Path,
    known: &HashSet<i64>,
    registry: &Registry,
) -> Result<BTreeMap<(i64, i64), MoveTranslation>> {
    // move_names.csv: move_id, local_language_id, name
    let mut translations = BTreeMap::new();
    let mut reader = open_table(csv_dir, MOVE_NAMES_CSV)?;
    for row in reader.records() {
        let row = row?;
        let move_id = int_field(MOVE_NAMES_CSV, &row, 0)?;
        if is_placeholder(move_id) {
            continue;
        }

        let Some(lang_id) = registry.lang(int_field(MOVE_NAMES_CSV, &row, 1)?) else {
            continue;
        };
        if !known.contains(&move_id) {
            return Err(Error::Unresolved {
                table: MOVE_NAMES_CSV,
                id: move_id,
            });
        }

        translations.insert(
            (move_id, lang_id),
            MoveTranslation {
                move_id,
                lang_id,
                name: field(MOVE_NAMES_CSV, &row, 2)?.to_string(),
                effect: None,
            },
        );
    }

    Ok(translations)
}

/// Attach canonical-version flavor text. Unlike ability effects, move text
/// keeps its raw newlines.
fn merge_effects(
    csv_dir: &Path,
    translations: &mut BTreeMap<(i64, i64), MoveTranslation>,
    registry: &Registry,
) -> Result<()> {
    // move_flavor_text.csv: move_id, version_group_id, language_id, flavor_text
    let mut reader = open_table(csv_dir, MOVE_FLAVOR_TEXT_CSV)?;
    for row in reader.records() {
        let row = row?;
        if int_field(MOVE_FLAVOR_TEXT_CSV, &row, 1)? != CANONICAL_VERSION_GROUP {
            continue;
        }

        let move_id = int_field(MOVE_FLAVOR_TEXT_CSV, &row, 0)?;
        if is_placeholder(move_id) {
            continue;
        }
        let Some(lang_id) = registry.lang(int_field(MOVE_FLAVOR_TEXT_CSV, &row, 2)?)
        else {
            continue;
        };

        let translation = translations.get_mut(&(move_id, lang_id)).ok_or(
            Error::Unresolved {
                table: MOVE_FLAVOR_TEXT_CSV,
                id: move_id,
            },
        )?;
        translation.effect = Some(field(MOVE_FLAVOR_TEXT_CSV, &row, 3)?.to_string());
    }

    Ok(())
}
