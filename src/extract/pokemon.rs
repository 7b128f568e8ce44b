//! Pokémon, their ability slots and their localized names.
//!
//! Raw heights and weights are integer tenths (decimetres, hectograms) and
//! are stored divided by 10. Ability references are resolved against the
//! already-committed abilities table.

use std::collections::HashSet;
use std::path::Path;

use crate::db::{Database, Record, SqlValue};
use crate::error::{Error, Result};
use crate::extract::is_placeholder;
use crate::registry::Registry;
use crate::schema::{tables, TableSchema};
use crate::source::{field, int_field, open_table};

const POKEMON_CSV: &str = "pokemon.csv";
const POKEMON_ABILITIES_CSV: &str = "pokemon_abilities.csv";
const POKEMON_SPECIES_NAMES_CSV: &str = "pokemon_species_names.csv";

#[derive(Debug, PartialEq)]
pub struct Pokemon {
    pub id: i64,
    pub national_id: i64,
    pub height: f64,
    pub weight: f64,
    pub base_xp: i64,
}

impl Record for Pokemon {
    fn schema() -> &'static TableSchema {
        &tables::POKEMONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.id),
            SqlValue::Integer(self.national_id),
            SqlValue::Real(self.height),
            SqlValue::Real(self.weight),
            SqlValue::Integer(self.base_xp),
        ]
    }
}

#[derive(Debug, PartialEq)]
pub struct PokemonAbility {
    pub pokemon_id: i64,
    pub ability_id: i64,
    pub hidden: bool,
    pub slot: i64,
}

impl Record for PokemonAbility {
    fn schema() -> &'static TableSchema {
        &tables::POKEMON_ABILITIES
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.pokemon_id),
            SqlValue::Integer(self.ability_id),
            SqlValue::Integer(self.hidden as i64),
            SqlValue::Integer(self.slot),
        ]
    }
}

#[derive(Debug, PartialEq)]
pub struct PokemonTranslation {
    pub pokemon_id: i64,
    pub lang_id: i64,
    pub name: String,
    pub genus: String,
}

impl Record for PokemonTranslation {
    fn schema() -> &'static TableSchema {
        &tables::POKEMON_TRANSLATIONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.pokemon_id),
            SqlValue::Integer(self.lang_id),
            SqlValue::Text(self.name.clone()),
            SqlValue::Text(self.genus.clone()),
        ]
    }
}

pub fn extract(
    csv_dir: &Path,
    registry: &Registry,
    db: &Database,
) -> Result<(Vec<Pokemon>, Vec<PokemonAbility>, Vec<PokemonTranslation>)> {
    let pokemons = read_pokemons(csv_dir)?;
    let known: HashSet<i64> = pokemons.iter().map(|p| p.id).collect();
    let abilities = read_pokemon_abilities(csv_dir, &known, db)?;
    let translations = read_species_names(csv_dir, &known, registry)?;
    Ok((pokemons, abilities, translations))
}

fn read_pokemons(csv_dir: &Path) -> Result<Vec<Pokemon>> {
    // pokemon.csv: id, identifier, species_id, height, weight, base_experience
    let mut pokemons = Vec::new();
    let mut reader = open_table(csv_dir, POKEMON_CSV)?;
    for row in reader.records() {
        let row = row?;
        let id = int_field(POKEMON_CSV, &row, 0)?;
        // Mega evolutions and special forms
        if is_placeholder(id) {
            continue;
        }

        pokemons.push(Pokemon {
            id,
            national_id: int_field(POKEMON_CSV, &row, 2)?,
            height: int_field(POKEMON_CSV, &row, 3)? as f64 / 10.0,
            weight: int_field(POKEMON_CSV, &row, 4)? as f64 / 10.0,
            base_xp: int_field(POKEMON_CSV, &row, 5)?,
        });
    }

    Ok(pokemons)
}

fn read_pokemon_abilities(
    csv_dir: &Path,
    known: &HashSet<i64>,
    db: &Database,
) -> Result<Vec<PokemonAbility>> {
    // pokemon_abilities.csv: pokemon_id, ability_id, is_hidden, slot
    let mut abilities = Vec::new();
    let mut reader = open_table(csv_dir, POKEMON_ABILITIES_CSV)?;
    for row in reader.records() {
        let row = row?;
        let pokemon_id = int_field(POKEMON_ABILITIES_CSV, &row, 0)?;
        if is_placeholder(pokemon_id) {
            continue;
        }
        if !known.contains(&pokemon_id) {
            return Err(Error::Unresolved {
                table: POKEMON_ABILITIES_CSV,
                id: pokemon_id,
            });
        }

        let ability_id = int_field(POKEMON_ABILITIES_CSV, &row, 1)?;
        if !db.contains("abilities", ability_id)? {
            return Err(Error::Unresolved {
                table: "abilities",
                id: ability_id,
            });
        }

        abilities.push(PokemonAbility {
            pokemon_id,
            ability_id,
            hidden: int_field(POKEMON_ABILITIES_CSV, &row, 2)? != 0,
            slot: int_field(POKEMON_ABILITIES_CSV, &row, 3)?,
        });
    }

    Ok(abilities)
}

fn read_species_names(
    csv_dir: &Path,
    known: &HashSet<i64>,
    registry: &Registry,
) -> Result<Vec<PokemonTranslation>> {
    // pokemon_species_names.csv: pokemon_species_id, local_language_id, name, genus
    let mut translations = Vec::new();
    let mut reader = open_table(csv_dir, POKEMON_SPECIES_NAMES_CSV)?;
    for row in reader.records() {
        let row = row?;
        let Some(lang_id) = registry.lang(int_field(POKEMON_SPECIES_NAMES_CSV, &row, 1)?)
        else {
            continue;
        };

        let pokemon_id = int_field(POKEMON_SPECIES_NAMES_CSV, &row, 0)?;
        if !known.contains(&pokemon_id) {
            return Err(Error::Unresolved {
                table: POKEMON_SPECIES_NAMES_CSV,
                id: pokemon_id,
            });
        }

        translations.push(PokemonTranslation {
            pokemon_id,
            lang_id,
            name: field(POKEMON_SPECIES_NAMES_CSV, &row, 2)?.to_string(),
            genus: field(POKEMON_SPECIES_NAMES_CSV, &row, 3)?.to_string(),
        });
    }

    Ok(translations)
}
