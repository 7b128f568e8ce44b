//! Output table definitions.
//!
//! Tables are listed in dependency order: parents before the tables that
//! reference them, which is also the order the pipeline populates them in.

use super::types::{Column, ColumnType::*, ForeignKey, TableSchema};

pub static LANGUAGES: TableSchema = TableSchema {
    name: "languages",
    columns: &[
        Column::required("id", Integer),
        Column::required("code", Text),
        Column::required("name", Text),
    ],
    primary_key: &["id"],
    foreign_keys: &[],
};

pub static DAMAGE_CLASSES: TableSchema = TableSchema {
    name: "damage_classes",
    columns: &[
        Column::required("id", Integer),
        Column::required("name", Text),
        Column::required("image", Text),
    ],
    primary_key: &["id"],
    foreign_keys: &[],
};

pub static VERSIONS: TableSchema = TableSchema {
    name: "versions",
    columns: &[
        Column::required("id", Integer),
        Column::required("generation", Integer),
    ],
    primary_key: &["id"],
    foreign_keys: &[],
};

pub static VERSION_TRANSLATIONS: TableSchema = TableSchema {
    name: "version_translations",
    columns: &[
        Column::required("version_id", Integer),
        Column::required("lang_id", Integer),
        Column::required("name", Text),
    ],
    primary_key: &["version_id", "lang_id"],
    foreign_keys: &[
        ForeignKey::new("version_id", "versions"),
        ForeignKey::new("lang_id", "languages"),
    ],
};

pub static TYPES: TableSchema = TableSchema {
    name: "types",
    columns: &[
        Column::required("id", Integer),
        Column::required("generation", Integer),
    ],
    primary_key: &["id"],
    foreign_keys: &[],
};

pub static TYPE_EFFICACIES: TableSchema = TableSchema {
    name: "type_efficacies",
    columns: &[
        Column::required("damage_type_id", Integer),
        Column::required("target_type_id", Integer),
        Column::required("damage_factor", Integer),
    ],
    primary_key: &["damage_type_id", "target_type_id"],
    foreign_keys: &[
        ForeignKey::new("damage_type_id", "types"),
        ForeignKey::new("target_type_id", "types"),
    ],
};

pub static TYPE_TRANSLATIONS: TableSchema = TableSchema {
    name: "type_translations",
    columns: &[
        Column::required("type_id", Integer),
        Column::required("lang_id", Integer),
        Column::required("name", Text),
    ],
    primary_key: &["type_id", "lang_id"],
    foreign_keys: &[
        ForeignKey::new("type_id", "types"),
        ForeignKey::new("lang_id", "languages"),
    ],
};

pub static ABILITIES: TableSchema = TableSchema {
    name: "abilities",
    columns: &[
        Column::required("id", Integer),
        Column::required("generation", Integer),
    ],
    primary_key: &["id"],
    foreign_keys: &[],
};

pub static ABILITY_TRANSLATIONS: TableSchema = TableSchema {
    name: "ability_translations",
    columns: &[
        Column::required("ability_id", Integer),
        Column::required("lang_id", Integer),
        Column::required("name", Text),
        Column::new("effect", Text),
    ],
    primary_key: &["ability_id", "lang_id"],
    foreign_keys: &[
        ForeignKey::new("ability_id", "abilities"),
        ForeignKey::new("lang_id", "languages"),
    ],
};

pub static MOVES: TableSchema = TableSchema {
    name: "moves",
    columns: &[
        Column::required("id", Integer),
        Column::required("generation", Integer),
        Column::required("type_id", Integer),
        Column::required("power", Integer),
        Column::required("pp", Integer),
        Column::required("accuracy", Integer),
        Column::required("priority", Integer),
        Column::required("damage_class", Text),
    ],
    primary_key: &["id"],
    foreign_keys: &[ForeignKey::new("type_id", "types")],
};

pub static MOVE_TRANSLATIONS: TableSchema = TableSchema {
    name: "move_translations",
    columns: &[
        Column::required("move_id", Integer),
        Column::required("lang_id", Integer),
        Column::required("name", Text),
        Column::new("effect", Text),
    ],
    primary_key: &["move_id", "lang_id"],
    foreign_keys: &[
        ForeignKey::new("move_id", "moves"),
        ForeignKey::new("lang_id", "languages"),
    ],
};

pub static POKEMONS: TableSchema = TableSchema {
    name: "pokemons",
    columns: &[
        Column::required("id", Integer),
        Column::required("national_id", Integer),
        Column::required("height", Real),
        Column::required("weight", Real),
        Column::required("base_xp", Integer),
    ],
    primary_key: &["id"],
    foreign_keys: &[],
};

pub static POKEMON_ABILITIES: TableSchema = TableSchema {
    name: "pokemon_abilities",
    columns: &[
        Column::required("pokemon_id", Integer),
        Column::required("ability_id", Integer),
        Column::required("hidden", Boolean),
        Column::required("slot", Integer),
    ],
    primary_key: &["pokemon_id", "ability_id", "slot"],
    foreign_keys: &[
        ForeignKey::new("pokemon_id", "pokemons"),
        ForeignKey::new("ability_id", "abilities"),
    ],
};

pub static POKEMON_TRANSLATIONS: TableSchema = TableSchema {
    name: "pokemon_translations",
    columns: &[
        Column::required("pokemon_id", Integer),
        Column::required("lang_id", Integer),
        Column::required("name", Text),
        Column::required("genus", Text),
    ],
    primary_key: &["pokemon_id", "lang_id"],
    foreign_keys: &[
        ForeignKey::new("pokemon_id", "pokemons"),
        ForeignKey::new("lang_id", "languages"),
    ],
};

/// All output tables, in creation/population order.
pub static ALL_TABLES: &[&TableSchema] = &[
    &LANGUAGES,
    &DAMAGE_CLASSES,
    &VERSIONS,
    &VERSION_TRANSLATIONS,
    &TYPES,
    &TYPE_EFFICACIES,
    &TYPE_TRANSLATIONS,
    &ABILITIES,
    &ABILITY_TRANSLATIONS,
    &MOVES,
    &MOVE_TRANSLATIONS,
    &POKEMONS,
    &POKEMON_ABILITIES,
    &POKEMON_TRANSLATIONS,
];

/// Names of all output tables.
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
