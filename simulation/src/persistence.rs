//! Persistence module for save slots and JSON export/import
//!
//! Save slots are plain text, one field per line in a fixed order:
//! the stats, the creation snapshot, disease state, then the lists.
//! Relationships take one `name:affinity` line each and end with the
//! [`RELATIONSHIP_SENTINEL`] line. Nothing is re-derived on load.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::components::{
    Attributes, Career, Character, Skill, Skills, Talents, MAX_AGE, MAX_HEALTH,
};
use crate::error::{LoadError, SaveError};
use crate::world::WorldIndices;

/// Separator for achievements, life events and milestones
pub const LIST_DELIMITER: &str = "|";

/// Line closing the relationship block
pub const RELATIONSHIP_SENTINEL: &str = "---";

const EXPORT_VERSION: u8 = 1;

pub fn slot_path(save_dir: &Path, slot: u32) -> PathBuf {
    save_dir.join(format!("life_save_{}.dat", slot))
}

// ============================================================================
// Slot format
// ============================================================================

fn write_talents<W: Write>(w: &mut W, talents: &Talents) -> std::io::Result<()> {
    let a = &talents.attributes;
    let s = &talents.skills;
    for value in [a.strength, a.intelligence, a.charisma] {
        writeln!(w, "{}", value)?;
    }
    for value in [s.programming, s.art, s.sports, s.leadership, s.investment] {
        writeln!(w, "{}", value)?;
    }
    Ok(())
}

/// Write a character in slot format
pub fn write_character<W: Write>(mut w: W, character: &Character) -> Result<(), SaveError> {
    writeln!(w, "{}", character.generation)?;
    writeln!(w, "{}", character.age)?;
    writeln!(w, "{}", character.health)?;
    let a = &character.attributes;
    writeln!(w, "{}\n{}\n{}", a.strength, a.intelligence, a.charisma)?;
    writeln!(w, "{}", character.wealth)?;
    writeln!(w, "{}", character.happiness)?;
    writeln!(w, "{}", character.career.ordinal())?;
    let s = &character.skills;
    for value in [s.programming, s.art, s.sports, s.leadership, s.investment] {
        writeln!(w, "{}", value)?;
    }
    write_talents(&mut w, character.original())?;
    writeln!(w, "{}", character.has_hereditary_disease)?;
    writeln!(w, "{}", character.chronic_disease_level)?;
    writeln!(w, "{}", character.major_disease_count)?;
    writeln!(w, "{}", join_list(&character.achievements))?;
    for (name, affinity) in &character.relationships {
        writeln!(w, "{}:{}", name, affinity)?;
    }
    writeln!(w, "{}", RELATIONSHIP_SENTINEL)?;
    writeln!(w, "{}", join_list(&character.life_events))?;
    writeln!(w, "{}", join_list(&character.milestones))?;
    w.flush()?;
    Ok(())
}

fn join_list(items: &[String]) -> String {
    items.join(LIST_DELIMITER)
}

fn split_list(line: &str) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }
    line.split(LIST_DELIMITER).map(str::to_string).collect()
}

/// Reads one named field per line
struct FieldReader<R> {
    lines: std::io::Lines<R>,
}

impl<R: BufRead> FieldReader<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    fn line(&mut self, field: &'static str) -> Result<String, LoadError> {
        match self.lines.next() {
            Some(line) => Ok(line?.trim_end_matches('\r').to_string()),
            None => Err(LoadError::MissingField { field }),
        }
    }

    fn parse<T: FromStr>(&mut self, field: &'static str) -> Result<T, LoadError> {
        let line = self.line(field)?;
        line.trim()
            .parse()
            .map_err(|_| LoadError::InvalidField { field, value: line })
    }

    fn flag(&mut self, field: &'static str) -> Result<bool, LoadError> {
        let line = self.line(field)?;
        match line.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(LoadError::InvalidField { field, value: line }),
        }
    }

    fn talents(&mut self, prefix: Prefix) -> Result<Talents, LoadError> {
        let names = prefix.fields();
        let attributes = Attributes::new(
            self.parse(names[0])?,
            self.parse(names[1])?,
            self.parse(names[2])?,
        );
        Ok(Talents::new(attributes, self.skills(&names[3..])?))
    }

    fn skills(&mut self, names: &[&'static str]) -> Result<Skills, LoadError> {
        Ok(Skills::new(
            self.parse(names[0])?,
            self.parse(names[1])?,
            self.parse(names[2])?,
            self.parse(names[3])?,
            self.parse(names[4])?,
        ))
    }
}

#[derive(Clone, Copy)]
enum Prefix {
    Current,
    Original,
}

impl Prefix {
    fn fields(self) -> [&'static str; 8] {
        match self {
            Prefix::Current => [
                "strength",
                "intelligence",
                "charisma",
                "programming",
                "art",
                "sports",
                "leadership",
                "investment",
            ],
            Prefix::Original => [
                "original_strength",
                "original_intelligence",
                "original_charisma",
                "original_programming",
                "original_art",
                "original_sports",
                "original_leadership",
                "original_investment",
            ],
        }
    }
}

/// Read a character in slot format, exactly as saved
pub fn read_character<R: BufRead>(reader: R) -> Result<Character, LoadError> {
    let mut r = FieldReader::new(reader);

    let generation: u32 = r.parse("generation")?;
    let age: u32 = r.parse("age")?;
    let health: i32 = r.parse("health")?;
    let current = Prefix::Current.fields();
    let attributes = Attributes::new(
        r.parse(current[0])?,
        r.parse(current[1])?,
        r.parse(current[2])?,
    );
    let wealth: i32 = r.parse("wealth")?;
    let happiness: i32 = r.parse("happiness")?;
    let ordinal: u8 = r.parse("career")?;
    let career = Career::from_ordinal(ordinal).ok_or(LoadError::UnknownCareer(ordinal))?;
    let skills = r.skills(&current[3..])?;
    let original = r.talents(Prefix::Original)?;
    let has_hereditary_disease = r.flag("has_hereditary_disease")?;
    let chronic_disease_level: u32 = r.parse("chronic_disease_level")?;
    let major_disease_count: u32 = r.parse("major_disease_count")?;
    let achievements = split_list(&r.line("achievements")?);

    let mut relationships = std::collections::BTreeMap::new();
    loop {
        let line = r.line("relationships")?;
        if line == RELATIONSHIP_SENTINEL {
            break;
        }
        let parsed = line
            .rsplit_once(':')
            .and_then(|(name, affinity)| Some((name, affinity.trim().parse::<i32>().ok()?)));
        match parsed {
            Some((name, affinity)) if !name.is_empty() => {
                relationships.insert(name.to_string(), affinity);
            }
            _ => {
                return Err(LoadError::InvalidField {
                    field: "relationships",
                    value: line,
                })
            }
        }
    }

    let life_events = split_list(&r.line("life_events")?);
    let milestones = split_list(&r.line("milestones")?);

    let character = Character {
        generation,
        age,
        health,
        happiness,
        wealth,
        attributes,
        skills,
        original,
        career,
        has_hereditary_disease,
        chronic_disease_level,
        major_disease_count,
        achievements,
        relationships,
        life_events,
        milestones,
    };
    validate(&character)?;
    Ok(character)
}

fn invalid(field: &'static str, value: impl ToString) -> LoadError {
    LoadError::InvalidField {
        field,
        value: value.to_string(),
    }
}

/// Reject state no simulation could have produced, whichever format it came from
pub fn validate(character: &Character) -> Result<(), LoadError> {
    if character.generation == 0 {
        return Err(invalid("generation", character.generation));
    }
    if character.age > MAX_AGE {
        return Err(invalid("age", character.age));
    }
    if !(0..=MAX_HEALTH).contains(&character.health) {
        return Err(invalid("health", character.health));
    }
    let [current, original] = [Prefix::Current.fields(), Prefix::Original.fields()];
    for (skills, names) in [
        (&character.skills, &current[3..]),
        (&character.original().skills, &original[3..]),
    ] {
        for (skill, field) in Skill::ALL.into_iter().zip(names.iter().copied()) {
            let value = skills.get(skill);
            if value < 0 {
                return Err(invalid(field, value));
            }
        }
    }
    Ok(())
}

/// Save a character to `life_save_{slot}.dat` under `save_dir`
pub fn save_slot(save_dir: &Path, slot: u32, character: &Character) -> Result<PathBuf, SaveError> {
    fs::create_dir_all(save_dir)?;
    let path = slot_path(save_dir, slot);
    let file = File::create(&path)?;
    write_character(BufWriter::new(file), character)?;
    info!(slot, path = %path.display(), age = character.age, "game saved");
    Ok(path)
}

/// Load a character from a slot; any failure leaves the caller's state alone
pub fn load_slot(save_dir: &Path, slot: u32) -> Result<Character, LoadError> {
    let path = slot_path(save_dir, slot);
    let file = File::open(&path)?;
    let character = read_character(BufReader::new(file))?;
    info!(slot, path = %path.display(), age = character.age, "game loaded");
    Ok(character)
}

// ============================================================================
// JSON export
// ============================================================================

/// Complete world state for export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub version: u8, // Schema version for forward compatibility
    pub indices: WorldIndices,
    pub character: Character,
}

impl ExportData {
    pub fn new(indices: WorldIndices, character: Character) -> Self {
        Self {
            version: EXPORT_VERSION,
            indices,
            character,
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let data: ExportData = serde_json::from_str(json)?;
        if data.version != EXPORT_VERSION {
            return Err(LoadError::UnsupportedVersion(data.version));
        }
        validate(&data.character)?;
        Ok(data)
    }
}
