//! Inheritance System
//!
//! Builds the next member of a lineage from a parent. This is the only place
//! stats regress or drift between generations.

use rand::Rng;
use tracing::info;

use crate::components::{Attributes, Character, Skills, Talents};

/// Core attributes drift by up to this much either way
const ATTRIBUTE_VARIANCE: i32 = 2;

/// Skills drift by up to this much either way, floored at 0
const SKILL_VARIANCE: i32 = 1;

/// Children receive this fraction of the parent's wealth
const WEALTH_SHARE_DIVISOR: i32 = 4;

/// Fresh chance of hereditary disease on top of the parent's
const INHERITED_DISEASE_CHANCE: f64 = 0.2;

/// Create a child of `parent` from `base` talents (normally the parent's own).
///
/// The child shares no state with the parent. Skills never go negative and
/// hereditary disease, once in the lineage, never clears.
pub fn inherit(parent: &Character, base: &Talents, rng: &mut impl Rng) -> Character {
    let mut drift = |value: i32| value + rng.gen_range(-ATTRIBUTE_VARIANCE..=ATTRIBUTE_VARIANCE);
    let attributes = Attributes::new(
        drift(base.attributes.strength),
        drift(base.attributes.intelligence),
        drift(base.attributes.charisma),
    );

    let mut drift = |value: i32| (value + rng.gen_range(-SKILL_VARIANCE..=SKILL_VARIANCE)).max(0);
    let skills = Skills::new(
        drift(base.skills.programming),
        drift(base.skills.art),
        drift(base.skills.sports),
        drift(base.skills.leadership),
        drift(base.skills.investment),
    );

    let hereditary = rng.gen_bool(INHERITED_DISEASE_CHANCE) || parent.has_hereditary_disease;
    let generation = parent.generation + 1;
    let mut child = Character::born(
        generation,
        Talents::new(attributes, skills),
        parent.wealth / WEALTH_SHARE_DIVISOR,
        hereditary,
    );
    child.life_events.push(format!(
        "age 0: born into generation {}, life begins",
        generation
    ));
    child.milestones.push(format!("age 0: born, generation {}", generation));

    info!(
        generation,
        inheritance = child.wealth,
        hereditary_disease = hereditary,
        "new lineage member"
    );
    child
}

/// Child of `parent` using the parent's current talents as the base
pub fn next_generation(parent: &Character, rng: &mut impl Rng) -> Character {
    inherit(parent, &parent.talents(), rng)
}
