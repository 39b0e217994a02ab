//! Components for a simulated life
//!
//! Plain data plus the lifecycle predicates the systems rely on.

use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AllocationError;

/// Nobody lives past this age
pub const MAX_AGE: u32 = 120;

pub const MAX_HEALTH: i32 = 100;

/// Age at which health decline steepens and careers end
pub const RETIREMENT_AGE: u32 = 65;

const ROOT_DISEASE_CHANCE: f64 = 0.3;

const CORE_ATTRIBUTES: usize = 3;

// ============================================================================
// Career
// ============================================================================

/// Career ranks, ordered. Promotions only move forward; `Retired` is terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Career {
    #[default]
    Unemployed,
    Student,
    Intern,
    Employee,
    SeniorEmployee,
    Manager,
    SeniorManager,
    Director,
    VicePresident,
    Cto,
    Ceo,
    Entrepreneur,
    Retired,
}

impl Career {
    pub const ALL: [Career; 13] = [
        Career::Unemployed,
        Career::Student,
        Career::Intern,
        Career::Employee,
        Career::SeniorEmployee,
        Career::Manager,
        Career::SeniorManager,
        Career::Director,
        Career::VicePresident,
        Career::Cto,
        Career::Ceo,
        Career::Entrepreneur,
        Career::Retired,
    ];

    /// Highest rank reachable by promotion
    pub const TOP: Career = Career::Entrepreneur;

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Next rank up, capped at [`Career::TOP`]. Retired stays retired.
    pub fn promoted(self) -> Self {
        if self >= Self::TOP {
            return self;
        }
        Self::ALL[self as usize + 1]
    }

    pub fn title(self) -> &'static str {
        match self {
            Career::Unemployed => "Unemployed",
            Career::Student => "Student",
            Career::Intern => "Intern",
            Career::Employee => "Employee",
            Career::SeniorEmployee => "Senior Employee",
            Career::Manager => "Manager",
            Career::SeniorManager => "Senior Manager",
            Career::Director => "Director",
            Career::VicePresident => "VP",
            Career::Cto => "CTO",
            Career::Ceo => "CEO",
            Career::Entrepreneur => "Entrepreneur",
            Career::Retired => "Retired",
        }
    }
}

impl fmt::Display for Career {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ============================================================================
// Talents
// ============================================================================

/// Core attributes, allocated once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: i32,
    pub intelligence: i32,
    pub charisma: i32,
}

impl Attributes {
    pub fn new(strength: i32, intelligence: i32, charisma: i32) -> Self {
        Self {
            strength,
            intelligence,
            charisma,
        }
    }

    pub fn total(&self) -> i32 {
        self.strength + self.intelligence + self.charisma
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Programming,
    Art,
    Sports,
    Leadership,
    Investment,
}

impl Skill {
    pub const ALL: [Skill; 5] = [
        Skill::Programming,
        Skill::Art,
        Skill::Sports,
        Skill::Leadership,
        Skill::Investment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Skill::Programming => "programming",
            Skill::Art => "art",
            Skill::Sports => "sports",
            Skill::Leadership => "leadership",
            Skill::Investment => "investment",
        }
    }
}

/// Learnable skills, never negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Skills {
    pub programming: i32,
    pub art: i32,
    pub sports: i32,
    pub leadership: i32,
    pub investment: i32,
}

impl Skills {
    pub fn new(programming: i32, art: i32, sports: i32, leadership: i32, investment: i32) -> Self {
        Self {
            programming,
            art,
            sports,
            leadership,
            investment,
        }
    }

    pub fn get(&self, skill: Skill) -> i32 {
        match skill {
            Skill::Programming => self.programming,
            Skill::Art => self.art,
            Skill::Sports => self.sports,
            Skill::Leadership => self.leadership,
            Skill::Investment => self.investment,
        }
    }

    pub fn get_mut(&mut self, skill: Skill) -> &mut i32 {
        match skill {
            Skill::Programming => &mut self.programming,
            Skill::Art => &mut self.art,
            Skill::Sports => &mut self.sports,
            Skill::Leadership => &mut self.leadership,
            Skill::Investment => &mut self.investment,
        }
    }

    pub fn total(&self) -> i32 {
        Skill::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// Point budgets for a freshly allocated character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentPools {
    pub base: i32,
    pub skill: i32,
}

impl Default for TalentPools {
    fn default() -> Self {
        Self { base: 25, skill: 20 }
    }
}

/// Every attribute and skill together. Also used as the creation snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Talents {
    pub attributes: Attributes,
    pub skills: Skills,
}

impl Talents {
    pub fn new(attributes: Attributes, skills: Skills) -> Self {
        Self { attributes, skills }
    }

    /// Check an allocation against the pools: core attributes at least 1,
    /// skills at least 0, neither pool overspent.
    pub fn validate(&self, pools: &TalentPools) -> Result<(), AllocationError> {
        let core = [
            ("strength", self.attributes.strength),
            ("intelligence", self.attributes.intelligence),
            ("charisma", self.attributes.charisma),
        ];
        for (attribute, value) in core {
            if value < 1 {
                return Err(AllocationError::BelowMinimum {
                    attribute,
                    min: 1,
                    value,
                });
            }
        }
        for skill in Skill::ALL {
            let value = self.skills.get(skill);
            if value < 0 {
                return Err(AllocationError::BelowMinimum {
                    attribute: skill.name(),
                    min: 0,
                    value,
                });
            }
        }

        let spent = self.attributes.total();
        if spent > pools.base {
            return Err(AllocationError::PoolExceeded {
                pool: "base",
                spent,
                available: pools.base,
            });
        }
        let spent = self.skills.total();
        if spent > pools.skill {
            return Err(AllocationError::PoolExceeded {
                pool: "skill",
                spent,
                available: pools.skill,
            });
        }
        Ok(())
    }

    /// Spend the pools one stat at a time, leaving enough for the minimums
    /// of the stats still to come.
    pub fn random_allocation(rng: &mut impl Rng, pools: &TalentPools) -> Self {
        let mut remaining = pools.base;
        let mut core = [0i32; CORE_ATTRIBUTES];
        for (i, slot) in core.iter_mut().enumerate() {
            let reserved = (CORE_ATTRIBUTES - i - 1) as i32;
            let max = (remaining - reserved).max(1);
            *slot = rng.gen_range(1..=max);
            remaining -= *slot;
        }

        let mut remaining = pools.skill.max(0);
        let mut skills = [0i32; 5];
        for slot in skills.iter_mut() {
            *slot = rng.gen_range(0..=remaining);
            remaining -= *slot;
        }

        Self {
            attributes: Attributes::new(core[0], core[1], core[2]),
            skills: Skills::new(skills[0], skills[1], skills[2], skills[3], skills[4]),
        }
    }
}

// ============================================================================
// Character
// ============================================================================

/// One simulated life
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// 1 for a root character, parent + 1 otherwise
    pub generation: u32,
    pub age: u32,
    /// Always within 0..=MAX_HEALTH
    pub health: i32,
    pub happiness: i32,
    pub wealth: i32,
    pub attributes: Attributes,
    pub skills: Skills,
    /// Creation snapshot, display only
    pub(crate) original: Talents,
    pub career: Career,
    pub has_hereditary_disease: bool,
    /// No event raises this yet; kept for the score penalty and saves
    pub chronic_disease_level: u32,
    pub major_disease_count: u32,
    pub achievements: Vec<String>,
    pub relationships: BTreeMap<String, i32>,
    pub life_events: Vec<String>,
    pub milestones: Vec<String>,
}

impl Character {
    /// Create a first-generation character from allocated talents
    pub fn new(talents: Talents, rng: &mut impl Rng) -> Self {
        let hereditary = rng.gen_bool(ROOT_DISEASE_CHANCE);
        let mut character = Self::born(1, talents, 0, hereditary);
        character.life_events.push("age 0: character created, life begins".to_string());
        character.milestones.push("age 0: born".to_string());
        character
    }

    /// Fresh newborn state shared by every construction path
    pub(crate) fn born(generation: u32, talents: Talents, wealth: i32, hereditary: bool) -> Self {
        Self {
            generation,
            age: 0,
            health: MAX_HEALTH,
            happiness: 50,
            wealth,
            attributes: talents.attributes,
            skills: talents.skills,
            original: talents,
            career: Career::Unemployed,
            has_hereditary_disease: hereditary,
            chronic_disease_level: 0,
            major_disease_count: 0,
            achievements: Vec::new(),
            relationships: BTreeMap::new(),
            life_events: Vec::new(),
            milestones: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0 && self.age < MAX_AGE
    }

    /// Age one year: health drops by a tenth of the new age, two more from 65 on
    pub fn age_one_year(&mut self) {
        debug_assert!(self.is_alive(), "aging a character who is no longer alive");
        self.age += 1;
        let mut decline = (self.age / 10) as i32;
        if self.age >= RETIREMENT_AGE {
            decline += 2;
        }
        self.health = (self.health - decline).max(0);
    }

    /// Attributes and skills as they were at creation
    pub fn original(&self) -> &Talents {
        &self.original
    }

    /// Overwrite the creation snapshot, for save formats outside this crate
    pub fn set_original(&mut self, original: Talents) {
        self.original = original;
    }

    /// Attributes and skills as they are now
    pub fn talents(&self) -> Talents {
        Talents::new(self.attributes, self.skills)
    }

    pub fn health_is_good(&self) -> bool {
        self.health > 70
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn talents() -> Talents {
        Talents::new(Attributes::new(5, 5, 5), Skills::default())
    }

    #[test]
    fn test_root_character_defaults() {
        let mut rng = StdRng::seed_from_u64(7);
        let c = Character::new(talents(), &mut rng);

        assert_eq!(c.generation, 1);
        assert_eq!(c.age, 0);
        assert_eq!(c.health, 100);
        assert_eq!(c.happiness, 50);
        assert_eq!(c.wealth, 0);
        assert_eq!(c.career, Career::Unemployed);
        assert_eq!(*c.original(), talents());
        assert_eq!(c.life_events.len(), 1);
        assert_eq!(c.milestones.len(), 1);
    }

    #[test]
    fn test_root_disease_rate() {
        let mut rng = StdRng::seed_from_u64(99);
        let sick = (0..2000)
            .filter(|_| Character::new(talents(), &mut rng).has_hereditary_disease)
            .count();
        // 30% of 2000, generous band
        assert!(sick > 480 && sick < 720, "got {}", sick);
    }

    #[test]
    fn test_is_alive() {
        let mut c = Character::born(1, talents(), 0, false);
        assert!(c.is_alive());

        c.health = 0;
        assert!(!c.is_alive());

        c.health = 50;
        c.age = MAX_AGE;
        assert!(!c.is_alive());
    }

    #[test]
    fn test_health_decline_formula() {
        let mut c = Character::born(1, talents(), 0, false);
        for _ in 0..10 {
            c.age_one_year();
        }
        // Only the 10th birthday costs a point
        assert_eq!(c.health, 99);

        let mut c = Character::born(1, talents(), 0, false);
        c.age = 64;
        c.age_one_year();
        assert_eq!(c.health, 100 - (6 + 2));

        let mut c = Character::born(1, talents(), 0, false);
        c.age = 99;
        c.age_one_year();
        assert_eq!(c.health, 100 - (10 + 2));
    }

    #[test]
    fn test_decline_only_life_ends_before_retirement() {
        let mut c = Character::born(1, talents(), 0, false);
        let mut expected = 100i32;
        while c.is_alive() {
            c.age_one_year();
            let mut decline = (c.age / 10) as i32;
            if c.age >= RETIREMENT_AGE {
                decline += 2;
            }
            expected = (expected - decline).max(0);
            assert_eq!(c.health, expected);
        }
        // 1..=49 costs exactly 100 points
        assert_eq!(c.age, 49);
        assert_eq!(c.health, 0);
    }

    #[test]
    fn test_set_original_leaves_current_stats() {
        let mut c = Character::born(1, talents(), 0, false);
        let snapshot = Talents::new(Attributes::new(9, 8, 7), Skills::new(1, 2, 3, 4, 5));
        c.set_original(snapshot);
        assert_eq!(*c.original(), snapshot);
        assert_eq!(c.talents(), talents());
    }

    #[test]
    fn test_health_never_negative() {
        let mut c = Character::born(1, talents(), 0, false);
        c.age = 90;
        c.health = 3;
        c.age_one_year();
        assert_eq!(c.health, 0);
    }

    #[test]
    fn test_career_order_and_promotion() {
        assert!(Career::Manager < Career::Director);
        assert_eq!(Career::Unemployed.promoted(), Career::Student);
        assert_eq!(Career::Ceo.promoted(), Career::Entrepreneur);
        assert_eq!(Career::Entrepreneur.promoted(), Career::Entrepreneur);
        assert_eq!(Career::Retired.promoted(), Career::Retired);

        for career in Career::ALL {
            assert_eq!(Career::from_ordinal(career.ordinal()), Some(career));
        }
        assert_eq!(Career::from_ordinal(13), None);
    }

    #[test]
    fn test_allocation_validation() {
        let pools = TalentPools::default();
        assert!(talents().validate(&pools).is_ok());

        let weak = Talents::new(Attributes::new(0, 5, 5), Skills::default());
        assert_eq!(
            weak.validate(&pools),
            Err(AllocationError::BelowMinimum {
                attribute: "strength",
                min: 1,
                value: 0
            })
        );

        let greedy = Talents::new(Attributes::new(10, 10, 10), Skills::default());
        assert!(matches!(
            greedy.validate(&pools),
            Err(AllocationError::PoolExceeded { pool: "base", .. })
        ));

        let skilled = Talents::new(Attributes::new(5, 5, 5), Skills::new(10, 10, 1, 0, 0));
        assert!(matches!(
            skilled.validate(&pools),
            Err(AllocationError::PoolExceeded { pool: "skill", .. })
        ));
    }

    #[test]
    fn test_random_allocation_is_valid() {
        let mut rng = StdRng::seed_from_u64(3);
        let pools = TalentPools::default();
        for _ in 0..500 {
            let t = Talents::random_allocation(&mut rng, &pools);
            assert!(t.validate(&pools).is_ok(), "{:?}", t);
        }
    }
}
