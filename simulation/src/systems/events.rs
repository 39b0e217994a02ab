//! Event System
//!
//! One percentile roll per year picks a bucket from an ordered table. Each
//! bucket's effect reads the character and the rng and returns an
//! [`EventOutcome`]: a list of stat changes plus a narrative line. Nothing
//! is written to the character until the outcome is complete, and applying
//! an outcome cannot fail.

use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::{Career, Character, Skill, MAX_HEALTH};
use crate::error::EventTableError;
use crate::names;

/// Chance that an accident turns out to be a major illness
const SEVERE_ILLNESS_CHANCE: f64 = 0.3;

/// Rolls at or below this, or at or above [`IMPORTANT_FROM`], are milestones
const IMPORTANT_UP_TO: u8 = 15;
const IMPORTANT_FROM: u8 = 90;

const ROLL_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Windfall,
    Accident,
    CareerOpportunity,
    Social,
    SelfImprovement,
    QuietYear,
    Reflection,
}

/// A single change to a character, applied as part of an outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatChange {
    Wealth(i32),
    Happiness(i32),
    /// Clamped into 0..=MAX_HEALTH when applied
    Health(i32),
    MajorDisease,
    Career(Career),
    Skill(Skill, i32),
    /// Adds to the affinity, starting from 0 for someone new
    Relationship { name: String, affinity: i32 },
    Achievement(String),
    Milestone(String),
}

impl StatChange {
    fn apply(self, character: &mut Character) {
        match self {
            StatChange::Wealth(delta) => character.wealth += delta,
            StatChange::Happiness(delta) => character.happiness += delta,
            StatChange::Health(delta) => {
                character.health = (character.health + delta).clamp(0, MAX_HEALTH);
            }
            StatChange::MajorDisease => character.major_disease_count += 1,
            StatChange::Career(career) => {
                debug_assert!(career >= character.career, "career moved backwards");
                character.career = career;
            }
            StatChange::Skill(skill, delta) => {
                let value = character.skills.get_mut(skill);
                *value = (*value + delta).max(0);
            }
            StatChange::Relationship { name, affinity } => {
                *character.relationships.entry(name).or_insert(0) += affinity;
            }
            StatChange::Achievement(text) => character.achievements.push(text),
            StatChange::Milestone(text) => character.milestones.push(text),
        }
    }
}

/// What an event does, computed before anything is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    pub kind: EventKind,
    pub narrative: String,
    pub changes: Vec<StatChange>,
}

impl EventOutcome {
    pub fn new(kind: EventKind, narrative: impl Into<String>) -> Self {
        Self {
            kind,
            narrative: narrative.into(),
            changes: Vec::new(),
        }
    }

    pub fn with(mut self, change: StatChange) -> Self {
        self.changes.push(change);
        self
    }

    /// Apply every change in order
    pub fn apply(self, character: &mut Character) {
        for change in self.changes {
            change.apply(character);
        }
    }
}

/// Pure effect: current state and random draws in, outcome out
pub type EffectFn = fn(&Character, &mut dyn RngCore) -> EventOutcome;

#[derive(Clone)]
pub struct EventBucket {
    pub range: RangeInclusive<u8>,
    pub kind: EventKind,
    pub effect: EffectFn,
}

impl EventBucket {
    pub fn new(range: RangeInclusive<u8>, kind: EventKind, effect: EffectFn) -> Self {
        Self {
            range,
            kind,
            effect,
        }
    }
}

impl std::fmt::Debug for EventBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBucket")
            .field("range", &self.range)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Percentile dispatch table covering 1..=100 exactly once
#[derive(Debug, Clone)]
pub struct EventTable {
    buckets: Vec<EventBucket>,
    /// Bucket index for each roll, offset by one
    lookup: Vec<usize>,
}

static STANDARD_TABLE: Lazy<EventTable> = Lazy::new(|| {
    EventTable::new(standard_buckets()).expect("standard event table covers 1..=100")
});

impl EventTable {
    /// Build a table, rejecting gaps, overlaps and anything outside 1..=100
    pub fn new(mut buckets: Vec<EventBucket>) -> Result<Self, EventTableError> {
        if buckets.is_empty() {
            return Err(EventTableError::Empty);
        }
        for bucket in &buckets {
            let (start, end) = (*bucket.range.start(), *bucket.range.end());
            if start < 1 || end > ROLL_MAX || start > end {
                return Err(EventTableError::InvalidRange { start, end });
            }
        }
        buckets.sort_by_key(|b| *b.range.start());

        let mut lookup = Vec::with_capacity(ROLL_MAX as usize);
        let mut expected = 1u8;
        for (index, bucket) in buckets.iter().enumerate() {
            let start = *bucket.range.start();
            if start < expected {
                return Err(EventTableError::Overlap(start));
            }
            if start > expected {
                return Err(EventTableError::Gap {
                    expected,
                    found: start,
                });
            }
            for _ in bucket.range.clone() {
                lookup.push(index);
            }
            // end <= 100, so this never wraps past the check below
            expected = bucket.range.end().saturating_add(1);
        }
        if lookup.len() < ROLL_MAX as usize {
            return Err(EventTableError::Incomplete(expected - 1));
        }

        Ok(Self { buckets, lookup })
    }

    /// The table the simulator ships with
    pub fn standard() -> &'static EventTable {
        &STANDARD_TABLE
    }

    /// Bucket for a roll in 1..=100
    pub fn bucket_for(&self, roll: u8) -> &EventBucket {
        debug_assert!((1..=ROLL_MAX).contains(&roll), "roll {} out of range", roll);
        &self.buckets[self.lookup[roll as usize - 1]]
    }

    pub fn buckets(&self) -> &[EventBucket] {
        &self.buckets
    }
}

/// Result of one yearly event, for the driver's display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub roll: u8,
    pub kind: EventKind,
    pub narrative: String,
    pub important: bool,
}

/// Draws and applies one random event per call
#[derive(Debug, Clone)]
pub struct EventEngine {
    table: EventTable,
    roll: Uniform<u8>,
}

impl EventEngine {
    pub fn new(table: EventTable) -> Self {
        Self {
            table,
            roll: Uniform::new_inclusive(1, ROLL_MAX),
        }
    }

    pub fn standard() -> Self {
        Self::new(EventTable::standard().clone())
    }

    pub fn table(&self) -> &EventTable {
        &self.table
    }

    /// Roll, resolve and apply one event. Appends exactly one line to the
    /// life log, plus the narrative to milestones for important rolls.
    pub fn trigger_random_event<R: Rng>(
        &self,
        character: &mut Character,
        rng: &mut R,
    ) -> EventRecord {
        let roll = self.roll.sample(rng);
        let outcome = self.resolve(character, roll, rng);
        let record = EventRecord {
            roll,
            kind: outcome.kind,
            narrative: outcome.narrative.clone(),
            important: is_important(roll),
        };

        outcome.apply(character);
        character
            .life_events
            .push(format!("age {}: {}", character.age, record.narrative));
        if record.important {
            character.milestones.push(record.narrative.clone());
        }

        debug!(age = character.age, roll, kind = ?record.kind, "event");
        record
    }

    /// Compute the outcome for a given roll without touching the character
    pub fn resolve(&self, character: &Character, roll: u8, rng: &mut dyn RngCore) -> EventOutcome {
        (self.table.bucket_for(roll).effect)(character, rng)
    }
}

impl Default for EventEngine {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn is_important(roll: u8) -> bool {
    roll <= IMPORTANT_UP_TO || roll >= IMPORTANT_FROM
}

// ============================================================================
// Standard effects
// ============================================================================

pub fn standard_buckets() -> Vec<EventBucket> {
    vec![
        EventBucket::new(1..=5, EventKind::Windfall, windfall),
        EventBucket::new(6..=10, EventKind::Accident, accident),
        EventBucket::new(11..=15, EventKind::CareerOpportunity, career_opportunity),
        EventBucket::new(16..=20, EventKind::Social, social),
        EventBucket::new(21..=25, EventKind::SelfImprovement, self_improvement),
        EventBucket::new(26..=89, EventKind::QuietYear, quiet_year),
        EventBucket::new(90..=100, EventKind::Reflection, reflection),
    ]
}

fn windfall(character: &Character, rng: &mut dyn RngCore) -> EventOutcome {
    let gain = rng.gen_range(100..1000);
    EventOutcome::new(
        EventKind::Windfall,
        format!("[Windfall] You won the lottery and took home {}!", gain),
    )
    .with(StatChange::Wealth(gain))
    .with(StatChange::Happiness(5))
    .with(StatChange::Health(2))
    .with(StatChange::Achievement(format!("Windfall at {}", character.age)))
}

fn accident(_character: &Character, rng: &mut dyn RngCore) -> EventOutcome {
    let loss = rng.gen_range(5..20);
    let severe = rng.gen_bool(SEVERE_ILLNESS_CHANCE);

    let outcome = if severe {
        EventOutcome::new(
            EventKind::Accident,
            format!("[Major illness] You fell seriously ill and lost {} health", loss),
        )
        .with(StatChange::MajorDisease)
    } else {
        EventOutcome::new(
            EventKind::Accident,
            format!("[Accident] You had a minor accident and lost {} health", loss),
        )
    };
    outcome
        .with(StatChange::Health(-loss))
        .with(StatChange::Happiness(-5))
}

fn career_opportunity(character: &Character, rng: &mut dyn RngCore) -> EventOutcome {
    let chance: i32 = rng.gen_range(0..100);

    if character.career == Career::Retired {
        return EventOutcome::new(
            EventKind::CareerOpportunity,
            "[Career] An old colleague offered you a job, but you are happily retired.",
        );
    }
    if character.attributes.intelligence + character.skills.leadership <= chance {
        return EventOutcome::new(
            EventKind::CareerOpportunity,
            "[Career] A career opportunity slipped past you.",
        );
    }

    // At the top the rank holds, but the success still counts
    let promoted = character.career.promoted();
    let outcome = if promoted == character.career {
        EventOutcome::new(
            EventKind::CareerOpportunity,
            format!("[Promotion] Another triumph as {}", promoted),
        )
    } else {
        EventOutcome::new(
            EventKind::CareerOpportunity,
            format!("[Promotion] You were promoted to {}", promoted),
        )
        .with(StatChange::Career(promoted))
    };
    outcome
        .with(StatChange::Achievement(format!(
            "Promoted to {} ({})",
            promoted, character.age
        )))
        .with(StatChange::Milestone(format!(
            "Promoted to {} at age {}",
            promoted, character.age
        )))
}

fn social(character: &Character, rng: &mut dyn RngCore) -> EventOutcome {
    let name = names::random_friend_name(rng);

    let (affinity, narrative) = if character.relationships.contains_key(&name) {
        (
            rng.gen_range(1..5),
            format!("[Friendship] You grew closer to {}", name),
        )
    } else {
        (
            rng.gen_range(1..11),
            format!("[New friend] You made a new friend: {}", name),
        )
    };

    EventOutcome::new(EventKind::Social, narrative)
        .with(StatChange::Relationship { name, affinity })
        .with(StatChange::Happiness(3))
}

fn self_improvement(_character: &Character, rng: &mut dyn RngCore) -> EventOutcome {
    let skill = Skill::ALL[rng.gen_range(0..Skill::ALL.len())];
    let narrative = match skill {
        Skill::Programming => "[Skill] Self-study paid off: your programming improved!",
        Skill::Art => "[Skill] An art class paid off: your art improved!",
        Skill::Sports => "[Skill] Regular training paid off: your sports improved!",
        Skill::Leadership => "[Skill] Leading a project paid off: your leadership improved!",
        Skill::Investment => "[Skill] Studying the markets paid off: your investing improved!",
    };
    EventOutcome::new(EventKind::SelfImprovement, narrative).with(StatChange::Skill(skill, 1))
}

fn quiet_year(_character: &Character, _rng: &mut dyn RngCore) -> EventOutcome {
    EventOutcome::new(EventKind::QuietYear, "An uneventful year passes.")
}

fn reflection(_character: &Character, _rng: &mut dyn RngCore) -> EventOutcome {
    EventOutcome::new(
        EventKind::Reflection,
        "[Reflection] You pause to take stock of the road so far.",
    )
    .with(StatChange::Happiness(2))
}
