//! Aging System - advance a life by one year

use rand::Rng;
use tracing::info;

use crate::components::{Career, Character, MAX_HEALTH, RETIREMENT_AGE};
use crate::systems::events::{EventEngine, EventKind};

/// What happened during one simulated year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearReport {
    pub age: u32,
    pub roll: u8,
    pub event: EventKind,
    pub narrative: String,
    /// Forced into retirement this year
    pub retired: bool,
    pub alive: bool,
}

/// Age one year, draw the year's event, then retire the character if due.
///
/// Callers stop once `alive` comes back false.
pub fn advance(character: &mut Character, engine: &EventEngine, rng: &mut impl Rng) -> YearReport {
    debug_assert!(character.is_alive(), "advancing a character who is no longer alive");

    character.age_one_year();
    let record = engine.trigger_random_event(character, rng);
    character.health = character.health.clamp(0, MAX_HEALTH);
    let retired = retire_if_due(character);

    YearReport {
        age: character.age,
        roll: record.roll,
        event: record.kind,
        narrative: record.narrative,
        retired,
        alive: character.is_alive(),
    }
}

/// Retirement overrides the forward-only career rule, from any rank
fn retire_if_due(character: &mut Character) -> bool {
    if character.age < RETIREMENT_AGE || character.career == Career::Retired {
        return false;
    }

    info!(age = character.age, from = %character.career, "retired");
    character.career = Career::Retired;
    character
        .life_events
        .push(format!("age {}: retired", character.age));
    character
        .milestones
        .push(format!("Retired at age {}", character.age));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Attributes, Skills, Talents};
    use crate::systems::events::{EventBucket, EventOutcome, EventTable};
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn character() -> Character {
        Character::born(
            1,
            Talents::new(Attributes::new(5, 5, 5), Skills::default()),
            0,
            false,
        )
    }

    fn quiet(_c: &Character, _rng: &mut dyn RngCore) -> EventOutcome {
        EventOutcome::new(EventKind::QuietYear, "quiet")
    }

    fn quiet_engine() -> EventEngine {
        EventEngine::new(
            EventTable::new(vec![EventBucket::new(1..=100, EventKind::QuietYear, quiet)]).unwrap(),
        )
    }

    #[test]
    fn test_health_stays_in_range_for_whole_lives() {
        let engine = EventEngine::standard();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let mut c = character();
            let mut last_career = c.career;
            while c.is_alive() {
                let report = advance(&mut c, &engine, &mut rng);
                assert!((0..=100).contains(&c.health));
                assert_eq!(report.alive, c.is_alive());

                // Forward only, apart from the switch to Retired
                if c.career != Career::Retired {
                    assert!(c.career >= last_career);
                }
                last_career = c.career;
            }
            assert!(c.health == 0 || c.age >= 120);
        }
    }

    #[test]
    fn test_decline_only_life() {
        let engine = quiet_engine();
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = character();

        let mut ages = Vec::new();
        while c.is_alive() {
            advance(&mut c, &engine, &mut rng);
            ages.push((c.age, c.health));
        }

        assert_eq!(ages[9], (10, 99));
        assert_eq!(ages[19], (20, 88));
        assert_eq!(ages[29], (30, 67));
        assert_eq!(ages[39], (40, 36));
        // Without events the decline runs out before 65
        assert_eq!(*ages.last().unwrap(), (49, 0));
        assert_eq!(c.life_events.len(), 49);
    }

    #[test]
    fn test_forced_retirement() {
        let engine = quiet_engine();
        let mut rng = StdRng::seed_from_u64(2);
        let mut c = character();
        c.age = 64;
        c.career = Career::Employee;

        let report = advance(&mut c, &engine, &mut rng);
        assert_eq!(c.age, 65);
        assert!(report.retired);
        assert_eq!(c.career, Career::Retired);
        assert_eq!(c.health, 100 - 8);
        assert_eq!(c.milestones.last().unwrap(), "Retired at age 65");
        assert_eq!(c.life_events.last().unwrap(), "age 65: retired");

        let report = advance(&mut c, &engine, &mut rng);
        assert!(!report.retired);
        assert_eq!(c.career, Career::Retired);
    }

    #[test]
    fn test_retirement_regardless_of_event() {
        let engine = EventEngine::standard();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let mut c = character();
            c.age = 70;
            c.career = Career::Ceo;
            c.attributes.intelligence = 500;
            advance(&mut c, &engine, &mut rng);
            assert_eq!(c.career, Career::Retired);
        }
    }

    #[test]
    fn test_no_retirement_before_65() {
        let engine = quiet_engine();
        let mut rng = StdRng::seed_from_u64(4);
        let mut c = character();
        c.age = 63;
        c.career = Career::Director;
        let report = advance(&mut c, &engine, &mut rng);
        assert!(!report.retired);
        assert_eq!(c.career, Career::Director);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let engine = EventEngine::standard();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut c = character();
            while c.is_alive() {
                advance(&mut c, &engine, &mut rng);
            }
            c
        };
        assert_eq!(run(77), run(77));
    }
}
