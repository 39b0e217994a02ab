//! Scoring System
//!
//! Turns a finished life into a score, a tier and a short write-up.
//! Read-only: evaluating the same character twice gives the same result.

use serde::{Deserialize, Serialize};

use crate::components::{Career, Character};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Regrettable,
    Ordinary,
    Fulfilling,
    Successful,
    Outstanding,
    Legendary,
}

impl Tier {
    /// Thresholds are exclusive upper bounds
    pub fn from_score(score: i32) -> Self {
        match score {
            i32::MIN..=49 => Tier::Regrettable,
            50..=99 => Tier::Ordinary,
            100..=199 => Tier::Fulfilling,
            200..=299 => Tier::Successful,
            300..=399 => Tier::Outstanding,
            _ => Tier::Legendary,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Regrettable => "regrettable",
            Tier::Ordinary => "ordinary",
            Tier::Fulfilling => "fulfilling",
            Tier::Successful => "successful",
            Tier::Outstanding => "outstanding",
            Tier::Legendary => "legendary",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Tier::Regrettable => {
                "Look after your health and your relationships; wealth is not the only goal."
            }
            Tier::Ordinary => "Balance work and life, and make time for hobbies.",
            Tier::Fulfilling => "Keep it up, and try helping others along the way.",
            Tier::Successful => "You did well. Consider passing your experience on.",
            Tier::Outstanding | Tier::Legendary => {
                "Your life is a model for the generations that follow."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: i32,
    pub tier: Tier,
    pub narrative: String,
}

/// Career bonuses stack: Manager and up, Director and up, CEO and up
fn career_bonus(career: Career) -> i32 {
    let mut bonus = 0;
    if career >= Career::Manager {
        bonus += 50;
    }
    if career >= Career::Director {
        bonus += 80;
    }
    if career >= Career::Ceo {
        bonus += 100;
    }
    bonus
}

pub fn life_score(character: &Character) -> i32 {
    let mut score = character.wealth / 1000
        + character.happiness
        + character.health
        + character.achievements.len() as i32 * 5
        + character.relationships.len() as i32 * 2
        + career_bonus(character.career);

    // floor(score * 0.8) and floor(score * 1.2), in integers
    if character.age < 50 {
        score = (score * 4).div_euclid(5);
    } else if character.age > 80 {
        score = (score * 6).div_euclid(5);
    }

    score -= character.chronic_disease_level as i32 * 10 + character.major_disease_count as i32 * 20;
    score + character.generation as i32 * 5
}

pub fn evaluate(character: &Character) -> Evaluation {
    let score = life_score(character);
    let tier = Tier::from_score(score);

    let legacy = if score > 200 { "a rich" } else { "a modest" };
    let heritage = if character.generation > 1 {
        format!(
            "As heir of generation {}, you leave behind {} legacy.",
            character.generation, legacy
        )
    } else {
        format!("You leave behind {} legacy.", legacy)
    };
    let health = if character.health_is_good() { "good" } else { "poor" };

    let narrative = format!(
        "A {} life (score {})\n{}\n\n\
         Lived {} years\n\
         Final wealth: {}\n\
         Happiness: {}/100\n\
         Achievements: {}\n\
         Relationships: {}\n\
         Health: {}\n\n\
         Advice: {}",
        tier.label(),
        score,
        heritage,
        character.age,
        character.wealth,
        character.happiness,
        character.achievements.len(),
        character.relationships.len(),
        health,
        tier.advice(),
    );

    Evaluation {
        score,
        tier,
        narrative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Attributes, Skills, Talents};

    fn character() -> Character {
        Character::born(
            1,
            Talents::new(Attributes::new(5, 5, 5), Skills::default()),
            0,
            false,
        )
    }

    #[test]
    fn test_reference_score() {
        let mut c = character();
        c.age = 30;
        let eval = evaluate(&c);
        // floor(150 * 0.8) + 5
        assert_eq!(eval.score, 125);
        assert_eq!(eval.tier, Tier::Fulfilling);
    }

    #[test]
    fn test_reference_score_before_generation_bonus() {
        let mut c = character();
        c.age = 30;
        assert_eq!(life_score(&c) - c.generation as i32 * 5, 120);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::from_score(-40), Tier::Regrettable);
        assert_eq!(Tier::from_score(49), Tier::Regrettable);
        assert_eq!(Tier::from_score(50), Tier::Ordinary);
        assert_eq!(Tier::from_score(100), Tier::Fulfilling);
        assert_eq!(Tier::from_score(199), Tier::Fulfilling);
        assert_eq!(Tier::from_score(200), Tier::Successful);
        assert_eq!(Tier::from_score(300), Tier::Outstanding);
        assert_eq!(Tier::from_score(399), Tier::Outstanding);
        assert_eq!(Tier::from_score(400), Tier::Legendary);
    }

    #[test]
    fn test_career_bonus_stacks() {
        assert_eq!(career_bonus(Career::SeniorEmployee), 0);
        assert_eq!(career_bonus(Career::Manager), 50);
        assert_eq!(career_bonus(Career::Director), 130);
        assert_eq!(career_bonus(Career::Ceo), 230);
        assert_eq!(career_bonus(Career::Retired), 230);
    }

    #[test]
    fn test_age_multipliers() {
        let mut c = character();
        c.health = 0;
        c.happiness = 50;

        c.age = 60;
        assert_eq!(life_score(&c), 50 + 5);

        c.age = 81;
        assert_eq!(life_score(&c), 60 + 5);

        c.age = 80;
        assert_eq!(life_score(&c), 50 + 5);

        // Negative totals round down, not toward zero
        c.age = 20;
        c.happiness = -7;
        assert_eq!(life_score(&c), -6 + 5);
    }

    #[test]
    fn test_full_formula() {
        let mut c = character();
        c.age = 90;
        c.generation = 3;
        c.wealth = 12_999;
        c.happiness = 70;
        c.health = 40;
        c.career = Career::Director;
        c.achievements = vec!["a".into(), "b".into()];
        c.relationships.insert("Zhang Wei".into(), 4);
        c.major_disease_count = 2;
        c.chronic_disease_level = 1;

        // (12 + 70 + 40 + 10 + 2 + 130) = 264, * 1.2 = 316.8 -> 316
        let expected = 316 - 10 - 40 + 15;
        assert_eq!(life_score(&c), expected);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let mut c = character();
        c.age = 77;
        c.wealth = 5000;
        c.achievements.push("Windfall at 30".into());
        let before = c.clone();

        let first = evaluate(&c);
        let second = evaluate(&c);
        assert_eq!(first, second);
        assert_eq!(c, before);
    }

    #[test]
    fn test_narrative_contents() {
        let mut c = character();
        c.age = 30;
        let text = evaluate(&c).narrative;
        assert!(text.starts_with("A fulfilling life (score 125)"));
        assert!(text.contains("You leave behind a modest legacy."));
        assert!(text.contains("Lived 30 years"));
        assert!(text.contains("Health: good"));
        assert!(text.contains(Tier::Fulfilling.advice()));

        c.generation = 2;
        c.health = 70;
        c.career = Career::Ceo;
        let text = evaluate(&c).narrative;
        assert!(text.contains("As heir of generation 2, you leave behind a rich legacy."));
        assert!(text.contains("Health: poor"));
    }
}
