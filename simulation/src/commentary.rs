//! Age commentary shown by the driver between years

use std::borrow::Cow;

/// Fixed lines for landmark ages
const LANDMARKS: &[(u32, &str)] = &[
    (0, "Birth: you arrive in the world and your journey begins."),
    (1, "Age 1: learning to walk and talk, curious about everything."),
    (2, "Age 2: exploring your surroundings, your personality shows."),
    (3, "Age 3: off to kindergarten to learn how to get along with others."),
    (18, "Age 18: high school is over. University or work?"),
    (25, "Age 25: finding your footing at work and thinking about a career."),
    (30, "Age 30: settling down, with responsibilities piling up."),
    (40, "Age 40: perhaps at the peak of your career, with a steady home life."),
    (60, "Age 60: retirement begins, more time for family and hobbies."),
    (80, "Age 80: the elder of the family and a source of wisdom."),
    (100, "Age 100: a centenarian! A new longevity record for the family."),
];

/// Commentary line for an age: a landmark line when there is one,
/// otherwise a line for the decade the age falls in.
pub fn for_age(age: u32) -> Cow<'static, str> {
    if let Some((_, line)) = LANDMARKS.iter().find(|(a, _)| *a == age) {
        return Cow::Borrowed(line);
    }

    let bracket = match age {
        0..=9 => "a happy childhood, growing up at school and at home.",
        10..=19 => "adolescence, finding yourself through study and friends.",
        20..=29 => "a young professional building a career and relationships.",
        30..=39 => "a career on the rise, maybe with a family of your own.",
        40..=49 => "middle age: plenty of experience, and new challenges.",
        50..=59 => "getting ready for retirement and thinking about what it all meant.",
        60..=69 => "enjoying retirement and picking up new interests.",
        70..=79 => "an elder now, sharing wisdom and experience.",
        80..=89 => "a calm old age, treasuring every day.",
        90..=99 => "a model of longevity who has watched history unfold.",
        _ => "a living legend! Your life has become a saga.",
    };
    Cow::Owned(format!("Age {}: {}", age, bracket))
}
