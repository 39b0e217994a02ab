//! Name Generation for Acquaintances
//!
//! Friends met during social events get a surname and a given name drawn
//! from short fixed lists, so the same person can turn up again later.

use rand::{Rng, RngCore};

/// Common surnames
const SURNAMES: &[&str] = &[
    "Zhang", "Wang", "Li", "Zhao", "Liu", "Chen", "Yang", "Huang", "Zhou", "Wu",
];

/// Common given names
const GIVEN_NAMES: &[&str] = &[
    "Wei", "Fang", "Na", "Xiuying", "Min", "Jing", "Li", "Qiang", "Lei", "Yang",
];

/// Generate a random acquaintance name
pub fn random_friend_name(rng: &mut dyn RngCore) -> String {
    let surname = SURNAMES[rng.gen_range(0..SURNAMES.len())];
    let given = GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())];
    format!("{} {}", surname, given)
}
