//! Display name assignment
//!
//! Every connection gets a generated "Adjective Noun" display name at
//! connect time, immutable for the session's lifetime.

use rand::seq::SliceRandom;

const ADJECTIVES: [&str; 5] = ["Cool", "Fast", "Bright", "Sassy", "Funky"];
const NOUNS: [&str; 5] = ["Tiger", "Eagle", "Panda", "Shark", "Wolf"];

/// Generate a random display name
pub fn generate_username() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).unwrap_or(&ADJECTIVES[0]);
    let noun = NOUNS.choose(&mut rng).unwrap_or(&NOUNS[0]);
    format!("{adjective} {noun}")
}
