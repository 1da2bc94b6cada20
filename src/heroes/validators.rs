//! Hero Field Validators
//! Mission: Enforce the closed vocabularies and ranges for hero fields
//!
//! Pure predicates only. They never construct errors; handlers decide what
//! a failed check means for the response.

/// Roster of recognized hero names
pub const VALID_NAMES: &[&str] = &[
    "Superman",
    "Batman",
    "Wonder Woman",
    "Flash",
    "Aquaman",
    "Green Lantern",
    "Cyborg",
    "Martian Manhunter",
    "Shazam",
    "Green Arrow",
    "Black Canary",
    "Hawkman",
    "Hawkgirl",
    "Spider-Man",
    "Iron Man",
    "Captain America",
    "Thor",
    "Hulk",
    "Black Widow",
    "Hawkeye",
    "Doctor Strange",
    "Scarlet Witch",
    "Vision",
    "Falcon",
    "Winter Soldier",
    "Ant-Man",
    "Wasp",
    "Captain Marvel",
    "Black Panther",
    "Daredevil",
    "Punisher",
];

/// Recognized abilities
pub const VALID_ABILITIES: &[&str] = &[
    "Flight",
    "Super Strength",
    "Speed",
    "Invisibility",
    "Telepathy",
    "Teleportation",
    "Mind Control",
    "Regeneration",
    "X-Ray Vision",
    "Heat Vision",
    "Super Hearing",
    "Freeze Breath",
    "Elasticity",
    "Intangibility",
    "Time Control",
    "Elemental Control",
    "Magic",
    "Advanced Technology",
    "Martial Arts",
    "Perfect Aim",
    "Superhuman Agility",
    "Endurance",
    "Accelerated Healing",
    "Animal Communication",
    "Gravity Control",
];

/// Recognized categories
pub const VALID_CATEGORIES: &[&str] = &[
    "Hero",
    "Anti-Hero",
    "Vigilante",
    "Mutant",
    "Alien",
    "God",
    "Mage",
    "Scientist",
];

/// Recognized origins
pub const VALID_ORIGINS: &[&str] = &[
    "Earth",
    "Krypton",
    "Asgard",
    "Atlantis",
    "Themyscira",
    "Oa",
    "Mars",
    "Laboratory",
    "Accident",
    "Birth",
    "Training",
    "Magic",
    "Technology",
    "Mutation",
];

pub fn valid_name(name: &str) -> bool {
    VALID_NAMES.contains(&name)
}

pub fn valid_ability(ability: &str) -> bool {
    VALID_ABILITIES.contains(&ability)
}

pub fn valid_category(category: &str) -> bool {
    VALID_CATEGORIES.contains(&category)
}

/// An absent origin is valid; a present one must be in the vocabulary
pub fn valid_origin(origin: Option<&str>) -> bool {
    match origin {
        None => true,
        Some(o) => VALID_ORIGINS.contains(&o),
    }
}

pub fn valid_level(level: i64) -> bool {
    (1..=100).contains(&level)
}
