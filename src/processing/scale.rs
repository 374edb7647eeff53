//! The fixed 1-5 rating scale

/// Lowest rating a person can give themselves.
pub const MIN_LEVEL: u8 = 1;

/// Highest rating on the scale; also the ceiling for requirements.
pub const MAX_LEVEL: u8 = 5;

/// Requirements may go one below the rating floor: 0 means "not required".
pub const MIN_REQUIREMENT: u8 = 0;

/// Guide text shown to operators before they rate themselves.
pub const GUIDE: [(u8, &str); 5] = [
    (1, "Very Basic Knowledge"),
    (2, "Basic Understanding"),
    (3, "Intermediate Level"),
    (4, "Strong Knowledge"),
    (5, "Advanced / Expert Level"),
];

pub fn is_valid_rating(level: u8) -> bool {
    (MIN_LEVEL..=MAX_LEVEL).contains(&level)
}

pub fn is_valid_requirement(level: u8) -> bool {
    (MIN_REQUIREMENT..=MAX_LEVEL).contains(&level)
}

/// Guide text for a rating level, if the level is on the scale
pub fn describe(level: u8) -> Option<&'static str> {
    GUIDE
        .iter()
        .find(|(value, _)| *value == level)
        .map(|(_, text)| *text)
}

/// Render the guide as the multi-line block printed before rating prompts
pub fn guide_text() -> String {
    let mut output = String::from("Skill Rating Guide:\n");
    for (level, text) in GUIDE {
        output.push_str(&format!("{} - {}\n", level, text));
    }
    output
}
