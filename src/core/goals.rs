//! Static catalogue of small goals, keyed by emotion label.

use rand::Rng;
use rand::seq::SliceRandom;

pub const FALLBACK_EMOTION: &str = "neutral";

const CATALOG: &[(&str, [&str; 3])] = &[
    (
        "sadness",
        [
            "Write down 3 things you’re grateful for.",
            "Send a supportive message to a friend.",
            "Listen to a song that usually lifts your mood.",
        ],
    ),
    (
        "joy",
        [
            "Capture this feeling: journal 3 good things that happened today.",
            "Share something positive with someone you care about.",
            "Plan a small reward for yourself later this week.",
        ],
    ),
    (
        "anger",
        [
            "Take 10 deep breaths, slowly.",
            "Go for a brisk 15-minute walk.",
            "Write down what’s bothering you, then list what you can control.",
        ],
    ),
    (
        "fear",
        [
            "Write down the specific worry and a tiny step to reduce it.",
            "Do a 5-minute grounding exercise (notice 5 things you can see).",
            "Talk to someone you trust about what’s worrying you.",
        ],
    ),
    (
        FALLBACK_EMOTION,
        [
            "Choose one small task you’ve been postponing and complete it.",
            "Review your goals for the week and pick one easy win.",
            "Spend 10 minutes tidying your workspace.",
        ],
    ),
];

/// Labels that have their own goal list.
pub fn catalog_emotions() -> Vec<&'static str> {
    CATALOG.iter().map(|(e, _)| *e).collect()
}

/// Goals catalogued for `emotion` (case-insensitive), falling back to the
/// neutral list for unknown labels.
pub fn goals_for(emotion: &str) -> &'static [&'static str] {
    let key = emotion.trim().to_lowercase();
    CATALOG
        .iter()
        .find(|(e, _)| *e == key)
        .or_else(|| CATALOG.iter().find(|(e, _)| *e == FALLBACK_EMOTION))
        .map(|(_, goals)| goals.as_slice())
        .unwrap_or(&[])
}

/// Pick `count` goals for `emotion` using the thread-local RNG.
pub fn suggest_goals(emotion: &str, count: usize) -> Vec<String> {
    suggest_goals_with(&mut rand::thread_rng(), emotion, count)
}

/// Pick `count` goals for `emotion`.
///
/// When `count` covers the whole list, every goal is returned in catalogue
/// order; otherwise a uniform sample without replacement.
pub fn suggest_goals_with<R: Rng + ?Sized>(rng: &mut R, emotion: &str, count: usize) -> Vec<String> {
    let options = goals_for(emotion);

    if count >= options.len() {
        return options.iter().map(|g| g.to_string()).collect();
    }

    options
        .choose_multiple(rng, count)
        .map(|g| g.to_string())
        .collect()
}
