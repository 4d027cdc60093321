use serde::Serialize;

/// How many goal rows carried a given emotion inside the mood window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub emotion: String,
    pub count: usize,
}
