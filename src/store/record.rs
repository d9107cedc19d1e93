use crate::interaction::{MAX_LEVEL, MIN_LEVEL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    pub topic: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceRecord {
    pub name: String,
    pub topic: String,
    pub level: u8,
}

pub(super) fn level_in_range(level: i64) -> Option<u8> {
    u8::try_from(level)
        .ok()
        .filter(|value| (MIN_LEVEL..=MAX_LEVEL).contains(value))
}
