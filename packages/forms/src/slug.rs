// ABOUTME: Slug field that follows the display name until it is edited by hand
// ABOUTME: Auto and Manual are explicit states; Manual is never left during a session

use serde::{Deserialize, Serialize};
use shopx_core::slugify;

/// Whether the slug is still derived from the name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SlugState {
    #[default]
    Auto,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlugField {
    value: String,
    state: SlugState,
}

impl SlugField {
    /// Empty slug that tracks the name
    pub fn auto() -> Self {
        Self::default()
    }

    /// Slug of an existing entity. Stays put when the name changes.
    pub fn manual(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            state: SlugState::Manual,
        }
    }

    /// Regenerates the slug from `name` while still in `Auto`.
    /// Returns whether the slug changed.
    pub fn on_name_change(&mut self, name: &str) -> bool {
        if self.state == SlugState::Manual {
            return false;
        }
        let next = slugify(name);
        let changed = next != self.value;
        self.value = next;
        changed
    }

    /// Direct edit of the slug field. The input is slugified and the field
    /// switches to `Manual` for good.
    pub fn edit(&mut self, value: &str) {
        self.state = SlugState::Manual;
        self.value = slugify(value);
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn state(&self) -> SlugState {
        self.state
    }

    pub fn is_manual(&self) -> bool {
        self.state == SlugState::Manual
    }
}
