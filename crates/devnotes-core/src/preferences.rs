//! User preferences kept alongside the snippets
//!
//! Currently just the dark-mode flag in the `devnotes-dark-mode` slot.

use crate::config::Config;
use crate::storage::{KeyValueBackend, SaveOutcome, StoreAdapter, DARK_MODE_KEY};

pub struct Preferences<B = Box<dyn KeyValueBackend>> {
    adapter: StoreAdapter<B>,
    dark: bool,
}

impl Preferences {
    pub fn open(config: &Config) -> Self {
        Self::new(StoreAdapter::open(config))
    }
}

impl<B: KeyValueBackend> Preferences<B> {
    pub fn new(adapter: StoreAdapter<B>) -> Self {
        let dark = adapter.load(DARK_MODE_KEY, false);
        Self { adapter, dark }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn set_dark(&mut self, dark: bool) -> SaveOutcome {
        self.dark = dark;
        self.adapter.save(DARK_MODE_KEY, &dark)
    }

    /// Flip the flag and return the new value
    pub fn toggle(&mut self) -> (bool, SaveOutcome) {
        let outcome = self.set_dark(!self.dark);
        (self.dark, outcome)
    }
}
