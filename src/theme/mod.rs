//! Light/dark theme store with persisted backing and explicit subscriptions.

pub mod palette;
pub mod storage;

pub use palette::Palette;
pub use storage::{FileStorage, MemoryStorage, ThemeStorage};

use serde::{Deserialize, Serialize};

/// Storage key holding the persisted theme.
pub const THEME_KEY: &str = "theme";

// ─── Theme ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Class to put on the document root, if any.
    pub fn root_class(&self) -> Option<&'static str> {
        self.is_dark().then_some("dark")
    }

    /// Interpret a persisted value. Anything but `"dark"` is light.
    pub fn from_saved(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── ThemeStore ──────────────────────────────────────────────────────────────

/// Handle returned by [`ThemeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemeSubscription(u64);

type Listener = Box<dyn FnMut(Theme)>;

/// Holds the current theme, persists every change and notifies subscribers.
///
/// Passed explicitly to whatever needs it; there is no process-wide instance.
pub struct ThemeStore<S: ThemeStorage> {
    storage: S,
    theme: Theme,
    listeners: Vec<(ThemeSubscription, Listener)>,
    next_id: u64,
}

impl<S: ThemeStorage> ThemeStore<S> {
    /// Initialize from storage.
    ///
    /// A saved `"dark"` gives [`Theme::Dark`]; any other value or a missing
    /// entry gives [`Theme::Light`]. When storage cannot be read the store
    /// starts dark.
    pub fn load(storage: S) -> Self {
        let theme = match storage.load(THEME_KEY) {
            Ok(saved) => Theme::from_saved(saved.as_deref()),
            Err(e) => {
                tracing::error!("Failed to read theme from storage: {}", e);
                Theme::Dark
            }
        };
        tracing::debug!(theme = %theme, "Theme loaded");

        Self {
            storage,
            theme,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme, persist it and notify every subscriber once.
    ///
    /// A failed save is logged; the in-memory theme flips regardless.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();

        if let Err(e) = self.storage.save(THEME_KEY, self.theme.as_str()) {
            tracing::warn!("Failed to save theme to storage: {}", e);
        }

        let theme = self.theme;
        for (_, listener) in self.listeners.iter_mut() {
            listener(theme);
        }
        theme
    }

    pub fn subscribe(&mut self, listener: impl FnMut(Theme) + 'static) -> ThemeSubscription {
        let id = ThemeSubscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the subscription was not active.
    pub fn unsubscribe(&mut self, id: ThemeSubscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: ThemeStorage> std::fmt::Debug for ThemeStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("theme", &self.theme)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct BrokenStorage;

    impl ThemeStorage for BrokenStorage {
        fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("blocked".into()))
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("blocked".into()))
        }
    }

    #[test]
    fn test_load_saved_values() {
        assert_eq!(ThemeStore::load(MemoryStorage::with_entry(THEME_KEY, "dark")).theme(), Theme::Dark);
        assert_eq!(ThemeStore::load(MemoryStorage::with_entry(THEME_KEY, "light")).theme(), Theme::Light);
        assert_eq!(ThemeStore::load(MemoryStorage::with_entry(THEME_KEY, "sepia")).theme(), Theme::Light);
        assert_eq!(ThemeStore::load(MemoryStorage::new()).theme(), Theme::Light);
    }

    #[test]
    fn test_unreadable_storage_starts_dark() {
        assert_eq!(ThemeStore::load(BrokenStorage).theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_twice_restores_persisted_value() {
        let mut store = ThemeStore::load(MemoryStorage::with_entry(THEME_KEY, "light"));

        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.storage().get(THEME_KEY).as_deref(), Some("dark"));

        assert_eq!(store.toggle(), Theme::Light);
        assert_eq!(store.storage().get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_each_toggle_notifies_every_subscriber_once() {
        let mut store = ThemeStore::load(MemoryStorage::new());
        let seen_a = Rc::new(RefCell::new(Vec::new()));
        let seen_b = Rc::new(RefCell::new(Vec::new()));

        let a = Rc::clone(&seen_a);
        store.subscribe(move |t| a.borrow_mut().push(t));
        let b = Rc::clone(&seen_b);
        store.subscribe(move |t| b.borrow_mut().push(t));

        store.toggle();
        store.toggle();

        assert_eq!(*seen_a.borrow(), vec![Theme::Dark, Theme::Light]);
        assert_eq!(*seen_b.borrow(), vec![Theme::Dark, Theme::Light]);
    }

    #[test]
    fn test_unsubscribed_listener_not_notified() {
        let mut store = ThemeStore::load(MemoryStorage::new());
        let count = Rc::new(RefCell::new(0));

        let c = Rc::clone(&count);
        let sub = store.subscribe(move |_| *c.borrow_mut() += 1);
        store.toggle();

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.toggle();

        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_save_failure_still_flips() {
        let mut store = ThemeStore::load(BrokenStorage);
        assert_eq!(store.toggle(), Theme::Light);
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_theme_serde_and_root_class() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(Theme::Dark.root_class(), Some("dark"));
        assert_eq!(Theme::Light.root_class(), None);
    }
}
