//! Dark-mode preference.
//!
//! [`ThemePreference`] owns the flag and publishes [`ThemeChanged`] whenever
//! it changes; [`ThemeApplier`] subscribes and performs the "apply" step
//! (presentation marker + persisted `theme` value).

use core::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use orgdir_events::{Event, EventBus, EventEnvelope, InMemoryEventBus, Subscription};
use orgdir_storage::{KeyValueStore, StorageResult, keys};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Persisted form.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Published when the dark-mode flag takes a new value (and once at startup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeChanged {
    pub dark: bool,
}

impl Event for ThemeChanged {
    fn event_type(&self) -> &'static str {
        "theme.changed"
    }
}

pub type ThemeBus = InMemoryEventBus<EventEnvelope<ThemeChanged>>;

/// Platform dark-mode signal.
pub trait ColorSchemeQuery: Send + Sync {
    fn prefers_dark(&self) -> bool;
}

/// Signal with a configured answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedColorScheme(pub bool);

impl ColorSchemeQuery for FixedColorScheme {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// The presentation root the theme marker is toggled on.
pub trait PresentationRoot: Send + Sync {
    fn set_dark_marker(&self, enabled: bool);
}

/// Root without a UI; remembers the marker.
#[derive(Debug, Default)]
pub struct HeadlessRoot {
    dark: AtomicBool,
}

impl HeadlessRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dark_marked(&self) -> bool {
        self.dark.load(Ordering::SeqCst)
    }
}

impl PresentationRoot for HeadlessRoot {
    fn set_dark_marker(&self, enabled: bool) {
        self.dark.store(enabled, Ordering::SeqCst);
    }
}

/// Dark-mode flag.
pub struct ThemePreference<B = Arc<ThemeBus>> {
    dark: AtomicBool,
    sequence: AtomicU64,
    bus: B,
}

impl<B> core::fmt::Debug for ThemePreference<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThemePreference")
            .field("dark", &self.is_dark_mode())
            .finish()
    }
}

impl<B> ThemePreference<B>
where
    B: EventBus<EventEnvelope<ThemeChanged>>,
{
    /// Read the persisted theme and publish the result so observers apply it.
    ///
    /// Only an absent or empty value consults the platform signal; any stored
    /// value other than `"dark"` means light.
    pub fn initialize(storage: &dyn KeyValueStore, scheme: &dyn ColorSchemeQuery, bus: B) -> Self {
        let persisted = match storage.get(keys::THEME) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read persisted theme");
                None
            }
        };

        let dark = match persisted.as_deref() {
            None | Some("") => scheme.prefers_dark(),
            Some(value) => match Theme::from_str(value) {
                Ok(theme) => theme.is_dark(),
                Err(err) => {
                    tracing::warn!(%err, "unrecognized persisted theme; using light");
                    false
                }
            },
        };

        let preference = Self {
            dark: AtomicBool::new(dark),
            sequence: AtomicU64::new(0),
            bus,
        };
        preference.publish(dark);
        preference
    }

    /// Set the flag; observers are notified only when the value changes.
    pub fn set_dark_mode(&self, value: bool) {
        if self.dark.swap(value, Ordering::SeqCst) != value {
            self.publish(value);
        }
    }

    fn publish(&self, dark: bool) {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        if let Err(err) = self.bus.publish(EventEnvelope::new(sequence, ThemeChanged { dark })) {
            tracing::warn!(error = ?err, "failed to publish theme change");
        }
    }
}

impl<B> ThemePreference<B> {
    pub fn is_dark_mode(&self) -> bool {
        self.dark.load(Ordering::SeqCst)
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark(self.is_dark_mode())
    }
}

/// Applies theme changes to the presentation root and persists them.
pub struct ThemeApplier {
    storage: Arc<dyn KeyValueStore>,
    root: Arc<dyn PresentationRoot>,
    subscription: Mutex<Subscription<EventEnvelope<ThemeChanged>>>,
}

impl core::fmt::Debug for ThemeApplier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThemeApplier").finish_non_exhaustive()
    }
}

impl ThemeApplier {
    /// Subscribe to `bus`. Must happen before the preference is initialized
    /// for the startup value to be applied.
    pub fn subscribe<B>(
        bus: &B,
        storage: Arc<dyn KeyValueStore>,
        root: Arc<dyn PresentationRoot>,
    ) -> Self
    where
        B: EventBus<EventEnvelope<ThemeChanged>>,
    {
        Self {
            storage,
            root,
            subscription: Mutex::new(bus.subscribe()),
        }
    }

    /// Toggle the marker and persist `"dark"`/`"light"`.
    pub fn apply(&self, theme: Theme) -> StorageResult<()> {
        self.root.set_dark_marker(theme.is_dark());
        self.storage.set(keys::THEME, theme.as_str())
    }

    /// Apply every pending change in publish order. Returns how many were applied.
    pub fn apply_pending(&self) -> usize {
        let pending = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain();

        let count = pending.len();
        for envelope in pending {
            let theme = Theme::from_dark(envelope.payload().dark);
            tracing::debug!(theme = theme.as_str(), seq = envelope.sequence_number(), "applying theme");
            if let Err(err) = self.apply(theme) {
                tracing::warn!(error = %err, "failed to persist theme");
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgdir_storage::InMemoryKeyValueStore;

    struct Fixture {
        storage: Arc<InMemoryKeyValueStore>,
        root: Arc<HeadlessRoot>,
        applier: ThemeApplier,
        bus: Arc<ThemeBus>,
    }

    fn fixture() -> Fixture {
        let storage = InMemoryKeyValueStore::arc();
        let root = Arc::new(HeadlessRoot::new());
        let bus = Arc::new(ThemeBus::new());
        let applier = ThemeApplier::subscribe(&bus, storage.clone(), root.clone());
        Fixture {
            storage,
            root,
            applier,
            bus,
        }
    }

    #[test]
    fn persisted_theme_wins_over_platform_signal() {
        let f = fixture();
        f.storage.set(keys::THEME, "light").unwrap();

        let preference =
            ThemePreference::initialize(&*f.storage, &FixedColorScheme(true), f.bus.clone());
        assert!(!preference.is_dark_mode());

        assert_eq!(f.applier.apply_pending(), 1);
        assert!(!f.root.is_dark_marked());
        assert_eq!(f.storage.get(keys::THEME).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn platform_signal_is_used_when_nothing_is_persisted() {
        let f = fixture();
        let preference =
            ThemePreference::initialize(&*f.storage, &FixedColorScheme(true), f.bus.clone());
        assert_eq!(preference.theme(), Theme::Dark);

        f.applier.apply_pending();
        assert!(f.root.is_dark_marked());
        assert_eq!(f.storage.get(keys::THEME).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn unknown_persisted_value_means_light() {
        let f = fixture();
        f.storage.set(keys::THEME, "solarized").unwrap();
        let preference =
            ThemePreference::initialize(&*f.storage, &FixedColorScheme(true), f.bus.clone());
        assert!(!preference.is_dark_mode());

        f.applier.apply_pending();
        assert_eq!(f.storage.get(keys::THEME).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn empty_persisted_value_falls_back_to_platform_signal() {
        let f = fixture();
        f.storage.set(keys::THEME, "").unwrap();
        let preference =
            ThemePreference::initialize(&*f.storage, &FixedColorScheme(true), f.bus.clone());
        assert!(preference.is_dark_mode());
    }

    #[test]
    fn changes_are_applied_and_persisted_by_the_observer() {
        let f = fixture();
        let preference =
            ThemePreference::initialize(&*f.storage, &FixedColorScheme(false), f.bus.clone());
        f.applier.apply_pending();

        preference.set_dark_mode(true);
        // Nothing is applied until the observer runs.
        assert!(!f.root.is_dark_marked());

        assert_eq!(f.applier.apply_pending(), 1);
        assert!(f.root.is_dark_marked());
        assert_eq!(f.storage.get(keys::THEME).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn setting_the_same_value_publishes_nothing() {
        let f = fixture();
        let preference =
            ThemePreference::initialize(&*f.storage, &FixedColorScheme(false), f.bus.clone());
        f.applier.apply_pending();

        preference.set_dark_mode(false);
        assert_eq!(f.applier.apply_pending(), 0);

        preference.set_dark_mode(true);
        preference.set_dark_mode(false);
        assert_eq!(f.applier.apply_pending(), 2);
        assert_eq!(f.storage.get(keys::THEME).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn theme_names_parse_strictly() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("Dark".parse::<Theme>().is_err());
        assert_eq!(Theme::from_dark(false).as_str(), "light");
    }
}
