/// A change notification.
///
/// Events are facts about something that already happened to a store's
/// state (e.g. "dark mode switched on"); they carry no behavior.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "theme.changed").
    fn event_type(&self) -> &'static str;
}
