use crate::model::CombatEvent;

/// Receives a narrative event once for every discrete thing that happens in a turn.
pub trait EventSink {
    fn record(&mut self, event: CombatEvent);
}

/// Discards everything.
impl EventSink for () {
    fn record(&mut self, _event: CombatEvent) {}
}

impl EventSink for Vec<CombatEvent> {
    fn record(&mut self, event: CombatEvent) {
        self.push(event);
    }
}

/// Narrates each event through `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: CombatEvent) {
        tracing::info!(target: "warsim::narration", "{event}");
    }
}

/// Keeps a copy of every event while passing it on to another sink.
pub struct Recorder<'a> {
    pub events: Vec<CombatEvent>,
    inner: &'a mut dyn EventSink,
}

impl<'a> Recorder<'a> {
    pub fn new(inner: &'a mut dyn EventSink) -> Self {
        Self {
            events: Vec::new(),
            inner,
        }
    }

    pub fn into_events(self) -> Vec<CombatEvent> {
        self.events
    }
}

impl EventSink for Recorder<'_> {
    fn record(&mut self, event: CombatEvent) {
        self.events.push(event.clone());
        self.inner.record(event);
    }
}
