use rand::RngCore;

use super::sink::EventSink;
use crate::model::World;

/// Context passed to each phase of a turn.
///
/// The world is exclusively borrowed for the whole turn; nothing else may
/// touch it until the turn returns.
pub struct TurnContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut dyn RngCore,
    /// Receives every combat event, in the order it happens.
    pub sink: &'a mut dyn EventSink,
}
