use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::army::Army;
use super::settlement::Settlement;

/// Everything the simulation knows about. All collections are keyed by name,
/// so iteration is always in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    #[serde(default)]
    pub settlements: BTreeMap<String, Settlement>,
    #[serde(default)]
    pub armies: BTreeMap<String, Army>,
    #[serde(default)]
    pub actors: BTreeMap<String, Actor>,
    #[serde(default)]
    pub turn_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an actor under its name.
    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.insert(actor.name.clone(), actor);
    }

    /// Insert or replace a settlement under its name.
    pub fn add_settlement(&mut self, settlement: Settlement) {
        self.settlements.insert(settlement.name.clone(), settlement);
    }

    /// Insert or replace an army under its name.
    pub fn add_army(&mut self, army: Army) {
        self.armies.insert(army.name.clone(), army);
    }

    pub fn sorted_actors(&self) -> Vec<&Actor> {
        self.actors.values().collect()
    }

    /// Armies at `location`, destroyed ones included, in name order.
    pub fn armies_at(&self, location: &str) -> Vec<&Army> {
        self.armies
            .values()
            .filter(|a| a.location == location)
            .collect()
    }

    pub fn armies_by_actor(&self) -> BTreeMap<&str, Vec<&Army>> {
        let mut map: BTreeMap<&str, Vec<&Army>> = BTreeMap::new();
        for army in self.armies.values() {
            map.entry(army.allegiance.as_str()).or_default().push(army);
        }
        map
    }

    pub fn settlements_by_actor(&self) -> BTreeMap<&str, Vec<&Settlement>> {
        let mut map: BTreeMap<&str, Vec<&Settlement>> = BTreeMap::new();
        for settlement in self.settlements.values() {
            map.entry(settlement.allegiance.as_str())
                .or_default()
                .push(settlement);
        }
        map
    }

    /// `(entity, allegiance)` pairs whose allegiance names no known actor.
    pub fn unknown_allegiances(&self) -> Vec<(&str, &str)> {
        let settlements = self
            .settlements
            .values()
            .map(|s| (s.name.as_str(), s.allegiance.as_str()));
        let armies = self
            .armies
            .values()
            .map(|a| (a.name.as_str(), a.allegiance.as_str()));
        settlements
            .chain(armies)
            .filter(|(_, allegiance)| !self.actors.contains_key(*allegiance))
            .collect()
    }
}
