use crate::model::*;

const DEFAULT_HP: i32 = 100;
const DEFAULT_ARMY_AC: i32 = 10;

// -- Builder-style ref types --

/// Typed reference to a settlement in a [`Scenario`], enabling chained field mutation.
///
/// Created by [`Scenario::settlement`] (creation) or [`Scenario::settlement_mut`] (mutation).
pub struct SettlementRef<'a> {
    settlement: &'a mut Settlement,
}

impl<'a> SettlementRef<'a> {
    /// Full health at `v`.
    pub fn hp(mut self, v: i32) -> Self { self.settlement.hp = HealthTracker::new(v); self }
    pub fn current_hp(mut self, v: i32) -> Self {
        let max = self.settlement.hp.max();
        self.settlement.hp = HealthTracker::with_current(v, max);
        self
    }
    pub fn war_guard(mut self, v: bool) -> Self { self.settlement.has_war_guard = v; self }
    pub fn occupied(mut self, v: bool) -> Self { self.settlement.occupied = v; self }
    pub fn allegiance(mut self, v: &str) -> Self { self.settlement.allegiance = v.to_string(); self }
    pub fn damage_roll(mut self, v: &str) -> Self { self.settlement.damage_roll = RollSpec::from(v); self }
    pub fn fortify(mut self, f: Fortification) -> Self { self.settlement.fortify(f); self }
}

/// Typed reference to an army in a [`Scenario`], enabling chained field mutation.
///
/// Created by [`Scenario::army`] (creation) or [`Scenario::army_mut`] (mutation).
pub struct ArmyRef<'a> {
    army: &'a mut Army,
}

impl<'a> ArmyRef<'a> {
    pub fn hp(mut self, v: i32) -> Self { self.army.hp = HealthTracker::new(v); self }
    pub fn armor_class(mut self, v: i32) -> Self { self.army.armor_class = v; self }
    pub fn attack_roll(mut self, v: &str) -> Self { self.army.attack_roll = RollSpec::from(v); self }
    pub fn damage_roll(mut self, v: &str) -> Self { self.army.damage_roll = RollSpec::from(v); self }
    pub fn destination(mut self, v: &str) -> Self { self.army.destination = v.to_string(); self }
    pub fn destroyed(mut self, v: bool) -> Self { self.army.destroyed = v; self }
}

/// Builder for worlds, used by tests and by scenario seeds.
///
/// New settlements start at 100 HP with a `d4` damage roll, no war guard and
/// no fortifications. New armies start at 100 HP, AC 10, attacking with `d20`
/// for `d6`, and with no orders (destination = location).
#[derive(Debug, Default)]
pub struct Scenario {
    world: World,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actor(&mut self, name: &str) {
        self.world.add_actor(Actor::new(name));
    }

    pub fn settlement(&mut self, name: &str, allegiance: &str) -> SettlementRef<'_> {
        self.world.add_settlement(Settlement::new(
            name,
            allegiance,
            HealthTracker::new(DEFAULT_HP),
            RollSpec::from("d4"),
        ));
        self.settlement_mut(name)
    }

    /// # Panics
    /// Panics if no settlement called `name` has been added.
    pub fn settlement_mut(&mut self, name: &str) -> SettlementRef<'_> {
        let settlement = self
            .world
            .settlements
            .get_mut(name)
            .unwrap_or_else(|| panic!("settlement_mut: no settlement named {name}"));
        SettlementRef { settlement }
    }

    pub fn army(&mut self, name: &str, allegiance: &str, location: &str) -> ArmyRef<'_> {
        self.world.add_army(Army {
            name: name.to_string(),
            hp: HealthTracker::new(DEFAULT_HP),
            armor_class: DEFAULT_ARMY_AC,
            attack_roll: RollSpec::from("d20"),
            damage_roll: RollSpec::from("d6"),
            location: location.to_string(),
            destination: location.to_string(),
            allegiance: allegiance.to_string(),
            destroyed: false,
        });
        self.army_mut(name)
    }

    /// # Panics
    /// Panics if no army called `name` has been added.
    pub fn army_mut(&mut self, name: &str) -> ArmyRef<'_> {
        let army = self
            .world
            .armies
            .get_mut(name)
            .unwrap_or_else(|| panic!("army_mut: no army named {name}"));
        ArmyRef { army }
    }

    pub fn build(self) -> World {
        self.world
    }
}

// -- Seeds --

const AUNDAIR: &str = "Aundair";
const THRANE: &str = "Thrane";

const AUNDAIR_SETTLEMENTS: &[&str] = &["Morningcrest", "Fort Light", "Rellekor", "Tellyn"];

const THRANE_SETTLEMENTS: &[&str] = &[
    "Daskaran",
    "Thaliost",
    "Silvercliff Castle",
    "Auxylgard",
    "Flamekeep",
    "Danthaven",
    "Athandra",
    "Traelyn",
    "Avaroth",
    "Sharavacion",
    "Shadukar",
    "Olath",
    "Angwar Keep",
    "Aelyndar",
    "Valiron",
    "Siyar",
    "Sigilstar",
    "Lessyk",
    "Nathyrr",
    "The Thornwood",
    "Arythawn Keep",
];

const AUNDAIR_ARMIES: &[&str] = &[
    "First Cog",
    "Second Cog",
    "Third Cog",
    "Fourth Cog",
    "Fifth Cog",
    "First Gear",
    "Second Gear",
    "First Chain",
    "Second Chain",
    "The Cinch",
    "The Hammer",
    "The Blade",
];

const THRANE_ARMIES: &[&str] = &[
    "First Host",
    "Second Host",
    "Third Host",
    "Fourth Host",
    "Fifth Host",
    "Sixth Host",
    "First Surgeons",
    "Second Surgeons",
    "Lightbringers",
    "Demon's Bane",
    "Truthspeakers",
];

/// Aundair holds a handful of occupied towns inside Thrane.
///
/// Every army starts garrisoned at one of its own faction's settlements, so the
/// world is quiet until somebody issues orders.
pub fn siege_of_thrane() -> World {
    let mut s = Scenario::new();
    s.actor(AUNDAIR);
    s.actor(THRANE);

    for name in AUNDAIR_SETTLEMENTS {
        s.settlement(name, AUNDAIR)
            .occupied(true)
            .war_guard(true)
            .damage_roll("d20")
            .fortify(Fortification::wooden_walls());
    }
    for name in THRANE_SETTLEMENTS {
        s.settlement(name, THRANE)
            .war_guard(true)
            .damage_roll("d4")
            .fortify(Fortification::wooden_walls());
    }

    for (armies, allegiance, homes) in [
        (AUNDAIR_ARMIES, AUNDAIR, AUNDAIR_SETTLEMENTS),
        (THRANE_ARMIES, THRANE, THRANE_SETTLEMENTS),
    ] {
        for (name, home) in armies.iter().zip(homes.iter().cycle()) {
            s.army(name, allegiance, home)
                .armor_class(19)
                .attack_roll("d20")
                .damage_roll("d8");
        }
    }

    s.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TurnEngine, validate};

    #[test]
    fn builder_defaults() {
        let mut s = Scenario::new();
        s.actor("Thrane");
        s.settlement("Olath", "Thrane");
        s.army("First Host", "Thrane", "Olath");
        let world = s.build();

        let olath = &world.settlements["Olath"];
        assert_eq!(olath.hp.current(), 100);
        assert!(!olath.has_war_guard);
        assert!(olath.fortifications().is_empty());

        let host = &world.armies["First Host"];
        assert_eq!(host.armor_class, 10);
        assert_eq!(host.destination, host.location);
    }

    #[test]
    fn current_hp_keeps_max() {
        let mut s = Scenario::new();
        s.settlement("Olath", "Thrane").hp(80).current_hp(5);
        let world = s.build();
        assert_eq!(world.settlements["Olath"].hp.current(), 5);
        assert_eq!(world.settlements["Olath"].hp.max(), 80);
    }

    #[test]
    #[should_panic(expected = "no army named")]
    fn army_mut_panics_on_unknown_name() {
        let mut s = Scenario::new();
        s.army_mut("Nobody");
    }

    #[test]
    fn siege_of_thrane_shape() {
        let world = siege_of_thrane();
        assert_eq!(world.actors.len(), 2);
        assert_eq!(world.settlements.len(), 25);
        assert_eq!(world.armies.len(), 23);
        assert!(validate(&world).is_ok());

        let by_actor = world.settlements_by_actor();
        assert!(by_actor[AUNDAIR].iter().all(|s| s.occupied));
        assert!(by_actor[THRANE].iter().all(|s| !s.occupied));
        assert!(world.settlements.values().all(|s| s.armor_class() == 10));

        for army in world.armies.values() {
            assert_eq!(world.settlements[&army.location].allegiance, army.allegiance);
        }
    }

    #[test]
    fn siege_of_thrane_is_quiet_without_orders() {
        let mut world = siege_of_thrane();
        let outcome = TurnEngine::seeded(1).run_turn(&mut world, &mut ()).unwrap();
        assert!(!outcome.active());
    }
}
