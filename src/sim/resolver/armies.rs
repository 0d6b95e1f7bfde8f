use crate::model::{Combatant, CombatEvent};
use crate::sim::context::TurnContext;
use crate::sim::error::TurnError;

use super::{lands, roll_for};

/// Move every army that has somewhere to go, then let the armies that stayed put fight.
///
/// An army that moves does not attack in the same turn. Ready armies act in
/// name order; each attacks the first hostile army sharing its location, or
/// failing that, the settlement it stands in.
///
/// Returns whether any army moved or attempted an attack.
pub fn step_armies(ctx: &mut TurnContext) -> Result<bool, TurnError> {
    let mut active = false;
    let mut ready: Vec<String> = Vec::new();

    for army in ctx.world.armies.values_mut() {
        if army.destroyed {
            continue;
        }
        if army.is_moving() {
            let from = std::mem::replace(&mut army.location, army.destination.clone());
            tracing::debug!(army = %army.name, %from, to = %army.location, "army moved");
            ctx.sink.record(CombatEvent::Moved {
                army: army.name.clone(),
                from,
                to: army.location.clone(),
            });
            active = true;
        } else {
            ready.push(army.name.clone());
        }
    }

    for name in &ready {
        // Fallen earlier in this phase.
        if ctx.world.armies.get(name).is_none_or(|a| a.destroyed) {
            continue;
        }

        if let Some(target) = first_enemy_army(ctx, name) {
            attack_army(ctx, name, &target)?;
            active = true;
        } else if attack_settlement(ctx, name)? {
            active = true;
        }
    }

    Ok(active)
}

/// The first living army, by name, at `name`'s location with a different allegiance.
fn first_enemy_army(ctx: &TurnContext, name: &str) -> Option<String> {
    let army = ctx.world.armies.get(name)?;
    ctx.world
        .armies
        .values()
        .find(|other| {
            !other.destroyed
                && other.location == army.location
                && other.is_hostile_to(&army.allegiance)
        })
        .map(|other| other.name.clone())
}

fn attack_army(ctx: &mut TurnContext, attacker_name: &str, target_name: &str) -> Result<(), TurnError> {
    let Some(attacker) = ctx.world.armies.get(attacker_name) else {
        return Ok(());
    };
    let armor_class = ctx.world.armies.get(target_name).map_or(0, |t| t.armor_class);

    let roll = roll_for(&attacker.name, &attacker.attack_roll, ctx.rng)?;
    let attacker_side = Combatant::Army(attacker.name.clone());
    let target_side = Combatant::Army(target_name.to_string());

    if !lands(roll, armor_class) {
        ctx.sink.record(CombatEvent::Miss {
            attacker: attacker_side,
            target: target_side,
            armor_class,
            roll,
        });
        return Ok(());
    }

    let damage = roll_for(&attacker.name, &attacker.damage_roll, ctx.rng)?;
    ctx.sink.record(CombatEvent::Hit {
        attacker: attacker_side.clone(),
        target: target_side,
        armor_class,
        roll,
        damage,
    });

    if let Some(target) = ctx.world.armies.get_mut(target_name) {
        target.hp.damage(damage);
        if target.hp.is_depleted() {
            target.destroyed = true;
            tracing::debug!(army = %target.name, by = %attacker_name, "army destroyed");
            ctx.sink.record(CombatEvent::Destroyed {
                attacker: attacker_side,
                army: target.name.clone(),
            });
        }
    }
    Ok(())
}

/// Attack the settlement at the army's location. Friendly settlements are left alone.
///
/// Returns whether an attack was attempted.
fn attack_settlement(ctx: &mut TurnContext, attacker_name: &str) -> Result<bool, TurnError> {
    let Some(attacker) = ctx.world.armies.get(attacker_name) else {
        return Ok(false);
    };
    let Some(settlement) = ctx.world.settlements.get(&attacker.location) else {
        tracing::error!(army = %attacker.name, location = %attacker.location, "army is nowhere");
        return Err(TurnError::MissingSettlement {
            army: attacker.name.clone(),
            location: attacker.location.clone(),
        });
    };

    if settlement.allegiance == attacker.allegiance {
        return Ok(false);
    }

    let armor_class = settlement.armor_class();
    let roll = roll_for(&attacker.name, &attacker.attack_roll, ctx.rng)?;
    let attacker_side = Combatant::Army(attacker.name.clone());
    let target_side = Combatant::Settlement(settlement.name.clone());

    if !lands(roll, armor_class) {
        ctx.sink.record(CombatEvent::Miss {
            attacker: attacker_side,
            target: target_side,
            armor_class,
            roll,
        });
        return Ok(true);
    }

    let damage = roll_for(&attacker.name, &attacker.damage_roll, ctx.rng)?;
    ctx.sink.record(CombatEvent::Hit {
        attacker: attacker_side,
        target: target_side,
        armor_class,
        roll,
        damage,
    });

    let army = attacker.name.clone();
    let allegiance = attacker.allegiance.clone();
    let location = attacker.location.clone();
    let Some(settlement) = ctx.world.settlements.get_mut(&location) else {
        return Ok(true);
    };

    settlement.hp.damage(damage);
    if settlement.hp.is_depleted() {
        let was_occupied = settlement.occupied;
        settlement.occupied = !was_occupied;
        settlement.allegiance = allegiance.clone();
        tracing::debug!(settlement = %settlement.name, %army, %allegiance, occupied = settlement.occupied, "settlement changed hands");
        let settlement = settlement.name.clone();
        ctx.sink.record(if was_occupied {
            CombatEvent::Liberated {
                settlement,
                army,
                allegiance,
            }
        } else {
            CombatEvent::Occupied {
                settlement,
                army,
                allegiance,
            }
        });
    }
    Ok(true)
}
