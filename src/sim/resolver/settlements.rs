use crate::model::{Combatant, CombatEvent};
use crate::sim::context::TurnContext;
use crate::sim::error::TurnError;

use super::lands;

/// Let every free settlement with a war guard strike back at one hostile army.
///
/// Settlements act in name order. Occupied settlements and settlements
/// without a war guard do nothing. A settlement attacks only the first living
/// hostile army (by name) standing in it, even when several are present.
///
/// Returns whether any settlement attempted an attack.
pub fn step_settlements(ctx: &mut TurnContext) -> Result<bool, TurnError> {
    let mut active = false;
    let names: Vec<String> = ctx.world.settlements.keys().cloned().collect();

    for name in &names {
        let Some(settlement) = ctx.world.settlements.get(name) else {
            continue;
        };
        if !settlement.has_war_guard {
            continue;
        }
        if settlement.occupied {
            ctx.sink.record(CombatEvent::Idle {
                settlement: settlement.name.clone(),
            });
            continue;
        }

        let Some(target) = ctx
            .world
            .armies
            .values()
            .find(|army| {
                !army.destroyed
                    && army.location == settlement.name
                    && army.is_hostile_to(&settlement.allegiance)
            })
            .map(|army| (army.name.clone(), army.armor_class))
        else {
            continue;
        };
        let (target_name, armor_class) = target;

        active = true;
        let (roll, damage) =
            settlement
                .roll_attack(ctx.rng)
                .map_err(|source| TurnError::InvalidRoll {
                    entity: settlement.name.clone(),
                    source,
                })?;

        let attacker = Combatant::Settlement(name.clone());
        let target_side = Combatant::Army(target_name.clone());

        if !lands(roll, armor_class) {
            ctx.sink.record(CombatEvent::Miss {
                attacker,
                target: target_side,
                armor_class,
                roll,
            });
            continue;
        }

        ctx.sink.record(CombatEvent::Hit {
            attacker: attacker.clone(),
            target: target_side,
            armor_class,
            roll,
            damage,
        });

        if let Some(army) = ctx.world.armies.get_mut(&target_name) {
            army.hp.damage(damage);
            if army.hp.is_depleted() {
                army.destroyed = true;
                tracing::debug!(army = %army.name, by = %name, "army destroyed by settlement");
                ctx.sink.record(CombatEvent::Destroyed {
                    attacker,
                    army: target_name,
                });
            }
        }
    }

    Ok(active)
}
