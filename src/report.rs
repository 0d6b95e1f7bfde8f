//! Plain-text world report, one section per actor followed by per-entity details.

use std::fmt::Write;

use crate::model::{Army, Settlement, World};

/// Render the world as Markdown: holdings and armies per actor, then a
/// detail block for every settlement and army.
pub fn world_report(world: &World) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, world);
    out
}

fn write_report(out: &mut String, world: &World) -> std::fmt::Result {
    writeln!(out, "# Warsim, turn {}", world.turn_id)?;

    let settlements_by_actor = world.settlements_by_actor();
    let armies_by_actor = world.armies_by_actor();

    for actor in world.sorted_actors() {
        let name = actor.name.as_str();
        writeln!(out)?;
        writeln!(out, "## {name} Settlements")?;
        writeln!(out)?;
        match settlements_by_actor.get(name) {
            Some(settlements) => {
                for settlement in settlements {
                    let tag = if settlement.occupied { " (occupied)" } else { "" };
                    writeln!(out, "- {}{tag}", settlement.name)?;
                }
            }
            None => writeln!(out, "- none")?,
        }

        writeln!(out)?;
        writeln!(out, "## {name} Armies")?;
        writeln!(out)?;
        match armies_by_actor.get(name) {
            Some(armies) => {
                for army in armies {
                    let tag = if army.destroyed { " (destroyed)" } else { "" };
                    writeln!(out, "- {} at {}{tag}", army.name, army.location)?;
                }
            }
            None => writeln!(out, "- none")?,
        }
    }

    writeln!(out)?;
    writeln!(out, "# Settlement Details")?;
    for settlement in world.settlements.values() {
        write_settlement(out, world, settlement)?;
    }

    writeln!(out)?;
    writeln!(out, "# Army Details")?;
    for army in world.armies.values() {
        write_army(out, army)?;
    }
    Ok(())
}

fn write_settlement(out: &mut String, world: &World, settlement: &Settlement) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "## {}", settlement.name)?;
    writeln!(out)?;
    writeln!(out, "| Field | Value |")?;
    writeln!(out, "|---|---|")?;
    writeln!(out, "| Allegiance | {} |", settlement.allegiance)?;
    writeln!(out, "| Population | {} |", settlement.population)?;
    writeln!(out, "| HP | {} / {} |", settlement.hp.current(), settlement.hp.max())?;
    writeln!(out, "| AC | {} |", settlement.armor_class())?;
    writeln!(out, "| Attack Roll | {} |", settlement.attack_roll())?;
    writeln!(out, "| Attack Damage | {} |", settlement.damage_roll)?;

    let present: Vec<&str> = world
        .armies_at(&settlement.name)
        .into_iter()
        .filter(|a| !a.destroyed)
        .map(|a| a.name.as_str())
        .collect();
    if !present.is_empty() {
        writeln!(out, "| Armies Present | {} |", present.join(", "))?;
    }

    if !settlement.fortifications().is_empty() {
        writeln!(out)?;
        writeln!(out, "### Fortifications")?;
        writeln!(out)?;
        for f in settlement.fortifications() {
            writeln!(
                out,
                "- {} ({}): defense {:+}, attack {:+}",
                f.name, f.kind, f.defense_modifier, f.attack_modifier
            )?;
        }
    }
    Ok(())
}

fn write_army(out: &mut String, army: &Army) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "## {}", army.name)?;
    writeln!(out)?;
    writeln!(out, "| Field | Value |")?;
    writeln!(out, "|---|---|")?;
    writeln!(out, "| Allegiance | {} |", army.allegiance)?;
    writeln!(out, "| Location | {} |", army.location)?;
    if army.is_moving() {
        writeln!(out, "| Destination | {} |", army.destination)?;
    }
    writeln!(out, "| HP | {} / {} |", army.hp.current(), army.hp.max())?;
    writeln!(out, "| AC | {} |", army.armor_class)?;
    writeln!(out, "| Attack Roll | {} |", army.attack_roll)?;
    writeln!(out, "| Attack Damage | {} |", army.damage_roll)?;
    Ok(())
}
