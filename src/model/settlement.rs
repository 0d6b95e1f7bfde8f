use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::dice::{DiceError, Die, RollSpec};
use super::fortification::{Fortification, FortificationType};
use super::health::HealthTracker;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub name: String,
    pub hp: HealthTracker,
    pub damage_roll: RollSpec,
    pub has_war_guard: bool,
    #[serde(default)]
    fortifications: Vec<Fortification>,
    pub allegiance: String,
    #[serde(default)]
    pub occupied: bool,
    #[serde(default)]
    pub population: u32,
}

impl Settlement {
    pub fn new(
        name: impl Into<String>,
        allegiance: impl Into<String>,
        hp: HealthTracker,
        damage_roll: RollSpec,
    ) -> Self {
        Self {
            name: name.into(),
            hp,
            damage_roll,
            has_war_guard: false,
            fortifications: Vec::new(),
            allegiance: allegiance.into(),
            occupied: false,
            population: 0,
        }
    }

    pub fn fortifications(&self) -> &[Fortification] {
        &self.fortifications
    }

    /// Attach a fortification. Attached fortifications are never modified.
    pub fn fortify(&mut self, fortification: Fortification) {
        self.fortifications.push(fortification);
    }

    /// Defense from fortifications, counting only the first of each kind in list order.
    /// Saturates at the `i32` bounds.
    pub fn armor_class(&self) -> i32 {
        let mut seen = [false; FortificationType::COUNT];
        let mut armor_class: i32 = 0;
        for fortification in &self.fortifications {
            let slot = &mut seen[fortification.kind.index()];
            if !*slot {
                *slot = true;
                armor_class = armor_class.saturating_add(fortification.defense_modifier);
            }
        }
        armor_class
    }

    /// Attack bonus from every fortification, duplicates included.
    pub fn attack_modifier(&self) -> i64 {
        self.fortifications
            .iter()
            .map(|f| i64::from(f.attack_modifier))
            .sum()
    }

    /// The settlement's attack expression, e.g. `d20+4`.
    pub fn attack_roll(&self) -> Die {
        let modifier = self.attack_modifier();
        match modifier.signum() {
            1 => Die::new(format!("{}+{modifier}", Die::base_attack())),
            -1 => Die::new(format!("{}-{}", Die::base_attack(), modifier.unsigned_abs())),
            _ => Die::base_attack(),
        }
    }

    /// Roll the base attack die plus the fortification bonus, then damage.
    /// Returns `(attack_total, damage)`.
    pub fn roll_attack(&self, rng: &mut dyn RngCore) -> Result<(i32, i32), DiceError> {
        let total = i64::from(Die::base_attack().roll(rng)?) + self.attack_modifier();
        let attack = i32::try_from(total).map_err(|_| {
            DiceError::invalid(
                &self.attack_roll().to_string(),
                format!("total {total} out of range"),
            )
        })?;
        let damage = self.damage_roll.roll(rng)?;
        Ok((attack, damage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn settlement(fortifications: Vec<Fortification>) -> Settlement {
        let mut s = Settlement::new("Tellyn", "Aundair", HealthTracker::new(100), RollSpec::from("d4"));
        for f in fortifications {
            s.fortify(f);
        }
        s
    }

    #[test]
    fn no_fortifications_means_zero_armor() {
        let s = settlement(vec![]);
        assert_eq!(s.armor_class(), 0);
        assert_eq!(s.attack_modifier(), 0);
        assert_eq!(s.attack_roll().to_string(), "d20");
    }

    #[test]
    fn duplicate_kind_counts_first_listed_only() {
        let s = settlement(vec![Fortification::wooden_walls(), Fortification::stone_walls()]);
        assert_eq!(s.armor_class(), 10);

        let reversed = settlement(vec![Fortification::stone_walls(), Fortification::wooden_walls()]);
        assert_eq!(reversed.armor_class(), 15);
    }

    #[test]
    fn distinct_kinds_sum() {
        let s = settlement(vec![
            Fortification::wooden_walls(),
            Fortification::new("Barracks", FortificationType::Garrison, 4, 2),
        ]);
        assert_eq!(s.armor_class(), 14);
    }

    #[test]
    fn attack_modifier_is_not_deduplicated() {
        let s = settlement(vec![Fortification::wooden_walls(), Fortification::stone_walls()]);
        assert_eq!(s.attack_modifier(), 4);
        assert_eq!(s.attack_roll().to_string(), "d20+4");
    }

    #[test]
    fn negative_attack_modifier_renders_subtraction() {
        let s = settlement(vec![Fortification::new("Crumbling Tower", FortificationType::OuterWall, 1, -2)]);
        assert_eq!(s.attack_roll().to_string(), "d20-2");
    }

    #[test]
    fn roll_attack_adds_modifier_to_base_die() {
        let mut s = settlement(vec![Fortification::stone_walls()]);
        s.damage_roll = RollSpec::from("2d1");
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..500 {
            let (attack, damage) = s.roll_attack(&mut rng).unwrap();
            assert!((4..=23).contains(&attack), "attack {attack}");
            assert_eq!(damage, 2);
        }
    }

    #[test]
    fn extreme_modifiers_do_not_overflow() {
        let huge = || Fortification::new("Spire", FortificationType::Wall, i32::MAX, i32::MAX);
        let s = settlement(vec![huge(), huge(), Fortification::new("Keep", FortificationType::Garrison, i32::MAX, 0)]);
        assert_eq!(s.armor_class(), i32::MAX);
        assert_eq!(s.attack_modifier(), 2 * i64::from(i32::MAX));

        let mut rng = SmallRng::seed_from_u64(11);
        assert!(matches!(
            s.roll_attack(&mut rng),
            Err(DiceError::InvalidExpression { .. })
        ));
    }

    #[test]
    fn most_negative_modifier_renders_and_stays_in_range() {
        let s = settlement(vec![Fortification::new("Sinkhole", FortificationType::OuterWall, i32::MIN, i32::MIN)]);
        assert_eq!(s.armor_class(), i32::MIN);
        assert_eq!(s.attack_roll().to_string(), "d20-2147483648");

        let mut rng = SmallRng::seed_from_u64(11);
        let (attack, _) = s.roll_attack(&mut rng).unwrap();
        assert!(attack <= i32::MIN + 20, "attack {attack}");

        let doubled = settlement(vec![
            Fortification::new("Sinkhole", FortificationType::OuterWall, 0, i32::MIN),
            Fortification::new("Sinkhole", FortificationType::OuterWall, 0, i32::MIN),
        ]);
        assert!(doubled.roll_attack(&mut rng).is_err());
    }

    #[test]
    fn roll_attack_reports_bad_damage_roll() {
        let mut s = settlement(vec![]);
        s.damage_roll = RollSpec::from("d0");
        let mut rng = SmallRng::seed_from_u64(11);
        assert!(s.roll_attack(&mut rng).is_err());
    }
}
