use serde::{Deserialize, Serialize};

/// Kind of fortification. Only one fortification of each kind counts toward armor class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FortificationType {
    Wall,
    WallAddon,
    Garrison,
    OuterWall,
}

impl FortificationType {
    pub const COUNT: usize = 4;

    /// Dense index, one slot per kind.
    pub fn index(self) -> usize {
        match self {
            FortificationType::Wall => 0,
            FortificationType::WallAddon => 1,
            FortificationType::Garrison => 2,
            FortificationType::OuterWall => 3,
        }
    }
}

string_enum!(FortificationType {
    Wall => "wall",
    WallAddon => "wall_addon",
    Garrison => "garrison",
    OuterWall => "outer_wall",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fortification {
    pub name: String,
    pub kind: FortificationType,
    pub defense_modifier: i32,
    pub attack_modifier: i32,
}

impl Fortification {
    pub fn new(
        name: impl Into<String>,
        kind: FortificationType,
        defense_modifier: i32,
        attack_modifier: i32,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            defense_modifier,
            attack_modifier,
        }
    }

    pub fn wooden_walls() -> Self {
        Self::new("Wooden Walls", FortificationType::Wall, 10, 1)
    }

    pub fn stone_walls() -> Self {
        Self::new("Stone Walls", FortificationType::Wall, 15, 3)
    }
}
