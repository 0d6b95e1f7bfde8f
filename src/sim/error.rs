use thiserror::Error;

use crate::model::DiceError;

#[derive(Debug, Error)]
pub enum TurnError {
    /// A roll spec on `entity` could not be evaluated.
    #[error("invalid roll for {entity}")]
    InvalidRoll {
        entity: String,
        #[source]
        source: DiceError,
    },

    /// An army stands somewhere the world has no settlement for.
    #[error("army {army} reports being at {location}, which has no settlement")]
    MissingSettlement { army: String, location: String },

    #[error("{entity} owes allegiance to unknown actor {allegiance}")]
    UnknownActor { entity: String, allegiance: String },
}

impl TurnError {
    /// Fatal errors mean the world is incoherent and the turn must stop at once.
    pub fn is_fatal(&self) -> bool {
        match self {
            TurnError::InvalidRoll { .. } => false,
            TurnError::MissingSettlement { .. } | TurnError::UnknownActor { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn invalid_roll_keeps_dice_error_as_source() {
        let err = TurnError::InvalidRoll {
            entity: "First Host".into(),
            source: DiceError::InvalidExpression {
                expr: "d0".into(),
                reason: "no faces".into(),
            },
        };
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "invalid roll for First Host");
        assert!(err.source().unwrap().to_string().contains("d0"));
    }

    #[test]
    fn missing_settlement_is_fatal() {
        let err = TurnError::MissingSettlement {
            army: "The Cinch".into(),
            location: "UNSET_LOCATION".into(),
        };
        assert!(err.is_fatal());
    }
}
