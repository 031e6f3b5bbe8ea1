use serde::{Deserialize, Serialize};

use crate::ScenarioError;

/// Layout and combat constants for a [`Skirmish`](super::Skirmish).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub width: i32,
    pub height: i32,
    pub friendly_count: usize,
    pub enemy_count: usize,
    pub template: String,
    pub hp: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub turn_limit: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            friendly_count: 5,
            enemy_count: 5,
            template: "footman".to_owned(),
            hp: 40,
            min_damage: 2,
            max_damage: 6,
            turn_limit: 400,
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.width < 3 {
            return Err(ScenarioError::GridTooNarrow(self.width));
        }
        if self.hp <= 0 {
            return Err(ScenarioError::InvalidHp(self.hp));
        }
        if self.min_damage <= 0 || self.min_damage > self.max_damage {
            return Err(ScenarioError::InvalidDamage {
                min: self.min_damage,
                max: self.max_damage,
            });
        }
        let rows = usize::try_from(self.height).unwrap_or(0);
        for (side, count) in [
            (crate::Side::Friendly, self.friendly_count),
            (crate::Side::Enemy, self.enemy_count),
        ] {
            if count > rows {
                return Err(ScenarioError::TooManyUnits { side, count, rows });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(ScenarioConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_overfull_grid() {
        let config = ScenarioConfig {
            height: 4,
            enemy_count: 5,
            ..ScenarioConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScenarioError::TooManyUnits { count: 5, rows: 4, .. })
        ));
    }

    #[test]
    fn test_rejects_empty_damage_range() {
        let config = ScenarioConfig {
            min_damage: 5,
            max_damage: 3,
            ..ScenarioConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScenarioError::InvalidDamage { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_hp() {
        for hp in [0, -3] {
            let config = ScenarioConfig {
                hp,
                ..ScenarioConfig::default()
            };
            assert_eq!(config.validate(), Err(ScenarioError::InvalidHp(hp)));
        }
    }
}
