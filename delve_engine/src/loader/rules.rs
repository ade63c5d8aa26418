//! Combat and item tuning constants.
//!
//! Rules are read from `rules.toml` when present. Every field is optional in
//! the file; anything left out keeps its default, and a file that cannot be
//! read or parsed is replaced by the defaults entirely.

use anyhow::{Context, Result, ensure};
use delve_data::RulesDef;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tuning constants consulted by the pickup and attack actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Hit points restored by a potion (clamped to max health).
    pub potion_heal: u32,
    /// Damage added by a weapon.
    pub weapon_bonus: u32,
    /// Gold granted by a treasure.
    pub treasure_gold: u32,
    /// Defeat rewards are rolled from `reward_min..=reward_max`.
    pub reward_min: u32,
    pub reward_max: u32,
}

impl Default for Rules {
    fn default() -> Self {
        RulesDef::default().into()
    }
}

impl From<RulesDef> for Rules {
    fn from(def: RulesDef) -> Self {
        Self {
            potion_heal: def.potion_heal,
            weapon_bonus: def.weapon_bonus,
            treasure_gold: def.treasure_gold,
            reward_min: def.reward_min,
            reward_max: def.reward_max,
        }
    }
}

/// Loads rules from a TOML file, falling back to defaults on error.
///
/// This function never fails.
pub fn load_rules(toml_path: &Path) -> Rules {
    match try_load_rules(toml_path) {
        Ok(rules) => {
            info!("rules loaded from '{}'", toml_path.display());
            rules
        },
        Err(e) => {
            warn!(
                "Could not load rules from '{}': {e:#}. Using hardcoded defaults.",
                toml_path.display()
            );
            Rules::default()
        },
    }
}

fn try_load_rules(toml_path: &Path) -> Result<Rules> {
    let rules_file =
        fs::read_to_string(toml_path).with_context(|| format!("reading rules from '{}'", toml_path.display()))?;
    let def: RulesDef =
        toml::from_str(&rules_file).with_context(|| format!("parsing rules from '{}'", toml_path.display()))?;
    ensure!(
        def.reward_min <= def.reward_max,
        "reward_min ({}) is greater than reward_max ({})",
        def.reward_min,
        def.reward_max
    );
    Ok(def.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write rules");
        file
    }

    #[test]
    fn defaults_match_the_classic_game() {
        let rules = Rules::default();
        assert_eq!(rules.potion_heal, 50);
        assert_eq!(rules.weapon_bonus, 10);
        assert_eq!(rules.treasure_gold, 100);
        assert_eq!((rules.reward_min, rules.reward_max), (10, 39));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let file = write_temp("potion_heal = 25\nreward_max = 12\n");
        let rules = load_rules(file.path());
        assert_eq!(rules.potion_heal, 25);
        assert_eq!(rules.weapon_bonus, 10);
        assert_eq!((rules.reward_min, rules.reward_max), (10, 12));
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let rules = load_rules(&dir.path().join("rules.toml"));
        assert_eq!(rules, Rules::default());
    }

    #[test]
    fn malformed_or_inverted_file_falls_back() {
        let garbage = write_temp("potion_heal = \"lots\"");
        assert_eq!(load_rules(garbage.path()), Rules::default());

        let inverted = write_temp("reward_min = 50\nreward_max = 5\n");
        assert_eq!(load_rules(inverted.path()), Rules::default());
    }
}
