use serde::{Deserialize, Serialize};

use crate::settlement::BonusRule;

/// Rule variants a Banker round is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankerRules {
    /// Dots wagered per matchup when a hole's setup names none.
    pub default_dots: u32,
    /// Birdie/eagle multiplier rule.
    pub bonus: BonusRule,
    /// Doubles on par 3s triple instead.
    pub par3_triples: bool,
}

impl Default for BankerRules {
    fn default() -> Self {
        Self {
            default_dots: 1,
            bonus: BonusRule::None,
            par3_triples: false,
        }
    }
}

impl BankerRules {
    /// Load rules from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("FAIRWAY_BANKER_CONFIG")
            .unwrap_or_else(|_| "config/banker.toml".to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<BankerRules>(&content) {
                Ok(rules) => rules,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    BankerRules::default()
                },
            },
            Err(_) => BankerRules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let rules = BankerRules::default();
        assert_eq!(rules.default_dots, 1);
        assert_eq!(rules.bonus, BonusRule::None);
        assert!(!rules.par3_triples);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
default_dots = 5
bonus = "gross_birdies_enabled"
par3_triples = true
"#;
        let rules: BankerRules = toml::from_str(toml_str).unwrap();
        assert_eq!(rules.default_dots, 5);
        assert_eq!(rules.bonus, BonusRule::GrossBirdiesEnabled);
        assert!(rules.par3_triples);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let rules: BankerRules = toml::from_str("par3_triples = true").unwrap();
        assert_eq!(rules.default_dots, 1);
        assert_eq!(rules.bonus, BonusRule::None);
        assert!(rules.par3_triples);
    }

    #[test]
    fn legacy_bonus_name_parses() {
        let rules: BankerRules = toml::from_str(r#"bonus = "legacy_double_birdie_bets""#).unwrap();
        assert_eq!(rules.bonus, BonusRule::LegacyDoubleBirdieBets);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let rules = BankerRules::load_from("/nonexistent/fairway/banker.toml");
        assert_eq!(rules, BankerRules::default());
    }
}
