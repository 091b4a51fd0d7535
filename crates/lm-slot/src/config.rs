//! Session configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};
use crate::paylines::ActivePaylines;
use crate::reels::{ReelLayout, ReelSet};
use crate::rng::RandomSource;
use crate::symbols::Symbol;

/// Settings for one game session.
///
/// Validated once when the session is built; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Which reel strips to play on
    pub layout: ReelLayout,
    /// Paylines 1..=N are active (1 through 15)
    pub active_paylines: u8,
    /// Credits bet on each active payline
    pub bet_per_line: u32,
    /// RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Strips for the `custom` layout, one list per reel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strips: Option<Vec<Vec<Symbol>>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            layout: ReelLayout::Reference,
            active_paylines: 1,
            bet_per_line: 1,
            seed: None,
            strips: None,
        }
    }
}

impl SessionConfig {
    /// Reference layout with `active_paylines` lines and a fixed seed
    pub fn reference(active_paylines: u8, seed: Option<u64>) -> Self {
        Self {
            active_paylines,
            seed,
            ..Self::default()
        }
    }

    /// Check every field, returning the first problem found
    pub fn validate(&self) -> SlotResult<()> {
        ActivePaylines::new(self.active_paylines)?;
        if self.bet_per_line == 0 {
            return Err(SlotError::InvalidBet(self.bet_per_line));
        }
        match (self.layout, &self.strips) {
            (ReelLayout::Custom, None) => Err(SlotError::Config(
                "custom layout requires strips".into(),
            )),
            (ReelLayout::Custom, Some(strips)) => ReelSet::from_strips(strips.clone()).map(|_| ()),
            (_, Some(_)) => Err(SlotError::Config(format!(
                "strips given for the {:?} layout",
                self.layout
            ))),
            (_, None) => Ok(()),
        }
    }

    /// Validated active payline count
    pub fn active(&self) -> SlotResult<ActivePaylines> {
        ActivePaylines::new(self.active_paylines)
    }

    /// Build the reel set this configuration describes
    pub fn reel_set<R: RandomSource + ?Sized>(&self, rng: &mut R) -> SlotResult<ReelSet> {
        match (&self.strips, self.layout) {
            (Some(strips), ReelLayout::Custom) => ReelSet::from_strips(strips.clone()),
            (_, layout) => ReelSet::build(layout, rng),
        }
    }

    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> SlotResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SlotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML and validate
    pub fn from_yaml(yaml: &str) -> SlotResult<Self> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| SlotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: &Path) -> SlotResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SlotError::Config(format!("{}: {e}", path.display())))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            Some("yaml") | Some("yml") => Self::from_yaml(&text),
            _ => Err(SlotError::Config(format!(
                "{}: expected a .json, .yaml or .yml file",
                path.display()
            ))),
        }
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> SlotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SlotError::Config(e.to_string()))
    }
}
