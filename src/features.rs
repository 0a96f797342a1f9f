// Corridor Planner: deterministic job planning for container terminals
// Copyright (C) 2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Runtime feature flags of the planner. The flags are parsed once from the environment when a
//! planner is constructed; explicit overrides always win over the environment.

/// Environment variable holding the comma-separated feature tokens.
pub const FEATURES_ENV_VAR: &str = "JOB_PLANNER_FEATURES";

/// One of the planner's optional behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Bias yard choices away from the corridor that was recently loaded more heavily.
    DynamicCorridorBias,
    /// Seed and mutate the yard GA more aggressively to escape local optima.
    GaDiversity,
    /// Penalise HT assignments that cross towards an already pressured corridor.
    HtFuturePenalty,
    /// Memoise synthesised driving paths.
    PathCache,
}

impl Feature {
    /// Parse a feature token (without any `!` prefix). Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "dynamic_corridor_bias" => Some(Self::DynamicCorridorBias),
            "ga_diversity" => Some(Self::GaDiversity),
            "ht_future_penalty" => Some(Self::HtFuturePenalty),
            "path_cache" => Some(Self::PathCache),
            _ => None,
        }
    }
}

/// The fixed record of all feature flags. All flags default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSet {
    /// See [`Feature::DynamicCorridorBias`].
    pub dynamic_corridor_bias: bool,
    /// See [`Feature::GaDiversity`].
    pub ga_diversity: bool,
    /// See [`Feature::HtFuturePenalty`].
    pub ht_future_penalty: bool,
    /// See [`Feature::PathCache`].
    pub path_cache: bool,
}

impl FeatureSet {
    /// Parse the flags from [`FEATURES_ENV_VAR`]. An unset variable yields the default set.
    pub fn from_env() -> Self {
        Self::default().with_tokens(&std::env::var(FEATURES_ENV_VAR).unwrap_or_default())
    }

    /// Apply a comma-separated token list on top of `self`. A bare token enables the feature, a
    /// `!`-prefixed token force-disables it, and unknown tokens are ignored.
    pub fn with_tokens(mut self, tokens: &str) -> Self {
        for token in tokens.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if let Some(name) = token.strip_prefix('!') {
                if let Some(feature) = Feature::from_token(name) {
                    self.set(feature, false);
                }
            } else if let Some(feature) = Feature::from_token(token) {
                self.set(feature, true);
            }
        }
        self
    }

    /// Set a single flag, returning `self` for chaining.
    pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
        self.set(feature, enabled);
        self
    }

    /// Set a single flag.
    pub fn set(&mut self, feature: Feature, enabled: bool) {
        match feature {
            Feature::DynamicCorridorBias => self.dynamic_corridor_bias = enabled,
            Feature::GaDiversity => self.ga_diversity = enabled,
            Feature::HtFuturePenalty => self.ht_future_penalty = enabled,
            Feature::PathCache => self.path_cache = enabled,
        }
    }

    /// Read a single flag.
    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::DynamicCorridorBias => self.dynamic_corridor_bias,
            Feature::GaDiversity => self.ga_diversity,
            Feature::HtFuturePenalty => self.ht_future_penalty,
            Feature::PathCache => self.path_cache,
        }
    }
}
