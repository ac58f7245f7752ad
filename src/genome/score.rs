//! Weighted score aggregation across stroke, group, and gene levels.
//!
//! Every channel contributes a weighted deviation from its setpoint; the
//! level's score is the product of its subcomponent scores times
//! `0.5 ^ sum(weight * |exponent - setpoint|)`.

use std::collections::HashMap;

/// One weighted channel: how strongly deviation from `setpoint` is
/// penalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSetting {
    pub weight: f64,
    pub setpoint: f64,
}

impl Default for ChannelSetting {
    fn default() -> Self {
        Self {
            weight: 1.0,
            setpoint: 0.0,
        }
    }
}

impl ChannelSetting {
    pub fn new(weight: f64, setpoint: f64) -> Self {
        Self { weight, setpoint }
    }

    fn term(&self, exponent: f64) -> f64 {
        self.weight * (exponent - self.setpoint).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupChannel {
    Scale,
    Placement,
    IllegalOverlaps,
    Deviation,
    ExtraLength,
    MissingOverlaps,
    Dropouts,
}

impl GroupChannel {
    pub const ALL: [GroupChannel; 7] = [
        GroupChannel::Scale,
        GroupChannel::Placement,
        GroupChannel::IllegalOverlaps,
        GroupChannel::Deviation,
        GroupChannel::ExtraLength,
        GroupChannel::MissingOverlaps,
        GroupChannel::Dropouts,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneChannel {
    Scale,
    Placement,
    IllegalOverlaps,
    MissingOverlaps,
    Marks,
}

impl GeneChannel {
    pub const ALL: [GeneChannel; 5] = [
        GeneChannel::Scale,
        GeneChannel::Placement,
        GeneChannel::IllegalOverlaps,
        GeneChannel::MissingOverlaps,
        GeneChannel::Marks,
    ];
}

/// Whether a gene's score is the mean or the minimum of its group scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupScoreMode {
    Average,
    Minimum,
}

/// Per-channel weight/setpoint configuration, the in-memory target of the
/// external `Globals` document. Defaults to weight `1.0`, setpoint `0.0`
/// for every channel and `GroupScoreMode::Average` unless overridden.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringGlobals {
    pub group_channels: HashMap<GroupChannel, ChannelSetting>,
    pub gene_channels: HashMap<GeneChannel, ChannelSetting>,
    pub group_score_mode: GroupScoreMode,
}

impl Default for ScoringGlobals {
    fn default() -> Self {
        let group_channels = GroupChannel::ALL
            .into_iter()
            .map(|c| (c, ChannelSetting::default()))
            .collect();
        let gene_channels = GeneChannel::ALL
            .into_iter()
            .map(|c| (c, ChannelSetting::default()))
            .collect();
        Self {
            group_channels,
            gene_channels,
            group_score_mode: GroupScoreMode::Average,
        }
    }
}

/// Measured exponent values for one group's channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupExponents {
    pub scale: f64,
    pub placement: f64,
    pub illegal_overlaps: f64,
    pub deviation: f64,
    pub extra_length: f64,
    pub missing_overlaps: f64,
    pub dropouts: f64,
}

impl GroupExponents {
    fn get(&self, channel: GroupChannel) -> f64 {
        match channel {
            GroupChannel::Scale => self.scale,
            GroupChannel::Placement => self.placement,
            GroupChannel::IllegalOverlaps => self.illegal_overlaps,
            GroupChannel::Deviation => self.deviation,
            GroupChannel::ExtraLength => self.extra_length,
            GroupChannel::MissingOverlaps => self.missing_overlaps,
            GroupChannel::Dropouts => self.dropouts,
        }
    }
}

/// Measured exponent values for one gene's channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeneExponents {
    pub scale: f64,
    pub placement: f64,
    pub illegal_overlaps: f64,
    pub missing_overlaps: f64,
    pub marks: f64,
}

impl GeneExponents {
    fn get(&self, channel: GeneChannel) -> f64 {
        match channel {
            GeneChannel::Scale => self.scale,
            GeneChannel::Placement => self.placement,
            GeneChannel::IllegalOverlaps => self.illegal_overlaps,
            GeneChannel::MissingOverlaps => self.missing_overlaps,
            GeneChannel::Marks => self.marks,
        }
    }
}

fn penalty<C: Copy + Eq + std::hash::Hash>(
    channels: &HashMap<C, ChannelSetting>,
    all: &[C],
    get_exponent: impl Fn(C) -> f64,
) -> f64 {
    let sum: f64 = all
        .iter()
        .map(|&c| {
            let setting = channels.get(&c).copied().unwrap_or_default();
            setting.term(get_exponent(c))
        })
        .sum();
    0.5f64.powf(sum)
}

/// A stroke's own score (used as the group's subcomponent product term).
pub fn stroke_score(deviation: f64, extra_length: f64, globals: &ScoringGlobals) -> f64 {
    let deviation_setting = globals
        .group_channels
        .get(&GroupChannel::Deviation)
        .copied()
        .unwrap_or_default();
    let extra_setting = globals
        .group_channels
        .get(&GroupChannel::ExtraLength)
        .copied()
        .unwrap_or_default();
    0.5f64.powf(deviation_setting.term(deviation) + extra_setting.term(extra_length))
}

/// A group's score: the product of its stroke subscores, penalized by its
/// own channel exponents.
pub fn group_score(stroke_scores: &[f64], exponents: GroupExponents, globals: &ScoringGlobals) -> f64 {
    let product: f64 = stroke_scores.iter().product();
    let product = if stroke_scores.is_empty() { 1.0 } else { product };
    product * penalty(&globals.group_channels, &GroupChannel::ALL, |c| exponents.get(c))
}

/// A gene's score: group scores aggregated per `group_score_mode`,
/// penalized by the gene's own channel exponents.
pub fn gene_score(group_scores: &[f64], exponents: GeneExponents, globals: &ScoringGlobals) -> f64 {
    let aggregated = if group_scores.is_empty() {
        1.0
    } else {
        match globals.group_score_mode {
            GroupScoreMode::Average => group_scores.iter().sum::<f64>() / group_scores.len() as f64,
            GroupScoreMode::Minimum => group_scores.iter().cloned().fold(f64::INFINITY, f64::min),
        }
    };

    aggregated * penalty(&globals.gene_channels, &GeneChannel::ALL, |c| exponents.get(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_setpoint_match_yields_no_penalty() {
        let globals = ScoringGlobals::default();
        let score = stroke_score(0.0, 0.0, &globals);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn deviation_away_from_setpoint_reduces_score() {
        let globals = ScoringGlobals::default();
        let near = stroke_score(0.1, 0.0, &globals);
        let far = stroke_score(1.0, 0.0, &globals);
        assert!(far < near);
        assert!(near < 1.0);
    }

    #[test]
    fn group_score_is_product_of_stroke_scores_times_penalty() {
        let globals = ScoringGlobals::default();
        let scores = vec![0.9, 0.8];
        let score = group_score(&scores, GroupExponents::default(), &globals);
        assert!((score - 0.9 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn gene_score_average_mode_means_group_scores() {
        let globals = ScoringGlobals::default();
        let score = gene_score(&[0.5, 1.0], GeneExponents::default(), &globals);
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn gene_score_minimum_mode_takes_smallest_group() {
        let mut globals = ScoringGlobals::default();
        globals.group_score_mode = GroupScoreMode::Minimum;
        let score = gene_score(&[0.5, 1.0], GeneExponents::default(), &globals);
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn empty_groups_score_as_identity() {
        let globals = ScoringGlobals::default();
        let score = gene_score(&[], GeneExponents::default(), &globals);
        assert!((score - 1.0).abs() < 1e-9);
    }
}
