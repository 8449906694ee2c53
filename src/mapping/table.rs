use super::rule::MappingRule;
use crate::error::ConfigError;
use crate::source::{BoneKind, SourceTopology};
use crate::target::TargetRig;

/// A rule with its source slot and target bone resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRule {
    /// Position of the rule in the declared list
    pub order: usize,
    pub source_slot: usize,
    pub rule: MappingRule,
}

/// All rules writing one target bone, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct TargetChannel {
    pub target: usize,
    pub rules: Vec<ResolvedRule>,
}

impl TargetChannel {
    /// False when every rule is a zero-influence placeholder
    pub fn is_active(&self) -> bool {
        self.rules.iter().any(|r| r.rule.influence > 0.0)
    }
}

/// Validated bone correspondence table, grouped by target bone
#[derive(Debug, Clone)]
pub struct MappingTable {
    channels: Vec<TargetChannel>,
}

impl MappingTable {
    pub fn new(
        rules: &[MappingRule],
        topology: &SourceTopology,
        rig: &TargetRig,
    ) -> Result<Self, ConfigError> {
        let mut channels: Vec<TargetChannel> = Vec::new();

        for (index, rule) in rules.iter().enumerate() {
            let target = rig
                .index_of(&rule.target)
                .ok_or_else(|| ConfigError::UnknownTargetBone {
                    index,
                    name: rule.target.clone(),
                })?;

            let source_slot =
                topology
                    .slot(&rule.source)
                    .ok_or_else(|| ConfigError::UnknownSourceBone {
                        index,
                        name: rule.source.clone(),
                    })?;
            if topology.kind(source_slot) == Some(BoneKind::Anchor) {
                return Err(ConfigError::AnchorAsRotationSource {
                    index,
                    name: rule.source.clone(),
                });
            }

            if !rule.influence.is_finite() || !(0.0..=1.0).contains(&rule.influence) {
                return Err(ConfigError::InvalidInfluence {
                    index,
                    influence: rule.influence,
                });
            }
            if !rule.axes.covers(rule.invert) {
                return Err(ConfigError::InvertOutsideMask {
                    index,
                    axes: rule.axes,
                    invert: rule.invert,
                });
            }

            let resolved = ResolvedRule {
                order: index,
                source_slot,
                rule: rule.clone(),
            };
            match channels.iter_mut().find(|c| c.target == target) {
                Some(channel) => channel.rules.push(resolved),
                None => channels.push(TargetChannel {
                    target,
                    rules: vec![resolved],
                }),
            }
        }

        log::info!(
            "Mapping table: {} rules onto {} target bones",
            rules.len(),
            channels.len()
        );
        Ok(Self { channels })
    }

    /// Channels in order of each target bone's first rule
    pub fn channels(&self) -> &[TargetChannel] {
        &self.channels
    }

    pub fn rule_count(&self) -> usize {
        self.channels.iter().map(|c| c.rules.len()).sum()
    }
}
