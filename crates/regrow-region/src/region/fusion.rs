//! Region fusion
//!
//! Two regions are compatible when the mean color of either lies inside the
//! acceptance window of the other. Among compatible neighbors the driver
//! prefers the one with the smallest [`Region::merge_criterion`].

use super::{GrowthState, Region};
use crate::error::{RegionError, RegionResult};
use log::debug;
use regrow_core::{Color, OwnershipGrid, RegionId};
use std::collections::BTreeSet;

impl Region {
    /// Check whether a single color is compatible with this region.
    #[inline]
    pub fn verify_fusion_color(&self, color: Color) -> bool {
        self.window.contains(color)
    }

    /// Check whether two regions are compatible for merging.
    ///
    /// Symmetric: true iff either region's mean lies inside the other's
    /// acceptance window.
    pub fn verify_fusion(&self, other: &Region) -> bool {
        self.window.contains_mean(other.mean) || other.window.contains_mean(self.mean)
    }

    /// Euclidean distance between the two mean colors. Lower is more
    /// compatible.
    pub fn merge_criterion(&self, other: &Region) -> f64 {
        self.mean
            .iter()
            .zip(other.mean.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Ids of the regions owning a pixel of this region's boundary.
    pub fn neighbor_ids(&self, owners: &OwnershipGrid) -> BTreeSet<RegionId> {
        self.boundary
            .iter()
            .filter_map(|&p| owners.owner(p))
            .filter(|&id| id != self.id)
            .collect()
    }

    /// Check whether region `id` owns a pixel of this region's boundary.
    pub fn is_adjacent_to(&self, id: RegionId, owners: &OwnershipGrid) -> bool {
        id != self.id && self.boundary.iter().any(|&p| owners.is_owned_by(p, id))
    }

    /// Absorb `other` into this region.
    ///
    /// Every pixel of `other` is reassigned to this region in `owners`,
    /// its colors join this region's statistics, and its boundary is folded
    /// into this one (minus pixels now owned here). `other` is consumed.
    /// Adaptation parameters take the wider of the two.
    ///
    /// # Errors
    ///
    /// - [`RegionError::SelfMerge`] if both regions carry the same id
    /// - [`RegionError::MergeOverlap`] if a pixel of `other` is owned by this region
    /// - [`RegionError::Core`] if a pixel of `other` is not owned by `other`
    ///
    /// All checks happen before anything is modified.
    pub fn merge(&mut self, other: Region, owners: &mut OwnershipGrid) -> RegionResult<()> {
        if self.same_identity(&other) {
            return Err(RegionError::SelfMerge(self.id.label()));
        }
        for &p in &other.members {
            match owners.owner(p) {
                Some(owner) if owner == other.id => {}
                Some(owner) if owner == self.id => {
                    return Err(RegionError::MergeOverlap {
                        target: self.id.label(),
                        source_id: other.id.label(),
                        row: p.row,
                        col: p.col,
                    });
                }
                found => {
                    return Err(regrow_core::Error::OwnershipConflict {
                        row: p.row,
                        col: p.col,
                        expected: other.id.label(),
                        found: found.map_or(0, RegionId::label),
                    }
                    .into());
                }
            }
        }

        for &p in &other.members {
            owners.reassign(p, other.id, self.id)?;
        }

        let absorbed = other.members.len();
        for p in &other.members {
            self.boundary.remove(p);
            self.pending.remove(p);
        }
        self.members.extend_from_slice(&other.members);
        self.colors.extend_from_slice(&other.colors);
        self.stats.absorb(&other.stats);

        for p in other.boundary.into_iter().chain(other.pending) {
            if !owners.is_owned_by(p, self.id) {
                self.boundary.insert(p);
            }
        }
        self.frontier.extend(other.frontier);

        self.threshold = self.threshold.max(other.threshold);
        self.coef_sd = self.coef_sd.max(other.coef_sd);
        self.is_increase = self.is_increase || other.is_increase;
        self.average_color();
        self.average_color_threshold();

        let both_terminal =
            self.state == GrowthState::Terminal && other.state == GrowthState::Terminal;
        self.stalled = self.stalled && other.stalled;
        self.state = if !self.frontier.is_empty() {
            GrowthState::Growing
        } else if both_terminal {
            GrowthState::Terminal
        } else {
            GrowthState::Stalled
        };

        debug!(
            "merged region {} into {}: +{} pixels, {} members",
            other.id,
            self.id,
            absorbed,
            self.members.len()
        );
        Ok(())
    }
}
