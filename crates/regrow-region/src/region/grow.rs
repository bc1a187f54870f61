//! Frontier-based growth
//!
//! Growth is a breadth-first flood fill from the frontier. Each popped
//! pixel has its neighbors examined once; neighbors that pass the color
//! test are claimed and queued, the others are recorded in the boundary.

use super::{GrowthState, Region};
use crate::error::RegionResult;
use log::debug;
use regrow_core::{Color, OwnershipGrid, Point};

impl Region {
    /// Check whether `color` lies within the acceptance window on every channel.
    #[inline]
    pub fn verify_color(&self, color: Color) -> bool {
        self.window.contains(color)
    }

    /// Check whether `p` could be claimed: it must be inside the image and
    /// unclaimed. No state is changed.
    pub fn verify_point(&self, p: Point, owners: &OwnershipGrid) -> bool {
        self.image.contains(p) && owners.is_unclaimed(p)
    }

    /// Drain the frontier, claiming every reachable neighbor accepted by
    /// the color test.
    ///
    /// The acceptance window is refreshed after each claim, so later
    /// candidates are tested against the updated statistics. Neighbors
    /// owned by another region, or rejected by the color test, are
    /// recorded in the boundary.
    ///
    /// Returns the number of pixels claimed. Sets the stalled flag when
    /// that number is zero; a stalled region whose parameters are already
    /// at their maxima becomes terminal unless the current window accepts
    /// one of its rejected candidates. Calling `grow` on a terminal region
    /// does nothing.
    pub fn grow(&mut self, owners: &mut OwnershipGrid) -> RegionResult<usize> {
        if self.state == GrowthState::Terminal && self.frontier.is_empty() {
            return Ok(0);
        }

        let (width, height) = self.image.dimensions();
        let connectivity = self.params.connectivity;
        let mut claimed = 0usize;

        while let Some(p) = self.frontier.pop_front() {
            for n in connectivity.neighbors(p, height, width) {
                match owners.owner(n) {
                    Some(owner) if owner == self.id => {}
                    Some(_) => {
                        self.pending.remove(&n);
                        self.boundary.insert(n);
                    }
                    None => {
                        if self.boundary.contains(&n) {
                            continue;
                        }
                        self.pending.remove(&n);
                        let Some(color) = self.image.get(n) else {
                            continue;
                        };
                        if self.verify_color(color) && self.add_point(n, owners)? {
                            claimed += 1;
                        } else {
                            self.boundary.insert(n);
                        }
                    }
                }
            }
        }

        // Released candidates never reached by a frontier pixel go back
        self.boundary.extend(self.pending.drain());

        self.stalled = claimed == 0;
        if self.stalled && self.is_saturated() && self.saturated_retry_exhausted(owners) {
            self.terminate();
        } else if self.state != GrowthState::Terminal {
            self.state = GrowthState::Stalled;
        }

        debug!(
            "region {}: claimed {} pixels, {} members, {} boundary, state {:?}",
            self.id,
            claimed,
            self.members.len(),
            self.boundary.len(),
            self.state
        );
        Ok(claimed)
    }

    /// Whether no unclaimed candidate passes the current window.
    fn saturated_retry_exhausted(&self, owners: &OwnershipGrid) -> bool {
        let candidates = self.unclaimed_candidates(owners);
        self.accepted_candidates(&candidates).is_empty()
    }

    /// Run one growth pass, then adapt the window if the pass stalled.
    ///
    /// Returns the state after the step.
    pub fn step(&mut self, owners: &mut OwnershipGrid) -> RegionResult<GrowthState> {
        self.grow(owners)?;
        if self.stalled {
            self.increase_threshold(owners);
        }
        Ok(self.state)
    }
}
