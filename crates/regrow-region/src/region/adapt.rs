//! Threshold adaptation
//!
//! A stalled region may widen its acceptance window and retry the pixels it
//! rejected. Widening only goes up, one step at a time, and stops at the
//! configured maxima, so a region adapts a bounded number of times before
//! it becomes terminal.

use super::{GrowthState, Region};
use log::debug;
use regrow_core::{OwnershipGrid, Point};
use std::collections::HashSet;

impl Region {
    /// Whether adaptation widened the window and has not yet saturated.
    #[inline]
    pub fn is_increase(&self) -> bool {
        self.is_increase
    }

    /// Whether both `threshold` and `coef_sd` have reached their maxima.
    pub fn is_saturated(&self) -> bool {
        self.threshold >= self.params.threshold_max && self.coef_sd >= self.params.coef_sd_max
    }

    /// Widen the acceptance window of a stalled region and re-queue the
    /// rejected candidates.
    ///
    /// Each call raises `threshold` and `coef_sd` by one step, capped at
    /// their maxima, and recomputes the window. Unclaimed boundary pixels
    /// are released from the boundary, and the members adjacent to them are
    /// pushed back onto the frontier so the next [`Region::grow`] tests them
    /// again.
    ///
    /// Once both parameters are saturated the window no longer widens;
    /// only candidates the current window already accepts are re-queued
    /// (the mean may have moved since they were rejected). When none is
    /// left, or the region has no unclaimed candidate at all, the region
    /// becomes terminal.
    ///
    /// A region whose candidates no longer touch any member also becomes
    /// terminal.
    ///
    /// Returns `true` if candidates were re-queued. Does nothing and
    /// returns `false` when the region is not stalled or is terminal.
    pub fn increase_threshold(&mut self, owners: &OwnershipGrid) -> bool {
        if self.state == GrowthState::Terminal || !self.stalled {
            return false;
        }

        let candidates = self.unclaimed_candidates(owners);
        if candidates.is_empty() {
            self.terminate();
            return false;
        }

        if self.is_saturated() {
            self.is_increase = false;
            let ready = self.accepted_candidates(&candidates);
            if ready.is_empty() {
                self.terminate();
                return false;
            }
            if !self.requeue(&ready, owners) {
                self.terminate();
                return false;
            }
            debug!(
                "region {}: saturated, retrying {} of {} candidates",
                self.id,
                ready.len(),
                candidates.len()
            );
            return true;
        }

        self.threshold = self
            .threshold
            .saturating_add(self.params.threshold_step)
            .min(self.params.threshold_max);
        self.coef_sd = (self.coef_sd + self.params.coef_sd_step).min(self.params.coef_sd_max);
        self.is_increase = true;
        self.average_color_threshold();
        if !self.requeue(&candidates, owners) {
            self.terminate();
            return false;
        }

        debug!(
            "region {}: threshold {} coef_sd {:.2}, retrying {} candidates",
            self.id,
            self.threshold,
            self.coef_sd,
            candidates.len()
        );
        true
    }

    /// Unclaimed boundary pixels in row-major order.
    pub(super) fn unclaimed_candidates(&self, owners: &OwnershipGrid) -> Vec<Point> {
        let mut candidates: Vec<Point> = self
            .boundary
            .iter()
            .chain(self.pending.iter())
            .copied()
            .filter(|&p| owners.is_unclaimed(p))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();
        candidates
    }

    /// The subset of `candidates` the current window accepts.
    pub(super) fn accepted_candidates(&self, candidates: &[Point]) -> Vec<Point> {
        candidates
            .iter()
            .copied()
            .filter(|&p| self.image.get(p).is_some_and(|c| self.verify_color(c)))
            .collect()
    }

    /// Release `candidates` from the boundary and queue their member
    /// neighbors. Returns `false` if no member was queued.
    fn requeue(&mut self, candidates: &[Point], owners: &OwnershipGrid) -> bool {
        let (width, height) = self.image.dimensions();
        let connectivity = self.params.connectivity;
        let mut queued: HashSet<Point> = self.frontier.iter().copied().collect();
        for &c in candidates {
            self.boundary.remove(&c);
            self.pending.insert(c);
            for n in connectivity.neighbors(c, height, width) {
                if owners.is_owned_by(n, self.id) && queued.insert(n) {
                    self.frontier.push_back(n);
                }
            }
        }
        if self.frontier.is_empty() {
            return false;
        }
        self.state = GrowthState::Growing;
        true
    }

    /// Stop growth and adaptation for good.
    pub(super) fn terminate(&mut self) {
        self.boundary.extend(self.pending.drain());
        self.frontier.clear();
        self.is_increase = false;
        self.state = GrowthState::Terminal;
    }
}
