//! Running color statistics and acceptance windows
//!
//! [`ColorStats`] keeps per-channel sums and sums of squares so that the
//! mean and standard deviation of a region can be refreshed in constant
//! time after each absorbed pixel, and combined in constant time when two
//! regions merge.
//!
//! [`AcceptanceWindow`] turns those statistics into the per-channel color
//! range a candidate pixel must fall within:
//!
//! ```text
//! half[c] = threshold + coef_sd * std_dev[c]
//! low[c]  = floor(mean[c] - half[c])   clamped to [0, 255]
//! high[c] = ceil(mean[c] + half[c])    clamped to [0, 255]
//! ```
//!
//! Since `half[c] >= 0`, `low[c] <= mean[c] <= high[c]` always holds.

use regrow_core::{CHANNELS, Color};

/// Incremental per-channel color statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorStats {
    count: u64,
    sum: [u64; CHANNELS],
    sum_sq: [u64; CHANNELS],
}

impl ColorStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute statistics from scratch over a sequence of colors.
    pub fn from_colors<'a, I>(colors: I) -> Self
    where
        I: IntoIterator<Item = &'a Color>,
    {
        let mut stats = Self::new();
        for &c in colors {
            stats.push(c);
        }
        stats
    }

    /// Number of colors accumulated.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Add one color.
    pub fn push(&mut self, color: Color) {
        self.count += 1;
        for (c, &v) in color.channels().iter().enumerate() {
            let v = v as u64;
            self.sum[c] += v;
            self.sum_sq[c] += v * v;
        }
    }

    /// Remove one previously added color.
    ///
    /// Returns `false` (and leaves the statistics unchanged) if the
    /// statistics are empty.
    pub fn remove(&mut self, color: Color) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        for (c, &v) in color.channels().iter().enumerate() {
            let v = v as u64;
            self.sum[c] = self.sum[c].saturating_sub(v);
            self.sum_sq[c] = self.sum_sq[c].saturating_sub(v * v);
        }
        true
    }

    /// Fold another set of statistics into this one.
    pub fn absorb(&mut self, other: &ColorStats) {
        self.count += other.count;
        for c in 0..CHANNELS {
            self.sum[c] += other.sum[c];
            self.sum_sq[c] += other.sum_sq[c];
        }
    }

    /// Per-channel mean, all zeros when empty.
    pub fn mean(&self) -> [f64; CHANNELS] {
        let mut mean = [0.0; CHANNELS];
        if self.count == 0 {
            return mean;
        }
        let n = self.count as f64;
        for (c, m) in mean.iter_mut().enumerate() {
            *m = self.sum[c] as f64 / n;
        }
        mean
    }

    /// Per-channel population standard deviation, all zeros when empty.
    pub fn std_dev(&self) -> [f64; CHANNELS] {
        let mut sd = [0.0; CHANNELS];
        if self.count == 0 {
            return sd;
        }
        let n = self.count as f64;
        for (c, s) in sd.iter_mut().enumerate() {
            let mean = self.sum[c] as f64 / n;
            let var = self.sum_sq[c] as f64 / n - mean * mean;
            // Rounding can push a zero variance slightly negative
            *s = var.max(0.0).sqrt();
        }
        sd
    }
}

/// Round a floating-point mean to the nearest representable color.
pub fn mean_to_color(mean: [f64; CHANNELS]) -> Color {
    let mut out = [0u8; CHANNELS];
    for (o, &m) in out.iter_mut().zip(mean.iter()) {
        *o = m.round().clamp(0.0, 255.0) as u8;
    }
    Color(out)
}

/// Per-channel inclusive color range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptanceWindow {
    /// Lower bound per channel
    pub low: Color,
    /// Upper bound per channel
    pub high: Color,
}

impl Default for AcceptanceWindow {
    fn default() -> Self {
        Self {
            low: Color::BLACK,
            high: Color::WHITE,
        }
    }
}

impl AcceptanceWindow {
    /// Build the window around `mean` with half-width
    /// `threshold + coef_sd * std_dev` on each channel.
    pub fn from_stats(
        mean: [f64; CHANNELS],
        std_dev: [f64; CHANNELS],
        threshold: u32,
        coef_sd: f32,
    ) -> Self {
        let mut low = [0u8; CHANNELS];
        let mut high = [0u8; CHANNELS];
        for c in 0..CHANNELS {
            let half = threshold as f64 + coef_sd as f64 * std_dev[c];
            low[c] = (mean[c] - half).floor().clamp(0.0, 255.0) as u8;
            high[c] = (mean[c] + half).ceil().clamp(0.0, 255.0) as u8;
        }
        Self {
            low: Color(low),
            high: Color(high),
        }
    }

    /// Check whether every channel of `color` lies within the window.
    pub fn contains(&self, color: Color) -> bool {
        (0..CHANNELS).all(|c| {
            self.low.channel(c) <= color.channel(c) && color.channel(c) <= self.high.channel(c)
        })
    }

    /// Check whether a floating-point mean lies within the window.
    pub fn contains_mean(&self, mean: [f64; CHANNELS]) -> bool {
        (0..CHANNELS).all(|c| {
            self.low.channel(c) as f64 <= mean[c] && mean[c] <= self.high.channel(c) as f64
        })
    }

    /// Check whether the two windows overlap on every channel.
    pub fn intersects(&self, other: &AcceptanceWindow) -> bool {
        (0..CHANNELS).all(|c| {
            self.low.channel(c) <= other.high.channel(c)
                && other.low.channel(c) <= self.high.channel(c)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std_dev() {
        let colors = [Color::new(10, 0, 100), Color::new(20, 0, 100)];
        let stats = ColorStats::from_colors(&colors);
        assert_eq!(stats.count(), 2);
        assert_eq!(stats.mean(), [15.0, 0.0, 100.0]);
        let sd = stats.std_dev();
        assert!((sd[0] - 5.0).abs() < 1e-9);
        assert_eq!(sd[1], 0.0);
        assert_eq!(sd[2], 0.0);
    }

    #[test]
    fn test_remove_restores_previous_state() {
        let mut stats = ColorStats::new();
        stats.push(Color::new(1, 2, 3));
        let before = stats.clone();
        stats.push(Color::new(200, 100, 50));
        assert!(stats.remove(Color::new(200, 100, 50)));
        assert_eq!(stats, before);

        let mut empty = ColorStats::new();
        assert!(!empty.remove(Color::BLACK));
    }

    #[test]
    fn test_absorb_matches_recompute() {
        let a = [Color::new(0, 10, 20), Color::new(5, 15, 25)];
        let b = [Color::new(100, 110, 120)];
        let mut sa = ColorStats::from_colors(&a);
        sa.absorb(&ColorStats::from_colors(&b));
        let all: Vec<Color> = a.iter().chain(b.iter()).copied().collect();
        assert_eq!(sa, ColorStats::from_colors(&all));
    }

    #[test]
    fn test_empty_stats_are_zero() {
        let stats = ColorStats::new();
        assert!(stats.is_empty());
        assert_eq!(stats.mean(), [0.0; CHANNELS]);
        assert_eq!(stats.std_dev(), [0.0; CHANNELS]);
    }

    #[test]
    fn test_window_contains_mean() {
        let mean = [100.4, 0.2, 254.9];
        let w = AcceptanceWindow::from_stats(mean, [0.0; CHANNELS], 0, 1.0);
        assert!(w.contains_mean(mean));
        assert!(w.contains(mean_to_color(mean)));
        assert_eq!(w.low, Color::new(100, 0, 254));
        assert_eq!(w.high, Color::new(101, 1, 255));
    }

    #[test]
    fn test_window_clamps() {
        let w = AcceptanceWindow::from_stats([3.0, 250.0, 128.0], [2.0, 2.0, 2.0], 5, 1.5);
        // half = 5 + 3 = 8
        assert_eq!(w.low, Color::new(0, 242, 120));
        assert_eq!(w.high, Color::new(11, 255, 136));
        assert!(w.contains(Color::new(0, 255, 120)));
        assert!(!w.contains(Color::new(12, 250, 128)));
    }

    #[test]
    fn test_window_intersects() {
        let a = AcceptanceWindow::from_stats([50.0; CHANNELS], [0.0; CHANNELS], 5, 1.0);
        let b = AcceptanceWindow::from_stats([58.0; CHANNELS], [0.0; CHANNELS], 5, 1.0);
        let c = AcceptanceWindow::from_stats([70.0; CHANNELS], [0.0; CHANNELS], 5, 1.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_mean_to_color_rounds() {
        assert_eq!(mean_to_color([0.4, 0.5, 254.6]), Color::new(0, 1, 255));
    }
}
