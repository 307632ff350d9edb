//! Value histogram with adaptively scaled bucket edges.
//!
//! Binning is half-open on the low side and the top bucket is never
//! populated: a value `v` lands in bucket `k` iff `edge[k] <= v < edge[k+1]`
//! with `k <= N-2`. Values at or above the top edge, or below `edge[0]`,
//! are not counted anywhere. The display pipeline this crate was built
//! against bins exactly this way, so the policy is kept verbatim for
//! output parity.

use ndarray::Array1;
use serde_derive::*;

/// Histogram dataset: bucket edges on the X axis, per-frame counts on Y.
#[derive(Serialize, Clone, Debug)]
pub struct Histogram {
    /// Low edge of each bucket; the last entry is the top edge, which
    /// never receives counts.
    pub x: Array1<f64>,
    /// Per-bucket counts for the current frame.
    pub y: Array1<f64>,

    #[serde(skip)]
    step: f64,
}

impl Histogram {
    pub fn new(resolution: usize) -> Self {
        Histogram {
            x: Array1::zeros(resolution),
            y: Array1::zeros(resolution),
            step: 0.0,
        }
    }

    pub fn resolution(&self) -> usize {
        self.x.len()
    }

    /// Recompute the edges for the given display range and zero the counts.
    ///
    /// `edge[i] = lo + i * (hi - lo) / N`.
    pub fn rebuild(&mut self, lo: f64, hi: f64) {
        let step = (hi - lo) / self.x.len() as f64;
        for (i, edge) in self.x.iter_mut().enumerate() {
            *edge = lo + step * i as f64;
        }
        self.y.fill(0.0);
        self.step = step;
    }

    /// Bucket index for `v`, or `None` when `v` falls outside
    /// `[edge[0], edge[N-1])` or the edges are degenerate (empty or
    /// inverted range, under which no half-open interval can match).
    ///
    /// Computed as a direct index with a neighbor check against the actual
    /// edges, so boundary behavior is identical to scanning the half-open
    /// intervals in order.
    #[inline]
    pub fn bucket_of(&self, v: f64) -> Option<usize> {
        let n = self.x.len();
        if n < 2 || !(self.step > 0.0) {
            return None;
        }
        let raw = (v - self.x[0]) / self.step;
        if !raw.is_finite() {
            return None;
        }
        let guess = raw.floor() as isize;
        for k in guess.saturating_sub(1)..=guess.saturating_add(1) {
            if k < 0 || k as usize + 1 >= n {
                continue;
            }
            let k = k as usize;
            if self.x[k] <= v && v < self.x[k + 1] {
                return Some(k);
            }
        }
        // Accumulated rounding in the edges can in principle push the
        // direct guess more than one bucket off; the interval scan is the
        // authoritative answer.
        if self.x[0] <= v && v < self.x[n - 1] {
            return self.scan(v);
        }
        None
    }

    fn scan(&self, v: f64) -> Option<usize> {
        let n = self.x.len();
        (0..n - 1).find(|&k| self.x[k] <= v && v < self.x[k + 1])
    }

    /// Count one value into bucket `k`.
    #[inline]
    pub fn record(&mut self, k: usize) {
        self.y[k] += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_step() -> Histogram {
        // edges 0, 1, .., 127; exact in f64
        let mut h = Histogram::new(128);
        h.rebuild(0.0, 128.0);
        h
    }

    #[test]
    fn edges_follow_the_range() {
        let mut h = Histogram::new(4);
        h.rebuild(0.0, 1.0);
        assert_eq!(h.x.as_slice().unwrap(), &[0.0, 0.25, 0.5, 0.75]);
        assert_eq!(h.y.sum(), 0.0);
    }

    #[test]
    fn low_edge_is_inclusive() {
        let h = unit_step();
        assert_eq!(h.bucket_of(0.0), Some(0));
        assert_eq!(h.bucket_of(5.0), Some(5));
        assert_eq!(h.bucket_of(5.999), Some(5));
    }

    #[test]
    fn top_bucket_is_never_populated() {
        let h = unit_step();
        assert_eq!(h.bucket_of(126.999), Some(126));
        assert_eq!(h.bucket_of(127.0), None);
        assert_eq!(h.bucket_of(127.5), None);
        assert_eq!(h.bucket_of(1e9), None);
    }

    #[test]
    fn no_underflow_bucket() {
        let h = unit_step();
        assert_eq!(h.bucket_of(-1e-9), None);
        assert_eq!(h.bucket_of(-1e9), None);
        assert_eq!(h.bucket_of(f64::NAN), None);
    }

    #[test]
    fn degenerate_ranges_bin_nothing() {
        let mut h = Histogram::new(128);
        h.rebuild(5.0, 5.0);
        assert_eq!(h.bucket_of(5.0), None);
        h.rebuild(10.0, 0.0);
        assert_eq!(h.bucket_of(5.0), None);
        // never rebuilt at all
        let fresh = Histogram::new(128);
        assert_eq!(fresh.bucket_of(0.0), None);
    }

    #[test]
    fn rebuild_resets_counts() {
        let mut h = unit_step();
        h.record(3);
        h.record(3);
        assert_eq!(h.y[3], 2.0);
        h.rebuild(0.0, 64.0);
        assert_eq!(h.y.sum(), 0.0);
        assert_eq!(h.x[1], 0.5);
    }

    #[test]
    fn matches_interval_scan_on_awkward_ranges() {
        let mut h = Histogram::new(128);
        h.rebuild(-9.73, 41.02);
        for i in 0..2000 {
            let v = -12.0 + i as f64 * 0.03;
            assert_eq!(h.bucket_of(v), h.scan(v), "value {}", v);
        }
    }
}
