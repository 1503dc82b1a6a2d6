//! Two-of-two join of the accelerometer and magnetometer streams
//!
//! Each stream caches its latest reading and raises a fresh flag. When both
//! flags are up the pair is released once and both flags drop. There is no
//! staleness check: an old reading on one side pairs with a new one on the
//! other.

/// Cached accelerometer/magnetometer readings with their fresh flags
#[derive(Debug, Clone, Default)]
pub struct RawJoin {
    accel: [f64; 3],
    accel_fresh: bool,
    magnet: [f64; 3],
    magnet_fresh: bool,
}

/// A released pair, ready for conversion to a rotation matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPair {
    pub gravity: [f64; 3],
    pub geomagnetic: [f64; 3],
}

impl RawJoin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accelerometer reading; returns the pair if this completes one
    pub fn push_accelerometer(&mut self, values: [f64; 3]) -> Option<RawPair> {
        self.accel = values;
        self.accel_fresh = true;
        self.take_if_ready()
    }

    /// Record a magnetometer reading; returns the pair if this completes one
    pub fn push_magnetometer(&mut self, values: [f64; 3]) -> Option<RawPair> {
        self.magnet = values;
        self.magnet_fresh = true;
        self.take_if_ready()
    }

    pub fn is_accelerometer_fresh(&self) -> bool {
        self.accel_fresh
    }

    pub fn is_magnetometer_fresh(&self) -> bool {
        self.magnet_fresh
    }

    /// Drop both fresh flags, keeping the cached readings
    pub fn reset(&mut self) {
        self.accel_fresh = false;
        self.magnet_fresh = false;
    }

    fn take_if_ready(&mut self) -> Option<RawPair> {
        if self.accel_fresh && self.magnet_fresh {
            self.reset();
            Some(RawPair {
                gravity: self.accel,
                geomagnetic: self.magnet,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accel_then_mag_releases_once() {
        let mut join = RawJoin::new();
        assert!(join.push_accelerometer([0.0, 0.0, 9.8]).is_none());
        let pair = join.push_magnetometer([0.0, 20.0, -40.0]).unwrap();
        assert_eq!(pair.gravity, [0.0, 0.0, 9.8]);
        assert_eq!(pair.geomagnetic, [0.0, 20.0, -40.0]);

        // Third accel alone: magnetometer flag was cleared
        assert!(join.push_accelerometer([0.0, 0.1, 9.8]).is_none());
        assert!(join.is_accelerometer_fresh());
        assert!(!join.is_magnetometer_fresh());
    }

    #[test]
    fn test_repeated_stream_overwrites_cache() {
        let mut join = RawJoin::new();
        assert!(join.push_magnetometer([1.0, 0.0, 0.0]).is_none());
        assert!(join.push_magnetometer([2.0, 0.0, 0.0]).is_none());
        let pair = join.push_accelerometer([0.0, 0.0, 9.8]).unwrap();
        assert_eq!(pair.geomagnetic, [2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_stale_value_pairs_with_fresh_one() {
        let mut join = RawJoin::new();
        join.push_accelerometer([0.0, 0.0, 1.0]);
        join.push_magnetometer([0.0, 1.0, 0.0]).unwrap();

        // Only the magnetometer refreshes; accel cache is reused once accel
        // is marked fresh again
        assert!(join.push_magnetometer([0.0, 2.0, 0.0]).is_none());
        let pair = join.push_accelerometer([0.0, 0.0, 1.0]).unwrap();
        assert_eq!(pair.geomagnetic, [0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_reset_drops_flags() {
        let mut join = RawJoin::new();
        join.push_accelerometer([0.0, 0.0, 1.0]);
        join.reset();
        assert!(join.push_magnetometer([0.0, 1.0, 0.0]).is_none());
    }
}
