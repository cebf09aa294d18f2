//! Construction-time configuration: initial capacity and resize thresholds.
//!
//! Growth always doubles and shrinking always halves; only the load-factor
//! thresholds that trigger them are configurable. Both comparisons are
//! strict, so a load factor exactly at a threshold never resizes.

use crate::error::ChainMapError;

/// Capacity used by `ChainHashMap::new`.
pub const DEFAULT_INITIAL_CAPACITY: usize = 8;
/// Load factor above which an insert doubles the bucket array.
pub const DEFAULT_GROW_THRESHOLD: f64 = 0.75;
/// Load factor below which a removal halves the bucket array.
pub const DEFAULT_SHRINK_THRESHOLD: f64 = 0.25;

/// Load-factor thresholds driving rehashes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePolicy {
    grow_threshold: f64,
    shrink_threshold: f64,
}

impl ResizePolicy {
    /// Validate and build a policy. Both thresholds must be finite and in
    /// `(0, 1]`, with `shrink < grow`.
    pub fn new(grow_threshold: f64, shrink_threshold: f64) -> Result<Self, ChainMapError> {
        check_threshold("grow", grow_threshold)?;
        check_threshold("shrink", shrink_threshold)?;
        if shrink_threshold >= grow_threshold {
            return Err(ChainMapError::ThresholdOrder {
                grow: grow_threshold,
                shrink: shrink_threshold,
            });
        }
        Ok(Self {
            grow_threshold,
            shrink_threshold,
        })
    }

    pub fn grow_threshold(&self) -> f64 {
        self.grow_threshold
    }

    pub fn shrink_threshold(&self) -> f64 {
        self.shrink_threshold
    }

    /// Target capacity if an insert left the table too full.
    pub(crate) fn grow_target(&self, len: usize, capacity: usize) -> Option<usize> {
        if load(len, capacity) > self.grow_threshold {
            // Overflow here means the arena already exhausted memory.
            capacity.checked_mul(2)
        } else {
            None
        }
    }

    /// Target capacity if a removal left the table too sparse. Never below
    /// `floor`.
    pub(crate) fn shrink_target(&self, len: usize, capacity: usize, floor: usize) -> Option<usize> {
        if capacity > floor && load(len, capacity) < self.shrink_threshold {
            Some((capacity / 2).max(floor))
        } else {
            None
        }
    }
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            grow_threshold: DEFAULT_GROW_THRESHOLD,
            shrink_threshold: DEFAULT_SHRINK_THRESHOLD,
        }
    }
}

/// Everything needed to construct a `ChainHashMap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    pub initial_capacity: usize,
    pub policy: ResizePolicy,
}

impl MapConfig {
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Self::default()
        }
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_policy(mut self, policy: ResizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// A `ResizePolicy` is only obtainable already validated, so the
    /// capacity is the one thing left to check.
    pub fn validate(&self) -> Result<(), ChainMapError> {
        if self.initial_capacity == 0 {
            return Err(ChainMapError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            policy: ResizePolicy::default(),
        }
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ChainMapError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ChainMapError::InvalidThreshold { name, value })
    }
}

#[inline]
fn load(len: usize, capacity: usize) -> f64 {
    len as f64 / capacity as f64
}
