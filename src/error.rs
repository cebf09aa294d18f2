//! Construction and configuration errors.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ChainMapError {
    #[error("initial capacity must be at least 1")]
    ZeroCapacity,
    #[error("{name} threshold must be a finite number in (0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("shrink threshold {shrink} must be below grow threshold {grow}")]
    ThresholdOrder { grow: f64, shrink: f64 },
}
