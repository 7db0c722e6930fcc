//! Validation utilities for streaming operations

use super::types::{Error, Result};

/// Check a stream protocol precondition
///
/// Violations are logged and reported as [`Error::ContractViolation`]. With
/// the `strict-contracts` feature they halt the program instead of returning.
pub fn contract(condition: bool, operation: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        tracing::error!(operation, reason, "stream contract violated");
        violation_hook(operation, reason);
        return Err(Error::ContractViolation { operation, reason });
    }
    Ok(())
}

/// Check that an advance of `requested` bytes fits the `available` span
pub fn advance(operation: &'static str, requested: usize, available: usize) -> Result<()> {
    if requested > available {
        tracing::error!(operation, requested, available, "advance exceeds span");
        violation_hook(operation, "advance exceeds span");
        return Err(Error::AdvanceOutOfBounds {
            operation,
            requested,
            available,
        });
    }
    Ok(())
}

/// Validate an exact length
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidLength {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a minimum length
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::InvalidLength {
            context,
            expected: min,
            actual,
        });
    }
    Ok(())
}

/// Validate a length is a whole number of blocks
pub fn aligned(context: &'static str, actual: usize, block_size: usize) -> Result<()> {
    if block_size == 0 || actual % block_size != 0 {
        return Err(Error::InvalidLength {
            context,
            expected: actual.next_multiple_of(block_size.max(1)),
            actual,
        });
    }
    Ok(())
}

/// Validate a configuration condition
pub fn config(condition: bool, context: &'static str, reason: impl Into<String>) -> Result<()> {
    if !condition {
        return Err(Error::Config {
            context,
            reason: reason.into(),
        });
    }
    Ok(())
}

#[cfg(feature = "strict-contracts")]
fn violation_hook(operation: &'static str, reason: &'static str) {
    panic!("{operation}: contract violation: {reason}");
}

#[cfg(not(feature = "strict-contracts"))]
fn violation_hook(_operation: &'static str, _reason: &'static str) {}
