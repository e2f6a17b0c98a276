// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for repeater configuration.
//!
//! Every error is raised while a configuration is built or mutated. Placement
//! generation itself never fails.

/// Result type alias for repeater configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring a repeater.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// `repeat_count` must be at least one.
    #[error("invalid repeat_count {0}: at least one copy is required")]
    InvalidRepeatCount(usize),

    /// Every axis of a cubic array needs at least one copy.
    #[error("invalid {field} {count}: at least one copy is required")]
    InvalidArrayCount { field: &'static str, count: usize },

    /// `modulo_period` must lie in `[1, MODULO_MAX]`.
    #[error("invalid modulo_period {0}: must be between 1 and 8")]
    InvalidModuloPeriod(usize),

    /// Z-shift table slots are numbered 1 to 8.
    #[error("z_shift slot {0} does not exist: slots are numbered 1 to 8")]
    ZShiftSlotOutOfRange(usize),

    /// Exclusion slots are numbered 1 to 4.
    #[error("exclude_block slot {0} does not exist: slots are numbered 1 to 4")]
    ExcludeSlotOutOfRange(usize),

    /// A length, angle or coordinate is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

impl Error {
    /// Name of the configuration field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Error::InvalidRepeatCount(_) => "repeat_count",
            Error::InvalidArrayCount { field, .. } => *field,
            Error::InvalidModuloPeriod(_) => "modulo_period",
            Error::ZShiftSlotOutOfRange(_) => "z_shift",
            Error::ExcludeSlotOutOfRange(_) => "exclude_block",
            Error::NonFinite { field, .. } => *field,
        }
    }
}

/// Rejects NaN and infinite values for `field`.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = Error::InvalidModuloPeriod(9);
        assert_eq!(err.field(), "modulo_period");
        assert!(err.to_string().contains("modulo_period"));

        let err = Error::NonFinite {
            field: "first_angle",
            value: f64::NAN,
        };
        assert_eq!(err.field(), "first_angle");
        assert!(err.to_string().starts_with("first_angle must be finite"));
    }

    #[test]
    fn ensure_finite_passes_through() {
        assert_eq!(ensure_finite("x", 2.5), Ok(2.5));
        assert_eq!(
            ensure_finite("x", f64::INFINITY),
            Err(Error::NonFinite {
                field: "x",
                value: f64::INFINITY
            })
        );
    }
}
