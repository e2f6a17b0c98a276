// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-copy sequences of the angular repeater: rotation angle, periodic
//! Z shift and block exclusion.
//!
//! All functions here assume a validated configuration; range checks happen
//! in [`crate::angular::AngularRepeaterConfig::validate`].

use std::f64::consts::TAU;

/// Maximum length of the Z-shift sequence.
pub const MODULO_MAX: usize = 8;

/// Number of exclusion slots.
pub const EXCLUDE_SLOTS: usize = 4;

/// Exclusion slot value meaning "nothing excluded".
pub const NO_EXCLUSION: u32 = 1000;

const FULL_TURN_TOLERANCE: f64 = 1e-9;

/// How the angular span is divided between copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AngularPitch {
    /// Ring pitch for a full turn, inclusive pitch for any other span.
    #[default]
    Auto,
    /// `span / n`: the copy after the last one would land on copy 0.
    Ring,
    /// `span / (n - 1)`: first and last copies sit on the span ends.
    Inclusive,
}

/// Returns true when `span` is one full turn in either direction.
pub fn is_full_turn(span: f64) -> bool {
    (span.abs() - TAU).abs() < FULL_TURN_TOLERANCE
}

/// Angle between consecutive copies.
pub fn angular_pitch(policy: AngularPitch, repeat_count: usize, span: f64) -> f64 {
    if repeat_count <= 1 {
        return 0.0;
    }
    let n = repeat_count as f64;
    match policy {
        AngularPitch::Ring => span / n,
        AngularPitch::Inclusive => span / (n - 1.0),
        AngularPitch::Auto if is_full_turn(span) => span / n,
        AngularPitch::Auto => span / (n - 1.0),
    }
}

/// Rotation angle of copy `index`.
pub fn copy_angle(index: usize, first_angle: f64, pitch: f64) -> f64 {
    first_angle + index as f64 * pitch
}

/// Z shift of copy `index`: entry `(index % period) + 1` of the 1-based table.
pub fn z_shift(index: usize, period: usize, table: &[f64; MODULO_MAX]) -> f64 {
    table[index % period]
}

/// Returns true when the 1-based `block_id` matches a non-sentinel slot.
pub fn is_excluded(block_id: u32, slots: &[u32; EXCLUDE_SLOTS]) -> bool {
    block_id != NO_EXCLUSION && slots.contains(&block_id)
}
