// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Angular repeater: copies of an object placed around an axis.
//!
//! This is the pattern of the detector blocks in a cylindrical PET scanner.
//! Copy `i` is rotated by `first_angle + i * pitch` about the repetition axis
//! and shifted along it by entry `(i % modulo_period) + 1` of the Z-shift
//! table, so rings with staggered sectors can be described with a short
//! periodic sequence. Up to four copies can be left out by their 1-based
//! block number.
//!
//! With auto-rotation on, copies turn with their angular position (scanner
//! blocks all facing the axis). With it off, copies keep the orientation of
//! the original (the gondolas of a fun-fair wheel).

use std::f64::consts::TAU;
use std::fmt;

use nalgebra::{Point3, Rotation3};

use crate::axis::AxisFrame;
use crate::error::{ensure_finite, Error, Result};
use crate::placement::{ObjectHandle, Placement, PlacementSink};
use crate::sequence::{
    angular_pitch, copy_angle, is_excluded, z_shift, AngularPitch, EXCLUDE_SLOTS, MODULO_MAX,
    NO_EXCLUSION,
};

/// Parameters of an angular repeater.
///
/// Angles are in radians and lengths in millimetres. The default leaves the
/// repeated object unchanged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AngularRepeaterConfig {
    pub repeat_count: usize,
    /// Start point of the repetition axis.
    pub point1: Point3<f64>,
    /// End point of the repetition axis.
    pub point2: Point3<f64>,
    pub auto_rotation: bool,
    pub first_angle: f64,
    pub angular_span: f64,
    pub pitch: AngularPitch,
    /// Length of the Z-shift sequence.
    pub modulo_period: usize,
    /// Z shift of each position in the sequence; slot `j` is `z_shifts[j - 1]`.
    pub z_shifts: [f64; MODULO_MAX],
    /// 1-based block numbers to leave out, [`NO_EXCLUSION`] for an empty slot.
    pub exclude_blocks: [u32; EXCLUDE_SLOTS],
    /// Apply the object's own rotation before the repeater rotation.
    pub combine_with_rotation_first: bool,
}

impl Default for AngularRepeaterConfig {
    fn default() -> Self {
        Self {
            repeat_count: 1,
            point1: Point3::origin(),
            point2: Point3::new(0.0, 0.0, 1.0),
            auto_rotation: true,
            first_angle: 0.0,
            angular_span: TAU,
            pitch: AngularPitch::Auto,
            modulo_period: 1,
            z_shifts: [0.0; MODULO_MAX],
            exclude_blocks: [NO_EXCLUSION; EXCLUDE_SLOTS],
            combine_with_rotation_first: false,
        }
    }
}

impl AngularRepeaterConfig {
    /// Checks every field, reporting the first offending one.
    pub fn validate(&self) -> Result<()> {
        check_repeat_count(self.repeat_count)?;
        check_modulo_period(self.modulo_period)?;
        check_point("point1", &self.point1)?;
        check_point("point2", &self.point2)?;
        ensure_finite("first_angle", self.first_angle)?;
        ensure_finite("angular_span", self.angular_span)?;
        for shift in &self.z_shifts {
            ensure_finite("z_shift", *shift)?;
        }
        Ok(())
    }
}

fn check_repeat_count(count: usize) -> Result<usize> {
    if count == 0 {
        return Err(Error::InvalidRepeatCount(count));
    }
    Ok(count)
}

fn check_modulo_period(period: usize) -> Result<usize> {
    if !(1..=MODULO_MAX).contains(&period) {
        return Err(Error::InvalidModuloPeriod(period));
    }
    Ok(period)
}

fn check_point(field: &'static str, p: &Point3<f64>) -> Result<Point3<f64>> {
    for c in p.iter() {
        ensure_finite(field, *c)?;
    }
    Ok(*p)
}

/// Repeats an object around an axis.
#[derive(Debug, Clone)]
pub struct AngularRepeater {
    name: String,
    object: ObjectHandle,
    config: AngularRepeaterConfig,
}

impl AngularRepeater {
    /// Creates a repeater from a configuration, rejecting invalid ones.
    pub fn new(
        name: impl Into<String>,
        object: ObjectHandle,
        config: AngularRepeaterConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: name.into(),
            object,
            config,
        })
    }

    /// Identity repeater named `"ringmodulo"`.
    pub fn with_defaults(object: ObjectHandle) -> Self {
        Self {
            name: "ringmodulo".to_string(),
            object,
            config: AngularRepeaterConfig::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> &ObjectHandle {
        &self.object
    }

    pub fn config(&self) -> &AngularRepeaterConfig {
        &self.config
    }

    pub fn repeat_count(&self) -> usize {
        self.config.repeat_count
    }

    pub fn point1(&self) -> &Point3<f64> {
        &self.config.point1
    }

    pub fn point2(&self) -> &Point3<f64> {
        &self.config.point2
    }

    pub fn auto_rotation(&self) -> bool {
        self.config.auto_rotation
    }

    pub fn first_angle(&self) -> f64 {
        self.config.first_angle
    }

    pub fn angular_span(&self) -> f64 {
        self.config.angular_span
    }

    pub fn pitch_policy(&self) -> AngularPitch {
        self.config.pitch
    }

    /// `span / n`.
    pub fn ring_pitch(&self) -> f64 {
        self.config.angular_span / self.config.repeat_count as f64
    }

    /// `span / (n - 1)`, undefined for a single copy.
    pub fn inclusive_pitch(&self) -> Option<f64> {
        match self.config.repeat_count {
            1 => None,
            n => Some(self.config.angular_span / (n - 1) as f64),
        }
    }

    /// Pitch actually used for placement under the configured policy.
    pub fn angular_pitch(&self) -> f64 {
        angular_pitch(
            self.config.pitch,
            self.config.repeat_count,
            self.config.angular_span,
        )
    }

    pub fn modulo_period(&self) -> usize {
        self.config.modulo_period
    }

    /// Z shift in table slot `slot` (1 to 8).
    pub fn z_shift(&self, slot: usize) -> Result<f64> {
        let index = z_shift_index(slot)?;
        Ok(self.config.z_shifts[index])
    }

    /// Block number in exclusion slot `slot` (1 to 4).
    pub fn exclude_block(&self, slot: usize) -> Result<u32> {
        let index = exclude_index(slot)?;
        Ok(self.config.exclude_blocks[index])
    }

    pub fn combine_with_rotation_first(&self) -> bool {
        self.config.combine_with_rotation_first
    }

    pub fn set_repeat_count(&mut self, count: usize) -> Result<()> {
        self.config.repeat_count = check_repeat_count(count)?;
        Ok(())
    }

    pub fn set_point1(&mut self, point: Point3<f64>) -> Result<()> {
        self.config.point1 = check_point("point1", &point)?;
        Ok(())
    }

    pub fn set_point2(&mut self, point: Point3<f64>) -> Result<()> {
        self.config.point2 = check_point("point2", &point)?;
        Ok(())
    }

    pub fn set_auto_rotation(&mut self, on: bool) {
        self.config.auto_rotation = on;
    }

    pub fn set_first_angle(&mut self, angle: f64) -> Result<()> {
        self.config.first_angle = ensure_finite("first_angle", angle)?;
        Ok(())
    }

    pub fn set_angular_span(&mut self, span: f64) -> Result<()> {
        self.config.angular_span = ensure_finite("angular_span", span)?;
        Ok(())
    }

    pub fn set_pitch_policy(&mut self, policy: AngularPitch) {
        self.config.pitch = policy;
    }

    pub fn set_modulo_period(&mut self, period: usize) -> Result<()> {
        self.config.modulo_period = check_modulo_period(period)?;
        Ok(())
    }

    pub fn set_z_shift(&mut self, slot: usize, shift: f64) -> Result<()> {
        let index = z_shift_index(slot)?;
        self.config.z_shifts[index] = ensure_finite("z_shift", shift)?;
        Ok(())
    }

    /// Excludes block `block` through slot `slot`; [`NO_EXCLUSION`] clears it.
    pub fn set_exclude_block(&mut self, slot: usize, block: u32) -> Result<()> {
        let index = exclude_index(slot)?;
        self.config.exclude_blocks[index] = block;
        Ok(())
    }

    pub fn set_combine_with_rotation_first(&mut self, on: bool) {
        self.config.combine_with_rotation_first = on;
    }

    /// The repetition axis derived from the two axis points.
    pub fn axis(&self) -> AxisFrame {
        AxisFrame::from_points(&self.config.point1, &self.config.point2)
    }

    /// Appends one placement per non-excluded copy to `sink`, in copy order.
    ///
    /// `time` is ignored: this repeater does not move.
    pub fn push_placements(
        &self,
        rotation: &Rotation3<f64>,
        position: &Point3<f64>,
        _time: f64,
        sink: &mut dyn PlacementSink,
    ) {
        let cfg = &self.config;
        let axis = self.axis();
        let pitch = self.angular_pitch();

        let mut excluded = 0usize;
        for i in 0..cfg.repeat_count {
            let block_id = u32::try_from(i + 1).unwrap_or(u32::MAX);
            if is_excluded(block_id, &cfg.exclude_blocks) {
                excluded += 1;
                continue;
            }

            let angle = copy_angle(i, cfg.first_angle, pitch);
            let shift = z_shift(i, cfg.modulo_period, &cfg.z_shifts);
            let new_position = axis.revolve(position, angle, shift);

            let new_rotation = if !cfg.auto_rotation {
                *rotation
            } else if cfg.combine_with_rotation_first {
                axis.rotation(angle) * rotation
            } else {
                rotation * axis.rotation(angle)
            };

            tracing::trace!(
                repeater = %self.name,
                index = i,
                angle_deg = angle.to_degrees(),
                z_shift = shift,
                "Placed copy"
            );
            sink.append(Placement::new(new_rotation, new_position, i));
        }

        tracing::debug!(
            repeater = %self.name,
            object = %self.object,
            emitted = cfg.repeat_count - excluded,
            excluded,
            "Angular placements pushed"
        );
    }

    /// Writes an indented description of the repeater.
    pub fn describe(&self, indent: usize, out: &mut dyn fmt::Write) -> fmt::Result {
        let cfg = &self.config;
        let pad = "  ".repeat(indent);
        writeln!(out, "{pad}Repeater type:          angular ({})", self.name)?;
        writeln!(out, "{pad}Repeated object:        {}", self.object)?;
        writeln!(out, "{pad}Nb of copies:           {}", cfg.repeat_count)?;
        writeln!(
            out,
            "{pad}Repetition axis:        ({}, {}, {}) -> ({}, {}, {}) mm",
            cfg.point1.x, cfg.point1.y, cfg.point1.z, cfg.point2.x, cfg.point2.y, cfg.point2.z
        )?;
        writeln!(
            out,
            "{pad}Auto-rotation:          {}",
            if cfg.auto_rotation { "on" } else { "off" }
        )?;
        writeln!(out, "{pad}First angle:            {} deg", cfg.first_angle.to_degrees())?;
        writeln!(out, "{pad}Angular span:           {} deg", cfg.angular_span.to_degrees())?;
        writeln!(
            out,
            "{pad}Angular pitch:          {} deg ({:?})",
            self.angular_pitch().to_degrees(),
            cfg.pitch
        )?;
        writeln!(out, "{pad}Modulo period:          {}", cfg.modulo_period)?;
        for (slot, shift) in cfg.z_shifts[..cfg.modulo_period].iter().enumerate() {
            writeln!(out, "{pad}  Z shift {}:            {} mm", slot + 1, shift)?;
        }
        let excluded: Vec<String> = cfg
            .exclude_blocks
            .iter()
            .filter(|b| **b != NO_EXCLUSION)
            .map(u32::to_string)
            .collect();
        if excluded.is_empty() {
            writeln!(out, "{pad}Excluded blocks:        none")?;
        } else {
            writeln!(out, "{pad}Excluded blocks:        {}", excluded.join(", "))?;
        }
        writeln!(
            out,
            "{pad}Rotation order:         {}",
            if cfg.combine_with_rotation_first {
                "object rotation first"
            } else {
                "repeater rotation first"
            }
        )
    }
}

fn z_shift_index(slot: usize) -> Result<usize> {
    if !(1..=MODULO_MAX).contains(&slot) {
        return Err(Error::ZShiftSlotOutOfRange(slot));
    }
    Ok(slot - 1)
}

fn exclude_index(slot: usize) -> Result<usize> {
    if !(1..=EXCLUDE_SLOTS).contains(&slot) {
        return Err(Error::ExcludeSlotOutOfRange(slot));
    }
    Ok(slot - 1)
}
