// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Linear repeater: copies of an object spaced along a vector.

use std::fmt;

use nalgebra::{Point3, Rotation3, Vector3};

use crate::error::{ensure_finite, Error, Result};
use crate::placement::{ObjectHandle, Placement, PlacementSink};

/// Parameters of a linear repeater. Lengths are in millimetres.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinearRepeaterConfig {
    pub repeat_count: usize,
    /// Step between consecutive copies.
    pub repeat_vector: Vector3<f64>,
    /// Centre the row of copies on the original position.
    pub auto_center: bool,
}

impl Default for LinearRepeaterConfig {
    fn default() -> Self {
        Self {
            repeat_count: 1,
            repeat_vector: Vector3::zeros(),
            auto_center: true,
        }
    }
}

impl LinearRepeaterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.repeat_count == 0 {
            return Err(Error::InvalidRepeatCount(0));
        }
        for c in self.repeat_vector.iter() {
            ensure_finite("repeat_vector", *c)?;
        }
        Ok(())
    }
}

/// Repeats an object along a straight line.
#[derive(Debug, Clone)]
pub struct LinearRepeater {
    name: String,
    object: ObjectHandle,
    config: LinearRepeaterConfig,
}

impl LinearRepeater {
    pub fn new(
        name: impl Into<String>,
        object: ObjectHandle,
        config: LinearRepeaterConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: name.into(),
            object,
            config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> &ObjectHandle {
        &self.object
    }

    pub fn config(&self) -> &LinearRepeaterConfig {
        &self.config
    }

    pub fn repeat_count(&self) -> usize {
        self.config.repeat_count
    }

    pub fn repeat_vector(&self) -> &Vector3<f64> {
        &self.config.repeat_vector
    }

    pub fn auto_center(&self) -> bool {
        self.config.auto_center
    }

    pub fn set_repeat_count(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Err(Error::InvalidRepeatCount(count));
        }
        self.config.repeat_count = count;
        Ok(())
    }

    pub fn set_repeat_vector(&mut self, vector: Vector3<f64>) -> Result<()> {
        for c in vector.iter() {
            ensure_finite("repeat_vector", *c)?;
        }
        self.config.repeat_vector = vector;
        Ok(())
    }

    pub fn set_auto_center(&mut self, on: bool) {
        self.config.auto_center = on;
    }

    /// Appends one placement per copy to `sink`. Orientation is unchanged.
    pub fn push_placements(
        &self,
        rotation: &Rotation3<f64>,
        position: &Point3<f64>,
        _time: f64,
        sink: &mut dyn PlacementSink,
    ) {
        let cfg = &self.config;
        let first = if cfg.auto_center {
            -((cfg.repeat_count - 1) as f64) / 2.0
        } else {
            0.0
        };

        for i in 0..cfg.repeat_count {
            let step = first + i as f64;
            sink.append(Placement::new(
                *rotation,
                position + cfg.repeat_vector * step,
                i,
            ));
        }

        tracing::debug!(
            repeater = %self.name,
            object = %self.object,
            emitted = cfg.repeat_count,
            "Linear placements pushed"
        );
    }

    pub fn describe(&self, indent: usize, out: &mut dyn fmt::Write) -> fmt::Result {
        let cfg = &self.config;
        let pad = "  ".repeat(indent);
        writeln!(out, "{pad}Repeater type:          linear ({})", self.name)?;
        writeln!(out, "{pad}Repeated object:        {}", self.object)?;
        writeln!(out, "{pad}Nb of copies:           {}", cfg.repeat_count)?;
        let v = &cfg.repeat_vector;
        writeln!(out, "{pad}Repetition vector:      ({}, {}, {}) mm", v.x, v.y, v.z)?;
        writeln!(
            out,
            "{pad}Centering:              {}",
            if cfg.auto_center { "on" } else { "off" }
        )
    }
}
