// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cubic array repeater: copies of an object on a regular 3D grid.
//!
//! Used for crystal matrices inside a detector block and for photomultiplier
//! layers. Copies are ordered with X varying fastest, then Y, then Z.

use std::fmt;

use nalgebra::{Point3, Rotation3, Vector3};

use crate::error::{ensure_finite, Error, Result};
use crate::placement::{ObjectHandle, Placement, PlacementSink};

/// Parameters of a cubic array repeater. Lengths are in millimetres.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CubicArrayRepeaterConfig {
    pub repeat_count_x: usize,
    pub repeat_count_y: usize,
    pub repeat_count_z: usize,
    /// Grid pitch along each axis.
    pub repeat_vector: Vector3<f64>,
    /// Centre the grid on the original position.
    pub auto_center: bool,
}

impl Default for CubicArrayRepeaterConfig {
    fn default() -> Self {
        Self {
            repeat_count_x: 1,
            repeat_count_y: 1,
            repeat_count_z: 1,
            repeat_vector: Vector3::zeros(),
            auto_center: true,
        }
    }
}

impl CubicArrayRepeaterConfig {
    pub fn validate(&self) -> Result<()> {
        check_count("repeat_count_x", self.repeat_count_x)?;
        check_count("repeat_count_y", self.repeat_count_y)?;
        check_count("repeat_count_z", self.repeat_count_z)?;
        check_vector(&self.repeat_vector)?;
        Ok(())
    }

    /// Total number of copies.
    pub fn total_count(&self) -> usize {
        self.repeat_count_x * self.repeat_count_y * self.repeat_count_z
    }
}

fn check_count(field: &'static str, count: usize) -> Result<usize> {
    if count == 0 {
        return Err(Error::InvalidArrayCount { field, count });
    }
    Ok(count)
}

fn check_vector(v: &Vector3<f64>) -> Result<Vector3<f64>> {
    for c in v.iter() {
        ensure_finite("repeat_vector", *c)?;
    }
    Ok(*v)
}

/// Repeats an object on a rectangular grid.
#[derive(Debug, Clone)]
pub struct CubicArrayRepeater {
    name: String,
    object: ObjectHandle,
    config: CubicArrayRepeaterConfig,
}

impl CubicArrayRepeater {
    pub fn new(
        name: impl Into<String>,
        object: ObjectHandle,
        config: CubicArrayRepeaterConfig,
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

    pub fn config(&self) -> &CubicArrayRepeaterConfig {
        &self.config
    }

    pub fn repeat_count_x(&self) -> usize {
        self.config.repeat_count_x
    }

    pub fn repeat_count_y(&self) -> usize {
        self.config.repeat_count_y
    }

    pub fn repeat_count_z(&self) -> usize {
        self.config.repeat_count_z
    }

    pub fn repeat_vector(&self) -> &Vector3<f64> {
        &self.config.repeat_vector
    }

    pub fn auto_center(&self) -> bool {
        self.config.auto_center
    }

    pub fn set_repeat_count_x(&mut self, count: usize) -> Result<()> {
        self.config.repeat_count_x = check_count("repeat_count_x", count)?;
        Ok(())
    }

    pub fn set_repeat_count_y(&mut self, count: usize) -> Result<()> {
        self.config.repeat_count_y = check_count("repeat_count_y", count)?;
        Ok(())
    }

    pub fn set_repeat_count_z(&mut self, count: usize) -> Result<()> {
        self.config.repeat_count_z = check_count("repeat_count_z", count)?;
        Ok(())
    }

    pub fn set_repeat_vector(&mut self, vector: Vector3<f64>) -> Result<()> {
        self.config.repeat_vector = check_vector(&vector)?;
        Ok(())
    }

    pub fn set_auto_center(&mut self, on: bool) {
        self.config.auto_center = on;
    }

    /// Appends one placement per grid cell to `sink`, X fastest.
    /// Orientation is unchanged.
    pub fn push_placements(
        &self,
        rotation: &Rotation3<f64>,
        position: &Point3<f64>,
        _time: f64,
        sink: &mut dyn PlacementSink,
    ) {
        let cfg = &self.config;
        let counts = Vector3::new(
            cfg.repeat_count_x as f64,
            cfg.repeat_count_y as f64,
            cfg.repeat_count_z as f64,
        );
        let first = if cfg.auto_center {
            (counts - Vector3::repeat(1.0)) * -0.5
        } else {
            Vector3::zeros()
        };

        let mut index = 0;
        for k in 0..cfg.repeat_count_z {
            for j in 0..cfg.repeat_count_y {
                for i in 0..cfg.repeat_count_x {
                    let cell = first + Vector3::new(i as f64, j as f64, k as f64);
                    let offset = cell.component_mul(&cfg.repeat_vector);
                    sink.append(Placement::new(*rotation, position + offset, index));
                    index += 1;
                }
            }
        }

        tracing::debug!(
            repeater = %self.name,
            object = %self.object,
            emitted = index,
            "Cubic array placements pushed"
        );
    }

    pub fn describe(&self, indent: usize, out: &mut dyn fmt::Write) -> fmt::Result {
        let cfg = &self.config;
        let pad = "  ".repeat(indent);
        writeln!(out, "{pad}Repeater type:          cubicArray ({})", self.name)?;
        writeln!(out, "{pad}Repeated object:        {}", self.object)?;
        writeln!(
            out,
            "{pad}Nb of copies:           {} x {} x {}",
            cfg.repeat_count_x, cfg.repeat_count_y, cfg.repeat_count_z
        )?;
        let v = &cfg.repeat_vector;
        writeln!(out, "{pad}Repetition vector:      ({}, {}, {}) mm", v.x, v.y, v.z)?;
        writeln!(
            out,
            "{pad}Centering:              {}",
            if cfg.auto_center { "on" } else { "off" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn crystals(x: usize, y: usize, z: usize, auto_center: bool) -> CubicArrayRepeater {
        let config = CubicArrayRepeaterConfig {
            repeat_count_x: x,
            repeat_count_y: y,
            repeat_count_z: z,
            repeat_vector: Vector3::new(1.0, 4.61, 4.85),
            auto_center,
        };
        CubicArrayRepeater::new("crystal", ObjectHandle::new("crystal"), config).unwrap()
    }

    fn push(repeater: &CubicArrayRepeater) -> Vec<Placement> {
        let mut out = Vec::new();
        repeater.push_placements(&Rotation3::identity(), &Point3::origin(), 0.0, &mut out);
        out
    }

    #[test]
    fn x_varies_fastest() {
        let out = push(&crystals(2, 2, 2, false));
        assert_eq!(out.len(), 8);

        let cells: Vec<(f64, f64, f64)> = out
            .iter()
            .map(|p| (p.position.x, p.position.y / 4.61, p.position.z / 4.85))
            .collect();
        let expected = [
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (1.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (1.0, 0.0, 1.0),
            (0.0, 1.0, 1.0),
            (1.0, 1.0, 1.0),
        ];
        for (c, e) in cells.iter().zip(expected) {
            assert_relative_eq!(c.0, e.0, epsilon = 1e-12);
            assert_relative_eq!(c.1, e.1, epsilon = 1e-12);
            assert_relative_eq!(c.2, e.2, epsilon = 1e-12);
        }

        let indices: Vec<usize> = out.iter().map(|p| p.source_index).collect();
        assert_eq!(indices, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn centred_grid_is_symmetric() {
        let out = push(&crystals(1, 8, 8, true));
        assert_eq!(out.len(), 64);

        let centroid = out
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.position.coords)
            / out.len() as f64;
        assert_relative_eq!(centroid, Vector3::zeros(), epsilon = 1e-12);

        assert_relative_eq!(out[0].position.y, -3.5 * 4.61, epsilon = 1e-12);
        assert_relative_eq!(out[63].position.z, 3.5 * 4.85, epsilon = 1e-12);
        assert!(out.iter().all(|p| p.position.x == 0.0));
    }

    #[test]
    fn orientation_is_kept() {
        let rotation = Rotation3::from_euler_angles(0.3, 0.0, 1.2);
        let mut out = Vec::new();
        crystals(2, 1, 3, true).push_placements(&rotation, &Point3::new(5.0, 0.0, 0.0), 0.0, &mut out);
        assert!(out.iter().all(|p| p.orientation == rotation));
    }

    #[test]
    fn zero_count_names_the_axis() {
        let config = CubicArrayRepeaterConfig {
            repeat_count_y: 0,
            ..Default::default()
        };
        let err = CubicArrayRepeater::new("crystal", ObjectHandle::new("crystal"), config).unwrap_err();
        assert_eq!(err.field(), "repeat_count_y");

        let mut repeater = crystals(1, 2, 2, true);
        assert_eq!(
            repeater.set_repeat_count_z(0),
            Err(Error::InvalidArrayCount {
                field: "repeat_count_z",
                count: 0
            })
        );
        assert_eq!(repeater.repeat_count_z(), 2);
    }

    #[test]
    fn describe_lists_grid() {
        let mut text = String::new();
        crystals(1, 2, 2, true).describe(0, &mut text).unwrap();
        assert!(text.contains("cubicArray (crystal)"));
        assert!(text.contains("Nb of copies:           1 x 2 x 2"));
    }
}
