// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placements and the ordered sinks they are written into.

use std::fmt;

use nalgebra::{Isometry3, Point3, Rotation3, Translation3, UnitQuaternion};

/// Opaque handle to the object a repeater copies.
///
/// Repeaters only record it and print it; they never look inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectHandle(String);

impl ObjectHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position and orientation of one copy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub position: Point3<f64>,
    pub orientation: Rotation3<f64>,
    /// 0-based copy index assigned by the repeater, before exclusion.
    pub source_index: usize,
}

impl Placement {
    pub fn new(orientation: Rotation3<f64>, position: Point3<f64>, source_index: usize) -> Self {
        Self {
            position,
            orientation,
            source_index,
        }
    }

    /// 1-based block number, the convention used for exclusion.
    pub fn block_id(&self) -> usize {
        self.source_index + 1
    }

    /// The placement as a rigid-body transform.
    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::from(self.position.coords),
            UnitQuaternion::from_rotation_matrix(&self.orientation),
        )
    }
}

/// Ordered, append-only destination for generated placements.
pub trait PlacementSink {
    fn append(&mut self, placement: Placement);
}

impl PlacementSink for Vec<Placement> {
    fn append(&mut self, placement: Placement) {
        self.push(placement);
    }
}

/// FIFO of placements passed between the stages of a repeater chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementQueue {
    items: Vec<Placement>,
}

impl PlacementQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Placement] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Placement> {
        self.items
    }
}

impl PlacementSink for PlacementQueue {
    fn append(&mut self, placement: Placement) {
        self.items.push(placement);
    }
}

impl<'a> IntoIterator for &'a PlacementQueue {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for PlacementQueue {
    type Item = Placement;
    type IntoIter = std::vec::IntoIter<Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
