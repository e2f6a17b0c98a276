// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Repeater variants and the chain that applies them in sequence.

use std::fmt;

use nalgebra::{Point3, Rotation3};

use crate::angular::AngularRepeater;
use crate::cubic_array::CubicArrayRepeater;
use crate::linear::LinearRepeater;
use crate::placement::{ObjectHandle, Placement, PlacementQueue, PlacementSink};

/// Common capability of every placement generator.
pub trait PlacementGenerator {
    /// Name the generator was created with.
    fn name(&self) -> &str;

    /// Object whose copies are placed.
    fn object(&self) -> &ObjectHandle;

    /// Appends the placements derived from one input transform to `sink`.
    fn push_placements(
        &self,
        rotation: &Rotation3<f64>,
        position: &Point3<f64>,
        time: f64,
        sink: &mut dyn PlacementSink,
    );

    /// Writes a human-readable dump of the configuration.
    fn describe(&self, indent: usize, out: &mut dyn fmt::Write) -> fmt::Result;
}

/// Closed set of repeater strategies.
#[derive(Debug, Clone)]
pub enum Repeater {
    Angular(AngularRepeater),
    Linear(LinearRepeater),
    CubicArray(CubicArrayRepeater),
}

impl PlacementGenerator for Repeater {
    fn name(&self) -> &str {
        match self {
            Repeater::Angular(r) => r.name(),
            Repeater::Linear(r) => r.name(),
            Repeater::CubicArray(r) => r.name(),
        }
    }

    fn object(&self) -> &ObjectHandle {
        match self {
            Repeater::Angular(r) => r.object(),
            Repeater::Linear(r) => r.object(),
            Repeater::CubicArray(r) => r.object(),
        }
    }

    fn push_placements(
        &self,
        rotation: &Rotation3<f64>,
        position: &Point3<f64>,
        time: f64,
        sink: &mut dyn PlacementSink,
    ) {
        match self {
            Repeater::Angular(r) => r.push_placements(rotation, position, time, sink),
            Repeater::Linear(r) => r.push_placements(rotation, position, time, sink),
            Repeater::CubicArray(r) => r.push_placements(rotation, position, time, sink),
        }
    }

    fn describe(&self, indent: usize, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            Repeater::Angular(r) => r.describe(indent, out),
            Repeater::Linear(r) => r.describe(indent, out),
            Repeater::CubicArray(r) => r.describe(indent, out),
        }
    }
}

impl From<AngularRepeater> for Repeater {
    fn from(r: AngularRepeater) -> Self {
        Repeater::Angular(r)
    }
}

impl From<LinearRepeater> for Repeater {
    fn from(r: LinearRepeater) -> Self {
        Repeater::Linear(r)
    }
}

impl From<CubicArrayRepeater> for Repeater {
    fn from(r: CubicArrayRepeater) -> Self {
        Repeater::CubicArray(r)
    }
}

/// Ordered list of repeaters applied to one object.
///
/// Every placement produced by a stage is fed through the next stage, so a
/// linear row followed by an angular repeater yields a ring of rows.
#[derive(Debug, Clone, Default)]
pub struct RepeaterChain {
    stages: Vec<Repeater>,
}

impl RepeaterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage at the end of the chain.
    pub fn push(&mut self, repeater: impl Into<Repeater>) {
        self.stages.push(repeater.into());
    }

    pub fn stages(&self) -> &[Repeater] {
        &self.stages
    }

    pub fn stages_mut(&mut self) -> &mut [Repeater] {
        &mut self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs the input transform through every stage in order.
    pub fn compute(
        &self,
        rotation: &Rotation3<f64>,
        position: &Point3<f64>,
        time: f64,
    ) -> PlacementQueue {
        let mut queue = PlacementQueue::new();
        queue.append(Placement::new(*rotation, *position, 0));

        for stage in &self.stages {
            let mut next = PlacementQueue::new();
            for p in &queue {
                stage.push_placements(&p.orientation, &p.position, time, &mut next);
            }
            queue = next;
        }

        tracing::debug!(
            stages = self.stages.len(),
            placements = queue.len(),
            "Repeater chain computed"
        );
        queue
    }

    pub fn describe(&self, indent: usize, out: &mut dyn fmt::Write) -> fmt::Result {
        let pad = "  ".repeat(indent);
        writeln!(out, "{pad}Repeater chain:         {} stage(s)", self.stages.len())?;
        for stage in &self.stages {
            stage.describe(indent + 1, out)?;
        }
        Ok(())
    }
}
