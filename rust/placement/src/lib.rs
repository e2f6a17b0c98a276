// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Scanner-Lite Placement
//!
//! Placement repeaters for ring-shaped detector geometries.
//!
//! A repeater turns one position and orientation of an object into an ordered
//! list of [`Placement`]s, one per copy. The [`AngularRepeater`] arranges
//! copies around an axis, with a periodic shift along the axis and optional
//! block exclusion. The [`LinearRepeater`] spaces copies along a vector and the
//! [`CubicArrayRepeater`] lays them out on a 3D grid.
//! A [`RepeaterChain`] feeds the output of one repeater into the next.
//!
//! Repeaters only compute transforms. Volumes, overlap checks and any text
//! format for the configuration belong to the caller.
//!
//! ```
//! use scanner_lite_placement::{
//!     AngularRepeater, AngularRepeaterConfig, ObjectHandle, Point3, Rotation3,
//! };
//!
//! let config = AngularRepeaterConfig { repeat_count: 4, ..Default::default() };
//! let ring = AngularRepeater::new("ring", ObjectHandle::new("block"), config).unwrap();
//!
//! let mut placements = Vec::new();
//! ring.push_placements(&Rotation3::identity(), &Point3::new(100.0, 0.0, 0.0), 0.0, &mut placements);
//! assert_eq!(placements.len(), 4);
//! ```

pub mod angular;
pub mod axis;
pub mod cubic_array;
pub mod error;
pub mod linear;
pub mod placement;
pub mod repeater;
pub mod sequence;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Rotation3, Vector3};

pub use angular::{AngularRepeater, AngularRepeaterConfig};
pub use axis::AxisFrame;
pub use cubic_array::{CubicArrayRepeater, CubicArrayRepeaterConfig};
pub use error::{Error, Result};
pub use linear::{LinearRepeater, LinearRepeaterConfig};
pub use placement::{ObjectHandle, Placement, PlacementQueue, PlacementSink};
pub use repeater::{PlacementGenerator, Repeater, RepeaterChain};
pub use sequence::{AngularPitch, EXCLUDE_SLOTS, MODULO_MAX, NO_EXCLUSION};
