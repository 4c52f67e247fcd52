// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier intersection by fat-line clipping, and stitching of the
//! clipped pieces back into closed paths.
//!
//! These are the building blocks of path boolean operations: find where two
//! paths cross, cut both paths at those points, and walk the pieces into
//! loops. Which loops make up a union, intersection or difference is left to
//! the caller.
//!
//! # Examples
//!
//! Intersecting two curves:
//! ```
//! use bezclip::{find_intersections, CubicBez, DEFAULT_TOLERANCE};
//!
//! let arch = CubicBez::new((0.0, 0.0), (0.5, 1.0), (0.5, 1.0), (1.0, 0.0));
//! let bowl = CubicBez::new((0.0, 1.0), (0.5, 0.0), (0.5, 0.0), (1.0, 1.0));
//! let hits = find_intersections(&arch, &bowl, DEFAULT_TOLERANCE).unwrap();
//! assert_eq!(hits.len(), 2);
//! for (t1, t2) in hits {
//!     assert!(arch.eval(t1).distance(bowl.eval(t2)) < 1e-6);
//! }
//! ```
//!
//! Cutting two overlapping circles and stitching the arcs:
//! ```
//! use std::sync::Arc;
//!
//! use bezclip::{clip_paths, Clipper, CubicPath, StitchOptions};
//!
//! let a = Arc::new(CubicPath::circle((0.0, 0.0), 1.0));
//! let b = Arc::new(CubicPath::circle((1.0, 0.0), 1.0));
//! let stitched = clip_paths(&a, &b, &Clipper::default(), &StitchOptions::default()).unwrap();
//! let loops = stitched.into_loops().unwrap();
//! assert_eq!(loops.len(), 2);
//! ```
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade: clip rounds at trace level,
//! bisections and stitch results at debug level, and unresolved regions or
//! open chains at warn level. No logger is installed.
//!
//! # Features
//!
//! The `serde` feature derives `Serialize` and `Deserialize` for the geometry
//! value types.
//!
//! [`log`]: https://docs.rs/log

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod clip;
mod convex_hull;
mod cubicbez;
mod error;
mod fat_line;
mod intersection;
mod path;
mod pathops;
mod point;
mod rect;
mod segment;
mod stitch;
mod vec2;

pub use crate::clip::*;
pub use crate::convex_hull::*;
pub use crate::cubicbez::*;
pub use crate::error::*;
pub use crate::fat_line::*;
pub use crate::intersection::*;
pub use crate::path::CubicPath;
pub use crate::pathops::*;
pub use crate::point::*;
pub use crate::rect::*;
pub use crate::segment::*;
pub use crate::stitch::*;
pub use crate::vec2::*;
