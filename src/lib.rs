//! # amaze
//!
//! A minimal-dependency PNG maze decoder and shortest-path solver.
//!
//! This library decodes non-interlaced PNG images into a typed pixel grid,
//! projects that grid onto a boolean maze, and runs a unified Dijkstra / A*
//! search over it.
//!
//! ## Features
//!
//! - **PNG decoding** across all five color types and bit depths 1-16,
//!   with chunk CRC verification and all five scanline filters
//! - **Parallel scanline reconstruction** with a deterministic fixup pass
//!   for rows whose filter input crosses a worker boundary
//! - **Dijkstra and A\*** over a 4-connected grid with an admissible
//!   Euclidean heuristic
//!
//! ## Example
//!
//! ```no_run
//! use amaze::{decode, maze, path, SearchMode};
//!
//! let bytes = std::fs::read("maze.png").unwrap();
//! let image = decode(&bytes).unwrap();
//! let grid = maze::passable_grid(&image);
//! let (w, h) = (image.width() as usize, image.height() as usize);
//! let route = path::shortest_path(&grid, (0, 1), (w - 1, h - 2), SearchMode::AStar).unwrap();
//! println!("solved in {} steps", route.len() - 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bytes;
pub mod error;
pub mod maze;
pub mod path;
pub mod png;

pub use error::{Error, Result};
pub use path::SearchMode;
pub use png::{decode, ColorType, Image, Pixel};
