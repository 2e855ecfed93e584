//! Finds the largest shapes of a given colour in an image and reports
//! their geometric properties.
//!
//! ```rust,no_run
//! use shapespotter::{DetectorConfig, TargetColor, pipeline};
//!
//! let config = DetectorConfig::default();
//! let detection = pipeline::process_image(
//!     std::path::Path::new("photo.jpg"),
//!     TargetColor::Red,
//!     &config,
//! )?;
//! for object in &detection.report.objects {
//!     println!("{}: area {:.1}", object.shape, object.area);
//! }
//! # Ok::<(), shapespotter::DetectError>(())
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod shape;

pub use color::TargetColor;
pub use config::DetectorConfig;
pub use error::DetectError;
pub use pipeline::Detection;
pub use report::{DetectedObject, Report};
pub use shape::Shape;
