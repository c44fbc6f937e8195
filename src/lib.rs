//! # longqr
//!
//! Turns arbitrarily long text into an ordered series of QR code images.
//!
//! A single QR symbol tops out at a few kilobytes, so `longqr` first splits the text into
//! segments under a character budget, breaking between words where it can, and then encodes each
//! segment as its own symbol. Segments are independent: there is no container format and no
//! linking metadata, the reader reassembles them in order.
//!
//! ## Features
//!
//! - Lossless segmentation: concatenating the segments reproduces the input byte for byte.
//! - Fixed Medium error correction (~15% damage), smallest fitting version from 1 to 40.
//! - Two renderings per symbol: an unscaled image for PNG export and a resized preview.
//! - All-or-nothing generation: a failed run never replaces the codes already generated.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Example
//!
//! ```rust
//! use longqr::{EncodingPolicy, Session};
//!
//! let mut session = Session::new(EncodingPolicy::new(800));
//! let text = "word ".repeat(300);
//! let codes = session.generate(&text).unwrap();
//! assert_eq!(codes.len(), 2);
//! assert_eq!(codes.position_label(), "1/2");
//! ```
//!
//! ## Modules
//!
//! - [`segmenter`]: Splitting text under a character budget.
//! - [`qrcode`]: QR Code Model 2 symbol construction.
//! - [`render`]: Rasterizing symbols to images.
//! - [`encoder`]: The encoding policy and per-segment artifacts.
//! - [`session`]: Result set ownership, navigation, and export.

pub mod encoder;
pub mod error;
pub mod qrcode;
pub mod render;
pub mod segmenter;
pub mod session;

pub use encoder::{encode_segment, EncodingPolicy, QrArtifact, DEFAULT_MAX_CHARS, ECC};
pub use error::{Error, Result};
pub use segmenter::{segment, Segment};
pub use session::{file_name, ExportReport, FsSink, ImageSink, ResultSet, Session, DEFAULT_LABEL};
