//! Per-segment symbol encoding under a fixed policy.

use crate::error::{Error, Result};
use crate::qrcode::{QrCode, QrCodeEcc, Version};
use crate::render;
use crate::segmenter::Segment;

use image::{GrayImage, ImageError};
use tracing::{debug, warn};

/// Error correction tier for every symbol, recovering roughly 15% damage.
pub const ECC: QrCodeEcc = QrCodeEcc::Medium;

/// Characters per segment. Even when every character takes four UTF-8 bytes the payload stays
/// under the version 40 capacity at [`ECC`].
pub const DEFAULT_MAX_CHARS: usize = 500;

/// Pixels per module in exported images.
pub const DEFAULT_MODULE_SCALE: u32 = 10;

/// Quiet zone width, in modules.
pub const DEFAULT_BORDER: u32 = 4;

/// Side length, in pixels, of the on-screen preview.
pub const DEFAULT_PREVIEW_SIDE: u32 = 350;

/// Largest side, in pixels, of any image a policy may produce.
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Knobs for turning text into images.
///
/// The error correction tier is not among them; it is always [`ECC`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingPolicy {
    max_chars: usize,
    module_scale: u32,
    border: u32,
    preview_side: u32,
}

impl Default for EncodingPolicy {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            module_scale: DEFAULT_MODULE_SCALE,
            border: DEFAULT_BORDER,
            preview_side: DEFAULT_PREVIEW_SIDE,
        }
    }
}

impl EncodingPolicy {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars, ..Self::default() }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn with_module_scale(mut self, module_scale: u32) -> Self {
        self.module_scale = module_scale;
        self
    }

    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn with_preview_side(mut self, preview_side: u32) -> Self {
        self.preview_side = preview_side;
        self
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn module_scale(&self) -> u32 {
        self.module_scale
    }

    pub fn border(&self) -> u32 {
        self.border
    }

    pub fn preview_side(&self) -> u32 {
        self.preview_side
    }

    /// Rejects budgets and sizes that cannot produce an image.
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(Error::InvalidPolicy("max_chars must be at least 1".into()));
        }
        if self.module_scale == 0 {
            return Err(Error::InvalidPolicy("module_scale must be at least 1".into()));
        }
        if self.preview_side == 0 {
            return Err(Error::InvalidPolicy("preview_side must be at least 1".into()));
        }
        if self.preview_side > MAX_IMAGE_SIDE {
            return Err(Error::InvalidPolicy(format!(
                "preview_side must be at most {MAX_IMAGE_SIDE}"
            )));
        }
        // Bound by the largest symbol so no segment can push the image past the limit
        let largest = QrCode::side(Version::MAX);
        match render::image_side(largest, self.module_scale, self.border) {
            Some(side) if side <= MAX_IMAGE_SIDE => Ok(()),
            _ => Err(Error::InvalidPolicy(format!(
                "module_scale {} with border {} exceeds {MAX_IMAGE_SIDE} px",
                self.module_scale, self.border
            ))),
        }
    }
}

/// A generated symbol together with the segment it carries.
///
/// `original` is the lossless rendering used for export; `preview` is a resized copy for display
/// only.
#[derive(Debug, Clone, PartialEq)]
pub struct QrArtifact {
    segment: Segment,
    symbol: QrCode,
    original: GrayImage,
    preview: GrayImage,
}

impl QrArtifact {
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn symbol(&self) -> &QrCode {
        &self.symbol
    }

    pub fn version(&self) -> Version {
        self.symbol.version()
    }

    /// Full-resolution image at the policy's module scale.
    pub fn original(&self) -> &GrayImage {
        &self.original
    }

    /// Resized image for display. Never export this.
    pub fn preview(&self) -> &GrayImage {
        &self.preview
    }

    /// PNG bytes of the unscaled image.
    pub fn png_bytes(&self) -> std::result::Result<Vec<u8>, ImageError> {
        render::encode_png(&self.original)
    }
}

/// Encodes one segment into a symbol and rasterizes it.
///
/// The smallest version that holds the segment's UTF-8 bytes at [`ECC`] is used.
///
/// # Errors
///
/// Returns [`Error::PayloadTooLarge`] when even version 40 cannot hold the segment, and
/// [`Error::InvalidPolicy`] for a policy that fails [`EncodingPolicy::validate`].
pub fn encode_segment(segment: Segment, policy: &EncodingPolicy) -> Result<QrArtifact> {
    policy.validate()?;

    let symbol = QrCode::encode_text(segment.text(), ECC).map_err(|err| {
        warn!(index = segment.index(), bytes = segment.byte_len(), %err, "segment exceeds symbol capacity");
        Error::PayloadTooLarge {
            index: segment.index(),
            total: segment.total(),
            bytes: segment.byte_len(),
            capacity: QrCode::byte_capacity(Version::MAX, ECC),
        }
    })?;

    let original = render::render(&symbol, policy.module_scale(), policy.border());
    let preview = render::preview(&original, policy.preview_side());
    debug!(
        index = segment.index(),
        total = segment.total(),
        chars = segment.char_count(),
        version = symbol.version().value(),
        "encoded segment"
    );

    Ok(QrArtifact { segment, symbol, original, preview })
}
