//! CPU-side pixmaps for icons, picons and progress bar fills.
//!
//! A [`Pixmap`] is a cheaply clonable handle around decoded RGBA pixels.
//! Scaling produces a new pixmap; the original is never modified, so one
//! decoded picon can back many differently sized rows.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::error::{RenderError, RenderResult};
use crate::types::{Color, Size};

/// Decoded RGBA image data shared between clones.
#[derive(Clone)]
pub struct Pixmap {
    inner: Arc<RgbaImage>,
}

impl Pixmap {
    /// Load and decode an image file.
    pub fn from_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| RenderError::PixmapLoad {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::trace!(
            target: "servicelist::picon",
            path = %path.display(),
            width = img.width(),
            height = img.height(),
            "decoded pixmap"
        );
        Self::from_dynamic(img)
    }

    /// Create a pixmap from raw RGBA pixel data in row-major order.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        let actual = data.len();
        let rgba = RgbaImage::from_raw(width, height, data)
            .ok_or(RenderError::InvalidPixelData { expected, actual })?;
        Ok(Self {
            inner: Arc::new(rgba),
        })
    }

    /// Create a pixmap filled with a single color.
    pub fn solid(width: u32, height: u32, color: Color) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let px = image::Rgba([to_u8(color.r), to_u8(color.g), to_u8(color.b), to_u8(color.a)]);
        Ok(Self {
            inner: Arc::new(RgbaImage::from_pixel(width, height, px)),
        })
    }

    fn from_dynamic(img: DynamicImage) -> RenderResult<Self> {
        let rgba = img.into_rgba8();
        if rgba.width() == 0 || rgba.height() == 0 {
            return Err(RenderError::InvalidDimensions {
                width: rgba.width(),
                height: rgba.height(),
            });
        }
        Ok(Self {
            inner: Arc::new(rgba),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Pixel size as a [`Size`].
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    /// Raw RGBA pixels.
    #[inline]
    pub fn pixels(&self) -> &RgbaImage {
        &self.inner
    }

    /// Whether two handles share the same pixel buffer.
    #[inline]
    pub fn ptr_eq(&self, other: &Pixmap) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Scale down to fit within `bounds`, preserving the aspect ratio.
    ///
    /// Pixmaps that already fit are returned as-is (sharing pixels); this
    /// never scales up.
    pub fn scaled_to_fit(&self, bounds: Size) -> Pixmap {
        let max_w = bounds.width.max(1.0).floor() as u32;
        let max_h = bounds.height.max(1.0).floor() as u32;
        if self.width() <= max_w && self.height() <= max_h {
            return self.clone();
        }
        let scale = (max_w as f32 / self.width() as f32).min(max_h as f32 / self.height() as f32);
        let w = ((self.width() as f32 * scale).round() as u32).max(1);
        let h = ((self.height() as f32 * scale).round() as u32).max(1);
        Pixmap {
            inner: Arc::new(image::imageops::resize(
                self.inner.as_ref(),
                w,
                h,
                FilterType::Triangle,
            )),
        }
    }

    /// Center-crop to a `width / height` aspect ratio.
    ///
    /// A non-positive ratio returns the pixmap unchanged.
    pub fn cropped_to_ratio(&self, ratio: f32) -> Pixmap {
        if ratio <= 0.0 {
            return self.clone();
        }
        let (w, h) = (self.width(), self.height());
        let current = w as f32 / h as f32;
        let (cw, ch) = if current > ratio {
            (((h as f32 * ratio).round() as u32).clamp(1, w), h)
        } else {
            (w, ((w as f32 / ratio).round() as u32).clamp(1, h))
        };
        if cw == w && ch == h {
            return self.clone();
        }
        let x = (w - cw) / 2;
        let y = (h - ch) / 2;
        Pixmap {
            inner: Arc::new(image::imageops::crop_imm(self.inner.as_ref(), x, y, cw, ch).to_image()),
        }
    }
}

impl fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
