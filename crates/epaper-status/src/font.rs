//! Font handles: text measurement, rasterisation and loading.
//!
//! A [`Font`] is either a scalable TrueType outline (the `--font` override
//! or the system DejaVu Sans) or one of the built-in embedded-graphics mono
//! fonts. Loading never fails; anything that goes wrong falls back to the
//! built-in font closest to the requested size.

use std::path::{Path, PathBuf};

use ab_glyph::{Font as _, FontArc, PxScale, ScaleFont as _};
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_7X13, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};
use platform::config::DEFAULT_FONT_PATH;
use platform::Frame;

/// Outline coverage at or above this inks a pixel.
const COVERAGE_THRESHOLD: f32 = 0.5;

/// Text measurement and rendering capability.
pub trait Typeface {
    /// Pixel extent `(width, height)` of `text`.
    fn measure(&self, text: &str) -> Size;

    /// Draw `text` with its extent's top-left corner at `top_left`.
    fn draw(
        &self,
        frame: &mut Frame,
        top_left: Point,
        text: &str,
        color: BinaryColor,
    ) -> Result<(), FontError>;
}

/// Font errors
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Font file could not be read or parsed
    #[error("cannot load font {}: {reason}", path.display())]
    Load {
        /// File that was tried
        path: PathBuf,
        /// Underlying I/O or parse error
        reason: String,
    },
    /// Text could not be rasterised
    #[error("cannot render text: {0}")]
    Render(String),
}

/// A loaded font at a fixed pixel size.
#[derive(Clone)]
pub enum Font {
    /// TrueType outline rasterised to 1bpp
    Outline {
        /// Parsed font data, shared between sizes
        font: FontArc,
        /// Pixel scale
        scale: PxScale,
    },
    /// Built-in bitmap font
    Mono(&'static MonoFont<'static>),
}

impl Font {
    /// Built-in mono font closest to `size` pixels tall.
    pub fn builtin(size: u32) -> Self {
        let font: &'static MonoFont<'static> = match size {
            0..=12 => &FONT_6X10,
            13..=14 => &FONT_7X13,
            15..=19 => &FONT_9X15,
            _ => &FONT_10X20,
        };
        Self::Mono(font)
    }

    /// `true` for the embedded-graphics fallback fonts.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Mono(_))
    }
}

impl core::fmt::Debug for Font {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Outline { scale, .. } => f
                .debug_struct("Outline")
                .field("scale", &scale.y)
                .finish_non_exhaustive(),
            Self::Mono(font) => f
                .debug_tuple("Mono")
                .field(&font.character_size)
                .finish(),
        }
    }
}

impl Typeface for Font {
    fn measure(&self, text: &str) -> Size {
        match self {
            Self::Outline { font, scale } => {
                let scaled = font.as_scaled(*scale);
                let mut width = 0.0_f32;
                let mut previous = None;
                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(prev) = previous {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    previous = Some(id);
                }
                Size::new(ceil_px(width), ceil_px(scaled.ascent() - scaled.descent()))
            }
            Self::Mono(font) => {
                let style = MonoTextStyle::new(*font, BinaryColor::On);
                style
                    .measure_string(text, Point::zero(), Baseline::Top)
                    .bounding_box
                    .size
            }
        }
    }

    fn draw(
        &self,
        frame: &mut Frame,
        top_left: Point,
        text: &str,
        color: BinaryColor,
    ) -> Result<(), FontError> {
        match self {
            Self::Outline { font, scale } => {
                draw_outline(font, *scale, frame, top_left, text, color);
                Ok(())
            }
            Self::Mono(font) => {
                let style = MonoTextStyle::new(*font, color);
                if let Err(never) =
                    Text::with_baseline(text, top_left, style, Baseline::Top).draw(frame)
                {
                    match never {}
                }
                Ok(())
            }
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn draw_outline(
    font: &FontArc,
    scale: PxScale,
    frame: &mut Frame,
    top_left: Point,
    text: &str,
    color: BinaryColor,
) {
    let scaled = font.as_scaled(scale);
    let baseline = top_left.y as f32 + scaled.ascent();
    let mut caret = top_left.x as f32;
    let mut previous = None;
    let mut pixels = Vec::new();

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, ab_glyph::point(caret, baseline));
        caret += scaled.h_advance(id);
        previous = Some(id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue; // whitespace
        };
        let bounds = outlined.px_bounds();
        let origin = Point::new(bounds.min.x as i32, bounds.min.y as i32);
        outlined.draw(|x, y, coverage| {
            if coverage >= COVERAGE_THRESHOLD {
                let offset = Point::new(
                    i32::try_from(x).unwrap_or(i32::MAX),
                    i32::try_from(y).unwrap_or(i32::MAX),
                );
                pixels.push(Pixel(origin + offset, color));
            }
        });
    }

    if let Err(never) = frame.draw_iter(pixels) {
        match never {}
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ceil_px(value: f32) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.ceil() as u32
    } else {
        0
    }
}

/// Loads fonts, falling back to built-ins on any error.
#[derive(Debug, Clone)]
pub struct FontLoader {
    default_path: PathBuf,
}

impl Default for FontLoader {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_PATH)
    }
}

impl FontLoader {
    /// Loader that uses `default_path` when no override is given.
    pub fn new(default_path: impl Into<PathBuf>) -> Self {
        Self {
            default_path: default_path.into(),
        }
    }

    /// Load `path` (or the default font) at `size` pixels.
    ///
    /// Never fails: unreadable or unparsable files yield [`Font::builtin`].
    pub fn load(&self, path: Option<&Path>, size: u32) -> Font {
        let path = path.unwrap_or(self.default_path.as_path());
        match Self::try_load(path, size) {
            Ok(font) => font,
            Err(err) => {
                tracing::debug!(%err, size, "using built-in font");
                Font::builtin(size)
            }
        }
    }

    /// Load a TrueType/OpenType file at `size` pixels.
    #[allow(clippy::cast_precision_loss)]
    pub fn try_load(path: &Path, size: u32) -> Result<Font, FontError> {
        let data = std::fs::read(path).map_err(|err| FontError::Load {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let font = FontArc::try_from_vec(data).map_err(|err| FontError::Load {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Ok(Font::Outline {
            font,
            scale: PxScale::from(size as f32),
        })
    }
}

/// Size of the date font for a given time font size.
pub fn date_size(time_size: u32) -> u32 {
    (time_size / 3).max(14)
}

/// Size of the address font for a given time font size.
pub fn address_size(time_size: u32) -> u32 {
    (time_size / 4).max(12)
}

/// The three font handles the panel composition uses.
///
/// Owned by the update loop for its whole lifetime.
#[derive(Debug)]
pub struct FontSet {
    /// Big time line
    pub time: Box<dyn TypefaceHandle>,
    /// Medium date line
    pub date: Box<dyn TypefaceHandle>,
    /// Small address lines
    pub address: Box<dyn TypefaceHandle>,
}

/// Object-safe [`Typeface`] with a `Debug` bound for logging.
pub trait TypefaceHandle: Typeface + core::fmt::Debug {}

impl<T: Typeface + core::fmt::Debug> TypefaceHandle for T {}

impl FontSet {
    /// Load all three sizes from `path` (or the loader's default).
    pub fn load(loader: &FontLoader, path: Option<&Path>, time_size: u32) -> Self {
        Self {
            time: Box::new(loader.load(path, time_size)),
            date: Box::new(loader.load(path, date_size(time_size))),
            address: Box::new(loader.load(path, address_size(time_size))),
        }
    }

    /// Built-in fonts only, sized as if `time_size` were requested.
    pub fn builtin(time_size: u32) -> Self {
        Self {
            time: Box::new(Font::builtin(time_size)),
            date: Box::new(Font::builtin(date_size(time_size))),
            address: Box::new(Font::builtin(address_size(time_size))),
        }
    }
}
