//! Theme system
//!
//! A [`Theme`] decides every colour, size and pixel the window manager
//! produces. Widgets never draw primitives themselves; they ask the theme to
//! paint frames, backgrounds, text, progress bars and check boxes into the
//! top-level window's canvas. Swapping the theme restyles the whole UI
//! without touching widget code.
//!
//! # Example
//!
//! ```ignore
//! let mut theme = DefaultTheme::default();
//! theme.set_display_extents(320, 240);
//! let padding = theme.extent(MetricId::XPadding); // 16
//! ```

pub mod colors;
mod default;
pub mod text;

use bitflags::bitflags;
use embassy_time::Duration;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;

use crate::geometry::{Coord, Extent, Rect};

pub use default::DefaultTheme;

bitflags! {
    /// Text layout flags for [`Theme::draw_text`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextFlags: u8 {
        /// Centre each line horizontally.
        const CENTER = 1 << 0;
        /// One line, vertically centred.
        const SINGLE = 1 << 1;
        /// Cut text at the rect edge.
        const CLIP = 1 << 2;
        /// Replace cut text with "...".
        const ELLIPSIS = 1 << 3;
    }
}

/// Display size class used to scale metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySize {
    /// Both extents up to 320 px
    Small,
    /// Both extents up to 480 px
    Medium,
    Large,
}

impl DisplaySize {
    pub fn classify(width: Extent, height: Extent) -> Self {
        if width <= 320 && height <= 320 {
            DisplaySize::Small
        } else if width <= 480 && height <= 480 {
            DisplaySize::Medium
        } else {
            DisplaySize::Large
        }
    }

    /// Multiplier applied by [`Theme::scaled`].
    pub fn scale(self) -> Extent {
        match self {
            DisplaySize::Small => 1,
            DisplaySize::Medium => 2,
            DisplaySize::Large => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorId {
    Screensaver,
    Desktop,

    PromptBg,
    PromptFrame,
    PromptShadow,

    WindowText,
    WindowBg,
    WindowFrame,
    WindowShadow,

    ButtonText,
    ButtonTextPressed,
    ButtonBg,
    ButtonBgPressed,
    ButtonFrame,
    ButtonFramePressed,

    ProgressBg,
    ProgressFill,

    CheckBoxCheckBg,
    CheckBoxCheckFrame,
    CheckBoxCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricId {
    XPadding,
    YPadding,
    DefTextSize,
    WindowFramePx,
    CornerRadiusWindow,
    CornerRadiusButton,
    CornerRadiusPrompt,
    CornerRadiusCheckBox,
    DefButtonCx,
    DefButtonCy,
    ButtonLabelPadding,
    ButtonTappedDuration,
    MaxPromptCx,
    MaxPromptCy,
    DefProgressBarHeight,
    ProgressBarMarqueeCxFactor,
    ProgressBarMarqueeStep,
    DefCheckBoxHeight,
    CheckBoxCheckAreaPadding,
    CheckBoxCheckMarkPadding,
    CheckBoxCheckDelay,
}

/// Typed metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Extent(Extent),
    Coord(Coord),
    Uint8(u8),
    Millis(u32),
    Float(f32),
}

impl Metric {
    pub fn as_extent(self) -> Extent {
        match self {
            Metric::Extent(value) => value,
            Metric::Uint8(value) => Extent::from(value),
            other => {
                debug_assert!(false, "{:?} is not an extent", other);
                0
            }
        }
    }

    pub fn as_coord(self) -> Coord {
        match self {
            Metric::Coord(value) => value,
            Metric::Extent(value) => value as Coord,
            other => {
                debug_assert!(false, "{:?} is not a coordinate", other);
                0
            }
        }
    }

    pub fn as_duration(self) -> Duration {
        match self {
            Metric::Millis(ms) => Duration::from_millis(u64::from(ms)),
            other => {
                debug_assert!(false, "{:?} is not a duration", other);
                Duration::from_ticks(0)
            }
        }
    }

    pub fn as_float(self) -> f32 {
        match self {
            Metric::Float(value) => value,
            other => {
                debug_assert!(false, "{:?} is not a float", other);
                0.0
            }
        }
    }
}

/// Look and feel of every window.
///
/// Drawing methods are generic over the draw target so a theme can paint
/// into window canvases and straight onto the display alike.
pub trait Theme {
    /// Called once by the window manager with the physical display size.
    fn set_display_extents(&mut self, width: Extent, height: Extent);

    fn display_size(&self) -> DisplaySize;

    /// Scale a size given for a small display to the current size class.
    fn scaled(&self, value: Extent) -> Extent {
        value * self.display_size().scale()
    }

    fn color(&self, id: ColorId) -> Rgb565;

    fn metric(&self, id: MetricId) -> Metric;

    fn font(&self) -> &'static MonoFont<'static>;

    fn set_font(&mut self, font: &'static MonoFont<'static>);

    fn extent(&self, id: MetricId) -> Extent {
        self.metric(id).as_extent()
    }

    fn coord(&self, id: MetricId) -> Coord {
        self.metric(id).as_coord()
    }

    fn duration(&self, id: MetricId) -> Duration {
        self.metric(id).as_duration()
    }

    /// Rendered width of `text` in the theme font.
    fn text_width(&self, text: &str) -> Extent {
        text::text_width(self.font(), text)
    }

    fn draw_screensaver<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    /// Paint the area behind all windows.
    fn draw_desktop_background<D>(&self, target: &mut D, rect: Rect) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    fn draw_window_frame<D>(
        &self,
        target: &mut D,
        rect: Rect,
        radius: Coord,
        color: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    fn draw_window_shadow<D>(
        &self,
        target: &mut D,
        rect: Rect,
        radius: Coord,
        color: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    fn draw_window_background<D>(
        &self,
        target: &mut D,
        rect: Rect,
        radius: Coord,
        color: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    fn draw_text<D>(
        &self,
        target: &mut D,
        text: &str,
        flags: TextFlags,
        rect: Rect,
        color: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    fn draw_progress_bar_background<D>(&self, target: &mut D, rect: Rect) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    /// Fill `percent` (0..=100) of the bar.
    fn draw_progress_bar_progress<D>(
        &self,
        target: &mut D,
        rect: Rect,
        percent: f32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    /// Draw the marquee at position `counter` (0..=100).
    fn draw_progress_bar_indeterminate<D>(
        &self,
        target: &mut D,
        rect: Rect,
        counter: f32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    fn draw_check_box<D>(
        &self,
        target: &mut D,
        label: &str,
        checked: bool,
        rect: Rect,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;
}
