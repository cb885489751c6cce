//! The stock theme: light gray windows, dark buttons, green progress fill.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Line, PrimitiveStyle, PrimitiveStyleBuilder, RoundedRectangle, StrokeAlignment,
};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use super::colors::*;
use super::text;
use super::{ColorId, DisplaySize, Metric, MetricId, TextFlags, Theme};
use crate::geometry::{Coord, Extent, Rect};

/// Extra pixels between wrapped lines.
const LINE_SPACING: Coord = 2;

/// Theme whose sizes derive from the display extents.
#[derive(Clone, Copy)]
pub struct DefaultTheme {
    width: Extent,
    height: Extent,
    font: &'static MonoFont<'static>,
}

impl Default for DefaultTheme {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            font: &FONT_6X10,
        }
    }
}

impl core::fmt::Debug for DefaultTheme {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DefaultTheme")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl DefaultTheme {
    /// Builder-style font override.
    pub fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    fn percent_of(extent: Extent, factor: f32) -> Extent {
        (extent as f32 * factor) as Extent
    }

    fn fill_round_rect<D>(
        target: &mut D,
        rect: Rect,
        radius: Coord,
        color: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let radius = radius.max(0) as u32;
        RoundedRectangle::with_equal_corners(rect.into(), Size::new(radius, radius))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(target)
    }

    fn fill_rect<D>(target: &mut D, rect: Rect, color: Rgb565) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if rect.is_empty() {
            return Ok(());
        }
        target.fill_solid(&rect.into(), color)
    }

    /// Inner area of a progress bar, inside its frame.
    fn progress_bar_inner(&self, rect: Rect) -> Rect {
        let margin = self.extent(MetricId::WindowFramePx) * 2;
        if rect.width() <= margin * 2 || rect.height() <= margin * 2 {
            return Rect::default();
        }
        rect.deflate(margin)
    }
}

impl Theme for DefaultTheme {
    fn set_display_extents(&mut self, width: Extent, height: Extent) {
        self.width = width;
        self.height = height;
    }

    fn display_size(&self) -> DisplaySize {
        DisplaySize::classify(self.width, self.height)
    }

    fn color(&self, id: ColorId) -> Rgb565 {
        match id {
            ColorId::Screensaver => COLOR_SCREENSAVER,
            ColorId::Desktop => COLOR_DESKTOP,
            ColorId::PromptBg => COLOR_PROMPT_BG,
            ColorId::PromptFrame => COLOR_PROMPT_FRAME,
            ColorId::PromptShadow => COLOR_PROMPT_SHADOW,
            ColorId::WindowText => COLOR_WINDOW_TEXT,
            ColorId::WindowBg => COLOR_WINDOW_BG,
            ColorId::WindowFrame => COLOR_WINDOW_FRAME,
            ColorId::WindowShadow => COLOR_WINDOW_SHADOW,
            ColorId::ButtonText => COLOR_BUTTON_TEXT,
            ColorId::ButtonTextPressed => COLOR_BUTTON_TEXT_PRESSED,
            ColorId::ButtonBg => COLOR_BUTTON_BG,
            ColorId::ButtonBgPressed => COLOR_BUTTON_BG_PRESSED,
            ColorId::ButtonFrame => COLOR_BUTTON_FRAME,
            ColorId::ButtonFramePressed => COLOR_BUTTON_FRAME_PRESSED,
            ColorId::ProgressBg => COLOR_PROGRESS_BG,
            ColorId::ProgressFill => COLOR_PROGRESS_FILL,
            ColorId::CheckBoxCheckBg => COLOR_CHECKBOX_CHECK_BG,
            ColorId::CheckBoxCheckFrame => COLOR_CHECKBOX_CHECK_FRAME,
            ColorId::CheckBoxCheck => COLOR_CHECKBOX_CHECK,
        }
    }

    fn metric(&self, id: MetricId) -> Metric {
        match id {
            MetricId::XPadding => Metric::Extent(Self::percent_of(self.width, 0.05)),
            MetricId::YPadding => Metric::Extent(Self::percent_of(self.height, 0.05)),
            MetricId::DefTextSize => Metric::Uint8(1),
            MetricId::WindowFramePx => Metric::Extent(1),
            MetricId::CornerRadiusWindow => Metric::Coord(0),
            MetricId::CornerRadiusButton => Metric::Coord(self.scaled(4) as Coord),
            MetricId::CornerRadiusPrompt => Metric::Coord(self.scaled(4) as Coord),
            MetricId::CornerRadiusCheckBox => Metric::Coord(self.scaled(0) as Coord),
            MetricId::DefButtonCx => {
                Metric::Extent((self.width as f32 * 0.19).max(60.0) as Extent)
            }
            MetricId::DefButtonCy => {
                let button_width = self.extent(MetricId::DefButtonCx);
                Metric::Extent(Self::percent_of(button_width, 0.52))
            }
            MetricId::ButtonLabelPadding => Metric::Extent(self.scaled(10)),
            MetricId::ButtonTappedDuration => Metric::Millis(200),
            MetricId::MaxPromptCx => Metric::Extent(Self::percent_of(self.width, 0.75)),
            MetricId::MaxPromptCy => Metric::Extent(Self::percent_of(self.height, 0.75)),
            MetricId::DefProgressBarHeight => {
                Metric::Extent(Self::percent_of(self.height, 0.10))
            }
            MetricId::ProgressBarMarqueeCxFactor => Metric::Float(0.33),
            MetricId::ProgressBarMarqueeStep => Metric::Float(match self.display_size() {
                DisplaySize::Small => 1.0,
                DisplaySize::Medium => 2.0,
                DisplaySize::Large => 4.0,
            }),
            MetricId::DefCheckBoxHeight => Metric::Extent(Self::percent_of(self.height, 0.10)),
            MetricId::CheckBoxCheckAreaPadding => Metric::Extent(self.scaled(2)),
            MetricId::CheckBoxCheckMarkPadding => Metric::Extent(self.scaled(2)),
            MetricId::CheckBoxCheckDelay => Metric::Millis(200),
        }
    }

    fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    fn set_font(&mut self, font: &'static MonoFont<'static>) {
        self.font = font;
    }

    fn draw_screensaver<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.clear(self.color(ColorId::Screensaver))
    }

    fn draw_desktop_background<D>(&self, target: &mut D, rect: Rect) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Self::fill_rect(target, rect, self.color(ColorId::Desktop))
    }

    fn draw_window_frame<D>(
        &self,
        target: &mut D,
        rect: Rect,
        radius: Coord,
        color: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let radius = radius.max(0) as u32;
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(color)
            .stroke_width(self.extent(MetricId::WindowFramePx))
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        RoundedRectangle::with_equal_corners(rect.into(), Size::new(radius, radius))
            .into_styled(style)
            .draw(target)
    }

    fn draw_window_shadow<D>(
        &self,
        target: &mut D,
        rect: Rect,
        radius: Coord,
        color: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if rect.is_empty() {
            return Ok(());
        }
        let thickness = self.coord(MetricId::WindowFramePx);
        let style = PrimitiveStyle::with_stroke(color, 1);
        let (last_x, last_y) = (rect.right - 1, rect.bottom - 1);

        Line::new(
            Point::new(rect.left + radius + thickness, last_y),
            Point::new(last_x - radius - thickness, last_y),
        )
        .into_styled(style)
        .draw(target)?;

        Line::new(
            Point::new(last_x, rect.top + radius + thickness),
            Point::new(last_x, last_y - radius - thickness),
        )
        .into_styled(style)
        .draw(target)
    }

    fn draw_window_background<D>(
        &self,
        target: &mut D,
        rect: Rect,
        radius: Coord,
        color: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Self::fill_round_rect(target, rect, radius, color)
    }

    fn draw_text<D>(
        &self,
        target: &mut D,
        content: &str,
        flags: TextFlags,
        rect: Rect,
        color: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let font = self.font;
        let character_style = MonoTextStyle::new(font, color);
        let single = flags.contains(TextFlags::SINGLE);
        let center = flags.contains(TextFlags::CENTER);

        let x_padding = if single && !center {
            0
        } else {
            self.extent(MetricId::XPadding)
        };
        let max_chars = text::chars_that_fit(font, rect.width().saturating_sub(x_padding * 2));
        let (alignment, x) = if center {
            (Alignment::Center, rect.left + (rect.width() / 2) as Coord)
        } else {
            (Alignment::Left, rect.left + x_padding as Coord)
        };

        if single {
            let line = text::fit_line(content, max_chars, flags);
            let text_style = TextStyleBuilder::new()
                .alignment(alignment)
                .baseline(Baseline::Middle)
                .build();
            let y = rect.top + (rect.height() / 2) as Coord;
            Text::with_text_style(line.as_str(), Point::new(x, y), character_style, text_style)
                .draw(target)?;
            return Ok(());
        }

        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Top)
            .build();
        let glyph_height = font.character_size.height as Coord;
        let mut y = rect.top + self.coord(MetricId::YPadding);

        for line in text::wrap(content, max_chars).iter() {
            // Stop once a line would spill past the bottom edge
            if y + glyph_height > rect.bottom {
                break;
            }
            Text::with_text_style(line.as_str(), Point::new(x, y), character_style, text_style)
                .draw(target)?;
            y += glyph_height + LINE_SPACING;
        }

        Ok(())
    }

    fn draw_progress_bar_background<D>(&self, target: &mut D, rect: Rect) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Self::fill_rect(target, rect, self.color(ColorId::ProgressBg))
    }

    fn draw_progress_bar_progress<D>(
        &self,
        target: &mut D,
        rect: Rect,
        percent: f32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        debug_assert!((0.0..=100.0).contains(&percent));
        let bar = self.progress_bar_inner(rect);
        let width = (bar.width() as f32 * (percent.clamp(0.0, 100.0) / 100.0)) as Extent;
        let fill = Rect::from_origin_size(bar.top_left(), width, bar.height());
        Self::fill_rect(target, fill, self.color(ColorId::ProgressFill))
    }

    fn draw_progress_bar_indeterminate<D>(
        &self,
        target: &mut D,
        rect: Rect,
        counter: f32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        debug_assert!((0.0..=100.0).contains(&counter));
        let bar = self.progress_bar_inner(rect);
        let factor = self.metric(MetricId::ProgressBarMarqueeCxFactor).as_float();
        let marquee = (bar.width() as f32 * factor) as Coord;

        // The marquee enters from the left edge and leaves past the right one
        let travel = bar.width() as Coord + marquee;
        let head = bar.left + (travel as f32 * (counter.clamp(0.0, 100.0) / 100.0)) as Coord;
        let segment = Rect::new(head - marquee, bar.top, head, bar.bottom).intersection(&bar);

        Self::fill_rect(target, segment, self.color(ColorId::ProgressFill))
    }

    fn draw_check_box<D>(
        &self,
        target: &mut D,
        label: &str,
        checked: bool,
        rect: Rect,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let radius = self.coord(MetricId::CornerRadiusCheckBox);
        self.draw_window_background(target, rect, radius, self.color(ColorId::WindowBg))?;

        let area_padding = self.extent(MetricId::CheckBoxCheckAreaPadding);
        let mark_padding = self.extent(MetricId::CheckBoxCheckMarkPadding);
        let side = rect.height().saturating_sub(area_padding * 2);
        let top = rect.top + ((rect.height() - side) / 2) as Coord;
        let checkable = Rect::from_origin_size(Point::new(rect.left, top), side, side);

        Self::fill_round_rect(
            target,
            checkable,
            radius,
            self.color(ColorId::CheckBoxCheckBg),
        )?;
        self.draw_window_frame(
            target,
            checkable,
            radius,
            self.color(ColorId::CheckBoxCheckFrame),
        )?;

        if checked && side > mark_padding * 2 {
            Self::fill_round_rect(
                target,
                checkable.deflate(mark_padding),
                radius,
                self.color(ColorId::CheckBoxCheck),
            )?;
        }

        let text_left = (checkable.right + (mark_padding * 2) as Coord).min(rect.right);
        let text_rect = Rect::new(text_left, rect.top, rect.right, rect.bottom);
        self.draw_text(
            target,
            label,
            TextFlags::SINGLE | TextFlags::ELLIPSIS,
            text_rect,
            self.color(ColorId::WindowText),
        )
    }
}
