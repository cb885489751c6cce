//! The physical display boundary.
//!
//! The window manager draws through any `embedded-graphics` draw target. The
//! only extra capability it needs is [`Display::flush`], called once per
//! render pass that changed pixels.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::canvas::Canvas;
use crate::error::WmResult;

/// A draw target the window manager can composite onto.
pub trait Display: DrawTarget<Color = Rgb565> {
    /// Make everything drawn since the last flush visible. Unbuffered panels
    /// have nothing to do.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Display for Canvas {}

/// Full-screen shadow buffer in front of a panel.
///
/// Drawing lands in RAM; [`Display::flush`] pushes only the bounding box of
/// changed pixels to the panel in a single `fill_contiguous` call.
pub struct BufferedDisplay<P> {
    panel: P,
    buffer: Canvas,
}

impl<P> BufferedDisplay<P>
where
    P: DrawTarget<Color = Rgb565>,
{
    /// Wrap `panel`, allocating a shadow buffer of the same size.
    pub fn try_new(panel: P) -> WmResult<Self> {
        let size = panel.bounding_box().size;
        let buffer = Canvas::try_new(size.width, size.height, Rgb565::BLACK)?;
        Ok(Self { panel, buffer })
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// The shadow buffer contents.
    pub fn buffer(&self) -> &Canvas {
        &self.buffer
    }

    pub fn into_inner(self) -> P {
        self.panel
    }
}

impl<P> OriginDimensions for BufferedDisplay<P> {
    fn size(&self) -> Size {
        self.buffer.size()
    }
}

impl<P> DrawTarget for BufferedDisplay<P>
where
    P: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = P::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        match self.buffer.draw_iter(pixels) {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        match self.buffer.fill_contiguous(area, colors) {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        match self.buffer.fill_solid(area, color) {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }
}

impl<P> Display for BufferedDisplay<P>
where
    P: DrawTarget<Color = Rgb565>,
{
    fn flush(&mut self) -> Result<(), Self::Error> {
        self.buffer.flush_to(&mut self.panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn test_flush_only_pushes_changes() {
        let panel = Canvas::try_new(32, 32, Rgb565::BLACK).unwrap();
        let mut display = BufferedDisplay::try_new(panel).unwrap();
        assert_eq!(display.size(), Size::new(32, 32));

        display
            .fill_solid(&Rectangle::new(Point::new(4, 4), Size::new(2, 3)), Rgb565::RED)
            .unwrap();
        // Nothing reaches the panel before the flush
        assert_eq!(display.panel().pixel(Point::new(4, 4)), Some(Rgb565::BLACK));

        display.flush().unwrap();
        assert_eq!(display.panel().pixel(Point::new(5, 6)), Some(Rgb565::RED));
        assert_eq!(display.panel_mut().take_dirty(), Some(Rect::new(4, 4, 6, 7)));

        // A second flush with no drawing in between is a no-op
        display.flush().unwrap();
        assert_eq!(display.panel_mut().take_dirty(), None);
    }
}
