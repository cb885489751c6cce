//! Heap pixel buffer with change tracking.
//!
//! A [`Canvas`] is the backing drawing context of a top-level window: the
//! window and all of its descendants paint into it, and the compositor copies
//! regions of it to the physical display. [`BufferedDisplay`] also uses one
//! as a full-screen shadow buffer so that only changed pixels reach the
//! panel.
//!
//! [`BufferedDisplay`]: crate::display::BufferedDisplay

use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, trace};

use crate::error::{WmError, WmResult};
use crate::geometry::{Extent, Rect};

/// Bounding box of pixels that changed since the last flush.
#[derive(Debug, Clone, Copy)]
struct DirtyBounds {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyBounds {
    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn to_rect(self) -> Rect {
        Rect::new(
            self.min_x as i32,
            self.min_y as i32,
            self.max_x as i32 + 1,
            self.max_y as i32 + 1,
        )
    }
}

/// Heap-allocated `Rgb565` pixel buffer implementing `DrawTarget`.
pub struct Canvas {
    width: Extent,
    height: Extent,
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyBounds>,
}

impl core::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    /// Allocate a `width` x `height` canvas filled with `fill`.
    ///
    /// Fails with [`WmError::OutOfMemory`] instead of aborting when the
    /// allocator cannot satisfy the request.
    pub fn try_new(width: Extent, height: Extent, fill: Rgb565) -> WmResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(WmError::OutOfMemory { bytes: usize::MAX })?;
        let bytes = len.saturating_mul(core::mem::size_of::<Rgb565>());

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| WmError::OutOfMemory { bytes })?;
        pixels.resize(len, fill);

        trace!("Allocated {}x{} canvas ({} bytes)", width, height, bytes);

        Ok(Self {
            width,
            height,
            pixels,
            dirty: None,
        })
    }

    pub fn width(&self) -> Extent {
        self.width
    }

    pub fn height(&self) -> Extent {
        self.height
    }

    /// The canvas area in its own coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Colour at `point`, or `None` outside the canvas.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        if !self.bounds().contains_point(point) {
            return None;
        }
        let idx = point.y as usize * self.width as usize + point.x as usize;
        self.pixels.get(idx).copied()
    }

    /// Write a single pixel, expanding the dirty bounds only if the colour
    /// changed.
    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * self.width as usize + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(bounds) => bounds.expand(x, y),
                None => self.dirty = Some(DirtyBounds::from_point(x, y)),
            }
        }
    }

    #[inline]
    fn in_bounds(&self, point: Point) -> Option<(usize, usize)> {
        if point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
        {
            Some((point.x as usize, point.y as usize))
        } else {
            None
        }
    }

    /// Bounding box of the pixels changed since the last call, if any.
    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take().map(DirtyBounds::to_rect)
    }

    /// Copy `src` (canvas coordinates) to `target` with its top-left corner
    /// at `dest`. The part of `src` outside the canvas is skipped.
    pub fn blit_to<D>(&self, src: Rect, target: &mut D, dest: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let clipped = src.intersection(&self.bounds());
        if clipped.is_empty() {
            return Ok(());
        }

        let dest = dest + (clipped.top_left() - src.top_left());
        let area = Rectangle::new(dest, clipped.size());

        let pixels = &self.pixels;
        let stride = self.width as usize;
        let width = clipped.width() as usize;
        let left = clipped.left as usize;
        let pixel_iter = (clipped.top as usize..clipped.bottom as usize).flat_map(move |y| {
            let row_start = y * stride + left;
            pixels[row_start..row_start + width].iter().copied()
        });

        target.fill_contiguous(&area, pixel_iter)
    }

    /// Push the changed region to `target`, then reset the change tracking.
    ///
    /// Only the bounding rectangle of changed pixels is sent. If nothing
    /// changed, this is a no-op.
    pub fn flush_to<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(bounds) = self.dirty.take() else {
            return Ok(());
        };
        let rect = bounds.to_rect();

        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            rect.width(),
            rect.height(),
            rect.left,
            rect.top
        );

        self.blit_to(rect, target, rect.top_left())
    }

    /// Draw an `embedded-graphics` item that cannot fail on a canvas.
    pub fn paint<T>(&mut self, item: &T)
    where
        T: Drawable<Color = Rgb565>,
    {
        match item.draw(self) {
            Ok(_) => {}
            Err(never) => match never {},
        }
    }
}

/// Discharge the error of a canvas drawing call.
pub(crate) fn infallible(result: Result<(), Infallible>) {
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some((x, y)) = self.in_bounds(coord) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        for (point, color) in area.points().zip(colors) {
            if let Some((x, y)) = self.in_bounds(point) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = Rect::from(*area).intersection(&self.bounds());
        if clipped.is_empty() {
            return Ok(());
        }

        for y in clipped.top as usize..clipped.bottom as usize {
            for x in clipped.left as usize..clipped.right as usize {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let (w, h) = (self.width as usize, self.height as usize);
        for y in 0..h {
            for x in 0..w {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}
