//! Compositor: repaint dirty windows and copy the visible parts of their
//! canvases to the display.

use alloc::vec::Vec;

use embassy_time::Instant;
use embedded_graphics::prelude::Point;
use log::{error, trace};

use super::{WindowManager, WmState};
use crate::display::Display;
use crate::geometry::Rect;
use crate::theme::Theme;
use crate::window::{Style, WindowHandle};

impl<D, T> WindowManager<D, T>
where
    D: Display,
    T: Theme,
{
    /// Run one frame: update the screensaver, drain every message queue,
    /// repaint dirty windows and copy their unobscured dirty regions to the
    /// display.
    ///
    /// Returns `Ok(true)` if pixels reached the display. Frames that changed
    /// nothing do not count toward the render rate limit.
    pub fn render(&mut self, now: Instant) -> Result<bool, D::Error> {
        if let Some(last) = self.last_render
            && now.saturating_duration_since(last) < self.config.min_render_interval()
        {
            trace!("Render rate limited");
            return Ok(false);
        }
        self.now = now;

        self.update_screensaver(now);

        for handle in self.root.handles() {
            self.drain_queues(handle);
        }

        let mut updated = false;
        if self.state.contains(WmState::SCREENSAVER_ACTIVE) {
            if !self.state.contains(WmState::SCREENSAVER_DRAWN) {
                self.theme.draw_screensaver(&mut self.display)?;
                self.state.insert(WmState::SCREENSAVER_DRAWN);
                updated = true;
            }
        } else {
            updated |= self.paint_desktop()?;
            for handle in self.root.handles() {
                updated |= self.composite(handle)?;
            }
        }

        if updated {
            self.display.flush()?;
            self.last_render = Some(now);
        }
        Ok(updated)
    }

    /// Fill the accumulated desktop region. The region is a bounding box of
    /// every invalidation this frame, so windows inside it are marked dirty
    /// again to be copied back over the fill.
    fn paint_desktop(&mut self) -> Result<bool, D::Error> {
        let Some(rect) = self.desktop_dirty.take() else {
            return Ok(false);
        };

        let covered = self.root.iter().any(|entry| {
            self.is_drawable(entry.handle)
                && self
                    .arena
                    .get(entry.handle)
                    .is_some_and(|window| window.style.contains(Style::FULLSCREEN))
        });
        if covered {
            return Ok(false);
        }

        self.set_dirty_rect(rect);
        self.theme.draw_desktop_background(&mut self.display, rect)?;
        Ok(true)
    }

    /// Repaint and copy one top-level window.
    fn composite(&mut self, handle: WindowHandle) -> Result<bool, D::Error> {
        if !self.is_drawable(handle) {
            return Ok(false);
        }

        self.refresh_timed_widgets(handle);
        self.redraw(handle, false);

        let Some(dirty) = self.arena.get(handle).and_then(|window| window.dirty_rect) else {
            return Ok(false);
        };

        let fragments = self.visible_fragments(handle, dirty);
        if fragments.is_empty() {
            trace!("Window {:?} fully obscured", handle);
            self.clear_dirty_region(handle);
            return Ok(false);
        }

        let mut updated = false;
        for fragment in fragments {
            let Some(local) = self.display_to_window_rect(handle, fragment) else {
                error!("Dirty region {} lies outside its window", fragment);
                break;
            };
            let Some(canvas) = self
                .arena
                .get(handle)
                .and_then(|window| window.canvas.as_ref())
            else {
                error!("Top-level window without a canvas");
                break;
            };
            canvas.blit_to(local, &mut self.display, fragment.top_left())?;
            updated = true;
        }

        self.clear_dirty_region(handle);
        Ok(updated)
    }

    /// Parts of `dirty` not covered by any drawable top-level window above
    /// `handle`.
    fn visible_fragments(&self, handle: WindowHandle, dirty: Rect) -> Vec<Rect> {
        let mut fragments = Vec::new();
        fragments.push(dirty);

        let above = self
            .root
            .iter()
            .skip_while(|entry| entry.handle != handle)
            .skip(1);
        for entry in above {
            if !self.is_drawable(entry.handle) {
                continue;
            }
            let Some(cover) = self.arena.get(entry.handle).map(|window| window.rect) else {
                continue;
            };
            fragments = fragments
                .iter()
                .flat_map(|fragment| fragment.subtract(&cover))
                .collect();
            if fragments.is_empty() {
                break;
            }
        }
        fragments
    }

    // ------------------------------------------------------------------------
    // Invalidation
    // ------------------------------------------------------------------------

    /// Mark `rect` (display coordinates) dirty on every drawable top-level
    /// window it touches.
    pub fn set_dirty_rect(&mut self, rect: Rect) {
        for handle in self.root.handles() {
            if !self.is_drawable(handle) {
                continue;
            }
            if let Some(window) = self.arena.get_mut(handle)
                && window.rect.intersects(&rect)
            {
                window.accumulate_dirty(rect);
            }
        }
    }

    /// Repaint `rect` from scratch: the desktop and every window over it.
    pub fn invalidate_region(&mut self, rect: Rect) {
        let rect = rect.intersection(&self.display_rect);
        if rect.is_empty() {
            return;
        }
        self.desktop_dirty = Some(match self.desktop_dirty {
            Some(dirty) => dirty.union(&rect),
            None => rect,
        });
        self.set_dirty_rect(rect);
    }

    // ------------------------------------------------------------------------
    // Coordinate conversion
    // ------------------------------------------------------------------------

    /// Display point to window-local point; `None` outside the window.
    pub fn display_to_window(&self, handle: WindowHandle, point: Point) -> Option<Point> {
        let rect = self.arena.get(handle)?.rect;
        rect.contains_point(point).then(|| point - rect.top_left())
    }

    /// Window-local point to display point; `None` outside the window.
    pub fn window_to_display(&self, handle: WindowHandle, point: Point) -> Option<Point> {
        let rect = self.arena.get(handle)?.rect;
        let local = Rect::from_origin_size(Point::zero(), rect.width(), rect.height());
        local.contains_point(point).then(|| point + rect.top_left())
    }

    pub fn display_to_window_rect(&self, handle: WindowHandle, rect: Rect) -> Option<Rect> {
        let window = self.arena.get(handle)?.rect;
        rect.is_within(&window)
            .then(|| rect.translate(-window.left, -window.top))
    }

    pub fn window_to_display_rect(&self, handle: WindowHandle, rect: Rect) -> Option<Rect> {
        let window = self.arena.get(handle)?.rect;
        let local = Rect::from_origin_size(Point::zero(), window.width(), window.height());
        rect.is_within(&local)
            .then(|| rect.translate(window.left, window.top))
    }
}
