//! Destruction, visibility, dirty tracking and property setters.

use embedded_graphics::pixelcolor::Rgb565;
use log::{debug, warn};

use super::WindowManager;
use crate::canvas::Canvas;
use crate::display::Display;
use crate::error::{WmError, WmResult};
use crate::geometry::{Coord, Rect};
use crate::theme::Theme;
use crate::window::{Message, State, Style, WindowColors, WindowHandle};

impl<D, T> WindowManager<D, T>
where
    D: Display,
    T: Theme,
{
    // ------------------------------------------------------------------------
    // Destruction
    // ------------------------------------------------------------------------

    /// Hide the window, deliver `Destroy`, destroy its children, detach it
    /// from its container and free it. Returns `false` if the handle is
    /// stale or any window in the subtree refused the destroy message.
    pub fn destroy(&mut self, handle: WindowHandle) -> bool {
        let Some(window) = self.arena.get(handle) else {
            warn!("Destroy requested for a stale handle");
            return false;
        };
        let (id, parent) = (window.id(), window.parent);
        debug!("Destroying {}", window);

        self.hide(handle);
        let mut destroyed = self.route_message(handle, Message::Destroy);
        for child in self.children(handle) {
            destroyed &= self.destroy(child);
        }

        let container = match parent {
            Some(parent) => self.arena.get_mut(parent).map(|window| &mut window.children),
            None => Some(&mut self.root),
        };
        if let Some(container) = container
            && container.get(id).is_some_and(|entry| entry.handle == handle)
        {
            container.remove(id);
        }

        self.arena.remove(handle);
        destroyed
    }

    /// Release a window whose creation failed, together with any children
    /// it had already attached.
    pub(crate) fn discard(&mut self, handle: WindowHandle) {
        for child in self.children(handle) {
            self.destroy(child);
        }
        self.arena.remove(handle);
    }

    // ------------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------------

    /// Make the window visible. Top-level windows also move to the front.
    pub fn show(&mut self, handle: WindowHandle) -> bool {
        let Some(window) = self.arena.get(handle) else {
            return false;
        };
        let top_level = window.parent.is_none() && window.style.contains(Style::TOPLEVEL);
        if window.style.contains(Style::VISIBLE) && !top_level {
            return false;
        }

        if let Some(window) = self.arena.get_mut(handle) {
            window.style.insert(Style::VISIBLE);
        }
        if top_level {
            self.set_foreground_window(handle);
        }
        self.set_dirty(handle, true, true)
    }

    /// Clear the visible flag. The area the window covered is repainted by
    /// whatever lies beneath it.
    pub fn hide(&mut self, handle: WindowHandle) -> bool {
        let Some(window) = self.arena.get_mut(handle) else {
            return false;
        };
        if !window.style.contains(Style::VISIBLE) {
            return false;
        }
        window.style.remove(Style::VISIBLE);

        let (rect, parent) = (window.rect, window.parent);
        match parent {
            Some(parent) => {
                self.set_dirty(parent, true, true);
            }
            None => self.invalidate_region(rect),
        }
        true
    }

    // ------------------------------------------------------------------------
    // Dirty tracking and redraw
    // ------------------------------------------------------------------------

    /// Set or clear the dirty flag. Setting it repaints the window right away
    /// when `redraw` is `true`.
    pub fn set_dirty(&mut self, handle: WindowHandle, dirty: bool, redraw: bool) -> bool {
        let Some(window) = self.arena.get_mut(handle) else {
            return false;
        };
        if !dirty {
            window.state.remove(State::DIRTY);
            return true;
        }
        window.state.insert(State::DIRTY);
        if redraw {
            return self.redraw(handle, false);
        }
        true
    }

    /// Repaint the window if it is dirty (or `force` is set), then its dirty
    /// children. Returns whether anything was painted.
    pub fn redraw(&mut self, handle: WindowHandle, force: bool) -> bool {
        if !self.is_drawable(handle) {
            return false;
        }

        let dirty = self.arena.get(handle).is_some_and(|window| window.is_dirty());
        let redrawn = (dirty || force) && self.route_message(handle, Message::Draw { force });
        if redrawn {
            // The parent painted over them
            for child in self.children(handle) {
                self.set_dirty(child, true, false);
            }
        }

        let children_redrawn = self.redraw_children(handle, force);
        redrawn || children_redrawn
    }

    /// Repaint dirty children of `handle`, looking through clean children for
    /// dirty descendants.
    pub fn redraw_children(&mut self, handle: WindowHandle, force: bool) -> bool {
        let mut redrawn = false;
        for child in self.children(handle) {
            let dirty = self.arena.get(child).is_some_and(|window| window.is_dirty());
            redrawn |= if dirty || force {
                self.redraw(child, force)
            } else {
                self.is_drawable(child) && self.redraw_children(child, force)
            };
        }
        redrawn
    }

    /// Union `rect` into the window's dirty region. An empty rect clears the
    /// region of the window and its whole subtree instead.
    pub fn mark_rect_dirty(&mut self, handle: WindowHandle, rect: Rect) {
        if rect.is_empty() {
            self.clear_dirty_region(handle);
        } else if let Some(window) = self.arena.get_mut(handle) {
            window.accumulate_dirty(rect);
        }
    }

    pub(crate) fn clear_dirty_region(&mut self, handle: WindowHandle) {
        if let Some(window) = self.arena.get_mut(handle) {
            window.dirty_rect = None;
        }
        for child in self.children(handle) {
            self.clear_dirty_region(child);
        }
    }

    // ------------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------------

    /// Move or resize a window. A resized top-level window gets a new canvas.
    pub fn set_rect(&mut self, handle: WindowHandle, rect: Rect) -> WmResult<()> {
        let window = self.arena.get(handle).ok_or(WmError::StaleHandle)?;
        if window.rect == rect {
            return Ok(());
        }
        let (old, parent, background) = (window.rect, window.parent, window.colors.background);

        let canvas = match parent {
            None if old.size() != rect.size() => {
                Some(Canvas::try_new(rect.width(), rect.height(), background)?)
            }
            _ => None,
        };

        let window = self.arena.get_mut(handle).ok_or(WmError::StaleHandle)?;
        window.rect = rect;
        window.dirty_rect = Some(rect);
        if canvas.is_some() {
            window.canvas = canvas;
        }

        match parent {
            Some(parent) => {
                window.state.insert(State::DIRTY);
                self.set_dirty(parent, true, true);
            }
            None => {
                self.invalidate_region(old);
                self.set_dirty(handle, true, true);
            }
        }
        Ok(())
    }

    /// Change the rect without repainting anything. Used by widgets laying
    /// out themselves or their children.
    pub(crate) fn place(&mut self, handle: WindowHandle, rect: Rect) {
        if let Some(window) = self.arena.get_mut(handle) {
            window.rect = rect;
            window.dirty_rect = Some(rect);
        }
    }

    /// Replace the style. Visibility changes go through [`Self::show`] and
    /// [`Self::hide`].
    pub fn set_style(&mut self, handle: WindowHandle, style: Style) -> bool {
        let Some(window) = self.arena.get_mut(handle) else {
            return false;
        };
        if window.style == style {
            return true;
        }

        let was_visible = window.style.contains(Style::VISIBLE);
        let mut kept = style;
        kept.set(Style::VISIBLE, was_visible);
        window.style = kept;

        match (was_visible, style.contains(Style::VISIBLE)) {
            (true, false) => self.hide(handle),
            (false, true) => self.show(handle),
            _ => self.set_dirty(handle, true, true),
        }
    }

    pub fn set_text(&mut self, handle: WindowHandle, text: &str) -> WmResult<()> {
        let window = self.arena.get_mut(handle).ok_or(WmError::StaleHandle)?;
        if window.text() == text {
            return Ok(());
        }
        window.set_text(text)?;
        self.set_dirty(handle, true, true);
        Ok(())
    }

    pub fn set_colors(&mut self, handle: WindowHandle, colors: WindowColors) -> bool {
        self.update_colors(handle, |current| *current = colors)
    }

    pub fn set_background_color(&mut self, handle: WindowHandle, color: Rgb565) -> bool {
        self.update_colors(handle, |colors| colors.background = color)
    }

    pub fn set_text_color(&mut self, handle: WindowHandle, color: Rgb565) -> bool {
        self.update_colors(handle, |colors| colors.text = color)
    }

    pub fn set_frame_color(&mut self, handle: WindowHandle, color: Rgb565) -> bool {
        self.update_colors(handle, |colors| colors.frame = color)
    }

    pub fn set_shadow_color(&mut self, handle: WindowHandle, color: Rgb565) -> bool {
        self.update_colors(handle, |colors| colors.shadow = color)
    }

    fn update_colors(&mut self, handle: WindowHandle, update: impl FnOnce(&mut WindowColors)) -> bool {
        let Some(window) = self.arena.get_mut(handle) else {
            return false;
        };
        let before = window.colors;
        update(&mut window.colors);
        if window.colors != before {
            self.set_dirty(handle, true, true);
        }
        true
    }

    pub fn set_corner_radius(&mut self, handle: WindowHandle, radius: Coord) -> bool {
        let Some(window) = self.arena.get_mut(handle) else {
            return false;
        };
        if window.corner_radius != radius {
            window.corner_radius = radius;
            self.set_dirty(handle, true, true);
        }
        true
    }
}
