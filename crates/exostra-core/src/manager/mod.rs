//! The window manager
//!
//! [`WindowManager`] owns every window, the physical display and the theme.
//! It is driven by an external loop that calls [`WindowManager::hit_test`]
//! for each tap and [`WindowManager::render`] once per iteration:
//!
//! 1. `hit_test` finds the front-most drawable window under the tap and
//!    queues an input message on it
//! 2. `render` drains every queue (handlers mark state dirty and repaint
//!    into the top-level window's canvas)
//! 3. `render` then copies only the dirty, unobscured regions of each
//!    canvas to the display and flushes it
//!
//! Windows are addressed by [`WindowHandle`]. The manager is the only owner
//! of window data, so every mutation goes through `&mut self`.

mod dispatch;
mod factory;
mod lifecycle;
mod render;

#[cfg(test)]
mod tests;

use bitflags::bitflags;
use embassy_time::{Duration, Instant};
use embedded_graphics::prelude::Dimensions;
use heapless::Deque;
use log::{debug, error, info, warn};

use crate::canvas::Canvas;
use crate::config::{MAX_NOTIFICATIONS, WmConfig};
use crate::display::Display;
use crate::geometry::Rect;
use crate::theme::{DefaultTheme, Theme};
use crate::window::arena::WindowArena;
use crate::window::{HandleList, Style, Window, WindowContainer, WindowEvent, WindowHandle, WindowId};

pub use factory::WindowSpec;

bitflags! {
    /// Manager-wide state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WmState: u8 {
        const SCREENSAVER_ENABLED = 1 << 0;
        const SCREENSAVER_ACTIVE = 1 << 1;
        const SCREENSAVER_DRAWN = 1 << 2;
    }
}

/// An event no window consumed, handed to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// Window that received the event.
    pub target: WindowHandle,
    pub target_id: WindowId,
    pub event: WindowEvent,
}

pub struct WindowManager<D, T = DefaultTheme> {
    config: WmConfig,
    pub(crate) display: D,
    pub(crate) theme: T,
    display_rect: Rect,
    pub(crate) arena: WindowArena,
    /// Top-level windows in z-order.
    pub(crate) root: WindowContainer,
    state: WmState,
    /// Clock value of the current `hit_test`/`render` call.
    pub(crate) now: Instant,
    screensaver_epoch: Instant,
    screensaver_timeout: Duration,
    last_render: Option<Instant>,
    last_hit_test: Option<Instant>,
    /// Display area no window repaints by itself.
    desktop_dirty: Option<Rect>,
    notifications: Deque<Notification, MAX_NOTIFICATIONS>,
}

impl<D, T> WindowManager<D, T>
where
    D: Display,
    T: Theme,
{
    pub fn new(display: D, mut theme: T, config: WmConfig) -> Self {
        let display_rect = Rect::from(display.bounding_box());
        theme.set_display_extents(display_rect.width(), display_rect.height());

        info!(
            "Window manager ready: {}x{} display",
            display_rect.width(),
            display_rect.height()
        );

        Self {
            config,
            display,
            theme,
            display_rect,
            arena: WindowArena::new(),
            root: WindowContainer::new(),
            state: WmState::empty(),
            now: Instant::from_ticks(0),
            screensaver_epoch: Instant::from_ticks(0),
            screensaver_timeout: Duration::from_ticks(0),
            last_render: None,
            last_hit_test: None,
            desktop_dirty: Some(display_rect),
            notifications: Deque::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: WmConfig) {
        self.config = config;
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn theme(&self) -> &T {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut T {
        &mut self.theme
    }

    pub fn state(&self) -> WmState {
        self.state
    }

    /// Clock value passed to the latest `hit_test` or `render`.
    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn display_rect(&self) -> Rect {
        self.display_rect
    }

    // ------------------------------------------------------------------------
    // Tree queries
    // ------------------------------------------------------------------------

    pub fn window(&self, handle: WindowHandle) -> Option<&Window> {
        self.arena.get(handle)
    }

    /// Number of windows alive in the arena, at any depth.
    pub fn window_count(&self) -> usize {
        self.arena.len()
    }

    /// Top-level windows, back to front.
    pub fn top_level_windows(&self) -> HandleList {
        self.root.handles()
    }

    /// Children of `handle`, back to front.
    pub fn children(&self, handle: WindowHandle) -> HandleList {
        self.arena
            .get(handle)
            .map(|window| window.children.handles())
            .unwrap_or_default()
    }

    pub fn child_count(&self, handle: WindowHandle) -> usize {
        self.arena
            .get(handle)
            .map_or(0, |window| window.children.len())
    }

    /// Look up a window by id among the children of `parent`, or among the
    /// top-level windows when `parent` is `None`.
    pub fn child_by_id(&self, parent: Option<WindowHandle>, id: WindowId) -> Option<WindowHandle> {
        self.container_of(parent)?.get(id).map(|entry| entry.handle)
    }

    /// Z-order of `handle` among its siblings.
    pub fn z_order(&self, handle: WindowHandle) -> Option<u8> {
        let parent = self.arena.get(handle)?.parent;
        self.container_of(parent)?
            .find_handle(handle)
            .map(|entry| entry.z_order)
    }

    pub(crate) fn container_of(&self, parent: Option<WindowHandle>) -> Option<&WindowContainer> {
        match parent {
            Some(parent) => self.arena.get(parent).map(|window| &window.children),
            None => Some(&self.root),
        }
    }

    /// Visible, alive, every ancestor drawable, and at least partly on the
    /// display. Evaluated fresh on every call.
    pub fn is_drawable(&self, handle: WindowHandle) -> bool {
        let Some(window) = self.arena.get(handle) else {
            return false;
        };
        window.is_visible()
            && window.is_alive()
            && !window.rect.is_outside(&self.display_rect)
            && window.parent.is_none_or(|parent| self.is_drawable(parent))
    }

    /// The parentless ancestor whose canvas `handle` paints into.
    pub(crate) fn top_level_ancestor(&self, handle: WindowHandle) -> Option<WindowHandle> {
        let mut current = handle;
        loop {
            match self.arena.get(current)?.parent {
                Some(parent) => current = parent,
                None => return Some(current),
            }
        }
    }

    /// Rect of `handle` relative to its top-level ancestor's canvas.
    pub fn client_rect(&self, handle: WindowHandle) -> Option<Rect> {
        let rect = self.arena.get(handle)?.rect;
        let top = self.top_level_ancestor(handle)?;
        let origin = self.arena.get(top)?.rect.top_left();
        Some(rect.translate(-origin.x, -origin.y))
    }

    /// Run `paint` against the canvas `handle` draws into.
    pub(crate) fn with_canvas(
        &mut self,
        handle: WindowHandle,
        paint: impl FnOnce(&T, &mut Canvas),
    ) -> bool {
        let Some(top) = self.top_level_ancestor(handle) else {
            return false;
        };
        let theme = &self.theme;
        match self.arena.get_mut(top).and_then(|window| window.canvas.as_mut()) {
            Some(canvas) => {
                paint(theme, canvas);
                true
            }
            None => {
                error!("No drawing context for window tree");
                false
            }
        }
    }

    // ------------------------------------------------------------------------
    // Z-order
    // ------------------------------------------------------------------------

    /// Bring a parentless top-level window to the front.
    pub fn set_foreground_window(&mut self, handle: WindowHandle) -> bool {
        let Some(window) = self.arena.get(handle) else {
            return false;
        };
        if window.parent.is_some() || !window.style.contains(Style::TOPLEVEL) {
            error!("{} is not a top-level window", window);
            return false;
        }

        let (id, rect) = (window.id(), window.rect);
        if !self.root.find_handle(handle).is_some_and(|entry| entry.id == id) {
            return false;
        }
        self.root.bring_to_foreground(id);

        // Everything it now covers has to be copied again
        self.mark_rect_dirty(handle, rect);
        debug!("Window {} moved to foreground", id);
        true
    }

    // ------------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------------

    /// Pop the oldest event no window consumed.
    pub fn next_notification(&mut self) -> Option<Notification> {
        self.notifications.pop_front()
    }

    pub(crate) fn post_notification(&mut self, notification: Notification) {
        if self.notifications.is_full() {
            warn!("Notification outbox full, dropping oldest");
            self.notifications.pop_front();
        }
        self.notifications.push_back(notification).ok();
    }

    // ------------------------------------------------------------------------
    // Screensaver
    // ------------------------------------------------------------------------

    /// Blank the display after `timeout` without taps, counted from `now`.
    pub fn enable_screensaver(&mut self, now: Instant, timeout: Duration) {
        self.screensaver_epoch = now;
        self.screensaver_timeout = timeout;
        self.state.insert(WmState::SCREENSAVER_ENABLED);
        debug!("Screensaver enabled ({} ms)", timeout.as_millis());
    }

    pub fn disable_screensaver(&mut self) {
        let was_active = self.state.contains(WmState::SCREENSAVER_ACTIVE);
        self.state.remove(
            WmState::SCREENSAVER_ENABLED
                | WmState::SCREENSAVER_ACTIVE
                | WmState::SCREENSAVER_DRAWN,
        );
        if was_active {
            self.invalidate_region(self.display_rect);
        }
        debug!("Screensaver disabled");
    }

    pub fn is_screensaver_active(&self) -> bool {
        self.state.contains(WmState::SCREENSAVER_ACTIVE)
    }

    /// Activate once idle long enough; deactivate after a tap moved the
    /// epoch.
    fn update_screensaver(&mut self, now: Instant) {
        if !self.state.contains(WmState::SCREENSAVER_ENABLED) {
            return;
        }

        let idle = now.saturating_duration_since(self.screensaver_epoch);
        if idle >= self.screensaver_timeout {
            if !self.state.contains(WmState::SCREENSAVER_ACTIVE) {
                self.state.insert(WmState::SCREENSAVER_ACTIVE);
                debug!("Screensaver activated");
            }
        } else if self.state.contains(WmState::SCREENSAVER_ACTIVE) {
            self.state
                .remove(WmState::SCREENSAVER_ACTIVE | WmState::SCREENSAVER_DRAWN);
            self.invalidate_region(self.display_rect);
            debug!("Screensaver deactivated");
        }
    }

    /// Restart the idle timer. Returns `true` if the screensaver was showing
    /// and the tap must not reach any window.
    fn wake_screensaver(&mut self, now: Instant) -> bool {
        if !self.state.contains(WmState::SCREENSAVER_ENABLED) {
            return false;
        }
        self.screensaver_epoch = now;
        self.state.contains(WmState::SCREENSAVER_ACTIVE)
    }

    // ------------------------------------------------------------------------
    // Tear-down
    // ------------------------------------------------------------------------

    /// Destroy every window.
    pub fn tear_down(&mut self) {
        for handle in self.root.handles() {
            self.destroy(handle);
        }
        self.root.clear();
        info!("Window manager torn down");
    }
}
