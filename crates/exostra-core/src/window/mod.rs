//! Window state, styles, messages and the child registry.
//!
//! A [`Window`] is plain data owned by the window manager's arena. All
//! behaviour that needs the rest of the tree (drawing into the top-level
//! canvas, routing to the parent, hiding, destroying) lives on
//! [`WindowManager`](crate::manager::WindowManager), which addresses windows
//! through [`WindowHandle`]s.

pub(crate) mod arena;
pub mod container;
pub mod kind;
pub mod message;
pub mod style;

use core::fmt;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::canvas::Canvas;
use crate::config::MAX_TEXT_LEN;
use crate::error::{WmError, WmResult};
use crate::geometry::{Coord, Rect};

pub use container::{HandleList, WindowContainer, ZEntry};
pub use kind::WindowKind;
pub use message::{InputEvent, Message, MessageQueue, WindowEvent};
pub use style::{State, Style};

/// Identifier of a window, unique among its siblings.
pub type WindowId = u8;

/// Reserved id; never assigned to a window.
pub const WID_INVALID: WindowId = 0;

/// Window text storage.
pub type WindowText = String<MAX_TEXT_LEN>;

/// Stable reference to a window in the manager's arena.
///
/// Handles are cheap to copy. Once the window is destroyed the handle goes
/// stale and every lookup through it returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle {
    pub(crate) key: usize,
    pub(crate) serial: u32,
}

impl WindowHandle {
    pub(crate) const fn new(key: usize, serial: u32) -> Self {
        Self { key, serial }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowColors {
    pub background: Rgb565,
    pub text: Rgb565,
    pub frame: Rgb565,
    pub shadow: Rgb565,
}

pub struct Window {
    pub(crate) serial: u32,
    id: WindowId,
    pub(crate) style: Style,
    pub(crate) state: State,
    pub(crate) rect: Rect,
    pub(crate) dirty_rect: Option<Rect>,
    pub(crate) colors: WindowColors,
    pub(crate) corner_radius: Coord,
    pub(crate) text: WindowText,
    pub(crate) parent: Option<WindowHandle>,
    pub(crate) children: WindowContainer,
    pub(crate) queue: MessageQueue,
    pub(crate) kind: WindowKind,
    /// Backing canvas; only top-level windows own one.
    pub(crate) canvas: Option<Canvas>,
}

impl Window {
    pub(crate) fn new(
        id: WindowId,
        style: Style,
        rect: Rect,
        parent: Option<WindowHandle>,
        kind: WindowKind,
        colors: WindowColors,
    ) -> Self {
        Self {
            serial: 0,
            id,
            style,
            state: State::DIRTY,
            rect,
            dirty_rect: Some(rect),
            colors,
            corner_radius: 0,
            text: WindowText::new(),
            parent,
            children: WindowContainer::new(),
            queue: MessageQueue::new(),
            kind,
            canvas: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Rect in absolute display coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Region awaiting composition, in display coordinates.
    pub fn dirty_rect(&self) -> Option<Rect> {
        self.dirty_rect
    }

    pub fn colors(&self) -> WindowColors {
        self.colors
    }

    pub fn corner_radius(&self) -> Coord {
        self.corner_radius
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn parent(&self) -> Option<WindowHandle> {
        self.parent
    }

    pub fn children(&self) -> &WindowContainer {
        &self.children
    }

    pub fn kind(&self) -> &WindowKind {
        &self.kind
    }

    pub fn is_alive(&self) -> bool {
        self.state.contains(State::ALIVE)
    }

    /// Content changed since the last draw.
    pub fn is_dirty(&self) -> bool {
        self.state.contains(State::DIRTY)
    }

    pub fn is_checked(&self) -> bool {
        self.state.contains(State::CHECKED)
    }

    /// Visible style flag set and a non-empty rect. Ancestors are not
    /// considered; see `WindowManager::is_drawable`.
    pub fn is_visible(&self) -> bool {
        self.style.contains(Style::VISIBLE) && !self.rect.is_empty()
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    pub fn pending_messages(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn set_text(&mut self, text: &str) -> WmResult<()> {
        self.text = WindowText::try_from(text).map_err(|_| WmError::TextTooLong { max: MAX_TEXT_LEN })?;
        Ok(())
    }

    /// Union `rect`, clipped to the window, into the dirty region.
    pub(crate) fn accumulate_dirty(&mut self, rect: Rect) {
        let clipped = rect.intersection(&self.rect);
        if clipped.is_empty() {
            return;
        }
        self.dirty_rect = Some(match self.dirty_rect {
            Some(dirty) => dirty.union(&clipped),
            None => clipped,
        });
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("kind", &self.kind.name())
            .field("style", &self.style)
            .field("state", &self.state)
            .field("rect", &self.rect)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id: {})", self.kind.name(), self.id)
    }
}
