//! Messages delivered to windows.

use embedded_graphics::prelude::Point;
use heapless::Deque;

use super::WindowId;
use crate::config::QUEUE_CAPACITY;

/// Raw input routed to a window by the hit tester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A touch at a display coordinate.
    Tap(Point),
}

/// Events a window raises for its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The child with this id was tapped.
    ChildTapped(WindowId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Create,
    Destroy,
    /// Repaint; `force` repaints even when the window is clean.
    Draw { force: bool },
    /// Sent after a successful draw so the compositor picks the pixels up.
    PostDraw,
    Input(InputEvent),
    Event(WindowEvent),
    /// Recompute the rect from content.
    Resize,
}

/// Per-window FIFO of pending messages.
pub type MessageQueue = Deque<Message, QUEUE_CAPACITY>;
