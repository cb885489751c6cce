//! Message delivery: synchronous routing and per-window queues.

use log::{error, trace};

use super::WindowManager;
use crate::config::QUEUE_CAPACITY;
use crate::display::Display;
use crate::error::{WmError, WmResult};
use crate::theme::Theme;
use crate::window::{Message, State, WindowHandle};

impl<D, T> WindowManager<D, T>
where
    D: Display,
    T: Theme,
{
    /// Deliver `message` to `handle` immediately and apply the state
    /// transitions that follow it. Returns whether the window handled it.
    pub fn route_message(&mut self, handle: WindowHandle, message: Message) -> bool {
        let Some(window) = self.arena.get(handle) else {
            trace!("Dropping {:?} for stale handle", message);
            return false;
        };
        trace!("{} <- {:?}", window, message);

        match message {
            Message::Create => {
                let created = self.on_create(handle);
                if created && let Some(window) = self.arena.get_mut(handle) {
                    window.state.insert(State::ALIVE | State::DIRTY);
                }
                created
            }
            Message::Destroy => {
                let destroyed = self.on_destroy(handle);
                if let Some(window) = self.arena.get_mut(handle) {
                    window.state.remove(State::ALIVE);
                }
                destroyed
            }
            Message::Draw { force } => {
                if !self.is_drawable(handle) {
                    return false;
                }
                if !force && !window.is_dirty() {
                    return false;
                }
                let drawn = self.on_draw(handle, force);
                self.set_dirty(handle, false, false);
                drawn
            }
            Message::PostDraw => self.on_post_draw(handle),
            Message::Input(input) => self.on_input(handle, input),
            Message::Event(event) => self.on_event(handle, event),
            Message::Resize => self.on_resize(handle),
        }
    }

    /// Append `message` to the window's queue for the next render pass.
    pub fn queue_message(&mut self, handle: WindowHandle, message: Message) -> WmResult<()> {
        let window = self.arena.get_mut(handle).ok_or(WmError::StaleHandle)?;
        if window.queue.push_back(message).is_err() {
            error!("{} queue full, dropping {:?}", window, message);
            return Err(WmError::QueueFull {
                max: QUEUE_CAPACITY,
            });
        }
        Ok(())
    }

    /// Route at most one queued message of `handle`, then recurse into its
    /// children. Returns whether any queue in the subtree is still pending.
    pub fn process_queue(&mut self, handle: WindowHandle) -> bool {
        let Some(window) = self.arena.get_mut(handle) else {
            return false;
        };

        if let Some(message) = window.queue.pop_front() {
            self.route_message(handle, message);
        }

        let mut pending = false;
        for child in self.children(handle) {
            pending |= self.process_queue(child);
        }

        // Children may have queued events on this window
        pending
            || self
                .arena
                .get(handle)
                .is_some_and(|window| !window.queue.is_empty())
    }

    /// Run `process_queue` until the whole subtree is empty.
    pub(crate) fn drain_queues(&mut self, handle: WindowHandle) {
        while self.process_queue(handle) {}
    }
}
