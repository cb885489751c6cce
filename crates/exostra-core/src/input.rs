//! Touch input handoff
//!
//! Touch controllers usually report from an interrupt or another task,
//! while the window manager runs in the main loop. [`InputChannel`] is a
//! small bounded queue between the two: the producer pushes tap points, the
//! main loop drains them into [`WindowManager::hit_test`].
//!
//! ```ignore
//! static TOUCH: IsrInputChannel = InputChannel::new();
//!
//! // touch interrupt
//! TOUCH.push(Point::new(x, y));
//!
//! // main loop
//! TOUCH.drain_into(&mut wm, Instant::now());
//! wm.render(Instant::now())?;
//! ```

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::Instant;
use embedded_graphics::prelude::Point;
use log::{trace, warn};

use crate::display::Display;
use crate::manager::WindowManager;
use crate::theme::Theme;

/// Default number of taps buffered between two drains.
pub const INPUT_CAPACITY: usize = 8;

/// Bounded tap queue shared between an input source and the window manager.
pub struct InputChannel<M: RawMutex, const N: usize = INPUT_CAPACITY> {
    channel: Channel<M, Point, N>,
}

/// Input channel usable from interrupt handlers.
pub type IsrInputChannel<const N: usize = INPUT_CAPACITY> = InputChannel<CriticalSectionRawMutex, N>;

impl<M: RawMutex, const N: usize> InputChannel<M, N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Queue a tap at display coordinates. Returns `false` if the queue is
    /// full and the tap was dropped.
    pub fn push(&self, point: Point) -> bool {
        match self.channel.try_send(point) {
            Ok(()) => true,
            Err(_) => {
                warn!("Input queue full, dropping tap at {}", point);
                false
            }
        }
    }

    pub fn sender(&self) -> Sender<'_, M, Point, N> {
        self.channel.sender()
    }

    pub fn receiver(&self) -> Receiver<'_, M, Point, N> {
        self.channel.receiver()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Hit-test every queued tap. Returns how many were claimed by a window.
    pub fn drain_into<D, T>(&self, wm: &mut WindowManager<D, T>, now: Instant) -> usize
    where
        D: Display,
        T: Theme,
    {
        let mut claimed = 0;
        while let Ok(point) = self.channel.try_receive() {
            if wm.hit_test(now, point) {
                claimed += 1;
            }
        }
        trace!("Drained input queue, {} taps claimed", claimed);
        claimed
    }
}

impl<M: RawMutex, const N: usize> Default for InputChannel<M, N> {
    fn default() -> Self {
        Self::new()
    }
}
