//! Hardware-independent core of the exostra window manager
//!
//! exostra is a retained-mode window manager for small framebuffer displays
//! driven by a microcontroller. It owns a tree of rectangular windows, routes
//! taps and lifecycle events through per-window message queues, and
//! composites only the screen regions that actually changed.
//!
//! The crate is `no_std` with `extern crate alloc` so it runs on embedded
//! targets as well as on desktop hosts (for the simulator and tests). All
//! pixels go through [`embedded_graphics`] draw targets in `Rgb565`.
//!
//! The usual driving loop looks like this:
//!
//! ```ignore
//! let mut wm = WindowManager::new(display, DefaultTheme::default(), WmConfig::default());
//! let main = wm.create_window(
//!     WindowSpec::new(1, Style::TOPLEVEL | Style::VISIBLE, 0, 0, 320, 240),
//! )?;
//! loop {
//!     let now = Instant::now();
//!     if let Some(point) = touch.poll() {
//!         wm.hit_test(now, point);
//!     }
//!     wm.render(now)?;
//! }
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod canvas;
pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod input;
pub mod manager;
pub mod theme;
pub mod widgets;
pub mod window;

pub use canvas::Canvas;
pub use config::WmConfig;
pub use display::{BufferedDisplay, Display};
pub use error::{WmError, WmResult};
pub use geometry::{Coord, Extent, Rect};
pub use input::InputChannel;
pub use manager::{Notification, WindowManager, WindowSpec};
pub use theme::{DefaultTheme, Theme};
pub use window::{Message, State, Style, Window, WindowHandle, WindowId, WindowKind};
