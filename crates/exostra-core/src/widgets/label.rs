//! Static text: single line with ellipsis, or centred and word wrapped.

use crate::canvas::infallible;
use crate::display::Display;
use crate::manager::WindowManager;
use crate::theme::{TextFlags, Theme};
use crate::window::{Message, WindowHandle, WindowKind};

impl<D, T> WindowManager<D, T>
where
    D: Display,
    T: Theme,
{
    pub(super) fn draw_label(&mut self, handle: WindowHandle) -> bool {
        let (Some(window), Some(rect)) = (self.arena.get(handle), self.client_rect(handle)) else {
            return false;
        };
        let flags = match window.kind {
            WindowKind::MultilineLabel => TextFlags::CENTER,
            _ => TextFlags::SINGLE | TextFlags::ELLIPSIS,
        };
        let (text, colors, radius) = (window.text.clone(), window.colors, window.corner_radius);

        let painted = self.with_canvas(handle, |theme, canvas| {
            infallible(theme.draw_window_background(canvas, rect, radius, colors.background));
            infallible(theme.draw_text(canvas, text.as_str(), flags, rect, colors.text));
        });
        painted && self.route_message(handle, Message::PostDraw)
    }
}
