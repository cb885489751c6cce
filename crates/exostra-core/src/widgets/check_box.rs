//! Check box with a text label. Taps toggle it, at most once per
//! [`MetricId::CheckBoxCheckDelay`].

use embassy_time::Instant;

use crate::canvas::infallible;
use crate::display::Display;
use crate::manager::WindowManager;
use crate::theme::{MetricId, Theme};
use crate::window::{Message, State, WindowHandle, WindowKind};

#[derive(Debug, Default)]
pub struct CheckBoxData {
    last_toggle: Option<Instant>,
}

impl<D, T> WindowManager<D, T>
where
    D: Display,
    T: Theme,
{
    pub fn is_checked(&self, handle: WindowHandle) -> bool {
        self.arena.get(handle).is_some_and(|window| window.is_checked())
    }

    pub fn set_checked(&mut self, handle: WindowHandle, checked: bool) -> bool {
        let Some(window) = self.arena.get_mut(handle) else {
            return false;
        };
        if window.is_checked() != checked {
            window.state.set(State::CHECKED, checked);
            self.set_dirty(handle, true, true);
        }
        true
    }

    pub(super) fn draw_check_box(&mut self, handle: WindowHandle) -> bool {
        let (Some(window), Some(rect)) = (self.arena.get(handle), self.client_rect(handle)) else {
            return false;
        };
        let (text, checked) = (window.text.clone(), window.is_checked());

        let painted = self.with_canvas(handle, |theme, canvas| {
            infallible(theme.draw_check_box(canvas, text.as_str(), checked, rect));
        });
        painted && self.route_message(handle, Message::PostDraw)
    }

    /// Always consumes the tap, even while debouncing.
    pub(super) fn check_box_tapped(&mut self, handle: WindowHandle) -> bool {
        let delay = self.theme.duration(MetricId::CheckBoxCheckDelay);
        let now = self.now;
        let Some(window) = self.arena.get_mut(handle) else {
            return false;
        };
        let WindowKind::CheckBox(data) = &mut window.kind else {
            return false;
        };

        let ready = data
            .last_toggle
            .is_none_or(|last| now.saturating_duration_since(last) >= delay);
        if ready {
            data.last_toggle = Some(now);
            let checked = window.is_checked();
            self.set_checked(handle, !checked);
        }
        true
    }
}
