//! Push button
//!
//! A tap forwards `ChildTapped(id)` to the parent and shows the pressed
//! colours for [`MetricId::ButtonTappedDuration`].

use embassy_time::Instant;
use log::error;

use crate::canvas::infallible;
use crate::display::Display;
use crate::geometry::{Coord, Rect};
use crate::manager::WindowManager;
use crate::theme::{ColorId, MetricId, TextFlags, Theme};
use crate::window::{Message, State, WindowEvent, WindowHandle, WindowKind};

#[derive(Debug, Default)]
pub struct ButtonData {
    last_tapped: Option<Instant>,
}

impl ButtonData {
    pub fn last_tapped(&self) -> Option<Instant> {
        self.last_tapped
    }
}

impl<D, T> WindowManager<D, T>
where
    D: Display,
    T: Theme,
{
    /// Whether the button is inside its pressed highlight at the current
    /// clock value.
    pub fn is_button_pressed(&self, handle: WindowHandle) -> bool {
        let Some(WindowKind::Button(data)) = self.arena.get(handle).map(|window| &window.kind)
        else {
            return false;
        };
        let duration = self.theme.duration(MetricId::ButtonTappedDuration);
        data.last_tapped
            .is_some_and(|tapped| self.now.saturating_duration_since(tapped) < duration)
    }

    pub(super) fn button_create(&mut self, handle: WindowHandle) -> bool {
        let radius = self.theme.coord(MetricId::CornerRadiusButton);
        match self.arena.get_mut(handle) {
            Some(window) => {
                window.corner_radius = radius;
                true
            }
            None => false,
        }
    }

    pub(super) fn draw_button(&mut self, handle: WindowHandle) -> bool {
        let pressed = self.is_button_pressed(handle);
        let (Some(window), Some(rect)) = (self.arena.get(handle), self.client_rect(handle)) else {
            return false;
        };
        let text = window.text.clone();
        let radius = self.theme.coord(MetricId::CornerRadiusButton);
        let (bg, frame, fg) = if pressed {
            (
                ColorId::ButtonBgPressed,
                ColorId::ButtonFramePressed,
                ColorId::ButtonTextPressed,
            )
        } else {
            (ColorId::ButtonBg, ColorId::ButtonFrame, ColorId::ButtonText)
        };

        let painted = self.with_canvas(handle, |theme, canvas| {
            infallible(theme.draw_window_background(canvas, rect, radius, theme.color(bg)));
            infallible(theme.draw_window_frame(canvas, rect, radius, theme.color(frame)));
            infallible(theme.draw_text(
                canvas,
                text.as_str(),
                TextFlags::SINGLE | TextFlags::CENTER,
                rect,
                theme.color(fg),
            ));
        });
        painted && self.route_message(handle, Message::PostDraw)
    }

    /// Forward the tap to the parent. Fails for a button without a parent.
    pub(super) fn button_tapped(&mut self, handle: WindowHandle) -> bool {
        let now = self.now;
        let Some(window) = self.arena.get_mut(handle) else {
            return false;
        };
        let (id, parent) = (window.id(), window.parent);
        if let WindowKind::Button(data) = &mut window.kind {
            data.last_tapped = Some(now);
        }

        let Some(parent) = parent else {
            error!("Button {} has no parent to notify", id);
            return false;
        };

        if let Some(window) = self.arena.get_mut(handle) {
            window.state.insert(State::DIRTY);
        }
        self.queue_message(parent, Message::Event(WindowEvent::ChildTapped(id)))
            .is_ok()
    }

    /// Width fits the label (at least the default button width) plus
    /// padding on both sides; height is the default button height.
    pub(super) fn button_resize(&mut self, handle: WindowHandle) -> bool {
        let Some(window) = self.arena.get(handle) else {
            return false;
        };
        let rect = window.rect;
        let width = self
            .theme
            .text_width(window.text())
            .max(self.theme.extent(MetricId::DefButtonCx))
            + self.theme.extent(MetricId::ButtonLabelPadding) * 2;
        let height = self.theme.extent(MetricId::DefButtonCy);

        let resized = Rect::new(
            rect.left,
            rect.top,
            rect.left + width as Coord,
            rect.top + height as Coord,
        );
        self.place(handle, resized);
        true
    }

    /// Mark buttons whose pressed highlight ran out so the next redraw
    /// restores their normal colours.
    pub(crate) fn refresh_timed_widgets(&mut self, handle: WindowHandle) {
        let duration = self.theme.duration(MetricId::ButtonTappedDuration);
        let now = self.now;
        if let Some(window) = self.arena.get_mut(handle)
            && let WindowKind::Button(data) = &mut window.kind
            && let Some(tapped) = data.last_tapped
            && now.saturating_duration_since(tapped) >= duration
        {
            data.last_tapped = None;
            window.state.insert(State::DIRTY);
        }

        for child in self.children(handle) {
            self.refresh_timed_widgets(child);
        }
    }
}
