//! Widget behaviour
//!
//! Every window kind reacts to the same set of hooks: create, destroy,
//! draw, post-draw, input, event and resize. The hooks below pick the
//! kind-specific implementation from the window's [`WindowKind`]; kinds that
//! do not override a hook get the plain window behaviour.
//!
//! All drawing goes through the theme into the canvas of the window's
//! top-level ancestor, using the window's rect relative to that canvas.

pub mod button;
pub mod check_box;
pub mod label;
pub mod progress_bar;
pub mod prompt;

use log::trace;

use crate::canvas::infallible;
use crate::display::Display;
use crate::manager::{Notification, WindowManager};
use crate::theme::{MetricId, Theme};
use crate::window::{InputEvent, Message, Style, WindowEvent, WindowHandle, WindowKind};

/// Copyable kind tag used to dispatch without holding a borrow on the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WidgetClass {
    Plain,
    Label,
    MultilineLabel,
    Button,
    Prompt,
    ProgressBar,
    CheckBox,
}

impl From<&WindowKind> for WidgetClass {
    fn from(kind: &WindowKind) -> Self {
        match kind {
            WindowKind::Plain => WidgetClass::Plain,
            WindowKind::Label => WidgetClass::Label,
            WindowKind::MultilineLabel => WidgetClass::MultilineLabel,
            WindowKind::Button(_) => WidgetClass::Button,
            WindowKind::Prompt(_) => WidgetClass::Prompt,
            WindowKind::ProgressBar(_) => WidgetClass::ProgressBar,
            WindowKind::CheckBox(_) => WidgetClass::CheckBox,
        }
    }
}

impl<D, T> WindowManager<D, T>
where
    D: Display,
    T: Theme,
{
    fn class_of(&self, handle: WindowHandle) -> Option<WidgetClass> {
        self.arena
            .get(handle)
            .map(|window| WidgetClass::from(&window.kind))
    }

    // ------------------------------------------------------------------------
    // Hooks
    // ------------------------------------------------------------------------

    pub(crate) fn on_create(&mut self, handle: WindowHandle) -> bool {
        match self.class_of(handle) {
            Some(WidgetClass::Button) => self.button_create(handle),
            Some(WidgetClass::Prompt) => self.prompt_create(handle),
            Some(_) => self.window_create(handle),
            None => false,
        }
    }

    pub(crate) fn on_destroy(&mut self, handle: WindowHandle) -> bool {
        self.arena.get(handle).is_some()
    }

    pub(crate) fn on_draw(&mut self, handle: WindowHandle, force: bool) -> bool {
        trace!("Drawing {:?} (force: {})", handle, force);
        match self.class_of(handle) {
            Some(WidgetClass::Plain | WidgetClass::Prompt) => self.draw_window(handle),
            Some(WidgetClass::Label | WidgetClass::MultilineLabel) => self.draw_label(handle),
            Some(WidgetClass::Button) => self.draw_button(handle),
            Some(WidgetClass::ProgressBar) => self.draw_progress_bar(handle),
            Some(WidgetClass::CheckBox) => self.draw_check_box(handle),
            None => false,
        }
    }

    /// Record the freshly painted rect as dirty on the window and every
    /// ancestor, so the compositor finds it on the top-level window.
    pub(crate) fn on_post_draw(&mut self, handle: WindowHandle) -> bool {
        let Some(rect) = self.arena.get(handle).map(|window| window.rect) else {
            return false;
        };

        let mut current = Some(handle);
        while let Some(handle) = current {
            let Some(window) = self.arena.get_mut(handle) else {
                break;
            };
            window.accumulate_dirty(rect);
            current = window.parent;
        }
        true
    }

    pub(crate) fn on_input(&mut self, handle: WindowHandle, input: InputEvent) -> bool {
        match input {
            InputEvent::Tap(point) => {
                trace!("Tap at {} on {:?}", point, handle);
                self.on_tapped(handle)
            }
        }
    }

    fn on_tapped(&mut self, handle: WindowHandle) -> bool {
        match self.class_of(handle) {
            Some(WidgetClass::Button) => self.button_tapped(handle),
            Some(WidgetClass::CheckBox) => self.check_box_tapped(handle),
            _ => false,
        }
    }

    /// Events a kind does not consume go to the application outbox.
    pub(crate) fn on_event(&mut self, handle: WindowHandle, event: WindowEvent) -> bool {
        match self.class_of(handle) {
            Some(WidgetClass::Prompt) => self.prompt_event(handle, event),
            Some(_) => {
                let Some(target_id) = self.arena.get(handle).map(|window| window.id()) else {
                    return false;
                };
                self.post_notification(Notification {
                    target: handle,
                    target_id,
                    event,
                });
                true
            }
            None => false,
        }
    }

    pub(crate) fn on_resize(&mut self, handle: WindowHandle) -> bool {
        match self.class_of(handle) {
            Some(WidgetClass::Button) => self.button_resize(handle),
            _ => false,
        }
    }

    // ------------------------------------------------------------------------
    // Plain window behaviour
    // ------------------------------------------------------------------------

    fn window_create(&mut self, handle: WindowHandle) -> bool {
        let radius = self.theme.coord(MetricId::CornerRadiusWindow);
        match self.arena.get_mut(handle) {
            Some(window) => {
                window.corner_radius = radius;
                true
            }
            None => false,
        }
    }

    /// Background, then frame and shadow as the style asks.
    fn draw_window(&mut self, handle: WindowHandle) -> bool {
        let (Some(window), Some(rect)) = (self.arena.get(handle), self.client_rect(handle)) else {
            return false;
        };
        let (style, colors, radius) = (window.style, window.colors, window.corner_radius);

        let painted = self.with_canvas(handle, |theme, canvas| {
            infallible(theme.draw_window_background(canvas, rect, radius, colors.background));
            if style.contains(Style::FRAME) {
                infallible(theme.draw_window_frame(canvas, rect, radius, colors.frame));
            }
            if style.contains(Style::SHADOW) {
                infallible(theme.draw_window_shadow(canvas, rect, radius, colors.shadow));
            }
        });
        painted && self.route_message(handle, Message::PostDraw)
    }
}
