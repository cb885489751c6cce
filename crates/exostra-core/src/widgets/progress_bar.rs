//! Progress bar with a determinate fill or an indeterminate marquee.

use log::warn;

use crate::canvas::infallible;
use crate::display::Display;
use crate::manager::WindowManager;
use crate::theme::Theme;
use crate::window::{Message, WindowHandle, WindowKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressBarStyle {
    /// The value is a percentage filled from the left.
    #[default]
    Normal,
    /// The value positions a marquee moving across the bar.
    Indeterminate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBarData {
    style: ProgressBarStyle,
    /// 0..=100
    value: f32,
}

impl ProgressBarData {
    pub fn new(style: ProgressBarStyle) -> Self {
        Self { style, value: 0.0 }
    }

    pub fn style(&self) -> ProgressBarStyle {
        self.style
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

impl<D, T> WindowManager<D, T>
where
    D: Display,
    T: Theme,
{
    fn progress_bar_data(&mut self, handle: WindowHandle) -> Option<&mut ProgressBarData> {
        match &mut self.arena.get_mut(handle)?.kind {
            WindowKind::ProgressBar(data) => Some(data),
            _ => {
                warn!("Window {:?} is not a progress bar", handle);
                None
            }
        }
    }

    pub fn progress_value(&self, handle: WindowHandle) -> Option<f32> {
        match &self.arena.get(handle)?.kind {
            WindowKind::ProgressBar(data) => Some(data.value),
            _ => None,
        }
    }

    /// Set the fill percentage or marquee position, clamped to 0..=100.
    pub fn set_progress_value(&mut self, handle: WindowHandle, value: f32) -> bool {
        let value = value.clamp(0.0, 100.0);
        let Some(data) = self.progress_bar_data(handle) else {
            return false;
        };
        if data.value != value {
            data.value = value;
            self.set_dirty(handle, true, true);
        }
        true
    }

    pub fn set_progress_bar_style(&mut self, handle: WindowHandle, style: ProgressBarStyle) -> bool {
        let Some(data) = self.progress_bar_data(handle) else {
            return false;
        };
        if data.style != style {
            data.style = style;
            self.set_dirty(handle, true, true);
        }
        true
    }

    pub(super) fn draw_progress_bar(&mut self, handle: WindowHandle) -> bool {
        let (Some(window), Some(rect)) = (self.arena.get(handle), self.client_rect(handle)) else {
            return false;
        };
        let WindowKind::ProgressBar(data) = window.kind else {
            return false;
        };
        let (frame, radius) = (window.colors.frame, window.corner_radius);

        let painted = self.with_canvas(handle, |theme, canvas| {
            infallible(theme.draw_progress_bar_background(canvas, rect));
            infallible(theme.draw_window_frame(canvas, rect, radius, frame));
            infallible(match data.style {
                ProgressBarStyle::Normal => theme.draw_progress_bar_progress(canvas, rect, data.value),
                ProgressBarStyle::Indeterminate => {
                    theme.draw_progress_bar_indeterminate(canvas, rect, data.value)
                }
            });
        });
        painted && self.route_message(handle, Message::PostDraw)
    }
}
