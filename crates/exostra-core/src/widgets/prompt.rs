//! Modal prompt: a message above one or two buttons.
//!
//! The prompt owns a multiline label (id [`PROMPT_LABEL_ID`]) and its
//! buttons. Tapping a button hides the prompt and hands the button id to the
//! result callback.

use alloc::boxed::Box;
use core::fmt;

use heapless::Vec;
use log::{debug, error};

use crate::config::MAX_PROMPT_BUTTONS;
use crate::display::Display;
use crate::error::WmResult;
use crate::geometry::{Coord, Rect};
use crate::manager::{WindowManager, WindowSpec};
use crate::theme::{ColorId, MetricId, Theme};
use crate::window::{Style, WindowEvent, WindowHandle, WindowId, WindowKind};

/// Id of the message label inside every prompt.
pub const PROMPT_LABEL_ID: WindowId = 1;

/// Called with the id of the button that closed the prompt.
pub type PromptCallback = Box<dyn FnMut(WindowId)>;

#[derive(Default)]
pub struct PromptData {
    on_result: Option<PromptCallback>,
}

impl PromptData {
    pub fn new(on_result: PromptCallback) -> Self {
        Self {
            on_result: Some(on_result),
        }
    }
}

impl fmt::Debug for PromptData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptData")
            .field("has_callback", &self.on_result.is_some())
            .finish()
    }
}

impl<D, T> WindowManager<D, T>
where
    D: Display,
    T: Theme,
{
    /// Add an autosized button to a prompt that has not been laid out yet.
    pub fn add_prompt_button(
        &mut self,
        prompt: WindowHandle,
        id: WindowId,
        text: &str,
    ) -> WmResult<WindowHandle> {
        let style = Style::CHILD | Style::VISIBLE | Style::AUTOSIZE | Style::BUTTON;
        self.create_window(
            WindowSpec::new(id, style, 0, 0, 0, 0)
                .with_parent(prompt)
                .with_text(text),
        )
    }

    pub fn set_prompt_callback(&mut self, prompt: WindowHandle, on_result: PromptCallback) -> bool {
        match self.arena.get_mut(prompt).map(|window| &mut window.kind) {
            Some(WindowKind::Prompt(data)) => {
                data.on_result = Some(on_result);
                true
            }
            _ => false,
        }
    }

    /// Apply prompt colours, create the message label and lay out the
    /// buttons below it.
    pub(super) fn prompt_create(&mut self, handle: WindowHandle) -> bool {
        let radius = self.theme.coord(MetricId::CornerRadiusPrompt);
        let background = self.theme.color(ColorId::PromptBg);
        let frame = self.theme.color(ColorId::PromptFrame);
        let shadow = self.theme.color(ColorId::PromptShadow);
        let x_padding = self.theme.extent(MetricId::XPadding);
        let y_padding = self.theme.extent(MetricId::YPadding);
        let button_height = self.theme.extent(MetricId::DefButtonCy);

        let Some(window) = self.arena.get_mut(handle) else {
            return false;
        };
        window.corner_radius = radius;
        window.colors.background = background;
        window.colors.frame = frame;
        window.colors.shadow = shadow;
        let rect = window.rect;
        let text = window.text.clone();

        let label_left = rect.left + x_padding as Coord;
        let label_top = rect.top + y_padding as Coord;
        let label_right = (rect.right - x_padding as Coord).max(label_left);
        let label_bottom = rect.bottom - (y_padding * 3 + button_height) as Coord;

        let label_spec = WindowSpec {
            parent: Some(handle),
            id: PROMPT_LABEL_ID,
            style: Style::CHILD | Style::VISIBLE | Style::LABEL,
            rect: Rect::new(label_left, label_top, label_right, label_bottom.max(label_top)),
            text: text.as_str(),
            kind: Some(WindowKind::MultilineLabel),
        };
        let label = match self.create_window(label_spec) {
            Ok(label) => label,
            Err(err) => {
                error!("Prompt label creation failed: {}", err);
                return false;
            }
        };
        if let Some(window) = self.arena.get_mut(label) {
            window.colors.background = background;
        }
        let Some(label_rect) = self.arena.get(label).map(|window| window.rect) else {
            return false;
        };

        let buttons: Vec<WindowHandle, MAX_PROMPT_BUTTONS> = self
            .children(handle)
            .into_iter()
            .filter(|child| {
                self.arena
                    .get(*child)
                    .is_some_and(|window| window.style.contains(Style::BUTTON))
            })
            .take(MAX_PROMPT_BUTTONS)
            .collect();

        let top = label_rect.bottom + y_padding as Coord;
        let count = buttons.len();
        for (index, button) in buttons.into_iter().enumerate() {
            let Some(width) = self.arena.get(button).map(|window| window.rect.width() as Coord) else {
                continue;
            };
            let left = match (count, index) {
                (1, _) => rect.left + (rect.width() / 2) as Coord - width / 2,
                (_, 0) => rect.left + x_padding as Coord,
                _ => rect.right - x_padding as Coord - width,
            };
            self.place(
                button,
                Rect::new(left, top, left + width, top + button_height as Coord),
            );
        }

        true
    }

    /// A button was tapped: hide, then report which one.
    pub(super) fn prompt_event(&mut self, handle: WindowHandle, event: WindowEvent) -> bool {
        match event {
            WindowEvent::ChildTapped(button) => {
                debug!("Prompt closed with button {}", button);
                self.hide(handle);

                if let Some(WindowKind::Prompt(data)) =
                    self.arena.get_mut(handle).map(|window| &mut window.kind)
                    && let Some(on_result) = data.on_result.as_mut()
                {
                    on_result(button);
                }
                true
            }
        }
    }
}
