//! Window creation.

use alloc::boxed::Box;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_layout::align::{Align, horizontal, vertical};
use log::{debug, error};

use super::WindowManager;
use crate::canvas::Canvas;
use crate::config::{MAX_CHILDREN, MAX_PROMPT_BUTTONS};
use crate::display::Display;
use crate::error::{WmError, WmResult};
use crate::geometry::{Coord, Extent, Rect};
use crate::theme::{ColorId, MetricId, Theme};
use crate::widgets::progress_bar::{ProgressBarData, ProgressBarStyle};
use crate::widgets::prompt::PromptData;
use crate::window::{Message, Style, WID_INVALID, Window, WindowColors, WindowHandle, WindowId, WindowKind};

/// Everything needed to create one window.
#[derive(Debug)]
pub struct WindowSpec<'a> {
    pub parent: Option<WindowHandle>,
    pub id: WindowId,
    pub style: Style,
    /// Absolute display coordinates.
    pub rect: Rect,
    pub text: &'a str,
    /// Kind override; derived from the style tag when `None`.
    pub kind: Option<WindowKind>,
}

impl<'a> WindowSpec<'a> {
    pub fn new(id: WindowId, style: Style, x: Coord, y: Coord, width: Extent, height: Extent) -> Self {
        Self {
            parent: None,
            id,
            style,
            rect: Rect::from_origin_size(Point::new(x, y), width, height),
            text: "",
            kind: None,
        }
    }

    pub fn with_parent(mut self, parent: WindowHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_text(mut self, text: &'a str) -> Self {
        self.text = text;
        self
    }

    pub fn with_kind(mut self, kind: WindowKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

impl<D, T> WindowManager<D, T>
where
    D: Display,
    T: Theme,
{
    pub fn create_window(&mut self, spec: WindowSpec<'_>) -> WmResult<WindowHandle> {
        self.create_window_with(spec, |_, _| Ok(()))
    }

    /// Create a window, running `hook` after it is allocated but before it
    /// receives `Create`. A failing hook aborts the creation.
    ///
    /// On any error the half-built window and its children are released and
    /// the tree is left as it was.
    pub fn create_window_with<F>(&mut self, spec: WindowSpec<'_>, hook: F) -> WmResult<WindowHandle>
    where
        F: FnOnce(&mut Self, WindowHandle) -> WmResult<()>,
    {
        let WindowSpec {
            parent,
            id,
            style,
            mut rect,
            text,
            kind,
        } = spec;

        self.validate_spec(parent, id, style)?;

        let kind = kind.unwrap_or_else(|| WindowKind::for_style(style));
        let tag = kind.style_tag();
        if (tag.is_empty() && style.kind_tag_count() != 0) || !style.contains(tag) {
            error!("Window {}: {} kind does not match its style", id, kind.name());
            return Err(WmError::InvalidStyle {
                id,
                reason: "kind does not match the style tag",
            });
        }

        if style.contains(Style::FULLSCREEN) {
            rect = self.display_rect();
        }

        let colors = WindowColors {
            background: self.theme.color(ColorId::WindowBg),
            text: self.theme.color(ColorId::WindowText),
            frame: self.theme.color(ColorId::WindowFrame),
            shadow: self.theme.color(ColorId::WindowShadow),
        };

        let mut window = Window::new(id, style, rect, parent, kind, colors);
        window.set_text(text)?;
        if parent.is_none() {
            window.canvas = Some(Canvas::try_new(
                rect.width(),
                rect.height(),
                colors.background,
            )?);
        }

        let handle = self.arena.insert(window);
        if let Err(err) = self.finish_create(handle, id, parent, style, hook) {
            self.discard(handle);
            return Err(err);
        }

        debug!("Created window {} at {}", id, rect);
        Ok(handle)
    }

    fn validate_spec(&self, parent: Option<WindowHandle>, id: WindowId, style: Style) -> WmResult<()> {
        if id == WID_INVALID {
            error!("Window id {} is reserved", id);
            return Err(WmError::ReservedId(id));
        }
        if style.kind_tag_count() > 1 {
            error!("Window {} has more than one widget kind", id);
            return Err(WmError::InvalidStyle {
                id,
                reason: "more than one widget kind",
            });
        }
        if style.contains(Style::CHILD) && parent.is_none() {
            error!("Child window {} has no parent", id);
            return Err(WmError::MissingParent(id));
        }
        if style.contains(Style::TOPLEVEL) && parent.is_some() {
            error!("Top-level window {} cannot have a parent", id);
            return Err(WmError::UnexpectedParent(id));
        }

        let Some(container) = self.container_of(parent) else {
            error!("Parent of window {} is gone", id);
            return Err(WmError::StaleHandle);
        };
        if container.get(id).is_some() {
            error!("Window id {} already exists in this scope", id);
            return Err(WmError::DuplicateId(id));
        }
        if container.len() >= MAX_CHILDREN {
            error!("No room for window {}", id);
            return Err(WmError::ContainerFull { max: MAX_CHILDREN });
        }
        Ok(())
    }

    fn finish_create<F>(
        &mut self,
        handle: WindowHandle,
        id: WindowId,
        parent: Option<WindowHandle>,
        style: Style,
        hook: F,
    ) -> WmResult<()>
    where
        F: FnOnce(&mut Self, WindowHandle) -> WmResult<()>,
    {
        if let Err(err) = hook(self, handle) {
            error!("Pre-create hook for window {} failed: {}", id, err);
            return Err(WmError::HookFailed(id));
        }

        if !self.route_message(handle, Message::Create) {
            error!("Window {} rejected its create message", id);
            return Err(WmError::CreateRejected(id));
        }

        match parent {
            Some(parent) => {
                self.arena
                    .get_mut(parent)
                    .ok_or(WmError::StaleHandle)?
                    .children
                    .add(id, handle)?;
            }
            None => {
                self.root.add(id, handle)?;
            }
        }

        if style.contains(Style::AUTOSIZE) {
            self.route_message(handle, Message::Resize);
        }

        self.set_dirty(handle, true, true);
        Ok(())
    }

    /// Create a modal prompt centred on the display, showing `text` above
    /// one or two buttons. `on_result` receives the id of the tapped button
    /// after the prompt hid itself.
    pub fn create_prompt<F>(
        &mut self,
        id: WindowId,
        style: Style,
        text: &str,
        buttons: &[(WindowId, &str)],
        on_result: F,
    ) -> WmResult<WindowHandle>
    where
        F: FnMut(WindowId) + 'static,
    {
        if !style.contains(Style::PROMPT) {
            error!("Prompt {} lacks the prompt style", id);
            return Err(WmError::InvalidStyle {
                id,
                reason: "prompt windows need the PROMPT style",
            });
        }
        if buttons.is_empty() || buttons.len() > MAX_PROMPT_BUTTONS {
            error!("Prompt {} has {} buttons", id, buttons.len());
            return Err(WmError::InvalidOperation {
                op: "create_prompt",
                reason: "a prompt has one or two buttons",
            });
        }

        let display = self.display_rect();
        let width = self
            .theme
            .extent(MetricId::MaxPromptCx)
            .min(display.width().saturating_sub(self.theme.extent(MetricId::XPadding) * 2));
        let height = self
            .theme
            .extent(MetricId::MaxPromptCy)
            .min(display.height().saturating_sub(self.theme.extent(MetricId::YPadding) * 2));

        let area = Rectangle::new(Point::zero(), Size::new(width, height)).align_to(
            &Rectangle::from(display),
            horizontal::Center,
            vertical::Center,
        );

        let spec = WindowSpec {
            parent: None,
            id,
            style,
            rect: Rect::from(area),
            text,
            kind: Some(WindowKind::Prompt(PromptData::new(Box::new(on_result)))),
        };

        // Buttons must exist before the prompt lays itself out on create
        self.create_window_with(spec, |wm, prompt| {
            for (button_id, label) in buttons {
                wm.add_prompt_button(prompt, *button_id, label)?;
            }
            Ok(())
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_progress_bar(
        &mut self,
        parent: Option<WindowHandle>,
        id: WindowId,
        style: Style,
        x: Coord,
        y: Coord,
        width: Extent,
        height: Extent,
        bar_style: ProgressBarStyle,
    ) -> WmResult<WindowHandle> {
        let mut spec = WindowSpec::new(id, style, x, y, width, height)
            .with_kind(WindowKind::ProgressBar(ProgressBarData::new(bar_style)));
        spec.parent = parent;
        self.create_window(spec)
    }
}
