//! Widget kind tag and per-kind data.

use super::Style;
use crate::widgets::button::ButtonData;
use crate::widgets::check_box::CheckBoxData;
use crate::widgets::progress_bar::{ProgressBarData, ProgressBarStyle};
use crate::widgets::prompt::PromptData;

/// What a window is, and the state only that kind needs.
#[derive(Debug, Default)]
pub enum WindowKind {
    /// Background, frame and shadow only.
    #[default]
    Plain,
    /// Single line of text, ellipsized.
    Label,
    /// Centred, word-wrapped text.
    MultilineLabel,
    Button(ButtonData),
    Prompt(PromptData),
    ProgressBar(ProgressBarData),
    CheckBox(CheckBoxData),
}

impl WindowKind {
    /// Kind implied by the kind tag in `style`.
    pub fn for_style(style: Style) -> Self {
        if style.contains(Style::PROMPT) {
            WindowKind::Prompt(PromptData::default())
        } else if style.contains(Style::BUTTON) {
            WindowKind::Button(ButtonData::default())
        } else if style.contains(Style::LABEL) {
            WindowKind::Label
        } else if style.contains(Style::PROGRESS_BAR) {
            WindowKind::ProgressBar(ProgressBarData::new(ProgressBarStyle::Normal))
        } else if style.contains(Style::CHECKBOX) {
            WindowKind::CheckBox(CheckBoxData::default())
        } else {
            WindowKind::Plain
        }
    }

    /// The style tag a window of this kind must carry.
    pub(crate) fn style_tag(&self) -> Style {
        match self {
            WindowKind::Plain => Style::empty(),
            WindowKind::Label | WindowKind::MultilineLabel => Style::LABEL,
            WindowKind::Button(_) => Style::BUTTON,
            WindowKind::Prompt(_) => Style::PROMPT,
            WindowKind::ProgressBar(_) => Style::PROGRESS_BAR,
            WindowKind::CheckBox(_) => Style::CHECKBOX,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WindowKind::Plain => "Window",
            WindowKind::Label => "Label",
            WindowKind::MultilineLabel => "MultilineLabel",
            WindowKind::Button(_) => "Button",
            WindowKind::Prompt(_) => "Prompt",
            WindowKind::ProgressBar(_) => "ProgressBar",
            WindowKind::CheckBox(_) => "CheckBox",
        }
    }
}
