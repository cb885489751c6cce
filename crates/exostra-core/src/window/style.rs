//! Window style and state flags.

use bitflags::bitflags;

bitflags! {
    /// Static appearance and behaviour of a window, chosen at creation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Style: u16 {
        const VISIBLE = 1 << 0;
        /// Must be created with a parent.
        const CHILD = 1 << 1;
        const FRAME = 1 << 2;
        const SHADOW = 1 << 3;
        /// Parentless, owns a backing canvas. Implies a frame and shadow.
        const TOPLEVEL = (1 << 4) | Self::FRAME.bits() | Self::SHADOW.bits();
        /// Size is computed from content after creation.
        const AUTOSIZE = 1 << 5;
        /// Covers the whole display regardless of the requested rect.
        const FULLSCREEN = 1 << 6;
        const BUTTON = 1 << 7;
        const LABEL = 1 << 8;
        /// Modal top-level dialog.
        const PROMPT = (1 << 9) | Self::TOPLEVEL.bits();
        const PROGRESS_BAR = 1 << 10;
        const CHECKBOX = 1 << 11;
    }
}

impl Style {
    /// Bits that select a widget kind. At most one may be set.
    const KIND_BITS: [Style; 5] = [
        Style::BUTTON,
        Style::LABEL,
        Style::PROMPT,
        Style::PROGRESS_BAR,
        Style::CHECKBOX,
    ];

    /// Number of widget kind tags present.
    pub(crate) fn kind_tag_count(self) -> usize {
        Self::KIND_BITS
            .iter()
            .filter(|tag| self.contains(**tag))
            .count()
    }
}

bitflags! {
    /// Runtime state of a window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct State: u8 {
        /// Create was delivered and accepted; cleared on destroy.
        const ALIVE = 1 << 0;
        /// Check box is checked.
        const CHECKED = 1 << 1;
        /// Content must be repainted before it is composited again.
        const DIRTY = 1 << 2;
    }
}
