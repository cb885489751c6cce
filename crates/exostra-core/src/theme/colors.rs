//! Default colour table
//!
//! Colours are written as raw RGB565 words (5 bits red, 6 bits green, 5 bits
//! blue) so they match the values panel datasheets and colour pickers show.

use embedded_graphics::pixelcolor::Rgb565;

/// Build an `Rgb565` from its packed 16-bit representation.
pub const fn rgb565(raw: u16) -> Rgb565 {
    Rgb565::new(
        (raw >> 11) as u8,
        ((raw >> 5) & 0x3f) as u8,
        (raw & 0x1f) as u8,
    )
}

// ============================================================================
// Screen
// ============================================================================

/// Screensaver fill - black
pub const COLOR_SCREENSAVER: Rgb565 = rgb565(0x0000);

/// Desktop behind all windows - light blue-gray
pub const COLOR_DESKTOP: Rgb565 = rgb565(0xb59a);

// ============================================================================
// Windows and prompts
// ============================================================================

pub const COLOR_WINDOW_TEXT: Rgb565 = rgb565(0x0000);
pub const COLOR_WINDOW_BG: Rgb565 = rgb565(0xdedb);
pub const COLOR_WINDOW_FRAME: Rgb565 = rgb565(0x9cf3);
pub const COLOR_WINDOW_SHADOW: Rgb565 = rgb565(0xb5b6);

pub const COLOR_PROMPT_BG: Rgb565 = rgb565(0xef5c);
pub const COLOR_PROMPT_FRAME: Rgb565 = rgb565(0x9cf3);
pub const COLOR_PROMPT_SHADOW: Rgb565 = rgb565(0xb5b6);

// ============================================================================
// Buttons
// ============================================================================

pub const COLOR_BUTTON_TEXT: Rgb565 = rgb565(0xffff);
pub const COLOR_BUTTON_TEXT_PRESSED: Rgb565 = rgb565(0xffff);
pub const COLOR_BUTTON_BG: Rgb565 = rgb565(0x8c71);
pub const COLOR_BUTTON_BG_PRESSED: Rgb565 = rgb565(0x738e);
pub const COLOR_BUTTON_FRAME: Rgb565 = rgb565(0x6b6d);
pub const COLOR_BUTTON_FRAME_PRESSED: Rgb565 = rgb565(0x6b6d);

// ============================================================================
// Progress bars and check boxes
// ============================================================================

pub const COLOR_PROGRESS_BG: Rgb565 = rgb565(0xef5d);
/// Progress fill - green
pub const COLOR_PROGRESS_FILL: Rgb565 = rgb565(0x0ce0);

pub const COLOR_CHECKBOX_CHECK_BG: Rgb565 = rgb565(0xef5d);
pub const COLOR_CHECKBOX_CHECK: Rgb565 = rgb565(0x3166);
pub const COLOR_CHECKBOX_CHECK_FRAME: Rgb565 = rgb565(0x9cf3);
