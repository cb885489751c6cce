use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_time::{Duration, Instant};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::{Notification, WindowManager, WindowSpec};
use crate::canvas::Canvas;
use crate::config::{MAX_CHILDREN, QUEUE_CAPACITY, WmConfig};
use crate::display::Display;
use crate::error::WmError;
use crate::geometry::Rect;
use crate::input::InputChannel;
use crate::theme::DefaultTheme;
use crate::theme::colors::{COLOR_DESKTOP, COLOR_SCREENSAVER};
use crate::widgets::progress_bar::ProgressBarStyle;
use crate::window::{InputEvent, Message, Style, WindowEvent, WindowHandle, WindowId, WindowKind};

/// Canvas-backed display that records every block write.
struct RecordingDisplay {
    canvas: Canvas,
    blits: Vec<Rect>,
    fills: Vec<Rect>,
    flushes: usize,
}

impl RecordingDisplay {
    fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::try_new(width, height, Rgb565::BLACK).unwrap(),
            blits: Vec::new(),
            fills: Vec::new(),
            flushes: 0,
        }
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.canvas.pixel(Point::new(x, y))
    }
}

impl OriginDimensions for RecordingDisplay {
    fn size(&self) -> Size {
        self.canvas.size()
    }
}

impl DrawTarget for RecordingDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.canvas.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.blits.push(Rect::from(*area));
        self.canvas.fill_contiguous(area, colors)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.fills.push(Rect::from(*area));
        self.canvas.fill_solid(area, color)
    }
}

impl Display for RecordingDisplay {
    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

type TestManager = WindowManager<RecordingDisplay>;

fn manager(width: u32, height: u32) -> TestManager {
    WindowManager::new(
        RecordingDisplay::new(width, height),
        DefaultTheme::default(),
        WmConfig::unthrottled(),
    )
}

fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

fn top_level(wm: &mut TestManager, id: WindowId, rect: Rect) -> WindowHandle {
    wm.create_window(WindowSpec {
        parent: None,
        id,
        style: Style::TOPLEVEL | Style::VISIBLE,
        rect,
        text: "",
        kind: None,
    })
    .unwrap()
}

fn child(wm: &mut TestManager, parent: WindowHandle, id: WindowId, style: Style, rect: Rect) -> WindowHandle {
    wm.create_window(WindowSpec {
        parent: Some(parent),
        id,
        style: style | Style::CHILD | Style::VISIBLE,
        rect,
        text: "",
        kind: None,
    })
    .unwrap()
}

fn center(wm: &TestManager, handle: WindowHandle) -> Point {
    let rect = wm.window(handle).unwrap().rect();
    Point::new(
        rect.left + rect.width() as i32 / 2,
        rect.top + rect.height() as i32 / 2,
    )
}

fn clear_records(wm: &mut TestManager) {
    wm.display_mut().blits.clear();
    wm.display_mut().fills.clear();
}

// ----------------------------------------------------------------------------
// Composition
// ----------------------------------------------------------------------------

#[test]
fn test_overlapped_window_blits_only_visible_part() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 100, 100));
    let _b = top_level(&mut wm, 2, Rect::new(50, 50, 150, 150));
    assert_eq!(wm.render(at(0)), Ok(true));
    clear_records(&mut wm);

    wm.mark_rect_dirty(a, Rect::new(0, 0, 100, 100));
    assert_eq!(wm.render(at(10)), Ok(true));

    let blits = &wm.display().blits;
    assert_eq!(blits.len(), 2);
    assert!(blits.contains(&Rect::new(0, 0, 100, 50)));
    assert!(blits.contains(&Rect::new(0, 50, 50, 100)));
    assert_eq!(wm.window(a).unwrap().dirty_rect(), None);
}

#[test]
fn test_first_render_paints_desktop_and_windows() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 100, 100));
    let b = top_level(&mut wm, 2, Rect::new(50, 50, 150, 150));
    let green = Rgb565::GREEN;
    wm.set_background_color(b, green);

    assert_eq!(wm.render(at(0)), Ok(true));
    assert_eq!(wm.display().flushes, 1);
    assert_eq!(wm.display().pixel(190, 190), Some(COLOR_DESKTOP));
    assert_eq!(
        wm.display().pixel(20, 20),
        Some(wm.window(a).unwrap().colors().background)
    );
    assert_eq!(wm.display().pixel(100, 100), Some(green));

    // Nothing changed since
    assert_eq!(wm.render(at(10)), Ok(false));
    assert_eq!(wm.display().flushes, 1);
}

#[test]
fn test_fully_covered_window_gets_no_writes() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(10, 10, 60, 60));
    let b = top_level(&mut wm, 2, Rect::new(0, 0, 100, 100));
    assert_eq!(wm.render(at(0)), Ok(true));
    clear_records(&mut wm);

    wm.set_text(a, "hidden").unwrap();
    assert!(wm.window(a).unwrap().dirty_rect().is_some());
    assert_eq!(wm.render(at(10)), Ok(false));
    assert!(wm.display().blits.is_empty());
    assert_eq!(wm.window(a).unwrap().dirty_rect(), None);
    assert_eq!(wm.window(b).unwrap().dirty_rect(), None);
}

#[test]
fn test_hidden_window_uncovers_desktop() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 100, 100));
    wm.render(at(0)).unwrap();

    assert!(wm.hide(a));
    assert!(!wm.hide(a));
    assert_eq!(wm.render(at(10)), Ok(true));
    assert_eq!(wm.display().pixel(50, 50), Some(COLOR_DESKTOP));
}

#[test]
fn test_moved_window_repaints_old_area() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    wm.render(at(0)).unwrap();

    wm.set_rect(a, Rect::new(100, 100, 160, 160)).unwrap();
    assert_eq!(wm.render(at(10)), Ok(true));
    assert_eq!(wm.display().pixel(25, 25), Some(COLOR_DESKTOP));
    assert_eq!(
        wm.display().pixel(130, 130),
        Some(wm.window(a).unwrap().colors().background)
    );
    assert_eq!(wm.client_rect(a), Some(Rect::new(0, 0, 60, 60)));
}

#[test]
fn test_desktop_repaint_keeps_clean_window_between_invalidations() {
    let mut wm = manager(100, 100);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 10, 10));
    let c = top_level(&mut wm, 2, Rect::new(40, 40, 60, 60));
    let b = top_level(&mut wm, 3, Rect::new(90, 90, 100, 100));
    wm.set_background_color(c, Rgb565::GREEN);
    wm.render(at(0)).unwrap();
    assert_eq!(wm.display().pixel(50, 50), Some(Rgb565::GREEN));
    clear_records(&mut wm);

    // Two separate holes; C sits between them and is itself clean
    assert!(wm.hide(a));
    assert!(wm.hide(b));
    assert_eq!(wm.window(c).unwrap().dirty_rect(), None);
    assert_eq!(wm.render(at(10)), Ok(true));

    assert_eq!(wm.display().pixel(50, 50), Some(Rgb565::GREEN));
    assert_eq!(wm.display().pixel(5, 5), Some(COLOR_DESKTOP));
    assert_eq!(wm.display().pixel(95, 95), Some(COLOR_DESKTOP));
    assert!(wm.display().blits.contains(&Rect::new(40, 40, 60, 60)));
    assert_eq!(wm.window(c).unwrap().dirty_rect(), None);
}

#[test]
fn test_hide_and_move_in_one_frame_keep_clean_window() {
    let mut wm = manager(100, 100);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 10, 10));
    let c = top_level(&mut wm, 2, Rect::new(40, 40, 60, 60));
    let b = top_level(&mut wm, 3, Rect::new(80, 80, 90, 90));
    wm.set_background_color(c, Rgb565::GREEN);
    wm.render(at(0)).unwrap();

    assert!(wm.hide(a));
    wm.set_rect(b, Rect::new(85, 0, 95, 10)).unwrap();
    assert_eq!(wm.render(at(10)), Ok(true));

    assert_eq!(wm.display().pixel(50, 50), Some(Rgb565::GREEN));
    assert_eq!(wm.display().pixel(85, 85), Some(COLOR_DESKTOP));
    assert_eq!(
        wm.display().pixel(90, 5),
        Some(wm.window(b).unwrap().colors().background)
    );
}

#[test]
fn test_render_rate_limit() {
    let mut wm = WindowManager::new(
        RecordingDisplay::new(100, 100),
        DefaultTheme::default(),
        WmConfig::default(),
    );
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    assert_eq!(wm.render(at(0)), Ok(true));

    wm.set_text(a, "again").unwrap();
    assert_eq!(wm.render(at(50)), Ok(false));
    assert_eq!(wm.render(at(150)), Ok(true));
}

// ----------------------------------------------------------------------------
// Hit testing
// ----------------------------------------------------------------------------

#[test]
fn test_tap_claimed_by_window_under_point() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    let b = top_level(&mut wm, 2, Rect::new(100, 100, 150, 150));

    assert!(wm.hit_test(at(0), Point::new(10, 10)));
    assert_eq!(wm.window(a).unwrap().pending_messages(), 1);
    assert_eq!(wm.window(b).unwrap().pending_messages(), 0);

    assert!(!wm.hit_test(at(10), Point::new(75, 75)));
}

#[test]
fn test_overlapping_windows_only_front_claims() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 100, 100));
    let b = top_level(&mut wm, 2, Rect::new(50, 50, 150, 150));

    assert!(wm.hit_test(at(0), Point::new(75, 75)));
    assert_eq!(wm.window(a).unwrap().pending_messages(), 0);
    assert_eq!(wm.window(b).unwrap().pending_messages(), 1);
}

#[test]
fn test_foreground_window_claims_overlap() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 100, 100));
    let b = top_level(&mut wm, 2, Rect::new(50, 50, 150, 150));
    assert_eq!(wm.z_order(a), Some(0));

    assert!(wm.set_foreground_window(a));
    assert_eq!(wm.z_order(a), Some(1));
    assert_eq!(wm.z_order(b), Some(0));

    assert!(wm.hit_test(at(0), Point::new(75, 75)));
    assert_eq!(wm.window(a).unwrap().pending_messages(), 1);
    assert_eq!(wm.window(b).unwrap().pending_messages(), 0);
}

#[test]
fn test_child_claims_before_parent() {
    let mut wm = manager(200, 200);
    let parent = top_level(&mut wm, 1, Rect::new(0, 0, 100, 100));
    let inner = child(&mut wm, parent, 2, Style::empty(), Rect::new(10, 10, 40, 40));

    assert!(wm.hit_test(at(0), Point::new(20, 20)));
    assert_eq!(wm.window(inner).unwrap().pending_messages(), 1);
    assert_eq!(wm.window(parent).unwrap().pending_messages(), 0);

    assert!(wm.hit_test(at(10), Point::new(80, 80)));
    assert_eq!(wm.window(parent).unwrap().pending_messages(), 1);
}

#[test]
fn test_hit_test_rate_limit() {
    let mut wm = WindowManager::new(
        RecordingDisplay::new(100, 100),
        DefaultTheme::default(),
        WmConfig::default(),
    );
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));

    assert!(wm.hit_test(at(0), Point::new(10, 10)));
    assert!(!wm.hit_test(at(100), Point::new(10, 10)));
    assert!(wm.hit_test(at(250), Point::new(10, 10)));
    assert_eq!(wm.window(a).unwrap().pending_messages(), 2);
}

#[test]
fn test_input_channel_drains_into_hit_test() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    let channel: InputChannel<NoopRawMutex> = InputChannel::new();

    channel.push(Point::new(10, 10));
    channel.push(Point::new(190, 190));
    channel.push(Point::new(20, 20));
    assert_eq!(channel.drain_into(&mut wm, at(0)), 2);
    assert!(channel.is_empty());
    assert_eq!(wm.window(a).unwrap().pending_messages(), 2);
}

// ----------------------------------------------------------------------------
// Tree management
// ----------------------------------------------------------------------------

#[test]
fn test_child_without_parent_rejected() {
    let mut wm = manager(200, 200);
    let result = wm.create_window(WindowSpec::new(5, Style::CHILD | Style::VISIBLE, 0, 0, 10, 10));
    assert_eq!(result.unwrap_err(), WmError::MissingParent(5));
    assert!(wm.top_level_windows().is_empty());
    assert_eq!(wm.window_count(), 0);
}

#[test]
fn test_top_level_with_parent_rejected() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    let result = wm.create_window(
        WindowSpec::new(2, Style::TOPLEVEL | Style::VISIBLE, 0, 0, 10, 10).with_parent(a),
    );
    assert_eq!(result.unwrap_err(), WmError::UnexpectedParent(2));
    assert_eq!(wm.child_count(a), 0);
}

#[test]
fn test_reserved_and_duplicate_ids() {
    let mut wm = manager(200, 200);
    let result = wm.create_window(WindowSpec::new(0, Style::TOPLEVEL, 0, 0, 10, 10));
    assert_eq!(result.unwrap_err(), WmError::ReservedId(0));

    top_level(&mut wm, 1, Rect::new(0, 0, 10, 10));
    let result = wm.create_window(WindowSpec::new(1, Style::TOPLEVEL, 0, 0, 10, 10));
    assert_eq!(result.unwrap_err(), WmError::DuplicateId(1));
    assert_eq!(wm.window_count(), 1);
}

#[test]
fn test_conflicting_kinds_rejected() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    let result = wm.create_window(
        WindowSpec::new(2, Style::CHILD | Style::BUTTON | Style::LABEL, 0, 0, 10, 10)
            .with_parent(a),
    );
    assert!(matches!(result, Err(WmError::InvalidStyle { id: 2, .. })));

    let result = wm.create_window(
        WindowSpec::new(3, Style::CHILD | Style::BUTTON, 0, 0, 10, 10)
            .with_parent(a)
            .with_kind(WindowKind::Label),
    );
    assert!(matches!(result, Err(WmError::InvalidStyle { id: 3, .. })));
    assert_eq!(wm.child_count(a), 0);
}

#[test]
fn test_container_capacity() {
    let mut wm = manager(200, 200);
    for id in 1..=MAX_CHILDREN as WindowId {
        top_level(&mut wm, id, Rect::new(0, 0, 4, 4));
    }
    let result = wm.create_window(WindowSpec::new(100, Style::TOPLEVEL, 0, 0, 4, 4));
    assert_eq!(
        result.unwrap_err(),
        WmError::ContainerFull { max: MAX_CHILDREN }
    );
    assert_eq!(wm.window_count(), MAX_CHILDREN);
}

#[test]
fn test_failed_hook_leaves_tree_unchanged() {
    let mut wm = manager(200, 200);
    let result = wm.create_window_with(
        WindowSpec::new(1, Style::TOPLEVEL | Style::VISIBLE, 0, 0, 50, 50),
        |_, _| Err(WmError::Config),
    );
    assert_eq!(result.unwrap_err(), WmError::HookFailed(1));
    assert_eq!(wm.window_count(), 0);
    assert!(wm.top_level_windows().is_empty());
}

#[test]
fn test_hook_runs_before_create() {
    let mut wm = manager(200, 200);
    let handle = wm
        .create_window_with(
            WindowSpec::new(1, Style::TOPLEVEL | Style::VISIBLE, 0, 0, 50, 50),
            |wm, handle| {
                assert!(!wm.window(handle).unwrap().is_alive());
                Ok(())
            },
        )
        .unwrap();
    assert!(wm.window(handle).unwrap().is_alive());
}

#[test]
fn test_fullscreen_ignores_requested_rect() {
    let mut wm = manager(120, 80);
    let handle = wm
        .create_window(WindowSpec::new(
            1,
            Style::TOPLEVEL | Style::VISIBLE | Style::FULLSCREEN,
            5,
            5,
            10,
            10,
        ))
        .unwrap();
    assert_eq!(wm.window(handle).unwrap().rect(), Rect::new(0, 0, 120, 80));

    // The desktop stays hidden behind a full-screen window
    wm.render(at(0)).unwrap();
    assert!(wm.display().fills.iter().all(|fill| *fill != wm.display_rect()));
}

#[test]
fn test_destroy_frees_subtree() {
    let mut wm = manager(200, 200);
    let parent = top_level(&mut wm, 1, Rect::new(0, 0, 100, 100));
    let first = child(&mut wm, parent, 2, Style::empty(), Rect::new(0, 0, 10, 10));
    child(&mut wm, first, 3, Style::empty(), Rect::new(0, 0, 5, 5));
    assert_eq!(wm.window_count(), 3);

    assert!(wm.destroy(parent));
    assert_eq!(wm.window_count(), 0);
    assert!(wm.window(parent).is_none());
    assert!(wm.window(first).is_none());
    assert!(wm.top_level_windows().is_empty());
    assert!(!wm.destroy(parent));
}

#[test]
fn test_stale_handle_rejected() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    wm.destroy(a);

    // A new window may reuse the slot, but not the handle
    let b = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    assert_ne!(a, b);
    assert!(wm.window(a).is_none());
    assert_eq!(wm.set_text(a, "x"), Err(WmError::StaleHandle));
    assert_eq!(
        wm.queue_message(a, Message::Resize),
        Err(WmError::StaleHandle)
    );
}

#[test]
fn test_child_lookup_and_counts() {
    let mut wm = manager(200, 200);
    let parent = top_level(&mut wm, 1, Rect::new(0, 0, 100, 100));
    let a = child(&mut wm, parent, 7, Style::empty(), Rect::new(0, 0, 10, 10));
    let b = child(&mut wm, parent, 9, Style::empty(), Rect::new(10, 0, 20, 10));

    assert_eq!(wm.child_by_id(Some(parent), 9), Some(b));
    assert_eq!(wm.child_by_id(Some(parent), 4), None);
    assert_eq!(wm.child_by_id(None, 1), Some(parent));
    assert_eq!(wm.child_count(parent), 2);
    assert_eq!(wm.children(parent).as_slice(), &[a, b]);
    assert_eq!(wm.client_rect(b), Some(Rect::new(10, 0, 20, 10)));
}

#[test]
fn test_hidden_parent_hides_child() {
    let mut wm = manager(200, 200);
    let parent = top_level(&mut wm, 1, Rect::new(0, 0, 100, 100));
    let inner = child(&mut wm, parent, 2, Style::empty(), Rect::new(10, 10, 40, 40));
    assert!(wm.is_drawable(inner));

    wm.hide(parent);
    assert!(!wm.is_drawable(inner));
    assert!(wm.window(inner).unwrap().style().contains(Style::VISIBLE));

    wm.show(parent);
    assert!(wm.is_drawable(inner));
}

#[test]
fn test_offscreen_window_not_drawable() {
    let mut wm = manager(100, 100);
    let a = top_level(&mut wm, 1, Rect::new(200, 200, 250, 250));
    assert!(!wm.is_drawable(a));
    assert!(!wm.hit_test(at(0), Point::new(210, 210)));
}

#[test]
fn test_queue_overflow() {
    let mut wm = manager(100, 100);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    for _ in 0..QUEUE_CAPACITY {
        wm.queue_message(a, Message::Input(InputEvent::Tap(Point::zero())))
            .unwrap();
    }
    assert_eq!(
        wm.queue_message(a, Message::Resize),
        Err(WmError::QueueFull {
            max: QUEUE_CAPACITY
        })
    );

    wm.render(at(0)).unwrap();
    assert_eq!(wm.window(a).unwrap().pending_messages(), 0);
}

#[test]
fn test_coordinate_conversion_fails_closed() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(10, 20, 60, 70));

    assert_eq!(wm.display_to_window(a, Point::new(15, 25)), Some(Point::new(5, 5)));
    assert_eq!(wm.display_to_window(a, Point::new(0, 0)), None);
    assert_eq!(wm.window_to_display(a, Point::new(5, 5)), Some(Point::new(15, 25)));
    assert_eq!(wm.window_to_display(a, Point::new(50, 0)), None);

    assert_eq!(
        wm.display_to_window_rect(a, Rect::new(10, 20, 30, 40)),
        Some(Rect::new(0, 0, 20, 20))
    );
    assert_eq!(wm.display_to_window_rect(a, Rect::new(0, 0, 30, 40)), None);
    assert_eq!(
        wm.window_to_display_rect(a, Rect::new(0, 0, 50, 50)),
        Some(Rect::new(10, 20, 60, 70))
    );
    assert_eq!(wm.window_to_display_rect(a, Rect::new(0, 0, 51, 50)), None);
}

#[test]
fn test_tear_down_destroys_everything() {
    let mut wm = manager(200, 200);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    child(&mut wm, a, 2, Style::empty(), Rect::new(0, 0, 10, 10));
    top_level(&mut wm, 3, Rect::new(60, 60, 90, 90));

    wm.tear_down();
    assert_eq!(wm.window_count(), 0);
    assert!(wm.top_level_windows().is_empty());
}

// ----------------------------------------------------------------------------
// Widgets
// ----------------------------------------------------------------------------

#[test]
fn test_button_autosizes_to_label() {
    let mut wm = manager(320, 240);
    let parent = top_level(&mut wm, 1, Rect::new(0, 0, 320, 240));
    let button = wm
        .create_window(
            WindowSpec::new(2, Style::CHILD | Style::VISIBLE | Style::AUTOSIZE | Style::BUTTON, 20, 30, 0, 0)
                .with_parent(parent)
                .with_text("OK"),
        )
        .unwrap();

    // max(12, 60) + 2 * 10 by 31
    assert_eq!(wm.window(button).unwrap().rect(), Rect::new(20, 30, 100, 61));
    assert_eq!(wm.window(button).unwrap().kind().name(), "Button");
}

#[test]
fn test_button_tap_notifies_application() {
    let mut wm = manager(320, 240);
    let parent = top_level(&mut wm, 1, Rect::new(0, 0, 320, 240));
    let button = wm
        .create_window(
            WindowSpec::new(4, Style::CHILD | Style::VISIBLE | Style::AUTOSIZE | Style::BUTTON, 20, 30, 0, 0)
                .with_parent(parent)
                .with_text("Go"),
        )
        .unwrap();
    wm.render(at(0)).unwrap();

    assert!(wm.hit_test(at(1000), center(&wm, button)));
    assert_eq!(wm.render(at(1000)), Ok(true));
    assert!(wm.is_button_pressed(button));
    assert_eq!(
        wm.next_notification(),
        Some(Notification {
            target: parent,
            target_id: 1,
            event: WindowEvent::ChildTapped(4),
        })
    );
    assert_eq!(wm.next_notification(), None);

    // The highlight expires on a later frame
    assert_eq!(wm.render(at(1500)), Ok(true));
    assert!(!wm.is_button_pressed(button));
}

#[test]
fn test_events_bubble_through_nested_windows() {
    let mut wm = manager(320, 240);
    let top = top_level(&mut wm, 1, Rect::new(0, 0, 320, 240));
    let panel = child(&mut wm, top, 2, Style::empty(), Rect::new(10, 10, 300, 200));
    let button = wm
        .create_window(
            WindowSpec::new(3, Style::CHILD | Style::VISIBLE | Style::BUTTON, 20, 20, 80, 30)
                .with_parent(panel)
                .with_text("Deep"),
        )
        .unwrap();

    assert!(wm.hit_test(at(0), Point::new(30, 30)));
    assert_eq!(wm.window(button).unwrap().pending_messages(), 1);
    wm.render(at(0)).unwrap();

    let note = wm.next_notification().unwrap();
    assert_eq!(note.target, panel);
    assert_eq!(note.event, WindowEvent::ChildTapped(3));
    assert_eq!(wm.window(panel).unwrap().pending_messages(), 0);
}

#[test]
fn test_parentless_button_tap_fails() {
    let mut wm = manager(100, 100);
    let button = wm
        .create_window(
            WindowSpec::new(1, Style::VISIBLE | Style::BUTTON, 0, 0, 50, 20).with_text("Lonely"),
        )
        .unwrap();
    assert!(!wm.route_message(button, Message::Input(InputEvent::Tap(Point::new(5, 5)))));
}

#[test]
fn test_prompt_layout_and_result() {
    let mut wm = manager(320, 240);
    let result = Rc::new(Cell::new(None));
    let sink = result.clone();
    let prompt = wm
        .create_prompt(
            10,
            Style::PROMPT | Style::VISIBLE,
            "Save changes?",
            &[(2, "Yes"), (3, "No")],
            move |button| sink.set(Some(button)),
        )
        .unwrap();

    assert_eq!(wm.window(prompt).unwrap().rect(), Rect::new(40, 30, 280, 210));
    let label = wm.child_by_id(Some(prompt), 1).unwrap();
    assert_eq!(wm.window(label).unwrap().rect(), Rect::new(56, 42, 264, 143));
    assert_eq!(wm.window(label).unwrap().text(), "Save changes?");

    let yes = wm.child_by_id(Some(prompt), 2).unwrap();
    let no = wm.child_by_id(Some(prompt), 3).unwrap();
    assert_eq!(wm.window(yes).unwrap().rect(), Rect::new(56, 155, 136, 186));
    assert_eq!(wm.window(no).unwrap().rect(), Rect::new(184, 155, 264, 186));

    wm.render(at(0)).unwrap();
    assert!(wm.hit_test(at(10), center(&wm, no)));
    wm.render(at(10)).unwrap();

    assert_eq!(result.get(), Some(3));
    assert!(!wm.window(prompt).unwrap().style().contains(Style::VISIBLE));
    assert!(!wm.is_drawable(yes));
    assert_eq!(wm.next_notification(), None);
}

#[test]
fn test_single_button_prompt_is_centred() {
    let mut wm = manager(320, 240);
    let prompt = wm
        .create_prompt(10, Style::PROMPT | Style::VISIBLE, "Done", &[(2, "OK")], |_| {})
        .unwrap();
    let ok = wm.child_by_id(Some(prompt), 2).unwrap();
    assert_eq!(wm.window(ok).unwrap().rect(), Rect::new(120, 155, 200, 186));
}

#[test]
fn test_prompt_rejects_bad_arguments() {
    let mut wm = manager(320, 240);
    let result = wm.create_prompt(10, Style::TOPLEVEL, "x", &[(2, "OK")], |_| {});
    assert!(matches!(result, Err(WmError::InvalidStyle { id: 10, .. })));

    let result = wm.create_prompt(10, Style::PROMPT, "x", &[], |_| {});
    assert!(matches!(result, Err(WmError::InvalidOperation { .. })));

    // Duplicate button ids fail inside the creation hook
    let result = wm.create_prompt(10, Style::PROMPT, "x", &[(2, "A"), (2, "B")], |_| {});
    assert_eq!(result.unwrap_err(), WmError::HookFailed(10));

    // Button id 1 collides with the message label
    let result = wm.create_prompt(10, Style::PROMPT, "x", &[(1, "A")], |_| {});
    assert_eq!(result.unwrap_err(), WmError::CreateRejected(10));
    assert_eq!(wm.window_count(), 0);
}

#[test]
fn test_check_box_toggle_is_debounced() {
    let mut wm = manager(320, 240);
    let parent = top_level(&mut wm, 1, Rect::new(0, 0, 320, 240));
    let check = wm
        .create_window(
            WindowSpec::new(2, Style::CHILD | Style::VISIBLE | Style::CHECKBOX, 10, 10, 120, 24)
                .with_parent(parent)
                .with_text("Wi-Fi"),
        )
        .unwrap();
    let point = Point::new(15, 20);

    wm.hit_test(at(1000), point);
    wm.render(at(1000)).unwrap();
    assert!(wm.is_checked(check));

    wm.hit_test(at(1100), point);
    wm.render(at(1100)).unwrap();
    assert!(wm.is_checked(check));

    wm.hit_test(at(1400), point);
    wm.render(at(1400)).unwrap();
    assert!(!wm.is_checked(check));

    assert!(wm.set_checked(check, true));
    assert!(wm.window(check).unwrap().is_checked());
    assert_eq!(wm.next_notification(), None);
}

#[test]
fn test_progress_bar_value_and_style() {
    let mut wm = manager(320, 240);
    let parent = top_level(&mut wm, 1, Rect::new(0, 0, 320, 240));
    let bar = wm
        .create_progress_bar(
            Some(parent),
            2,
            Style::CHILD | Style::VISIBLE | Style::PROGRESS_BAR,
            10,
            10,
            200,
            20,
            ProgressBarStyle::Normal,
        )
        .unwrap();
    wm.render(at(0)).unwrap();

    assert!(wm.set_progress_value(bar, 250.0));
    assert_eq!(wm.progress_value(bar), Some(100.0));
    assert!(wm.window(bar).unwrap().dirty_rect().is_some());
    assert_eq!(wm.render(at(10)), Ok(true));

    assert!(wm.set_progress_bar_style(bar, ProgressBarStyle::Indeterminate));
    match wm.window(bar).unwrap().kind() {
        WindowKind::ProgressBar(data) => {
            assert_eq!(data.style(), ProgressBarStyle::Indeterminate)
        }
        other => panic!("unexpected kind {:?}", other),
    }

    assert!(!wm.set_progress_value(parent, 10.0));
    assert_eq!(wm.progress_value(parent), None);
}

// ----------------------------------------------------------------------------
// Screensaver
// ----------------------------------------------------------------------------

#[test]
fn test_screensaver_activates_and_swallows_tap() {
    let mut wm = manager(100, 100);
    let a = top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    wm.enable_screensaver(at(0), Duration::from_millis(1000));

    assert_eq!(wm.render(at(500)), Ok(true));
    assert!(!wm.is_screensaver_active());

    assert_eq!(wm.render(at(1500)), Ok(true));
    assert!(wm.is_screensaver_active());
    assert_eq!(wm.display().pixel(10, 10), Some(COLOR_SCREENSAVER));
    // Drawn once only
    assert_eq!(wm.render(at(1600)), Ok(false));

    assert!(!wm.hit_test(at(1700), Point::new(10, 10)));
    assert_eq!(wm.window(a).unwrap().pending_messages(), 0);

    assert_eq!(wm.render(at(1800)), Ok(true));
    assert!(!wm.is_screensaver_active());
    assert_eq!(
        wm.display().pixel(10, 10),
        Some(wm.window(a).unwrap().colors().background)
    );
    assert_eq!(wm.display().pixel(80, 80), Some(COLOR_DESKTOP));
}

#[test]
fn test_disabled_screensaver_never_activates() {
    let mut wm = manager(100, 100);
    top_level(&mut wm, 1, Rect::new(0, 0, 50, 50));
    wm.enable_screensaver(at(0), Duration::from_millis(100));
    wm.disable_screensaver();

    wm.render(at(5000)).unwrap();
    assert!(!wm.is_screensaver_active());
}
