//! Desktop simulator for the exostra window manager.
//!
//! Builds a small demo desktop on a 320×240 simulated panel: a main window
//! with a label, buttons, a check box and a progress bar, an overlapping
//! info window, and a yes/no prompt opened from the "Reset" button.
//!
//! By default a scripted sequence of taps is played against a synthetic
//! clock and the final frame is written to `exostra-simulator.png` (or the
//! path given as the first argument). Built with the `window` feature and
//! run without arguments, the demo is interactive in an SDL2 window instead:
//! mouse clicks are forwarded as taps and `Q` quits.

use std::cell::Cell;
use std::rc::Rc;

use embassy_time::{Duration, Instant};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::{debug, error, info, warn};

use exostra_core::input::{InputChannel, IsrInputChannel};
use exostra_core::widgets::progress_bar::ProgressBarStyle;
use exostra_core::window::WindowEvent;
use exostra_core::{
    BufferedDisplay, DefaultTheme, Style, WindowHandle, WindowId, WindowManager, WindowSpec,
    WmConfig, WmResult,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 320;
const DISPLAY_HEIGHT_PX: u32 = 240;

/// Pixel scale factor for the PNG and the SDL window.
const WINDOW_SCALE: u32 = 2;

/// Simulated time between two frames of the scripted run.
const FRAME_STEP: Duration = Duration::from_millis(50);

const DEFAULT_OUTPUT: &str = "exostra-simulator.png";

// ---------------------------------------------------------------------------
// Demo layout
// ---------------------------------------------------------------------------

const MAIN_ID: WindowId = 1;
const TITLE_ID: WindowId = 2;
const STEP_ID: WindowId = 3;
const RESET_ID: WindowId = 4;
const INDETERMINATE_ID: WindowId = 5;
const PROGRESS_ID: WindowId = 6;

const INFO_ID: WindowId = 10;
const INFO_TEXT_ID: WindowId = 2;

const PROMPT_ID: WindowId = 20;
const PROMPT_YES_ID: WindowId = 2;
const PROMPT_NO_ID: WindowId = 3;

const PROGRESS_STEP: f32 = 12.5;

type SimDisplay = BufferedDisplay<SimulatorDisplay<Rgb565>>;
type SimManager = WindowManager<SimDisplay>;

/// Handles the demo reacts to.
struct Demo {
    main: WindowHandle,
    progress: WindowHandle,
    indeterminate: WindowHandle,
    prompt: Option<WindowHandle>,
    /// Written by the prompt callback, consumed by the frame loop.
    prompt_result: Rc<Cell<Option<WindowId>>>,
}

impl Demo {
    fn build(wm: &mut SimManager) -> WmResult<Self> {
        let main = wm.create_window(
            WindowSpec::new(
                MAIN_ID,
                Style::TOPLEVEL | Style::VISIBLE,
                4,
                4,
                DISPLAY_WIDTH_PX - 8,
                DISPLAY_HEIGHT_PX - 8,
            )
            .with_text("main"),
        )?;

        let child = Style::CHILD | Style::VISIBLE;
        wm.create_window(
            WindowSpec::new(TITLE_ID, child | Style::LABEL, 14, 12, 180, 20)
                .with_parent(main)
                .with_text("exostra window manager demo"),
        )?;
        wm.create_window(
            WindowSpec::new(STEP_ID, child | Style::BUTTON | Style::AUTOSIZE, 14, 44, 0, 0)
                .with_parent(main)
                .with_text("Step"),
        )?;
        wm.create_window(
            WindowSpec::new(RESET_ID, child | Style::BUTTON | Style::AUTOSIZE, 104, 44, 0, 0)
                .with_parent(main)
                .with_text("Reset"),
        )?;
        let indeterminate = wm.create_window(
            WindowSpec::new(INDETERMINATE_ID, child | Style::CHECKBOX, 14, 90, 170, 24)
                .with_parent(main)
                .with_text("Busy"),
        )?;
        let progress = wm.create_progress_bar(
            Some(main),
            PROGRESS_ID,
            child | Style::PROGRESS_BAR | Style::FRAME,
            14,
            196,
            DISPLAY_WIDTH_PX - 28,
            20,
            ProgressBarStyle::Normal,
        )?;

        // Overlaps the main window to exercise occlusion
        let info = wm.create_window(WindowSpec::new(
            INFO_ID,
            Style::TOPLEVEL | Style::VISIBLE,
            200,
            40,
            110,
            120,
        ))?;
        wm.create_window(
            WindowSpec::new(INFO_TEXT_ID, child | Style::LABEL, 206, 46, 98, 20)
                .with_parent(info)
                .with_text("Overlapping"),
        )?;

        Ok(Self {
            main,
            progress,
            indeterminate,
            prompt: None,
            prompt_result: Rc::new(Cell::new(None)),
        })
    }

    fn open_prompt(&mut self, wm: &mut SimManager) -> WmResult<()> {
        if self.prompt.is_some() {
            return Ok(());
        }
        let result = self.prompt_result.clone();
        let prompt = wm.create_prompt(
            PROMPT_ID,
            Style::PROMPT | Style::VISIBLE,
            "Reset the progress bar to zero?",
            &[(PROMPT_YES_ID, "Yes"), (PROMPT_NO_ID, "No")],
            move |button| result.set(Some(button)),
        )?;
        self.prompt = Some(prompt);
        Ok(())
    }

    /// React to unconsumed events and to a closed prompt.
    fn update(&mut self, wm: &mut SimManager) -> WmResult<()> {
        while let Some(notification) = wm.next_notification() {
            let WindowEvent::ChildTapped(id) = notification.event;
            if notification.target != self.main {
                debug!("Ignoring tap on {} in window {}", id, notification.target_id);
                continue;
            }

            match id {
                STEP_ID => {
                    let value = wm.progress_value(self.progress).unwrap_or(0.0) + PROGRESS_STEP;
                    wm.set_progress_value(self.progress, value);
                    info!("Progress at {:.1}%", value.min(100.0));
                }
                RESET_ID => self.open_prompt(wm)?,
                other => debug!("Unhandled button {}", other),
            }
        }

        let bar_style = if wm.is_checked(self.indeterminate) {
            ProgressBarStyle::Indeterminate
        } else {
            ProgressBarStyle::Normal
        };
        wm.set_progress_bar_style(self.progress, bar_style);

        if let Some(button) = self.prompt_result.take() {
            info!("Prompt answered with button {}", button);
            if button == PROMPT_YES_ID {
                wm.set_progress_value(self.progress, 0.0);
            }
            if let Some(prompt) = self.prompt.take() {
                wm.destroy(prompt);
            }
        }
        Ok(())
    }
}

fn render(wm: &mut SimManager, now: Instant) -> bool {
    match wm.render(now) {
        Ok(changed) => changed,
        Err(never) => match never {},
    }
}

fn center_of(wm: &SimManager, handle: Option<WindowHandle>) -> Option<Point> {
    let rect = wm.window(handle?)?.rect();
    Some(Point::new(
        rect.left + rect.width() as i32 / 2,
        rect.top + rect.height() as i32 / 2,
    ))
}

// ---------------------------------------------------------------------------
// Scripted run
// ---------------------------------------------------------------------------

/// One scripted step, resolved against the live tree when it fires.
#[derive(Debug, Clone, Copy)]
enum Action {
    /// Tap the child of the main window with this id.
    TapMain(WindowId),
    /// Tap a prompt button.
    TapPrompt(WindowId),
    /// Bring a top-level window to the foreground.
    Raise(WindowId),
}

const SCRIPT: &[(u64, Action)] = &[
    (300, Action::TapMain(STEP_ID)),
    (600, Action::TapMain(STEP_ID)),
    (900, Action::TapMain(STEP_ID)),
    (1200, Action::TapMain(RESET_ID)),
    (1500, Action::TapPrompt(PROMPT_NO_ID)),
    (1800, Action::TapMain(STEP_ID)),
    (2100, Action::Raise(MAIN_ID)),
    (2400, Action::TapMain(INDETERMINATE_ID)),
    (2700, Action::TapMain(INDETERMINATE_ID)),
];

const SCRIPT_END_MS: u64 = 3200;

/// Queue a scripted tap or apply a raise. Returns `false` if the target
/// window does not exist.
fn perform(wm: &mut SimManager, demo: &Demo, touch: &IsrInputChannel, action: Action) -> bool {
    let target = match action {
        Action::TapMain(id) => center_of(wm, wm.child_by_id(Some(demo.main), id)),
        Action::TapPrompt(id) => center_of(wm, wm.child_by_id(demo.prompt, id)),
        Action::Raise(id) => {
            return wm
                .child_by_id(None, id)
                .is_some_and(|handle| wm.set_foreground_window(handle));
        }
    };
    target.is_some_and(|point| touch.push(point))
}

fn run_scripted(wm: &mut SimManager, demo: &mut Demo, output: &str) -> WmResult<()> {
    let touch: IsrInputChannel = InputChannel::new();
    let mut script = SCRIPT.iter().peekable();
    let mut frames = 0usize;
    let mut ms = 0;

    while ms <= SCRIPT_END_MS {
        let now = Instant::from_millis(ms);
        while let Some((_, action)) = script.next_if(|(at, _)| *at <= ms) {
            if perform(wm, demo, &touch, *action) {
                debug!("{} ms: {:?}", ms, action);
            } else {
                warn!("{} ms: no target for {:?}", ms, action);
            }
        }

        touch.drain_into(wm, now);
        if render(wm, now) {
            frames += 1;
        }
        demo.update(wm)?;
        ms += FRAME_STEP.as_millis();
    }
    info!("Scripted run finished, {} frames updated", frames);

    let settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    match wm
        .display()
        .panel()
        .to_rgb_output_image(&settings)
        .save_png(output)
    {
        Ok(()) => info!("Wrote {}", output),
        Err(err) => error!("Could not write {}: {}", output, err),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Interactive run
// ---------------------------------------------------------------------------

#[cfg(feature = "window")]
fn run_interactive(wm: &mut SimManager, demo: &mut Demo) -> WmResult<()> {
    use embedded_graphics_simulator::{SimulatorEvent, Window, sdl2::Keycode};

    /// Target frame duration (~30 FPS).
    const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(33);

    let settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("exostra simulator", &settings);
    let start = std::time::Instant::now();
    let clock = || Instant::from_millis(start.elapsed().as_millis() as u64);

    // The SDL window is created lazily by the first update
    render(wm, clock());
    window.update(wm.display().panel());

    'running: loop {
        let frame_start = std::time::Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. }
                    if keycode == Keycode::Q || keycode == Keycode::Escape =>
                {
                    break 'running;
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    wm.hit_test(clock(), point);
                }
                _ => {}
            }
        }

        if render(wm, clock()) {
            window.update(wm.display().panel());
        }
        demo.update(wm)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn run() -> WmResult<()> {
    let panel = SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let display = BufferedDisplay::try_new(panel)?;
    let mut wm = WindowManager::new(display, DefaultTheme::default(), WmConfig::default());
    let mut demo = Demo::build(&mut wm)?;
    info!("Demo desktop has {} windows", wm.window_count());

    let output = std::env::args().nth(1);

    #[cfg(feature = "window")]
    if output.is_none() {
        run_interactive(&mut wm, &mut demo)?;
        wm.tear_down();
        return Ok(());
    }

    run_scripted(&mut wm, &mut demo, output.as_deref().unwrap_or(DEFAULT_OUTPUT))?;

    wm.tear_down();
    Ok(())
}

fn main() {
    env_logger::init();
    info!("Starting exostra simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );

    if let Err(err) = run() {
        error!("Simulator failed: {}", err);
        std::process::exit(1);
    }
    info!("Simulator exiting");
}
