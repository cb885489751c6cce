//! Runtime configuration and compile-time capacities.
//!
//! Capacities size the fixed `heapless` collections, so they are constants.
//! Everything tunable at runtime lives in [`WmConfig`], which serializes with
//! postcard for storage alongside other device settings.

extern crate alloc;

use alloc::vec::Vec;
use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{WmError, WmResult};

/// Maximum children per window (and top-level windows per manager).
pub const MAX_CHILDREN: usize = 16;

/// Pending messages per window.
pub const QUEUE_CAPACITY: usize = 8;

/// Maximum window text length in bytes.
pub const MAX_TEXT_LEN: usize = 64;

/// Maximum lines a wrapped label renders.
pub const MAX_TEXT_LINES: usize = 8;

/// Unconsumed events kept for the application before the oldest is dropped.
pub const MAX_NOTIFICATIONS: usize = 8;

/// Buttons a prompt lays out.
pub const MAX_PROMPT_BUTTONS: usize = 2;

pub const DEFAULT_MIN_RENDER_INTERVAL_MS: u32 = 100;
pub const DEFAULT_MIN_HIT_TEST_INTERVAL_MS: u32 = 200;

/// Rate limits applied by the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WmConfig {
    /// Minimum time between two renders that changed pixels.
    pub min_render_interval_ms: u32,
    /// Minimum time between two accepted taps.
    pub min_hit_test_interval_ms: u32,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            min_render_interval_ms: DEFAULT_MIN_RENDER_INTERVAL_MS,
            min_hit_test_interval_ms: DEFAULT_MIN_HIT_TEST_INTERVAL_MS,
        }
    }
}

impl WmConfig {
    /// No rate limiting at all; useful for tests and simulators.
    pub const fn unthrottled() -> Self {
        Self {
            min_render_interval_ms: 0,
            min_hit_test_interval_ms: 0,
        }
    }

    pub fn min_render_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.min_render_interval_ms))
    }

    pub fn min_hit_test_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.min_hit_test_interval_ms))
    }

    /// Encode with postcard.
    pub fn to_bytes(&self) -> WmResult<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| WmError::Config)
    }

    /// Decode a config written by [`WmConfig::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> WmResult<Self> {
        postcard::from_bytes(bytes).map_err(|_| WmError::Config)
    }
}
