//! Generational storage for every live window.

use slab::Slab;

use super::{Window, WindowHandle};

/// Slab of windows addressed by [`WindowHandle`].
///
/// Each insert stamps the window with a fresh serial, so a handle to a
/// destroyed window never resolves to whatever reuses its slot.
#[derive(Debug)]
pub(crate) struct WindowArena {
    slab: Slab<Window>,
    next_serial: u32,
}

impl WindowArena {
    pub(crate) fn new() -> Self {
        Self {
            slab: Slab::new(),
            next_serial: 1,
        }
    }

    pub(crate) fn insert(&mut self, mut window: Window) -> WindowHandle {
        let serial = self.next_serial;
        self.next_serial = self.next_serial.wrapping_add(1).max(1);
        window.serial = serial;
        let key = self.slab.insert(window);
        WindowHandle::new(key, serial)
    }

    pub(crate) fn get(&self, handle: WindowHandle) -> Option<&Window> {
        self.slab
            .get(handle.key)
            .filter(|window| window.serial == handle.serial)
    }

    pub(crate) fn get_mut(&mut self, handle: WindowHandle) -> Option<&mut Window> {
        self.slab
            .get_mut(handle.key)
            .filter(|window| window.serial == handle.serial)
    }

    pub(crate) fn remove(&mut self, handle: WindowHandle) -> Option<Window> {
        self.get(handle)?;
        Some(self.slab.remove(handle.key))
    }

    pub(crate) fn len(&self) -> usize {
        self.slab.len()
    }
}
