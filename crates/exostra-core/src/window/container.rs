//! Ordered child registry with z-order bookkeeping.
//!
//! Entries are kept in paint order (back to front): the last entry is the
//! foreground window. Every entry carries its z-order index, which is
//! renumbered 0..N-1 whenever membership or order changes.

use heapless::Vec;
use log::error;

use super::{WindowHandle, WindowId};
use crate::config::MAX_CHILDREN;
use crate::error::{WmError, WmResult};

/// Snapshot of the handles in a container.
pub type HandleList = Vec<WindowHandle, MAX_CHILDREN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZEntry {
    pub id: WindowId,
    pub handle: WindowHandle,
    pub z_order: u8,
}

#[derive(Debug, Default)]
pub struct WindowContainer {
    entries: Vec<ZEntry, MAX_CHILDREN>,
}

impl WindowContainer {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: WindowId) -> Option<&ZEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn find_handle(&self, handle: WindowHandle) -> Option<&ZEntry> {
        self.entries.iter().find(|entry| entry.handle == handle)
    }

    /// Append `handle` in the foreground and return its z-order.
    pub fn add(&mut self, id: WindowId, handle: WindowHandle) -> WmResult<u8> {
        if self.get(id).is_some() {
            error!("Window id {} already exists in container", id);
            return Err(WmError::DuplicateId(id));
        }

        let z_order = self
            .entries
            .iter()
            .map(|entry| entry.z_order)
            .max()
            .map_or(0, |z| z + 1);

        self.entries
            .push(ZEntry {
                id,
                handle,
                z_order,
            })
            .map_err(|_| {
                error!("Container full, cannot add window {}", id);
                WmError::ContainerFull { max: MAX_CHILDREN }
            })?;

        Ok(z_order)
    }

    pub fn remove(&mut self, id: WindowId) -> Option<ZEntry> {
        let pos = self.entries.iter().position(|entry| entry.id == id)?;
        let entry = self.entries.remove(pos);
        self.renumber();
        Some(entry)
    }

    /// Move `id` to the foreground. Returns `false` if it is not present.
    pub fn bring_to_foreground(&mut self, id: WindowId) -> bool {
        let Some(pos) = self.entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        let entry = self.entries.remove(pos);
        // Capacity is unchanged after the removal above
        self.entries.push(entry).ok();
        self.renumber();
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Visit entries back to front until `visitor` returns `false`.
    pub fn for_each(&self, mut visitor: impl FnMut(&ZEntry) -> bool) {
        for entry in self.entries.iter() {
            if !visitor(entry) {
                break;
            }
        }
    }

    /// Visit entries front to back until `visitor` returns `false`.
    pub fn for_each_rev(&self, mut visitor: impl FnMut(&ZEntry) -> bool) {
        for entry in self.entries.iter().rev() {
            if !visitor(entry) {
                break;
            }
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ZEntry> {
        self.entries.iter()
    }

    /// Handles in paint order.
    pub fn handles(&self) -> HandleList {
        self.entries.iter().map(|entry| entry.handle).collect()
    }

    /// Handles in hit-test order.
    pub fn handles_rev(&self) -> HandleList {
        self.entries.iter().rev().map(|entry| entry.handle).collect()
    }

    fn renumber(&mut self) {
        for (z_order, entry) in self.entries.iter_mut().enumerate() {
            entry.z_order = z_order as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(key: usize) -> WindowHandle {
        WindowHandle::new(key, 1)
    }

    #[test]
    fn test_add_assigns_increasing_z_order() {
        let mut container = WindowContainer::new();
        assert_eq!(container.add(1, handle(0)), Ok(0));
        assert_eq!(container.add(2, handle(1)), Ok(1));
        assert_eq!(container.get(2).map(|e| e.z_order), Some(1));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut container = WindowContainer::new();
        container.add(7, handle(0)).unwrap();
        assert_eq!(container.add(7, handle(1)), Err(WmError::DuplicateId(7)));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_full_container_rejected() {
        let mut container = WindowContainer::new();
        for id in 1..=MAX_CHILDREN {
            container.add(id as WindowId, handle(id)).unwrap();
        }
        assert_eq!(
            container.add(200, handle(200)),
            Err(WmError::ContainerFull { max: MAX_CHILDREN })
        );
    }

    #[test]
    fn test_remove_renumbers() {
        let mut container = WindowContainer::new();
        for id in 1..=3 {
            container.add(id, handle(id as usize)).unwrap();
        }
        assert_eq!(container.remove(1).map(|e| e.id), Some(1));
        assert_eq!(container.get(2).map(|e| e.z_order), Some(0));
        assert_eq!(container.get(3).map(|e| e.z_order), Some(1));
        assert!(container.remove(1).is_none());
    }

    #[test]
    fn test_bring_to_foreground() {
        let mut container = WindowContainer::new();
        for id in 1..=3 {
            container.add(id, handle(id as usize)).unwrap();
        }
        assert!(container.bring_to_foreground(1));
        let order: std::vec::Vec<WindowId> = container.iter().map(|e| e.id).collect();
        assert_eq!(order, [2, 3, 1]);
        assert_eq!(container.get(1).map(|e| e.z_order), Some(2));
        assert!(!container.bring_to_foreground(9));
    }

    #[test]
    fn test_visitors_stop_early() {
        let mut container = WindowContainer::new();
        for id in 1..=4 {
            container.add(id, handle(id as usize)).unwrap();
        }

        let mut seen = std::vec::Vec::new();
        container.for_each_rev(|entry| {
            seen.push(entry.id);
            entry.id != 3
        });
        assert_eq!(seen, [4, 3]);

        seen.clear();
        container.for_each(|entry| {
            seen.push(entry.id);
            true
        });
        assert_eq!(seen, [1, 2, 3, 4]);
        assert_eq!(container.handles_rev().first(), Some(&handle(4)));
    }
}
