#![allow(dead_code)]

use crate::{Fx, OrderHandle, OrderId, Side, H_NONE};

const PAGE_SHIFT: u32 = 16;
const PAGE_SIZE: usize = 1 << PAGE_SHIFT; // 2^16
const PAGE_MASK: u32 = (PAGE_SIZE as u32) - 1;

/// A resting order as stored in the arena. Intrusive FIFO pointers (`prev`,
/// `next`) make unlinking from its level O(1); `price` doubles as the
/// order's own back-reference to that level (the ladder's levels aren't
/// pointer-stable, so cancel relocates the level via `SideLadder::find_mut`
/// on `price` rather than through a raw pointer/handle).
#[derive(Clone)]
pub struct OrderSlot {
    pub id: OrderId,
    pub side: Side,
    pub price: Fx,
    pub remaining: Fx,

    // intrusive FIFO pointers within the owning LevelQueue
    pub prev: OrderHandle,
    pub next: OrderHandle,
}

impl Default for OrderSlot {
    fn default() -> Self {
        Self {
            id: OrderId::new(),
            side: Side::Buy,
            price: Fx::ZERO,
            remaining: Fx::ZERO,
            prev: H_NONE,
            next: H_NONE,
        }
    }
}

/// Paged, handle-indexed allocator of `OrderSlot`s. A handle encodes
/// `(page_index << 16) | intra_page_offset`. Pages are allocated with exact
/// capacity so appending never reallocates an existing page's backing
/// storage — handles stay valid across subsequent `alloc`s. Pages are never
/// shrunk. Free slots are threaded through a LIFO free-list embedded in
/// `OrderSlot::next`.
pub struct OrderArena {
    pages: Vec<Vec<OrderSlot>>,
    free_head: OrderHandle,
}

impl OrderArena {
    pub fn with_capacity(capacity: u32) -> Self {
        assert!(capacity > 0, "arena capacity must be > 0");
        Self { pages: vec![Vec::with_capacity(PAGE_SIZE)], free_head: H_NONE }
    }

    #[inline]
    fn split(h: OrderHandle) -> (usize, usize) {
        let page = (h.0 >> PAGE_SHIFT) as usize;
        let offset = (h.0 & PAGE_MASK) as usize;
        (page, offset)
    }

    /// Amortized O(1): recycles a freed slot if one is available, otherwise
    /// appends to the tail page (opening a new page when the tail is full).
    pub fn alloc(&mut self) -> OrderHandle {
        if self.free_head != H_NONE {
            let h = self.free_head;
            let (page, offset) = Self::split(h);
            self.free_head = self.pages[page][offset].next;
            self.pages[page][offset] = OrderSlot::default();
            return h;
        }

        let last = self.pages.len() - 1;
        if self.pages[last].len() >= PAGE_SIZE {
            self.pages.push(Vec::with_capacity(PAGE_SIZE));
        }
        let page = self.pages.len() - 1;
        let offset = self.pages[page].len();
        self.pages[page].push(OrderSlot::default());
        OrderHandle(((page as u32) << PAGE_SHIFT) | offset as u32)
    }

    /// Pushes `h` onto the free-list. Double-free is a caller bug, not a
    /// recoverable error (spec.md §7); `NULL` can never be freed.
    pub fn free(&mut self, h: OrderHandle) {
        assert!(h != H_NONE, "cannot free H_NONE");
        let (page, offset) = Self::split(h);
        assert!(page < self.pages.len() && offset < self.pages[page].len(), "handle out of range");
        self.pages[page][offset].next = self.free_head;
        self.free_head = h;
    }

    #[inline]
    pub fn get(&self, h: OrderHandle) -> &OrderSlot {
        let (page, offset) = Self::split(h);
        &self.pages[page][offset]
    }

    #[inline]
    pub fn get_mut(&mut self, h: OrderHandle) -> &mut OrderSlot {
        let (page, offset) = Self::split(h);
        &mut self.pages[page][offset]
    }

    /// Drops all contents, keeps one empty page, clears the free-list.
    /// Test-only convenience.
    pub fn reset(&mut self) {
        self.pages.clear();
        self.pages.push(Vec::with_capacity(PAGE_SIZE));
        self.free_head = H_NONE;
    }
}
