//! Fixed-capacity singly-linked list laid out over an inline array.
//!
//! Slots are handed out in order and never freed individually, so the first
//! `len` slots are always the initialized ones no matter how they are linked.
//! Links are stored in the smallest [`Link`] type able to index the capacity;
//! index `N` marks the end of the list.

use std::fmt;
use std::mem::MaybeUninit;

/// Unsigned integer used for the links of a [`FlatList`].
pub trait Link: Copy + Eq + fmt::Debug {
    /// Largest capacity representable (the end marker equals the capacity).
    const MAX_CAPACITY: usize;

    fn from_index(index: usize) -> Self;

    fn index(self) -> usize;
}

macro_rules! impl_link {
    ($($ty:ty),*) => {
        $(
            impl Link for $ty {
                const MAX_CAPACITY: usize = <$ty>::MAX as usize;

                #[inline(always)]
                fn from_index(index: usize) -> Self {
                    debug_assert!(index <= Self::MAX_CAPACITY);
                    index as $ty
                }

                #[inline(always)]
                fn index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_link!(u8, u16, u32, usize);

const BEFORE_BEGIN: usize = usize::MAX;

/// Position in a [`FlatList`]: a slot, the end marker, or the front marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor(usize);

pub struct FlatList<T, const N: usize, L: Link = u32> {
    len: usize,
    head: L,
    links: [L; N],
    data: [MaybeUninit<T>; N],
}

impl<T, const N: usize, L: Link> Default for FlatList<T, N, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize, L: Link> FlatList<T, N, L> {
    pub fn new() -> Self {
        const { assert!(N > 0, "a flat list needs at least one slot") };
        assert!(N <= L::MAX_CAPACITY, "link type too narrow for capacity {N}");
        Self {
            len: 0,
            head: L::from_index(N),
            links: [L::from_index(N); N],
            data: [const { MaybeUninit::uninit() }; N],
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn before_begin(&self) -> Cursor {
        Cursor(BEFORE_BEGIN)
    }

    pub fn begin(&self) -> Cursor {
        Cursor(self.head.index())
    }

    pub fn end(&self) -> Cursor {
        Cursor(N)
    }

    pub fn next(&self, cursor: Cursor) -> Cursor {
        Cursor(self.link(cursor).index())
    }

    /// Places `value` in the next free slot, linked right after `cursor`.
    ///
    /// # Panics
    ///
    /// If the list is full or `cursor` is the end marker.
    pub fn emplace_after(&mut self, cursor: Cursor, value: T) -> Cursor {
        assert!(self.len < N, "flat list capacity {N} exceeded");
        let slot = self.len;
        self.data[slot].write(value);
        self.links[slot] = self.link(cursor);
        self.set_link(cursor, L::from_index(slot));
        self.len += 1;
        Cursor(slot)
    }

    pub fn get(&self, cursor: Cursor) -> &T {
        assert!(cursor.0 < self.len, "{cursor:?} is not dereferenceable");
        // Slots below `len` are initialized.
        unsafe { self.data[cursor.0].assume_init_ref() }
    }

    pub fn get_mut(&mut self, cursor: Cursor) -> &mut T {
        assert!(cursor.0 < self.len, "{cursor:?} is not dereferenceable");
        unsafe { self.data[cursor.0].assume_init_mut() }
    }

    pub fn iter(&self) -> Iter<'_, T, N, L> {
        Iter {
            list: self,
            cur: self.begin(),
        }
    }

    /// Drops every live payload.
    pub fn clear(&mut self) {
        let len = self.len;
        // Reset first: a panicking destructor must not cause a double drop.
        self.len = 0;
        self.head = L::from_index(N);
        for slot in &mut self.data[..len] {
            unsafe { slot.assume_init_drop() };
        }
    }

    #[inline]
    fn link(&self, cursor: Cursor) -> L {
        match cursor.0 {
            BEFORE_BEGIN => self.head,
            slot => {
                debug_assert!(slot < self.len);
                self.links[slot]
            }
        }
    }

    #[inline]
    fn set_link(&mut self, cursor: Cursor, to: L) {
        match cursor.0 {
            BEFORE_BEGIN => self.head = to,
            slot => self.links[slot] = to,
        }
    }
}

impl<T, const N: usize, L: Link> Drop for FlatList<T, N, L> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, const N: usize, L: Link> fmt::Debug for FlatList<T, N, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub struct Iter<'a, T, const N: usize, L: Link> {
    list: &'a FlatList<T, N, L>,
    cur: Cursor,
}

impl<'a, T, const N: usize, L: Link> Iterator for Iter<'a, T, N, L> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cur == self.list.end() {
            return None;
        }
        let value = self.list.get(self.cur);
        self.cur = self.list.next(self.cur);
        Some(value)
    }
}
