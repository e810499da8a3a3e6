use core::{
    fmt::{self, Debug, Formatter},
    mem::{needs_drop, replace},
    ops::{Index, IndexMut},
    ptr::NonNull,
    slice,
};

use crate::{
    fatal_assert,
    heap_array::HeapArray,
};

/// A growable contiguous sequence over one heap allocation.
///
/// Live elements occupy indices `0..len()` of a buffer with room for
/// `capacity()` elements, `len() <= capacity()` always. The buffer is owned
/// by a [`HeapArray`], which frees memory but never destroys elements; the
/// vector constructs elements by placement write and destroys them by
/// in-place drop, so slots beyond the live range are plain uninitialized
/// memory with no destructor obligations.
///
/// Construction allocates [`MIN_CAPACITY`](Self::MIN_CAPACITY) slots up
/// front. Appending to a full vector doubles the capacity and relocates the
/// live range into a fresh allocation, preserving order and index;
/// relocation moves the elements, it never clones or drops them.
///
/// Checked access is the `Index` operators, which halt on a bad index.
/// Unchecked access is spelled `unsafe`
/// ([`get_unchecked`](Self::get_unchecked) and the raw pointers), for the
/// hot paths that have already established the bound.
pub struct HeapVec<T> {
    storage: HeapArray<T>,
    len: usize,
}

impl<T> HeapVec<T> {

    /// Capacity of a freshly constructed vector, and the floor every
    /// growth step re-establishes.
    pub const MIN_CAPACITY: usize = 8;

    /// Creates an empty vector backed by a fresh
    /// [`MIN_CAPACITY`](Self::MIN_CAPACITY)-slot allocation.
    pub fn new() -> Self {
        Self {
            storage: HeapArray::new(Self::MIN_CAPACITY),
            len: 0,
        }
    }

    /// Creates an empty vector with room for `capacity` elements.
    /// Requests below [`MIN_CAPACITY`](Self::MIN_CAPACITY) are raised
    /// to it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: HeapArray::new(capacity.max(Self::MIN_CAPACITY)),
            len: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` after the last live element, growing first when the
    /// buffer is full. Amortized O(1); a growth step is O(len) and moves
    /// the buffer, invalidating raw pointers into it.
    #[inline(always)]
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }
        unsafe { self.storage.as_non_null().add(self.len).write(value) };
        self.len += 1;
    }

    /// Destroys the last live element in place and shortens the live range
    /// by one. The dropped slot keeps its memory; capacity is unchanged.
    ///
    /// Calling this on an empty vector is a fatal precondition violation:
    /// execution halts, no error value is returned.
    #[inline(always)]
    pub fn remove_last(&mut self) {
        fatal_assert!(self.len > 0, "remove_last on empty vector");
        self.len -= 1;
        unsafe { self.storage.as_non_null().add(self.len).drop_in_place() };
    }

    /// Returns a reference to the element at `index` with no bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// `index < len()` must hold. Debug builds assert the bound, release
    /// builds do not.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len, "index {} out of bounds for length {}", index, self.len);
        unsafe { self.storage.get_unchecked(index) }
    }

    /// Mutable form of [`get_unchecked`](Self::get_unchecked).
    ///
    /// # Safety
    ///
    /// Same requirements as [`get_unchecked`](Self::get_unchecked).
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {} out of bounds for length {}", index, self.len);
        unsafe { self.storage.get_unchecked_mut(index) }
    }

    /// Grows capacity to exactly `new_capacity`, relocating the live range
    /// into a fresh allocation. No-op when `new_capacity` does not exceed
    /// the current capacity; never shrinks, `len` and element values are
    /// unchanged either way.
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity() {
            return
        }
        self.relocate(new_capacity);
    }

    /// Sets the live length to `new_len`, dropping the tail in place when
    /// shrinking and appending `f()` values when growing. Growth reserves
    /// exactly `new_len` slots if the buffer is too small.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
        where
            F: FnMut() -> T
    {
        if new_len < self.len {
            let old_len = self.len;
            self.len = new_len;
            unsafe {
                drop_range(self.storage.as_non_null().add(new_len), old_len - new_len)
            };
        }
        else if new_len > self.len {
            if new_len > self.capacity() {
                self.relocate(new_len);
            }
            let data = self.storage.as_non_null();
            while self.len < new_len {
                unsafe { data.add(self.len).write(f()) };
                self.len += 1;
            }
        }
    }

    /// [`resize_with`](Self::resize_with) filling appended slots with
    /// `T::default()`.
    pub fn resize(&mut self, new_len: usize)
        where
            T: Default
    {
        self.resize_with(new_len, T::default)
    }

    /// Destroys every live element in place and resets the length to zero.
    /// Capacity is retained for reuse.
    pub fn clear(&mut self) {
        let old_len = self.len;
        self.len = 0;
        unsafe { drop_range(self.storage.as_non_null(), old_len) };
    }

    /// Moves the buffer out, returning a vector that owns it and leaving
    /// `self` with zero length, zero capacity and no allocation. The
    /// drained vector stays usable: the next growth re-establishes
    /// [`MIN_CAPACITY`](Self::MIN_CAPACITY).
    pub fn take(&mut self) -> Self {
        Self {
            storage: replace(&mut self.storage, HeapArray::empty()),
            len: replace(&mut self.len, 0),
        }
    }

    /// Base of the buffer. Valid for reads of `len()` elements; moved by
    /// any growth step.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Mutable form of [`as_ptr`](Self::as_ptr).
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr(), self.len) }
    }

    /// Doubles capacity. The construction minimum is the floor, so a
    /// drained zero-capacity vector grows back to it instead of doubling
    /// zero.
    fn grow(&mut self) {
        self.relocate((self.capacity() * 2).max(Self::MIN_CAPACITY));
    }

    /// The growth step: allocate a fresh owner, move the live range across
    /// index for index, install it. The outgoing owner frees the old
    /// buffer; its slots are dead after the move, so nothing drops twice.
    fn relocate(&mut self, new_capacity: usize) {
        debug_assert!(self.len <= new_capacity);
        let next = HeapArray::new(new_capacity);
        unsafe { move_range(self.storage.as_non_null(), next.as_non_null(), self.len) };
        self.storage = next;
    }
}

impl<T> Default for HeapVec<T> {

    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for HeapVec<T> {

    /// Copies preserve the source's capacity, not just its length.
    fn clone(&self) -> Self {
        let mut out = Self {
            storage: HeapArray::new(self.capacity()),
            len: 0,
        };
        for i in 0..self.len {
            out.push(unsafe { self.get_unchecked(i) }.clone());
        }
        out
    }

    fn clone_from(&mut self, source: &Self) {
        *self = source.clone();
    }
}

impl<T: Debug> Debug for HeapVec<T> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T> Index<usize> for HeapVec<T> {

    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        if index >= self.len {
            panic!("index {} out of bounds for length {}", index, self.len)
        }
        unsafe { self.storage.get_unchecked(index) }
    }
}

impl<T> IndexMut<usize> for HeapVec<T> {

    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        if index >= self.len {
            panic!("index {} out of bounds for length {}", index, self.len)
        }
        unsafe { self.storage.get_unchecked_mut(index) }
    }
}

impl<T> Drop for HeapVec<T> {

    #[inline(always)]
    fn drop(&mut self) {
        self.clear()
    }
}

/// Moves `len` elements between non-overlapping buffers, preserving index.
/// Source slots are dead afterwards.
#[inline(always)]
unsafe fn move_range<T>(src: NonNull<T>, dst: NonNull<T>, len: usize) {
    if needs_drop::<T>() {
        unsafe {
            for i in 0..len {
                dst.add(i).write(src.add(i).read());
            }
        }
    }
    else {
        unsafe { src.copy_to_nonoverlapping(dst, len) }
    }
}

/// Destroys `len` live elements starting at `ptr`, in index order.
#[inline(always)]
unsafe fn drop_range<T>(ptr: NonNull<T>, len: usize) {
    if needs_drop::<T>() {
        unsafe {
            for i in 0..len {
                ptr.add(i).drop_in_place();
            }
        }
    }
}
