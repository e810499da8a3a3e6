use core::{
    alloc::Layout,
    ptr::NonNull,
};

use alloc::alloc::{alloc, dealloc, handle_alloc_error};

use crate::trap;

/// Move-only owner of one heap array allocation.
///
/// The owner manages raw memory for `capacity` slots of `T` and frees it
/// when dropped. It never constructs or destroys elements: whoever writes a
/// live value into a slot must drop it in place before the owner is dropped
/// or the slot is reused.
pub struct HeapArray<T> {
    data: NonNull<T>,
    capacity: usize,
}

impl<T> HeapArray<T> {

    /// The unowned state: no allocation, zero capacity, dangling pointer.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Allocates storage for `capacity` slots. The slots are raw memory,
    /// nothing is constructed.
    ///
    /// Zero-size layouts (zero capacity or zero-sized `T`) allocate nothing
    /// and record the capacity against a dangling pointer. Allocation
    /// failure halts execution, it is never reported as a value.
    pub fn new(capacity: usize) -> Self {
        let layout = match Layout::array::<T>(capacity) {
            Ok(layout) => layout,
            Err(_) => trap::fatal(format_args!(
                "heap array layout overflow: {} slots of {} bytes",
                capacity, size_of::<T>(),
            )),
        };
        if layout.size() == 0 {
            return Self {
                data: NonNull::dangling(),
                capacity,
            }
        }
        let Some(data) = NonNull::new(unsafe { alloc(layout) }.cast::<T>()) else {
            handle_alloc_error(layout)
        };
        Self {
            data,
            capacity,
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    #[inline(always)]
    pub fn as_non_null(&self) -> NonNull<T> {
        self.data
    }

    /// Returns a reference to the slot at `index` with no bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be within capacity and the slot must hold a live value.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.capacity);
        unsafe { self.data.add(index).as_ref() }
    }

    /// Mutable form of [`get_unchecked`](Self::get_unchecked).
    ///
    /// # Safety
    ///
    /// Same requirements as [`get_unchecked`](Self::get_unchecked).
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.capacity);
        unsafe { self.data.add(index).as_mut() }
    }
}

impl<T> Drop for HeapArray<T> {

    fn drop(&mut self) {
        // frees the buffer only; live slots must already be dropped
        let layout = match Layout::array::<T>(self.capacity) {
            Ok(layout) => layout,
            Err(_) => return,
        };
        if layout.size() == 0 {
            return
        }
        unsafe { dealloc(self.data.cast::<u8>().as_ptr(), layout) }
    }
}

unsafe impl<T: Send> Send for HeapArray<T> {}
unsafe impl<T: Sync> Sync for HeapArray<T> {}
