//! Growable, double-ended, arbitrarily-indexed storage.
//!
//! [`Section`] is the axis container behind the atlas: an ordered sequence
//! whose logical indices may be negative, zero, or positive, and which grows
//! in amortized O(1) from *either* end. It is the piece that lets the atlas
//! cover an unbounded plane without ever renumbering existing chunks.
//!
//! ## Storage layout
//!
//! Elements live in a contiguous window `[start, start + len)` of a backing
//! buffer of capacity `cap`, with a logical base offset `base` so that
//! logical index `i` occupies physical slot `i - base`:
//!
//! ```text
//!            start          start + len
//!              v                v
//! slots: [ . . a b c d e f g h . . . . ]          (cap slots)
//!              ^
//!        logical base + start
//! ```
//!
//! Invariant: `0 <= start` and `start + len <= cap`.
//!
//! ## Growth
//!
//! When an end runs out of slack the capacity doubles (from a floor of 8)
//! until `(cap - len) / 2` covers the request, and the window is copied to
//! the *center* of the new buffer. `base` shifts by the same amount in the
//! opposite direction, so logical indices never move. Centering splits the
//! slack evenly between both ends; insertion order cannot degrade growth to
//! O(n) per operation no matter how front and back pushes alternate.
//!
//! ## Iteration
//!
//! [`Section::iter`] and [`Section::iter_mut`] borrow the section and are
//! checked by the borrow checker alone. The detached [`Cursor`] carries no
//! borrow; it revalidates against a generation counter on every step and
//! fails with [`SectionError::ConcurrentMutation`] if the section was
//! structurally mutated underneath it. Writing through [`Cursor::set`] is
//! the one mutation that keeps the writing cursor valid.

use log::trace;

use crate::error::SectionError;

/// Minimum capacity allocated by the first growth.
const MIN_CAPACITY: usize = 8;

/// An ordered, integer-indexed container with amortized O(1) insertion at
/// both ends and arbitrary (possibly negative) logical indices.
///
/// ```
/// use vastu_atlas::Section;
///
/// let mut section = Section::new();
/// section.push_back("b");
/// section.push_front("a");
/// section.push_back("c");
///
/// // "a" sits at index -1: push_front extends the index range downward.
/// assert_eq!(section.start(), -1);
/// assert_eq!(section.end(), 1);
/// assert_eq!(section.get(-1), Ok(&"a"));
/// ```
#[derive(Clone, Debug)]
pub struct Section<E> {
    /// Backing buffer; slots inside `[start, start + len)` are occupied.
    slots: Vec<Option<E>>,
    /// First occupied physical slot.
    start: usize,
    /// Number of occupied slots.
    len: usize,
    /// Logical index of physical slot 0 (widened so recentering arithmetic
    /// cannot overflow at extreme indices).
    base: i64,
    /// Bumped on every structural mutation; cursors check it.
    generation: u64,
}

impl<E> Section<E> {
    /// Create an empty section whose first appended element will land at
    /// logical index 0.
    pub fn new() -> Self {
        Self::with_origin(0)
    }

    /// Create an empty section whose first appended element will land at
    /// logical index `origin`.
    ///
    /// Used by the atlas to build chunk columns that are index-aligned with
    /// the existing ones.
    pub fn with_origin(origin: i32) -> Self {
        Self {
            slots: Vec::new(),
            start: 0,
            len: 0,
            base: origin as i64,
            generation: 0,
        }
    }

    /// Create a section holding `values` with the first element at logical
    /// index `origin`.
    pub fn from_iter_at<I>(origin: i32, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut section = Self::with_origin(origin);
        section.extend_back(values);
        section
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the section empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current backing capacity in slots.
    ///
    /// Grows geometrically; useful for asserting amortization bounds.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Lowest valid logical index.
    ///
    /// On an empty section this is the index the next `push_back` will use.
    #[inline]
    pub fn start(&self) -> i32 {
        (self.base + self.start as i64) as i32
    }

    /// Highest valid logical index.
    ///
    /// On an empty section this is `start() - 1`; callers must treat that
    /// as "no valid range", never as an index.
    #[inline]
    pub fn end(&self) -> i32 {
        self.start() + self.len as i32 - 1
    }

    /// Borrow the element at the lowest index
    #[inline]
    pub fn first(&self) -> Option<&E> {
        self.slots.get(self.start).and_then(Option::as_ref)
    }

    /// Borrow the element at the highest index
    #[inline]
    pub fn last(&self) -> Option<&E> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.start + self.len - 1].as_ref()
    }

    /// Borrow the element at logical index `index`.
    pub fn get(&self, index: i32) -> Result<&E, SectionError> {
        let slot = self.check(index)?;
        Ok(self.occupied(slot))
    }

    /// Mutably borrow the element at logical index `index`.
    ///
    /// Element-level mutation is not structural; live cursors stay valid.
    pub fn get_mut(&mut self, index: i32) -> Result<&mut E, SectionError> {
        let slot = self.check(index)?;
        Ok(self.slots[slot]
            .as_mut()
            .expect("section invariant: slot in window is occupied"))
    }

    /// Replace the element at logical index `index`, returning the old one.
    ///
    /// Counts as a structural mutation for cursor purposes (use
    /// [`Cursor::set`] to write without invalidating the cursor).
    pub fn set(&mut self, index: i32, value: E) -> Result<E, SectionError> {
        let slot = self.check(index)?;
        self.generation += 1;
        Ok(self.slots[slot]
            .replace(value)
            .expect("section invariant: slot in window is occupied"))
    }

    /// Append `value` at the high end (logical index `end() + 1`).
    pub fn push_back(&mut self, value: E) {
        self.ensure_spare(1, false);
        self.slots[self.start + self.len] = Some(value);
        self.len += 1;
        self.generation += 1;
    }

    /// Prepend `value` at the low end (logical index `start() - 1`).
    pub fn push_front(&mut self, value: E) {
        self.ensure_spare(1, true);
        self.slots[self.start - 1] = Some(value);
        self.start -= 1;
        self.len += 1;
        self.generation += 1;
    }

    /// Append all of `values` at the high end, preserving their order.
    pub fn extend_back<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = E>,
    {
        let batch: Vec<E> = values.into_iter().collect();
        self.ensure_spare(batch.len(), false);
        for value in batch {
            self.slots[self.start + self.len] = Some(value);
            self.len += 1;
        }
        self.generation += 1;
    }

    /// Prepend all of `values` at the low end.
    ///
    /// Equivalent to calling [`push_front`](Self::push_front) for each value
    /// in order: the first element of `values` ends up adjacent to the old
    /// first element, and the batch reads back in reverse of input order.
    pub fn extend_front<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = E>,
    {
        let batch: Vec<E> = values.into_iter().collect();
        self.ensure_spare(batch.len(), true);
        for value in batch {
            self.slots[self.start - 1] = Some(value);
            self.start -= 1;
            self.len += 1;
        }
        self.generation += 1;
    }

    /// Remove and return the element at the highest index.
    pub fn pop_back(&mut self) -> Result<E, SectionError> {
        if self.len == 0 {
            return Err(SectionError::Empty);
        }
        self.len -= 1;
        self.generation += 1;
        Ok(self.slots[self.start + self.len]
            .take()
            .expect("section invariant: slot in window is occupied"))
    }

    /// Remove and return the element at the lowest index.
    pub fn pop_front(&mut self) -> Result<E, SectionError> {
        if self.len == 0 {
            return Err(SectionError::Empty);
        }
        let value = self.slots[self.start]
            .take()
            .expect("section invariant: slot in window is occupied");
        self.start += 1;
        self.len -= 1;
        self.generation += 1;
        Ok(value)
    }

    /// Iterate over elements in ascending index order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            inner: self.slots[self.start..self.start + self.len].iter(),
        }
    }

    /// Iterate mutably over elements in ascending index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut E> {
        self.slots[self.start..self.start + self.len]
            .iter_mut()
            .map(|slot| {
                slot.as_mut()
                    .expect("section invariant: slot in window is occupied")
            })
    }

    /// Iterate over `(logical index, element)` pairs in ascending order.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (i32, &E)> {
        let start = self.start();
        self.iter()
            .enumerate()
            .map(move |(i, e)| (start + i as i32, e))
    }

    /// Create a detached cursor positioned before the first element.
    ///
    /// The cursor holds no borrow; pass the section back into each cursor
    /// method. Any structural mutation of the section between steps makes
    /// the next step fail with [`SectionError::ConcurrentMutation`].
    pub fn cursor(&self) -> Cursor {
        Cursor {
            next: self.start(),
            last: None,
            expected: self.generation,
        }
    }

    /// Map logical `index` to its physical slot, or report `OutOfRange`.
    fn check(&self, index: i32) -> Result<usize, SectionError> {
        let lo = self.start();
        let hi = self.end();
        if self.len == 0 || index < lo || index > hi {
            return Err(SectionError::OutOfRange { index, lo, hi });
        }
        Ok((index as i64 - self.base) as usize)
    }

    #[inline]
    fn occupied(&self, slot: usize) -> &E {
        self.slots[slot]
            .as_ref()
            .expect("section invariant: slot in window is occupied")
    }

    /// Make sure `need` free slots exist at the requested end.
    fn ensure_spare(&mut self, need: usize, front: bool) {
        let spare = if front {
            self.start
        } else {
            self.slots.len() - self.start - self.len
        };
        if spare < need {
            self.grow(need);
        }
    }

    /// Reallocate (or just recenter) so that each side has at least `need`
    /// free slots, without moving any logical index.
    fn grow(&mut self, need: usize) {
        let mut cap = self.slots.len().max(MIN_CAPACITY);
        while (cap - self.len) / 2 < need {
            cap *= 2;
        }
        let new_start = (cap - self.len) / 2;
        let mut slots: Vec<Option<E>> = Vec::new();
        slots.resize_with(cap, || None);
        for (i, slot) in self.slots[self.start..self.start + self.len]
            .iter_mut()
            .enumerate()
        {
            slots[new_start + i] = slot.take();
        }
        trace!(
            "section grow: capacity {} -> {}, window recentered at {}",
            self.slots.len(),
            cap,
            new_start
        );
        // Shift base so logical slot mapping is unchanged.
        self.base += self.start as i64 - new_start as i64;
        self.start = new_start;
        self.slots = slots;
    }
}

impl<E> Default for Section<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E> IntoIterator for &'a Section<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending borrowed iterator over a [`Section`], created by
/// [`Section::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a, E> {
    inner: std::slice::Iter<'a, Option<E>>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|slot| {
            slot.as_ref()
                .expect("section invariant: slot in window is occupied")
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

/// A detached, fail-fast iteration cursor over a [`Section`].
///
/// Holds logical positions instead of borrows, so a section can be mutated
/// while a cursor exists; the cursor then reports
/// [`SectionError::ConcurrentMutation`] on its next step instead of
/// returning stale elements.
#[derive(Clone, Debug)]
pub struct Cursor {
    /// Logical index the next `next()` call will return.
    next: i32,
    /// Logical index of the element last returned, if any.
    last: Option<i32>,
    /// Generation the section had when this cursor was last in sync.
    expected: u64,
}

impl Cursor {
    /// Advance and borrow the next element, or `Ok(None)` past the end.
    pub fn next<'a, E>(&mut self, section: &'a Section<E>) -> Result<Option<&'a E>, SectionError> {
        self.check_sync(section)?;
        if section.is_empty() || self.next > section.end() {
            return Ok(None);
        }
        let value = section.get(self.next)?;
        self.last = Some(self.next);
        self.next += 1;
        Ok(Some(value))
    }

    /// Logical index of the element the next `next()` call will return
    #[inline]
    pub fn next_index(&self) -> i32 {
        self.next
    }

    /// Logical index of the element most recently returned
    #[inline]
    pub fn previous_index(&self) -> i32 {
        self.next - 1
    }

    /// Replace the element last returned by `next()`, returning the old one.
    ///
    /// Unlike [`Section::set`], this keeps the cursor valid: it re-syncs to
    /// the section's new generation after writing. Errors with `OutOfRange`
    /// if no element has been returned yet.
    pub fn set<E>(&mut self, section: &mut Section<E>, value: E) -> Result<E, SectionError> {
        self.check_sync(section)?;
        let at = self.last.ok_or(SectionError::OutOfRange {
            index: self.next - 1,
            lo: section.start(),
            hi: section.end(),
        })?;
        let old = section.set(at, value)?;
        self.expected = section.generation;
        Ok(old)
    }

    fn check_sync<E>(&self, section: &Section<E>) -> Result<(), SectionError> {
        if self.expected != section.generation {
            return Err(SectionError::ConcurrentMutation);
        }
        Ok(())
    }
}
