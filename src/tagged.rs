//! Stateless tagged dispatch.
//!
//! A [`TaggedDispatch`] is a one-byte selector into a static table of pure
//! functions.  It carries no other state: the data each behaviour works on is
//! supplied at call time, so switching behaviour is a tag write and the
//! selector itself is `Copy`.
//!
//! ```text
//!   tag ──▶ B::TABLE[tag] ──▶ fn(Data) -> Output
//! ```
//!
//! The tag is kept in `0..B::TABLE.len()` by every mutator.  Asking for an
//! index outside that range panics; there is no recovery path.

use core::fmt;
use core::marker::PhantomData;

/// A fixed, ordered set of behaviours sharing one signature.
pub trait Behaviours {
    type Data: 'static;
    type Output: 'static;

    /// Behaviour table; position is the tag.  Must not be empty.
    const TABLE: &'static [fn(Self::Data) -> Self::Output];
}

/// Selector over the behaviours of `B`.
pub struct TaggedDispatch<B: Behaviours> {
    tag: u8,
    _behaviours: PhantomData<fn() -> B>,
}

impl<B: Behaviours> TaggedDispatch<B> {
    /// Selector on the first behaviour.
    pub const fn new() -> Self {
        const {
            assert!(!B::TABLE.is_empty(), "behaviour table is empty");
            assert!(B::TABLE.len() <= u8::MAX as usize + 1, "behaviour table too large for a u8 tag");
        }
        Self { tag: 0, _behaviours: PhantomData }
    }

    /// Selector on behaviour `index`.
    ///
    /// # Panics
    ///
    /// If `index >= B::TABLE.len()`.
    pub fn with_index(index: u8) -> Self {
        let mut this = Self::new();
        this.set_index(index);
        this
    }

    /// Number of behaviours in the table.
    pub const fn len(&self) -> usize {
        B::TABLE.len()
    }

    pub const fn is_empty(&self) -> bool {
        B::TABLE.is_empty()
    }

    /// Run the selected behaviour.
    pub fn call(&self, data: B::Data) -> B::Output {
        (B::TABLE[self.tag as usize])(data)
    }

    pub const fn index(&self) -> u8 {
        self.tag
    }

    /// Select behaviour `index`.
    ///
    /// # Panics
    ///
    /// If `index >= B::TABLE.len()`.  A corrupt selector is fatal.
    pub fn set_index(&mut self, index: u8) {
        assert!(
            (index as usize) < B::TABLE.len(),
            "behaviour index {} out of range (table has {})",
            index,
            B::TABLE.len()
        );
        self.tag = index;
    }

    /// Selector on the next behaviour, wrapping to the first.
    #[must_use]
    pub fn rotate(self) -> Self {
        let mut next = self;
        next.rotate_inplace();
        next
    }

    pub fn rotate_inplace(&mut self) {
        let next = self.tag as usize + 1;
        self.tag = if next == B::TABLE.len() { 0 } else { next as u8 };
    }
}

impl<B: Behaviours> Default for TaggedDispatch<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Behaviours> Clone for TaggedDispatch<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Behaviours> Copy for TaggedDispatch<B> {}

impl<B: Behaviours> PartialEq for TaggedDispatch<B> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl<B: Behaviours> Eq for TaggedDispatch<B> {}

impl<B: Behaviours> fmt::Debug for TaggedDispatch<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedDispatch")
            .field("tag", &self.tag)
            .field("len", &B::TABLE.len())
            .finish()
    }
}
