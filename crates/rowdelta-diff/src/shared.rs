//! A shared, mutable element handle with reference identity.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::capabilities::{Capabilities, Element};

/// A handle to a shared, mutable element.
///
/// Cloning a `Shared` produces another handle to the same instance, so the
/// same logical entity can appear in consecutive tree versions while its
/// content is mutated in place. Identity is the instance; content changes
/// are detected through the engine's hash snapshot (`T: Hash`).
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    /// Wrap a value in a new shared handle.
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Immutably borrow the content.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrow the content.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Do both handles point at the same instance?
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&*self.0.borrow()).finish()
    }
}

impl<T: Hash> Element for Shared<T> {
    const CAPABILITIES: Capabilities = Capabilities::none()
        .with_shared_instance()
        .with_content_hashing();

    fn same_instance(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }

    fn content_hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.0.borrow().hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_instance() {
        let a = Shared::new(5u32);
        let b = a.clone();
        let c = Shared::new(5u32);

        assert!(a.same_instance(&b));
        assert!(!a.same_instance(&c));
    }

    #[test]
    fn content_hash_tracks_mutation() {
        let a = Shared::new(5u32);
        let before = a.content_hash();
        *a.borrow_mut() = 6;
        assert_ne!(a.content_hash(), before);
    }

    #[test]
    fn equal_content_hashes_equally_across_instances() {
        let a = Shared::new("text".to_string());
        let b = Shared::new("text".to_string());
        assert_eq!(a.content_hash(), b.content_hash());
    }
}
