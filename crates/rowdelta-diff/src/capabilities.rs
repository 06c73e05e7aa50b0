//! Declared element capabilities and default comparator resolution.
//!
//! An element type declares which structural capabilities it supports
//! (value equality, a stable identity field, shared-instance identity,
//! content hashing). [`ComparatorPair::resolve`] turns that declaration into
//! a concrete identity/equality comparator pair once, at engine construction
//! time, using a fixed precedence. Callers may replace either comparator
//! outright afterwards.

/// The structural capabilities an element type declares.
///
/// Built with const chaining:
///
/// ```
/// use rowdelta_diff::Capabilities;
///
/// const CAPS: Capabilities = Capabilities::none()
///     .with_value_equality()
///     .with_stable_id();
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// The type can compare whole values for equal content.
    pub value_equality: bool,
    /// The type carries a stable identifier that survives content changes.
    pub stable_id: bool,
    /// Two handles can be compared for pointing at the same instance.
    pub shared_instance: bool,
    /// The type can produce a hash of its current content.
    pub content_hashing: bool,
}

impl Capabilities {
    /// No capabilities. Default comparators never match anything.
    pub const fn none() -> Self {
        Self {
            value_equality: false,
            stable_id: false,
            shared_instance: false,
            content_hashing: false,
        }
    }

    pub const fn with_value_equality(mut self) -> Self {
        self.value_equality = true;
        self
    }

    pub const fn with_stable_id(mut self) -> Self {
        self.stable_id = true;
        self
    }

    pub const fn with_shared_instance(mut self) -> Self {
        self.shared_instance = true;
        self
    }

    pub const fn with_content_hashing(mut self) -> Self {
        self.content_hashing = true;
        self
    }
}

/// An element of a diffable tree.
///
/// Implementations declare their [`Capabilities`] and override the hooks the
/// declaration names. Hooks for undeclared capabilities are never called by
/// the resolver; their defaults never match.
///
/// Identity must behave as an equivalence relation (reflexive, symmetric,
/// consistent) within one change-set computation. The engine does not verify
/// this; a violating comparator produces ambiguous matching silently.
pub trait Element {
    const CAPABILITIES: Capabilities;

    /// Whole-value content equality. Requires `value_equality`.
    fn value_eq(&self, _other: &Self) -> bool {
        false
    }

    /// Stable-identifier equality. Requires `stable_id`.
    fn same_id(&self, _other: &Self) -> bool {
        false
    }

    /// Same-instance comparison. Requires `shared_instance`.
    fn same_instance(&self, _other: &Self) -> bool {
        false
    }

    /// Hash of the current content. Requires `content_hashing`.
    fn content_hash(&self) -> u64 {
        0
    }
}

macro_rules! impl_value_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                const CAPABILITIES: Capabilities = Capabilities::none().with_value_equality();

                fn value_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

// Plain values: content comparison only, no identity. Diffing them yields
// insert/delete pairs rather than moves.
impl_value_element!(String, bool, char, i32, i64, u32, u64, usize);

/// A boxed identity or equality comparator over two element references.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> bool>;

/// How content equality is decided for identity-matched elements.
pub enum EqualityPolicy<T> {
    /// A plain function of the old and new values.
    Comparator(Comparator<T>),
    /// Compare the content hash captured from the old instance before the
    /// previous commit against a freshly computed hash of the new instance.
    /// Detects in-place mutation of shared elements, which any value
    /// comparison of an instance against itself cannot.
    HashSnapshot,
}

/// A resolved identity/equality comparator pair.
///
/// Identity answers "do these represent the same logical entity across
/// versions?"; equality answers "is their content equal?" and is consulted
/// only for identity-matched pairs, to decide reloads.
pub struct ComparatorPair<T> {
    identity: Comparator<T>,
    equality: EqualityPolicy<T>,
}

impl<T: Element + 'static> ComparatorPair<T> {
    /// Select default comparators from `T`'s declared capabilities.
    ///
    /// Precedence:
    /// 1. `value_equality` => equality compares whole values.
    /// 2. `stable_id` => identity compares identifiers; otherwise
    ///    `shared_instance` => identity compares instances.
    /// 3. `shared_instance` together with `content_hashing` (and no
    ///    `stable_id`) => equality becomes [`EqualityPolicy::HashSnapshot`],
    ///    overriding rule 1.
    ///
    /// Undeclared capabilities leave comparators that never match.
    pub fn resolve() -> Self {
        let caps = T::CAPABILITIES;

        let mut equality: EqualityPolicy<T> = if caps.value_equality {
            EqualityPolicy::Comparator(Box::new(T::value_eq))
        } else {
            EqualityPolicy::Comparator(Box::new(|_, _| false))
        };

        let identity: Comparator<T> = if caps.stable_id {
            Box::new(T::same_id)
        } else if caps.shared_instance {
            if caps.content_hashing {
                equality = EqualityPolicy::HashSnapshot;
            }
            Box::new(T::same_instance)
        } else {
            Box::new(|_, _| false)
        };

        Self { identity, equality }
    }
}

impl<T> ComparatorPair<T> {
    /// A fully caller-supplied pair.
    pub fn custom(
        identity: impl Fn(&T, &T) -> bool + 'static,
        equality: impl Fn(&T, &T) -> bool + 'static,
    ) -> Self {
        Self {
            identity: Box::new(identity),
            equality: EqualityPolicy::Comparator(Box::new(equality)),
        }
    }

    /// Replace the identity comparator.
    pub fn set_identity(&mut self, identity: impl Fn(&T, &T) -> bool + 'static) {
        self.identity = Box::new(identity);
    }

    /// Replace the equality comparator, dropping any hash-snapshot policy.
    pub fn set_equality(&mut self, equality: impl Fn(&T, &T) -> bool + 'static) {
        self.equality = EqualityPolicy::Comparator(Box::new(equality));
    }

    /// Do `old` and `new` represent the same logical entity?
    pub fn same_identity(&self, old: &T, new: &T) -> bool {
        (self.identity)(old, new)
    }

    /// The active equality policy.
    pub fn equality(&self) -> &EqualityPolicy<T> {
        &self.equality
    }
}
