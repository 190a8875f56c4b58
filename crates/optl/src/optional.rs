//! The [`Optional`] container.

/// A value that is explicitly present or absent.
///
/// An absent optional never carries a stale payload: every operation that
/// leaves the receiver absent drops whatever it held before. The container is
/// a plain value type, so copies are independent of one another.
///
/// ```rust
/// use optl::Optional;
///
/// let name = Optional::of("nebula".to_string());
/// assert!(name.is_present());
/// assert_eq!(name.as_ref().get(), "nebula");
///
/// let port: Optional<u16> = Optional::empty();
/// assert_eq!(port.or_else(8080), 8080);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Optional<T> {
    inner: Option<T>,
}

impl<T> Optional<T> {
    /// Wrap a value; the result is always present.
    pub const fn of(value: T) -> Self {
        Self { inner: Some(value) }
    }

    /// Create an absent optional.
    pub const fn empty() -> Self {
        Self { inner: None }
    }

    /// Wrap a nullable reference, cloning the referent when it is non-null.
    ///
    /// `of_nillable(None)` is the same as [`Optional::empty`].
    pub fn of_nillable(value: Option<&T>) -> Self
    where
        T: Clone,
    {
        Self {
            inner: value.cloned(),
        }
    }

    /// Returns `true` if a value is present.
    pub const fn is_present(&self) -> bool {
        self.inner.is_some()
    }

    /// Returns `true` if no value is present.
    pub const fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Return the wrapped value.
    ///
    /// # Panics
    ///
    /// Panics if the optional is absent. Guard with [`is_present`](Self::is_present)
    /// or use one of the `or_else*` variants.
    #[track_caller]
    pub fn get(self) -> T {
        match self.inner {
            Some(value) => value,
            None => panic!("value is not present"),
        }
    }

    /// Return the wrapped value, or `fallback` if absent.
    pub fn or_else(self, fallback: T) -> T {
        self.inner.unwrap_or(fallback)
    }

    /// Return the wrapped value, or the result of `supplier` if absent.
    ///
    /// `supplier` runs only when the optional is absent.
    pub fn or_else_get<F>(self, supplier: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.inner.unwrap_or_else(supplier)
    }

    /// Run `action` with the wrapped value if present.
    pub fn if_present<F>(&self, action: F)
    where
        F: FnOnce(&T),
    {
        if let Some(value) = &self.inner {
            action(value);
        }
    }

    /// Keep the value only if it satisfies `predicate`.
    ///
    /// The predicate is never invoked on an absent optional.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        Self {
            inner: self.inner.filter(predicate),
        }
    }

    /// Borrow the payload, yielding `Optional<&T>`.
    pub const fn as_ref(&self) -> Optional<&T> {
        Optional {
            inner: self.inner.as_ref(),
        }
    }

    /// View the payload as a std [`Option`].
    pub const fn as_option(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    /// Convert into a std [`Option`].
    pub fn into_option(self) -> Option<T> {
        self.inner
    }

    /// Take the value out, leaving the receiver absent.
    pub fn take(&mut self) -> Self {
        Self {
            inner: self.inner.take(),
        }
    }

    /// Store `value` and mark the receiver present.
    pub(crate) fn set(&mut self, value: T) {
        self.inner = Some(value);
    }

    /// Drop any payload and mark the receiver absent.
    pub(crate) fn reset(&mut self) {
        self.inner = None;
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(inner: Option<T>) -> Self {
        Self { inner }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.inner
    }
}
