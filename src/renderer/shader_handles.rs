//! Shader Handle Cache
//!
//! Resolves attribute and uniform names of a linked program to integer
//! handles and memoizes the successful lookups.
//!
//! | Lookup result          | Returned handle              | Cached |
//! |------------------------|------------------------------|--------|
//! | attribute found        | attribute location           | yes    |
//! | uniform found          | uniform location             | yes    |
//! | neither                | [`ShaderHandle::NOT_FOUND`]  | no     |
//!
//! Misses are not cached, so a name that becomes resolvable after a reload is
//! picked up on the next query. [`ShaderHandleCache::invalidate`] must be
//! called whenever the underlying program is relinked.

use std::borrow::Cow;

use rustc_hash::FxHashMap;

/// Attribute or uniform location, or the `-1` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(i32);

impl ShaderHandle {
    pub const NOT_FOUND: Self = Self(-1);

    #[inline]
    #[must_use]
    pub fn new(location: u32) -> Self {
        Self(i32::try_from(location).unwrap_or(-1))
    }

    #[inline]
    #[must_use]
    pub fn is_found(self) -> bool {
        self.0 >= 0
    }

    /// The location, or `None` for the sentinel.
    #[inline]
    #[must_use]
    pub fn location(self) -> Option<u32> {
        u32::try_from(self.0).ok()
    }

    /// The raw value as a graphics API expects it.
    #[inline]
    #[must_use]
    pub fn raw(self) -> i32 {
        self.0
    }
}

impl Default for ShaderHandle {
    fn default() -> Self {
        Self::NOT_FOUND
    }
}

/// Location queries against one linked program.
pub trait HandleResolver {
    fn attribute_location(&self, name: &str) -> Option<u32>;
    fn uniform_location(&self, name: &str) -> Option<u32>;
}

/// Name → handle memo for a single program.
#[derive(Debug, Clone, Default)]
pub struct ShaderHandleCache {
    label: Cow<'static, str>,
    handles: FxHashMap<String, ShaderHandle>,
    generation: u64,
}

impl ShaderHandleCache {
    #[must_use]
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            handles: FxHashMap::default(),
            generation: 0,
        }
    }

    /// Attribute lookup first, then uniform; the sentinel if neither exists.
    pub fn resolve(&mut self, resolver: &impl HandleResolver, name: &str) -> ShaderHandle {
        if let Some(&handle) = self.handles.get(name) {
            return handle;
        }

        let location = resolver
            .attribute_location(name)
            .or_else(|| resolver.uniform_location(name));

        match location {
            Some(location) => {
                let handle = ShaderHandle::new(location);
                self.handles.insert(name.to_owned(), handle);
                handle
            }
            None => {
                log::debug!("Shader '{}': handle '{name}' not found", self.label);
                ShaderHandle::NOT_FOUND
            }
        }
    }

    pub fn resolve_all<const N: usize>(
        &mut self,
        resolver: &impl HandleResolver,
        names: [&str; N],
    ) -> [ShaderHandle; N] {
        names.map(|name| self.resolve(resolver, name))
    }

    /// Drops every memoized handle. Call after the program is relinked.
    pub fn invalidate(&mut self) {
        self.handles.clear();
        self.generation += 1;
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handles.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of invalidations so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
