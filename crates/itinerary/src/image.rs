use std::collections::HashMap;

/// Per-destination cache of attraction image URLs.
///
/// Lookups are by destination and attraction name; the store behind it is
/// up to the caller.
pub trait ImageLookup {
    fn get(&self, destination: &str, name: &str) -> Option<String>;
    fn set(&mut self, destination: &str, name: &str, url: String);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryImageCache {
    entries: HashMap<(String, String), String>,
}

impl MemoryImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ImageLookup for MemoryImageCache {
    fn get(&self, destination: &str, name: &str) -> Option<String> {
        self.entries
            .get(&(destination.to_owned(), name.to_owned()))
            .cloned()
    }

    fn set(&mut self, destination: &str, name: &str, url: String) {
        self.entries
            .insert((destination.to_owned(), name.to_owned()), url);
    }
}

/// Resolve and store images for names the cache does not know yet.
///
/// Returns how many new entries were stored. Names already cached are never
/// passed to `resolve`.
pub fn hydrate<'a, L, F>(
    lookup: &mut L,
    destination: &str,
    names: impl IntoIterator<Item = &'a str>,
    mut resolve: F,
) -> usize
where
    L: ImageLookup + ?Sized,
    F: FnMut(&str, &str) -> Option<String>,
{
    let mut stored = 0;

    for name in names {
        if name.is_empty() || lookup.get(destination, name).is_some() {
            continue;
        }

        match resolve(destination, name) {
            Some(url) => {
                lookup.set(destination, name, url);
                stored += 1;
            }
            None => tracing::debug!(destination, name, "no image found"),
        }
    }

    stored
}
