use std::collections::HashMap;

use crate::driver::Driver;
use crate::error::{GlError, Result};

/// Lazily populated name → location map for one linked program.
///
/// Negative answers are cached too: a uniform that is absent or inactive
/// keeps failing without the driver being queried again.
pub struct UniformCache<D: Driver> {
    locations: HashMap<String, Option<D::UniformLocation>>,
}

impl<D: Driver> UniformCache<D> {
    pub fn new() -> Self {
        Self { locations: HashMap::new() }
    }

    /// Resolves `name` in `program`, querying the driver on first use only.
    pub fn location(
        &mut self,
        driver: &D,
        program: D::Program,
        name: &str,
    ) -> Result<&D::UniformLocation> {
        if !self.locations.contains_key(name) {
            let loc = driver.uniform_location(program, name);
            if loc.is_none() {
                log::debug!("uniform {name} not found in program {program:?}");
            }
            self.locations.insert(name.to_owned(), loc);
        }

        match self.locations.get(name) {
            Some(Some(loc)) => Ok(loc),
            _ => Err(GlError::UniformNotFound { name: name.to_owned() }),
        }
    }

    /// Number of cached names, found or not.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Forgets every cached location. Required after the program is relinked.
    pub fn clear(&mut self) {
        self.locations.clear();
    }
}

impl<D: Driver> Default for UniformCache<D> {
    fn default() -> Self {
        Self::new()
    }
}
