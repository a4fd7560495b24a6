use std::sync::{Arc, RwLock};

use crate::{
    foundation::error::{AdreelError, AdreelResult},
    scene::model::Composition,
};

/// Shared, hot-swappable composition.
///
/// Readers take an `Arc` snapshot with [`CompositionHandle::load`] and keep evaluating it even
/// if a new composition is installed meanwhile; nothing is ever mutated in place.
#[derive(Debug)]
pub struct CompositionHandle {
    current: RwLock<Arc<Composition>>,
}

impl CompositionHandle {
    /// Validate and wrap an initial composition.
    pub fn new(comp: Composition) -> AdreelResult<Self> {
        comp.validate()?;
        Ok(Self {
            current: RwLock::new(Arc::new(comp)),
        })
    }

    /// Current snapshot.
    pub fn load(&self) -> AdreelResult<Arc<Composition>> {
        let guard = self
            .current
            .read()
            .map_err(|_| AdreelError::evaluation("composition handle lock poisoned"))?;
        Ok(Arc::clone(&guard))
    }

    /// Validate `next` and install it, returning the snapshot it replaced.
    ///
    /// An invalid composition leaves the current snapshot untouched.
    pub fn replace(&self, next: Composition) -> AdreelResult<Arc<Composition>> {
        next.validate()?;
        let mut guard = self
            .current
            .write()
            .map_err(|_| AdreelError::evaluation("composition handle lock poisoned"))?;
        let prev = std::mem::replace(&mut *guard, Arc::new(next));
        tracing::debug!(scenes = guard.scenes.len(), "composition replaced");
        Ok(prev)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/snapshot.rs"]
mod tests;
