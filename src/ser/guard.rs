use crate::error::{Error, Result};
use crate::value::Object;

/// Identity-based record of the mappings on the current path.
///
/// One guard belongs to exactly one top-level encoding call and is threaded
/// through the recursion, so separate calls never observe each other.
#[derive(Default)]
pub(crate) struct CycleGuard {
    ancestors: Vec<Object>,
}

impl CycleGuard {
    /// Records `object` as an ancestor of everything visited until the
    /// matching [`leave`](Self::leave).
    ///
    /// Fails without recording anything if `object` is already an ancestor.
    pub(crate) fn enter(&mut self, object: &Object) -> Result<()> {
        if self.ancestors.iter().rev().any(|a| a.ptr_eq(object)) {
            #[cfg(feature = "tracing")]
            tracing::debug!(depth = self.ancestors.len(), "cyclic reference detected");
            return Err(Error::CyclicReference);
        }
        self.ancestors.push(object.clone());
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.ancestors.pop();
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.ancestors.len()
    }
}
