//! Pluggable pre-commit constraint validation.

use graphstack_types::ChangeSet;

/// Optional validation hook run against the pending change set before it is
/// handed to the storage engine.
///
/// The default implementation accepts everything; install a validator via
/// [`Graph::set_validator`] to enforce domain rules. A rejection surfaces as
/// [`GraphError::Constraint`] and leaves the working set intact.
///
/// [`Graph::set_validator`]: crate::Graph::set_validator
/// [`GraphError::Constraint`]: crate::GraphError::Constraint
pub trait ConstraintValidator: Send + Sync {
    /// Validate a change set before it is committed.
    /// Return `Err(reason)` to reject the commit.
    fn validate(&self, changes: &ChangeSet) -> Result<(), String> {
        let _ = changes;
        Ok(())
    }
}

/// The default validator: every change set is acceptable.
pub(crate) struct AlwaysValid;

impl ConstraintValidator for AlwaysValid {}
