//! Stack constraint contract.
//!
//! Constraints are supplied by the caller and consulted by the packers; the
//! core never implements one itself.

use crate::geometry::{StackValue, Stackable};
use crate::stack::Stack;
use crate::Result;

/// Predicate object consulted before items are accepted and placed.
///
/// Implementations must not mutate packing inputs. An `Err` is returned to
/// the caller of the packer unchanged.
pub trait StackConstraint: Send + Sync {
    /// Checks whether the item may go into the container at all.
    fn can_accept(&self, stackable: &Stackable) -> Result<bool>;

    /// Checks whether the item may be added to the stack built so far.
    fn accepts(&self, stack: &Stack, stackable: &Stackable) -> Result<bool>;

    /// Checks whether the item, in the given rotation and at the given
    /// absolute position, is supported by the stack built so far.
    fn supports(
        &self,
        stack: &Stack,
        stackable: &Stackable,
        value: &StackValue,
        x: i64,
        y: i64,
        z: i64,
    ) -> Result<bool>;
}
