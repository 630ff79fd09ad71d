//! Arithmetic on storage integers that `stylus_sdk::storage` lacks.
use alloy_primitives::Uint;
use alloy_sol_types::sol_data::{IntBitCount, SupportedInt};
use stylus_sdk::storage::StorageUint;

/// Adds a value to a storage integer in place, ignoring overflow.
///
/// Only use it where the surrounding invariants bound the value, e.g. token
/// balances, which never exceed the number of minted tokens.
pub(crate) trait AddAssignUnchecked<T> {
    /// Adds `rhs` and assigns the result to `self`, ignoring overflow.
    fn add_assign_unchecked(&mut self, rhs: T);
}

impl<const B: usize, const L: usize> AddAssignUnchecked<Uint<B, L>>
    for StorageUint<B, L>
where
    IntBitCount<B>: SupportedInt,
{
    fn add_assign_unchecked(&mut self, rhs: Uint<B, L>) {
        let new_value = self.get() + rhs;
        self.set(new_value);
    }
}

/// Subtracts a value from a storage integer in place, ignoring underflow.
pub(crate) trait SubAssignUnchecked<T> {
    /// Subtracts `rhs` and assigns the result to `self`, ignoring underflow.
    fn sub_assign_unchecked(&mut self, rhs: T);
}

impl<const B: usize, const L: usize> SubAssignUnchecked<Uint<B, L>>
    for StorageUint<B, L>
where
    IntBitCount<B>: SupportedInt,
{
    fn sub_assign_unchecked(&mut self, rhs: Uint<B, L>) {
        let new_value = self.get() - rhs;
        self.set(new_value);
    }
}
