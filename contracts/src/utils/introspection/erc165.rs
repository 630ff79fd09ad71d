//! Trait and implementation of the ERC-165 standard, as defined in the [ERC].
//!
//! [ERC]: https://eips.ethereum.org/EIPS/eip-165

use alloy_primitives::aliases::B32;
use chronicles_stylus_proc::interface_id;

/// Interface of the ERC-165 standard, as defined in the [ERC].
///
/// Implementers can declare support of contract interfaces, which others can
/// query.
///
/// NOTE: `supports_interface` has to be reexported with a `#[public]` trait
/// implementation on the contract, see the Examples section.
///
/// # Examples
///
/// ```rust,ignore
/// #[public]
/// impl IErc165 for Collection {
///     fn supports_interface(&self, interface_id: B32) -> bool {
///         self.erc721.supports_interface(interface_id)
///             || Erc165::supports_interface(interface_id)
///     }
/// }
/// ```
///
/// [ERC]: https://eips.ethereum.org/EIPS/eip-165
#[interface_id]
pub trait IErc165 {
    /// Returns true if this contract implements the interface defined by
    /// `interface_id`. See the corresponding [ERC] to learn more about how
    /// these ids are created.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `interface_id` - The interface identifier, as specified in the [ERC].
    ///
    /// [ERC]: https://eips.ethereum.org/EIPS/eip-165#how-interfaces-are-identified
    fn supports_interface(&self, interface_id: B32) -> bool;
}

/// Answers ERC-165 queries for the ERC-165 interface itself.
pub struct Erc165;

impl Erc165 {
    /// Returns true if `interface_id` is the ERC-165 interface id.
    #[must_use]
    pub fn supports_interface(interface_id: B32) -> bool {
        <Self as IErc165>::interface_id() == u32::from_be_bytes(interface_id.0)
    }
}

impl IErc165 for Erc165 {
    fn supports_interface(&self, interface_id: B32) -> bool {
        Self::supports_interface(interface_id)
    }
}
