//! Interface a contract must implement to receive ERC-721 tokens through
//! [`super::IErc721::safe_transfer_from`].
#![allow(missing_docs)]
#![cfg_attr(coverage_nightly, coverage(off))]
use alloc::{vec, vec::Vec};

use alloy_primitives::{aliases::B32, Address, U256};
use chronicles_stylus_proc::interface_id;
use stylus_sdk::{abi::Bytes, function_selector, prelude::*};

/// The value [`IErc721Receiver::on_erc721_received`] must return to accept a
/// token.
pub const RECEIVER_FN_SELECTOR: B32 = B32::new(function_selector!(
    "onERC721Received",
    Address,
    Address,
    U256,
    Bytes,
));

sol_interface! {
    /// [`super::Erc721`] token receiver Solidity interface.
    ///
    /// Check [`super::IErc721Receiver`] trait for more details.
    interface IErc721ReceiverInterface {
        /// See [`super::IErc721Receiver::on_erc721_received`].
        #[allow(missing_docs)]
        function onERC721Received(
            address operator,
            address from,
            uint256 token_id,
            bytes calldata data
        ) external returns (bytes4);
    }
}

/// Receiver side of [`super::IErc721::safe_transfer_from`].
#[interface_id]
pub trait IErc721Receiver {
    /// Called whenever a token is transferred to this contract through
    /// [`super::IErc721::safe_transfer_from`] or
    /// [`super::IErc721::safe_transfer_from_with_data`].
    ///
    /// It must return [`RECEIVER_FN_SELECTOR`] to confirm the transfer. Any
    /// other value, a revert, or a missing implementation rejects the
    /// transfer.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `operator` - Account that initiated the transfer.
    /// * `from` - Previous owner of the token.
    /// * `token_id` - Token id as a number.
    /// * `data` - Additional data with no specified format.
    ///
    /// # Errors
    ///
    /// * May return a custom error, which rejects the transfer.
    #[selector(name = "onERC721Received")]
    fn on_erc721_received(
        &mut self,
        operator: Address,
        from: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<B32, Vec<u8>>;
}
