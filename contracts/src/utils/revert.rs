//! Revert reasons shared by every component.
//!
//! Components fail with a Solidity `Error(string)` revert carrying one of the
//! short reasons below, so callers and indexers can match on the exact text.
use alloc::{string::String, vec::Vec};

use alloy_sol_types::{Revert, SolError};

/// The caller is not allowed to perform the operation.
pub const FORBIDDEN: &str = "Forbidden";
/// An address argument is [`alloy_primitives::Address::ZERO`].
pub const ZERO_ADDRESS: &str = "Zero address";
/// The token id was never minted or has been burned.
pub const INVALID_TOKEN: &str = "Invalid token";
/// The owner of a token tried to approve itself.
pub const OWNER_APPROVAL: &str = "Owner can't be approved";
/// The proposed owner already owns the contract.
pub const ALREADY_OWNER: &str = "Already Owner";
/// The attached value is below the mint price.
pub const NOT_ENOUGH_VALUE: &str = "Not enough value";
/// There is nothing to withdraw.
pub const NO_BALANCE: &str = "No balance";
/// Sending the native currency to the recipient failed.
pub const TRANSFER_FAILED: &str = "Transfer failed";
/// The receiving contract did not accept an ERC-721 token.
pub const INVALID_RECEIVER: &str = "Invalid receiver";
/// The storage was already initialized.
pub const ALREADY_INITIALIZED: &str = "Already initialized";
/// Contract creation failed.
pub const DEPLOYMENT_FAILED: &str = "Deployment failed";
/// The initialization call on a freshly deployed contract failed.
pub const INITIALIZATION_FAILED: &str = "Initialization failed";

/// ABI-encodes `reason` as a Solidity `Error(string)` revert payload.
#[must_use]
pub fn encode(reason: &str) -> Vec<u8> {
    Revert { reason: String::from(reason) }.abi_encode()
}
