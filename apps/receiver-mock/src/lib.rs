//! ERC-721 receiver with a configurable answer, used to exercise safe
//! transfers against contract recipients.
#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::{vec, vec::Vec};

use alloy_primitives::{
    aliases::{B32, U8},
    Address, U256,
};
use chronicles_stylus::{
    token::erc721::{receiver::IErc721Receiver, utils::Erc721Holder},
    utils::revert,
};
pub use sol::*;
use stylus_sdk::{abi::Bytes, evm, prelude::*, storage::StorageU8};

mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the mock accepts a token.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Received(address operator, address from, uint256 token_id, bytes data);
    }
}

/// Reason the mock reverts with in [`Response::Revert`] mode.
pub const REVERT_REASON: &str = "Receiver reverted";

/// How the mock answers `onERC721Received`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Returns the receiver selector, accepting the token.
    Accept,
    /// Returns an unrelated value.
    WrongSelector,
    /// Reverts with [`REVERT_REASON`].
    Revert,
}

impl From<u8> for Response {
    fn from(value: u8) -> Self {
        match value {
            1 => Response::WrongSelector,
            2 => Response::Revert,
            _ => Response::Accept,
        }
    }
}

impl From<Response> for u8 {
    fn from(value: Response) -> Self {
        match value {
            Response::Accept => 0,
            Response::WrongSelector => 1,
            Response::Revert => 2,
        }
    }
}

/// State of the receiver mock.
#[entrypoint]
#[storage]
pub struct ReceiverMock {
    response: StorageU8,
    holder: Erc721Holder,
}

#[public]
#[implements(IErc721Receiver)]
impl ReceiverMock {
    /// Sets how the mock answers, see [`Response`].
    #[constructor]
    pub fn constructor(&mut self, response: u8) {
        self.response.set(U8::from(response));
    }
}

impl ReceiverMock {
    fn response(&self) -> Response {
        self.response.get().to::<u8>().into()
    }
}

#[public]
impl IErc721Receiver for ReceiverMock {
    #[selector(name = "onERC721Received")]
    fn on_erc721_received(
        &mut self,
        operator: Address,
        from: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<B32, Vec<u8>> {
        match self.response() {
            Response::WrongSelector => Ok(B32::ZERO),
            Response::Revert => Err(revert::encode(REVERT_REASON)),
            Response::Accept => {
                evm::log(Received {
                    operator,
                    from,
                    token_id,
                    data: data.to_vec().into(),
                });
                self.holder.on_erc721_received(operator, from, token_id, data)
            }
        }
    }
}
