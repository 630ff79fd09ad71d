//! Optional Burnable extension of the ERC-721 standard.
use alloc::vec::Vec;

use alloy_primitives::{Address, U256};
use chronicles_stylus_proc::interface_id;
use stylus_sdk::{msg, prelude::*};

use crate::token::erc721::{self, Erc721};

/// An [`Erc721`] token that can be burned (destroyed).
#[interface_id]
pub trait IErc721Burnable {
    /// The error type associated to this trait implementation.
    type Error: Into<Vec<u8>>;

    /// Burns `token_id`.
    /// The approval is cleared when the token is burned.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`erc721::Error::InvalidToken`] - If token does not exist.
    /// * [`erc721::Error::Forbidden`] - If the caller may not operate on the
    ///   token.
    ///
    /// # Events
    ///
    /// * [`erc721::Transfer`].
    fn burn(&mut self, token_id: U256) -> Result<(), Self::Error>;
}

#[public]
impl IErc721Burnable for Erc721 {
    type Error = erc721::Error;

    fn burn(&mut self, token_id: U256) -> Result<(), Self::Error> {
        // A non-zero `auth` makes `_update` check that the token exists and
        // that the caller may operate on it.
        self._update(Address::ZERO, token_id, msg::sender())?;
        Ok(())
    }
}
