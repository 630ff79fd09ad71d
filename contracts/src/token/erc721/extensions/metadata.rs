//! Optional Metadata of the ERC-721 standard.
use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::U256;
use chronicles_stylus_proc::interface_id;
use stylus_sdk::{prelude::*, storage::StorageString};

/// Interface for the optional metadata functions from the ERC-721 standard.
#[interface_id]
pub trait IErc721Metadata {
    /// The error type associated to this trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns the token collection name.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn name(&self) -> String;

    /// Returns token collection symbol.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn symbol(&self) -> String;

    /// Returns the Uniform Resource Identifier (URI) for `token_id` token.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `token_id` - Id of a token.
    ///
    /// # Errors
    ///
    /// * [`crate::token::erc721::Error::InvalidToken`] - If the token does
    ///   not exist.
    #[selector(name = "tokenURI")]
    fn token_uri(&self, token_id: U256) -> Result<String, Self::Error>;
}

/// Name and symbol of an [`crate::token::erc721::Erc721`] collection.
#[storage]
pub struct Erc721Metadata {
    /// Token name.
    pub(crate) name: StorageString,
    /// Token symbol.
    pub(crate) symbol: StorageString,
}

impl Erc721Metadata {
    /// Stores the collection's `name` and `symbol`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `name` - Token name.
    /// * `symbol` - Token symbol.
    pub fn constructor(&mut self, name: String, symbol: String) {
        self.name.set_str(name);
        self.symbol.set_str(symbol);
    }

    /// Returns the token collection name.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.get_string()
    }

    /// Returns token collection symbol.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    pub fn symbol(&self) -> String {
        self.symbol.get_string()
    }
}
