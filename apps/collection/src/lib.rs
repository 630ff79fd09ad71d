//! NFT Chronicles collection: an ownable ERC-721 collection whose tokens are
//! minted for a price and carry a per-token URI.
//!
//! The contract can be deployed directly, configured through its
//! constructor, or used as the implementation behind factory clones, which
//! configure their own storage once through [`NftChronicles::initialize`].
#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::{aliases::B32, Address, U256};
use chronicles_stylus::{
    access::ownable::{self, IOwnable, Ownable},
    finance::priced_mint::{self, PricedMint},
    token::erc721::{
        self,
        extensions::{
            Erc721Metadata, Erc721UriStorage, IErc721Burnable,
            IErc721Metadata,
        },
        Erc721, IErc721,
    },
    utils::{
        introspection::erc165::{Erc165, IErc165},
        revert,
    },
};
use stylus_sdk::{
    abi::Bytes,
    call::MethodError,
    msg,
    prelude::*,
    storage::{StorageBool, StorageU256},
};

/// An error that occurred in the [`NftChronicles`] contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Error from the token component.
    Erc721(erc721::Error),
    /// Error from the ownership component.
    Ownable(ownable::Error),
    /// Error from the pricing component.
    PricedMint(priced_mint::Error),
    /// The collection storage was configured already.
    AlreadyInitialized,
}

impl Error {
    /// Returns the revert reason of this error.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Error::Erc721(e) => e.reason(),
            Error::Ownable(e) => e.reason(),
            Error::PricedMint(e) => e.reason(),
            Error::AlreadyInitialized => revert::ALREADY_INITIALIZED,
        }
    }
}

impl From<erc721::Error> for Error {
    fn from(value: erc721::Error) -> Self {
        Error::Erc721(value)
    }
}

impl From<ownable::Error> for Error {
    fn from(value: ownable::Error) -> Self {
        Error::Ownable(value)
    }
}

impl From<priced_mint::Error> for Error {
    fn from(value: priced_mint::Error) -> Self {
        Error::PricedMint(value)
    }
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Self {
        revert::encode(value.reason())
    }
}

impl MethodError for Error {
    fn encode(self) -> Vec<u8> {
        self.into()
    }
}

/// State of the collection.
#[entrypoint]
#[storage]
pub struct NftChronicles {
    erc721: Erc721,
    metadata: Erc721Metadata,
    uri_storage: Erc721UriStorage,
    ownable: Ownable,
    priced_mint: PricedMint,
    /// Id of the next minted token. Ids of burned tokens are never reused.
    next_token_id: StorageU256,
    initialized: StorageBool,
}

#[public]
#[implements(
    IErc721<Error = erc721::Error>,
    IErc721Burnable<Error = Error>,
    IErc721Metadata<Error = erc721::Error>,
    IOwnable<Error = ownable::Error>,
    IErc165
)]
impl NftChronicles {
    /// Sets up the collection and makes the deployer its owner.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `name` - Collection name.
    /// * `symbol` - Collection symbol.
    /// * `price` - Price of a single mint, in wei.
    ///
    /// # Events
    ///
    /// * [`ownable::OwnershipTransferred`].
    #[constructor]
    pub fn constructor(
        &mut self,
        name: String,
        symbol: String,
        price: U256,
    ) -> Result<(), Error> {
        self._initialize(name, symbol, price, msg::sender())
    }

    /// Sets up a collection whose storage was never configured, such as a
    /// freshly deployed clone.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `name` - Collection name.
    /// * `symbol` - Collection symbol.
    /// * `price` - Price of a single mint, in wei.
    /// * `owner` - Owner of the collection.
    ///
    /// # Errors
    ///
    /// * [`Error::AlreadyInitialized`] - If the collection was configured
    ///   before.
    /// * [`ownable::Error::ZeroAddress`] - If `owner` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`ownable::OwnershipTransferred`].
    pub fn initialize(
        &mut self,
        name: String,
        symbol: String,
        price: U256,
        owner: Address,
    ) -> Result<(), Error> {
        self._initialize(name, symbol, price, owner)
    }

    /// Mints the next token for the caller and stores `uri` as its token
    /// URI. The attached value must cover the price. Returns the id of the
    /// new token.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `uri` - Token URI of the new token.
    ///
    /// # Errors
    ///
    /// * [`priced_mint::Error::NotEnoughValue`] - If the attached value is
    ///   below the price.
    ///
    /// # Events
    ///
    /// * [`erc721::Transfer`].
    #[payable]
    pub fn mint(&mut self, uri: String) -> Result<U256, Error> {
        self.priced_mint.check_payment(msg::value())?;

        let token_id = self.next_token_id.get();
        self.erc721._mint(msg::sender(), token_id)?;
        self.uri_storage._set_token_uri(token_id, uri);
        self.next_token_id.set(token_id + U256::ONE);

        Ok(token_id)
    }

    /// Returns the price of a single mint, in wei.
    #[must_use]
    pub fn price(&self) -> U256 {
        self.priced_mint.price()
    }

    /// Changes the price of a single mint. Can only be called by the owner.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::Forbidden`] - If not called by the owner.
    ///
    /// # Events
    ///
    /// * [`priced_mint::PriceChanged`].
    pub fn set_price(&mut self, new_price: U256) -> Result<(), Error> {
        Ok(self.priced_mint.set_price(&self.ownable, new_price)?)
    }

    /// Sends the whole balance of the collection to the owner. Can only be
    /// called by the owner.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::Forbidden`] - If not called by the owner.
    /// * [`priced_mint::Error::NoBalance`] - If there is nothing to withdraw.
    /// * [`priced_mint::Error::TransferFailed`] - If the owner rejected the
    ///   transfer.
    pub fn withdraw(&mut self) -> Result<(), Error> {
        Ok(self.priced_mint.withdraw(&self.ownable)?)
    }
}

impl NftChronicles {
    fn _initialize(
        &mut self,
        name: String,
        symbol: String,
        price: U256,
        owner: Address,
    ) -> Result<(), Error> {
        if self.initialized.get() {
            return Err(Error::AlreadyInitialized);
        }

        self.ownable.constructor(owner)?;
        self.metadata.constructor(name, symbol);
        self.priced_mint.constructor(price);
        self.initialized.set(true);
        Ok(())
    }
}

#[public]
impl IErc721 for NftChronicles {
    type Error = erc721::Error;

    fn balance_of(&self, owner: Address) -> Result<U256, Self::Error> {
        self.erc721.balance_of(owner)
    }

    fn owner_of(&self, token_id: U256) -> Result<Address, Self::Error> {
        self.erc721.owner_of(token_id)
    }

    fn safe_transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        self.erc721.safe_transfer_from(from, to, token_id)
    }

    #[selector(name = "safeTransferFrom")]
    fn safe_transfer_from_with_data(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<(), Self::Error> {
        self.erc721.safe_transfer_from_with_data(from, to, token_id, data)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        self.erc721.transfer_from(from, to, token_id)
    }

    fn approve(
        &mut self,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        self.erc721.approve(to, token_id)
    }

    fn set_approval_for_all(
        &mut self,
        operator: Address,
        approved: bool,
    ) -> Result<(), Self::Error> {
        self.erc721.set_approval_for_all(operator, approved)
    }

    fn get_approved(&self, token_id: U256) -> Result<Address, Self::Error> {
        self.erc721.get_approved(token_id)
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.erc721.is_approved_for_all(owner, operator)
    }
}

#[public]
impl IErc721Burnable for NftChronicles {
    type Error = Error;

    fn burn(&mut self, token_id: U256) -> Result<(), Self::Error> {
        self.erc721.burn(token_id)?;
        self.uri_storage._clear_token_uri(token_id);
        Ok(())
    }
}

#[public]
impl IErc721Metadata for NftChronicles {
    type Error = erc721::Error;

    fn name(&self) -> String {
        self.metadata.name()
    }

    fn symbol(&self) -> String {
        self.metadata.symbol()
    }

    #[selector(name = "tokenURI")]
    fn token_uri(&self, token_id: U256) -> Result<String, Self::Error> {
        self.uri_storage.token_uri(token_id, &self.erc721)
    }
}

#[public]
impl IOwnable for NftChronicles {
    type Error = ownable::Error;

    fn owner(&self) -> Address {
        self.ownable.owner()
    }

    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Self::Error> {
        self.ownable.transfer_ownership(new_owner)
    }

    fn renounce_ownership(&mut self) -> Result<(), Self::Error> {
        self.ownable.renounce_ownership()
    }
}

#[public]
impl IErc165 for NftChronicles {
    fn supports_interface(&self, interface_id: B32) -> bool {
        self.erc721.supports_interface(interface_id)
            || <Self as IErc721Metadata>::interface_id()
                == u32::from_be_bytes(*interface_id)
            || Erc165::supports_interface(interface_id)
    }
}
