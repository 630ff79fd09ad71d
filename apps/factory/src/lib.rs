//! NFT Chronicles factory: deploys new collections for a price.
//!
//! Every collection is a minimal proxy clone of a single deployed
//! `NftChronicles` implementation. The factory deploys the clone, calls its
//! `initialize` with the caller as owner and announces it with a
//! [`NewInstance`] event.
#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::{Address, U256};
use chronicles_stylus::{
    access::ownable::{self, IOwnable, Ownable},
    finance::priced_mint::{self, PricedMint},
    proxy::clones,
    utils::revert,
};
pub use sol::*;
use stylus_sdk::{
    call::{Call, MethodError},
    evm, msg,
    prelude::*,
    storage::StorageAddress,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when a new collection is deployed.
        ///
        /// * `contract_address` - Address of the new collection.
        /// * `owner` - Owner of the new collection.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event NewInstance(address contract_address, address owner);
    }
}

sol_interface! {
    /// Setup entry point of a freshly deployed collection.
    interface ICollection {
        #[allow(missing_docs)]
        function initialize(string name, string symbol, uint256 price, address owner) external;
    }
}

/// An error that occurred in the [`NftChroniclesFactory`] contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Error from the ownership component.
    Ownable(ownable::Error),
    /// Error from the pricing component.
    PricedMint(priced_mint::Error),
    /// Error from the clone deployment.
    Clones(clones::Error),
    /// The implementation address is [`Address::ZERO`].
    ZeroAddress,
    /// The new collection rejected its initialization.
    InitializationFailed,
}

impl Error {
    /// Returns the revert reason of this error.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Error::Ownable(e) => e.reason(),
            Error::PricedMint(e) => e.reason(),
            Error::Clones(e) => e.reason(),
            Error::ZeroAddress => revert::ZERO_ADDRESS,
            Error::InitializationFailed => revert::INITIALIZATION_FAILED,
        }
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

impl From<clones::Error> for Error {
    fn from(value: clones::Error) -> Self {
        Error::Clones(value)
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

/// State of the factory.
#[entrypoint]
#[storage]
pub struct NftChroniclesFactory {
    ownable: Ownable,
    priced_mint: PricedMint,
    /// Collection contract every clone delegates to.
    implementation: StorageAddress,
}

#[public]
#[implements(IOwnable<Error = ownable::Error>)]
impl NftChroniclesFactory {
    /// Sets up the factory and makes the deployer its owner.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `price` - Price of a single collection, in wei.
    /// * `implementation` - Deployed collection contract that new collections
    ///   delegate to.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `implementation` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`ownable::OwnershipTransferred`].
    #[constructor]
    pub fn constructor(
        &mut self,
        price: U256,
        implementation: Address,
    ) -> Result<(), Error> {
        if implementation.is_zero() {
            return Err(Error::ZeroAddress);
        }

        self.ownable.constructor(msg::sender())?;
        self.priced_mint.constructor(price);
        self.implementation.set(implementation);
        Ok(())
    }

    /// Deploys a new collection owned by the caller and returns its address.
    /// The attached value must cover the price. The new collection mints for
    /// free until its owner sets a price.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `name` - Name of the new collection.
    /// * `symbol` - Symbol of the new collection.
    ///
    /// # Errors
    ///
    /// * [`priced_mint::Error::NotEnoughValue`] - If the attached value is
    ///   below the price.
    /// * [`clones::Error::DeploymentFailed`] - If the clone could not be
    ///   deployed.
    /// * [`Error::InitializationFailed`] - If the clone rejected its setup.
    ///
    /// # Events
    ///
    /// * [`NewInstance`].
    #[payable]
    pub fn mint(
        &mut self,
        name: String,
        symbol: String,
    ) -> Result<Address, Error> {
        self.priced_mint.check_payment(msg::value())?;

        let contract_address = clones::clone(self.implementation.get())?;
        self._init_instance(contract_address, name, symbol)?;
        Ok(contract_address)
    }

    /// Returns the collection contract new collections delegate to.
    #[must_use]
    pub fn implementation(&self) -> Address {
        self.implementation.get()
    }

    /// Returns the price of a single collection, in wei.
    #[must_use]
    pub fn price(&self) -> U256 {
        self.priced_mint.price()
    }

    /// Changes the price of a single collection. Can only be called by the
    /// owner.
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

    /// Sends the whole balance of the factory to the owner. Can only be
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

impl NftChroniclesFactory {
    /// Sets up the collection deployed at `contract_address` with the caller
    /// as its owner and a price of zero, then announces it.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `contract_address` - Address of the new collection.
    /// * `name` - Name of the new collection.
    /// * `symbol` - Symbol of the new collection.
    ///
    /// # Errors
    ///
    /// * [`Error::InitializationFailed`] - If the collection rejected its
    ///   setup, e.g. because it was set up before.
    ///
    /// # Events
    ///
    /// * [`NewInstance`].
    pub fn _init_instance(
        &mut self,
        contract_address: Address,
        name: String,
        symbol: String,
    ) -> Result<(), Error> {
        let owner = msg::sender();

        ICollection::new(contract_address)
            .initialize(Call::new_in(self), name, symbol, U256::ZERO, owner)
            .map_err(|_| Error::InitializationFailed)?;

        evm::log(NewInstance { contract_address, owner });
        Ok(())
    }
}

#[public]
impl IOwnable for NftChroniclesFactory {
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
