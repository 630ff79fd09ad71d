//! Paid minting with owner withdrawal.
//!
//! A [`PricedMint`] keeps the price every mint must pay. The native currency
//! attached to mints accumulates in the contract's balance, and only the
//! owner of the composing contract can change the price or withdraw the
//! balance, see [`Ownable`].
use alloc::{vec, vec::Vec};

use alloy_primitives::U256;
pub use sol::*;
use stylus_sdk::{
    call::{call, Call, MethodError},
    contract, evm,
    prelude::*,
    storage::StorageU256,
};

use crate::{
    access::ownable::{self, Ownable},
    utils::revert,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the mint price changes.
        ///
        /// * `previous_price` - Price before the change.
        /// * `new_price` - Price after the change.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event PriceChanged(uint256 previous_price, uint256 new_price);
    }
}

/// An error that occurred in the implementation of a [`PricedMint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Error from the [`Ownable`] access check.
    Ownable(ownable::Error),
    /// The attached value is below the mint price.
    NotEnoughValue,
    /// The contract holds no native currency.
    NoBalance,
    /// Sending the balance to the owner failed.
    TransferFailed,
}

impl Error {
    /// Returns the revert reason of this error.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Error::Ownable(e) => e.reason(),
            Error::NotEnoughValue => revert::NOT_ENOUGH_VALUE,
            Error::NoBalance => revert::NO_BALANCE,
            Error::TransferFailed => revert::TRANSFER_FAILED,
        }
    }
}

impl From<ownable::Error> for Error {
    fn from(value: ownable::Error) -> Self {
        Error::Ownable(value)
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

/// State of a [`PricedMint`].
#[storage]
pub struct PricedMint {
    /// Price of a single mint, in wei.
    pub(crate) price: StorageU256,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`.
unsafe impl TopLevelStorage for PricedMint {}

impl PricedMint {
    /// Sets the initial mint price.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `price` - Price of a single mint, in wei.
    pub fn constructor(&mut self, price: U256) {
        self.price.set(price);
    }

    /// Returns the current mint price.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    #[must_use]
    pub fn price(&self) -> U256 {
        self.price.get()
    }

    /// Checks that `value` pays for a mint.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `value` - Native currency attached to the mint.
    ///
    /// # Errors
    ///
    /// * [`Error::NotEnoughValue`] - If `value` is below the price.
    pub fn check_payment(&self, value: U256) -> Result<(), Error> {
        if value < self.price() {
            return Err(Error::NotEnoughValue);
        }
        Ok(())
    }

    /// Changes the mint price. Can only be called by the owner.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `ownable` - Ownership of the composing contract.
    /// * `new_price` - Price of a single mint, in wei.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::Forbidden`] - If not called by the owner.
    ///
    /// # Events
    ///
    /// * [`PriceChanged`].
    pub fn set_price(
        &mut self,
        ownable: &Ownable,
        new_price: U256,
    ) -> Result<(), Error> {
        ownable.only_owner()?;

        let previous_price = self.price();
        self.price.set(new_price);
        evm::log(PriceChanged { previous_price, new_price });
        Ok(())
    }

    /// Sends the whole balance of the contract to the owner. Can only be
    /// called by the owner.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `ownable` - Ownership of the composing contract.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::Forbidden`] - If not called by the owner.
    /// * [`Error::NoBalance`] - If the contract balance is zero.
    /// * [`Error::TransferFailed`] - If the owner rejected the transfer.
    pub fn withdraw(&mut self, ownable: &Ownable) -> Result<(), Error> {
        ownable.only_owner()?;

        let balance = contract::balance();
        if balance.is_zero() {
            return Err(Error::NoBalance);
        }

        let owner = ownable.owner();
        call(Call::new_in(self).value(balance), owner, &[])
            .map_err(|_| Error::TransferFailed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{uint, Address, U256};
    use motsu::prelude::*;
    use stylus_sdk::{msg, prelude::*};

    use super::*;
    use crate::access::ownable::{self, Ownable};

    const PRICE: U256 = uint!(1_000_U256);

    #[storage]
    struct PricedMintExample {
        ownable: Ownable,
        priced_mint: PricedMint,
        mints: StorageU256,
    }

    unsafe impl TopLevelStorage for PricedMintExample {}

    #[public]
    impl PricedMintExample {
        #[constructor]
        fn constructor(&mut self, price: U256) -> Result<(), Error> {
            self.ownable.constructor(msg::sender())?;
            self.priced_mint.constructor(price);
            Ok(())
        }

        #[payable]
        fn mint(&mut self) -> Result<(), Error> {
            self.priced_mint.check_payment(msg::value())?;
            let mints = self.mints.get();
            self.mints.set(mints + U256::ONE);
            Ok(())
        }

        fn price(&self) -> U256 {
            self.priced_mint.price()
        }

        fn set_price(&mut self, new_price: U256) -> Result<(), Error> {
            self.priced_mint.set_price(&self.ownable, new_price)
        }

        fn withdraw(&mut self) -> Result<(), Error> {
            self.priced_mint.withdraw(&self.ownable)
        }
    }

    #[storage]
    struct Treasury;

    unsafe impl TopLevelStorage for Treasury {}

    #[public]
    impl Treasury {
        #[receive]
        fn receive(&self) -> Result<(), Vec<u8>> {
            Ok(())
        }
    }

    #[storage]
    struct RejectingTreasury;

    unsafe impl TopLevelStorage for RejectingTreasury {}

    #[public]
    impl RejectingTreasury {
        #[receive]
        fn receive(&self) -> Result<(), Vec<u8>> {
            Err(revert::encode("Rejected"))
        }
    }

    #[motsu::test]
    fn constructor(contract: Contract<PricedMintExample>, alice: Address) {
        contract.sender(alice).constructor(PRICE).motsu_unwrap();
        assert_eq!(contract.sender(alice).price(), PRICE);
    }

    #[motsu::test]
    fn mint_with_insufficient_value_reverts(
        contract: Contract<PricedMintExample>,
        alice: Address,
        bob: Address,
    ) {
        contract.sender(alice).constructor(PRICE).motsu_unwrap();
        bob.fund(PRICE);

        let err = contract
            .sender_and_value(bob, PRICE - U256::ONE)
            .mint()
            .motsu_expect_err("should return `Error::NotEnoughValue`");
        assert_eq!(err, Error::NotEnoughValue);
        assert_eq!(err.reason(), "Not enough value");
        assert_eq!(contract.sender(alice).mints.get(), U256::ZERO);
    }

    #[motsu::test]
    fn mint_accumulates_balance(
        contract: Contract<PricedMintExample>,
        alice: Address,
        bob: Address,
    ) {
        contract.sender(alice).constructor(PRICE).motsu_unwrap();
        bob.fund(PRICE * uint!(3_U256));

        contract
            .sender_and_value(bob, PRICE)
            .mint()
            .motsu_expect("should mint with the exact price");
        contract
            .sender_and_value(bob, PRICE * uint!(2_U256))
            .mint()
            .motsu_expect("should mint when paying more than the price");

        assert_eq!(contract.sender(alice).mints.get(), uint!(2_U256));
        assert_eq!(contract.balance(), PRICE * uint!(3_U256));
    }

    #[motsu::test]
    fn owner_sets_price(
        contract: Contract<PricedMintExample>,
        alice: Address,
    ) {
        contract.sender(alice).constructor(PRICE).motsu_unwrap();
        let new_price = PRICE * uint!(2_U256);

        contract
            .sender(alice)
            .set_price(new_price)
            .motsu_expect("owner should set the price");
        assert_eq!(contract.sender(alice).price(), new_price);

        contract.assert_emitted(&PriceChanged {
            previous_price: PRICE,
            new_price,
        });
    }

    #[motsu::test]
    fn non_owner_cannot_set_price(
        contract: Contract<PricedMintExample>,
        alice: Address,
        bob: Address,
    ) {
        contract.sender(alice).constructor(PRICE).motsu_unwrap();

        let err = contract
            .sender(bob)
            .set_price(U256::ZERO)
            .motsu_expect_err("should return `Error::Ownable`");
        assert_eq!(err, Error::Ownable(ownable::Error::Forbidden));
        assert_eq!(err.reason(), "Forbidden");
        assert_eq!(contract.sender(alice).price(), PRICE);
    }

    #[motsu::test]
    fn owner_withdraws_balance(
        contract: Contract<PricedMintExample>,
        treasury: Contract<Treasury>,
        bob: Address,
    ) {
        let owner = treasury.address();
        contract.sender(owner).constructor(PRICE).motsu_unwrap();
        bob.fund(PRICE);
        contract.sender_and_value(bob, PRICE).mint().motsu_unwrap();

        contract
            .sender(owner)
            .withdraw()
            .motsu_expect("owner should withdraw the balance");

        assert_eq!(contract.balance(), U256::ZERO);
        assert_eq!(treasury.balance(), PRICE);

        let err = contract
            .sender(owner)
            .withdraw()
            .motsu_expect_err("should return `Error::NoBalance`");
        assert_eq!(err, Error::NoBalance);
        assert_eq!(err.reason(), "No balance");
    }

    #[motsu::test]
    fn withdraw_to_rejecting_owner_reverts(
        contract: Contract<PricedMintExample>,
        treasury: Contract<RejectingTreasury>,
        bob: Address,
    ) {
        let owner = treasury.address();
        contract.sender(owner).constructor(PRICE).motsu_unwrap();
        bob.fund(PRICE);
        contract.sender_and_value(bob, PRICE).mint().motsu_unwrap();

        let err = contract
            .sender(owner)
            .withdraw()
            .motsu_expect_err("should return `Error::TransferFailed`");
        assert_eq!(err, Error::TransferFailed);
        assert_eq!(err.reason(), "Transfer failed");

        assert_eq!(contract.balance(), PRICE);
        assert_eq!(treasury.balance(), U256::ZERO);
    }

    #[motsu::test]
    fn withdraw_without_balance_reverts(
        contract: Contract<PricedMintExample>,
        alice: Address,
    ) {
        contract.sender(alice).constructor(PRICE).motsu_unwrap();

        let err = contract
            .sender(alice)
            .withdraw()
            .motsu_expect_err("should return `Error::NoBalance`");
        assert_eq!(err, Error::NoBalance);
    }

    #[motsu::test]
    fn non_owner_cannot_withdraw(
        contract: Contract<PricedMintExample>,
        alice: Address,
        bob: Address,
    ) {
        contract.sender(alice).constructor(PRICE).motsu_unwrap();
        bob.fund(PRICE);
        contract.sender_and_value(bob, PRICE).mint().motsu_unwrap();

        let err = contract
            .sender(bob)
            .withdraw()
            .motsu_expect_err("should return `Error::Ownable`");
        assert_eq!(err, Error::Ownable(ownable::Error::Forbidden));
        assert_eq!(contract.balance(), PRICE);
    }

    #[motsu::test]
    fn owner_check_comes_before_balance_check(
        contract: Contract<PricedMintExample>,
        alice: Address,
        bob: Address,
    ) {
        contract.sender(alice).constructor(PRICE).motsu_unwrap();

        let err = contract
            .sender(bob)
            .withdraw()
            .motsu_expect_err("should return `Error::Ownable`");
        assert_eq!(err, Error::Ownable(ownable::Error::Forbidden));
    }
}
