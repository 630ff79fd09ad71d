//! Implementation of the [`Erc721`] token standard.
//!
//! Token ids are plain [`U256`] numbers and a token exists exactly when it
//! has a non-zero owner. Any account may act on a token when it is the
//! owner, the single address approved for that token, or an operator
//! approved for all of the owner's tokens, see [`is_authorized`].
use alloc::{vec, vec::Vec};

use alloy_primitives::{aliases::B32, Address, U256};
use chronicles_stylus_proc::interface_id;
pub use sol::*;
use stylus_sdk::{
    abi::Bytes,
    call::{Call, MethodError},
    evm, msg,
    prelude::*,
    storage::{StorageAddress, StorageBool, StorageMap, StorageU256},
};

use crate::utils::{
    introspection::erc165::{Erc165, IErc165},
    math::storage::{AddAssignUnchecked, SubAssignUnchecked},
    revert,
};

pub mod extensions;
pub mod receiver;
pub mod utils;

pub use receiver::{
    IErc721Receiver, IErc721ReceiverInterface, RECEIVER_FN_SELECTOR,
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when the `token_id` token is transferred from `from` to `to`.
        ///
        /// * `from` - Address from which the token will be transferred.
        /// * `to` - Address where the token will be transferred to.
        /// * `token_id` - Token id as a number.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Transfer(
            address indexed from,
            address indexed to,
            uint256 indexed token_id
        );

        /// Emitted when `owner` enables `approved` to manage the `token_id` token.
        ///
        /// * `owner` - Address of the owner of the token.
        /// * `approved` - Address of the approved account.
        /// * `token_id` - Token id as a number.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Approval(
            address indexed owner,
            address indexed approved,
            uint256 indexed token_id
        );

        /// Emitted when `owner` enables or disables (`approved`) `operator`
        /// to manage all of its assets.
        ///
        /// * `owner` - Address of the owner of the token.
        /// * `operator` - Address of an operator that
        ///   will manage operations on the token.
        /// * `approved` - Whether or not permission has been granted. If true,
        ///   this means `operator` will be allowed to manage `owner`'s assets.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event ApprovalForAll(address indexed owner, address indexed operator, bool approved);
    }
}

/// An [`Erc721`] error. Each variant reverts with the message returned by
/// [`Error::reason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An account argument is [`Address::ZERO`] where it is not allowed:
    /// balance queries, transfer recipients and operators.
    ZeroAddress,
    /// The token was never minted or has been burned.
    InvalidToken,
    /// The caller may not operate on the token, or the token is not owned
    /// by the declared sender.
    Forbidden,
    /// The owner of a token cannot be its approved address.
    OwnerApproval,
    /// The receiving contract did not accept the token.
    InvalidReceiver,
}

impl Error {
    /// Returns the revert reason of this error.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Error::ZeroAddress => revert::ZERO_ADDRESS,
            Error::InvalidToken => revert::INVALID_TOKEN,
            Error::Forbidden => revert::FORBIDDEN,
            Error::OwnerApproval => revert::OWNER_APPROVAL,
            Error::InvalidReceiver => revert::INVALID_RECEIVER,
        }
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

/// State of an [`Erc721`] token.
#[storage]
pub struct Erc721 {
    /// Maps tokens to owners.
    pub(crate) owners: StorageMap<U256, StorageAddress>,
    /// Maps users to balances.
    pub(crate) balances: StorageMap<Address, StorageU256>,
    /// Maps tokens to approvals.
    pub(crate) token_approvals: StorageMap<U256, StorageAddress>,
    /// Maps owners to a mapping of operator approvals.
    pub(crate) operator_approvals:
        StorageMap<Address, StorageMap<Address, StorageBool>>,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&mut self` when
/// calling other contracts and not `&mut (impl TopLevelStorage +
/// BorrowMut<Self>)`.
unsafe impl TopLevelStorage for Erc721 {}

/// Tells whether `caller` may operate on a token.
///
/// This holds when the caller is a real account and it is the token's
/// `owner`, the token's single `approved` address, or an operator approved
/// for all of the owner's tokens (`operator_approved`).
///
/// # Arguments
///
/// * `caller` - Account trying to operate on the token.
/// * `owner` - Current owner of the token.
/// * `approved` - Address approved for this token, or [`Address::ZERO`].
/// * `operator_approved` - Whether `caller` is an approved operator of
///   `owner`.
#[must_use]
pub fn is_authorized(
    caller: Address,
    owner: Address,
    approved: Address,
    operator_approved: bool,
) -> bool {
    !caller.is_zero()
        && (caller == owner || caller == approved || operator_approved)
}

/// Required interface of an [`Erc721`] compliant contract.
#[interface_id]
pub trait IErc721 {
    /// The error type associated to this ERC-721 trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns the number of tokens in `owner`'s account.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `owner` - Account of the token's owner.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If owner address is `Address::ZERO`.
    fn balance_of(&self, owner: Address) -> Result<U256, Self::Error>;

    /// Returns the owner of the `token_id` token.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidToken`] - If the token does not exist.
    fn owner_of(&self, token_id: U256) -> Result<Address, Self::Error>;

    /// Safely transfers `token_id` token from `from` to `to`, checking first
    /// that contract recipients are aware of the [`Erc721`] protocol to
    /// prevent tokens from being forever locked.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `from` - Account of the sender.
    /// * `to` - Account of the recipient.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidToken`] - If the token does not exist.
    /// * [`Error::Forbidden`] - If the caller may not operate on the token or
    ///   `from` is not its owner.
    /// * [`Error::ZeroAddress`] - If `to` is `Address::ZERO`.
    /// * [`Error::InvalidReceiver`] - If `to` is a contract that does not
    ///   accept the token.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    fn safe_transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error>;

    /// Safely transfers `token_id` token from `from` to `to`, forwarding
    /// `data` to the receiver.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `from` - Account of the sender.
    /// * `to` - Account of the recipient.
    /// * `token_id` - Token id as a number.
    /// * `data` - Additional data with no specified format, sent in the call to
    ///   [`IErc721Receiver::on_erc721_received`].
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidToken`] - If the token does not exist.
    /// * [`Error::Forbidden`] - If the caller may not operate on the token or
    ///   `from` is not its owner.
    /// * [`Error::ZeroAddress`] - If `to` is `Address::ZERO`.
    /// * [`Error::InvalidReceiver`] - If `to` is a contract that does not
    ///   accept the token.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    #[selector(name = "safeTransferFrom")]
    fn safe_transfer_from_with_data(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<(), Self::Error>;

    /// Transfers `token_id` token from `from` to `to`. Clears the token's
    /// single approval.
    ///
    /// WARNING: Note that the caller is responsible to confirm that the
    /// recipient is capable of receiving [`Erc721`] or else they may be
    /// permanently lost. Usage of [`Self::safe_transfer_from`] prevents loss.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `from` - Account of the sender.
    /// * `to` - Account of the recipient.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidToken`] - If the token does not exist.
    /// * [`Error::Forbidden`] - If the caller may not operate on the token or
    ///   `from` is not its owner.
    /// * [`Error::ZeroAddress`] - If `to` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error>;

    /// Gives permission to `to` to transfer `token_id` token to another
    /// account. The approval is cleared when the token is transferred.
    ///
    /// Only a single account can be approved at a time,
    /// so approving the `Address::ZERO` clears previous approvals.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `to` - Account to approve.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidToken`] - If the token does not exist.
    /// * [`Error::Forbidden`] - If the caller may not operate on the token.
    /// * [`Error::OwnerApproval`] - If `to` is the owner of the token.
    ///
    /// # Events
    ///
    /// * [`Approval`].
    fn approve(
        &mut self,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error>;

    /// Approve or remove `operator` as an operator for the caller.
    ///
    /// Operators can call [`Self::transfer_from`] or
    /// [`Self::safe_transfer_from`] for any token owned by the caller.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `operator` - Account to add to the set of authorized operators.
    /// * `approved` - Flag that determines whether or not permission will be
    ///   granted to `operator`.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `operator` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`ApprovalForAll`].
    fn set_approval_for_all(
        &mut self,
        operator: Address,
        approved: bool,
    ) -> Result<(), Self::Error>;

    /// Returns the account approved for `token_id` token.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidToken`] - If the token does not exist.
    fn get_approved(&self, token_id: U256) -> Result<Address, Self::Error>;

    /// Returns whether the `operator` is allowed to manage all the assets of
    /// `owner`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `owner` - Account of the token's owner.
    /// * `operator` - Account to be checked.
    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool;
}

#[public]
#[implements(IErc721<Error = Error>, extensions::IErc721Burnable<Error = Error>, IErc165)]
impl Erc721 {}

#[public]
impl IErc721 for Erc721 {
    type Error = Error;

    fn balance_of(&self, owner: Address) -> Result<U256, Error> {
        if owner.is_zero() {
            return Err(Error::ZeroAddress);
        }
        Ok(self.balances.get(owner))
    }

    fn owner_of(&self, token_id: U256) -> Result<Address, Error> {
        self._require_owned(token_id)
    }

    fn safe_transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Error> {
        self.safe_transfer_from_with_data(from, to, token_id, vec![].into())
    }

    #[selector(name = "safeTransferFrom")]
    fn safe_transfer_from_with_data(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<(), Error> {
        self.transfer_from(from, to, token_id)?;
        self._check_on_erc721_received(msg::sender(), from, to, token_id, &data)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Error> {
        let owner = self._require_owned(token_id)?;
        self._check_authorized(owner, msg::sender(), token_id)?;

        if owner != from {
            return Err(Error::Forbidden);
        }

        if to.is_zero() {
            return Err(Error::ZeroAddress);
        }

        self._update(to, token_id, Address::ZERO)?;
        Ok(())
    }

    fn approve(&mut self, to: Address, token_id: U256) -> Result<(), Error> {
        self._approve(to, token_id, msg::sender(), true)
    }

    fn set_approval_for_all(
        &mut self,
        operator: Address,
        approved: bool,
    ) -> Result<(), Error> {
        self._set_approval_for_all(msg::sender(), operator, approved)
    }

    fn get_approved(&self, token_id: U256) -> Result<Address, Error> {
        self._require_owned(token_id)?;
        Ok(self._get_approved(token_id))
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operator_approvals.get(owner).get(operator)
    }
}

#[public]
impl IErc165 for Erc721 {
    fn supports_interface(&self, interface_id: B32) -> bool {
        <Self as IErc721>::interface_id() == u32::from_be_bytes(*interface_id)
            || Erc165::supports_interface(interface_id)
    }
}

impl Erc721 {
    /// Returns the owner of the `token_id`. Does NOT revert if the token
    /// doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `token_id` - Token id as a number.
    #[must_use]
    pub fn _owner_of(&self, token_id: U256) -> Address {
        self.owners.get(token_id)
    }

    /// Returns the approved address for `token_id`.
    /// Returns [`Address::ZERO`] if `token_id` is not minted.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `token_id` - Token id as a number.
    #[must_use]
    pub fn _get_approved(&self, token_id: U256) -> Address {
        self.token_approvals.get(token_id)
    }

    /// Returns whether `spender` is allowed to manage `owner`'s tokens, or
    /// `token_id` in particular (ignoring whether it is owned by `owner`).
    ///
    /// WARNING: This function assumes that `owner` is the actual owner of
    /// `token_id` and does not verify this assumption.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `owner` - Account of the token's owner.
    /// * `spender` - Account that will operate on the token.
    /// * `token_id` - Token id as a number.
    #[must_use]
    pub fn _is_authorized(
        &self,
        owner: Address,
        spender: Address,
        token_id: U256,
    ) -> bool {
        is_authorized(
            spender,
            owner,
            self._get_approved(token_id),
            self.is_approved_for_all(owner, spender),
        )
    }

    /// Checks if `spender` can operate on `token_id`, assuming the provided
    /// `owner` is the actual owner.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `owner` - Account of the token's owner.
    /// * `spender` - Account that will operate on the token.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidToken`] - If the token does not exist.
    /// * [`Error::Forbidden`] - If `spender` may not operate on the token.
    pub fn _check_authorized(
        &self,
        owner: Address,
        spender: Address,
        token_id: U256,
    ) -> Result<(), Error> {
        if owner.is_zero() {
            return Err(Error::InvalidToken);
        }

        if !self._is_authorized(owner, spender, token_id) {
            return Err(Error::Forbidden);
        }

        Ok(())
    }

    /// Transfers `token_id` from its current owner to `to`, or alternatively
    /// mints (or burns) if the current owner (or `to`) is the `Address::ZERO`.
    /// Returns the owner of the `token_id` before the update.
    ///
    /// The `auth` argument is optional. If the value passed is non-zero, then
    /// this function will check that `auth` is either the owner of the
    /// token, or approved to operate on the token (by the owner).
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `to` - Account of the recipient.
    /// * `token_id` - Token id as a number.
    /// * `auth` - Account used for authorization of the update.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidToken`] - If the token does not exist and `auth` is
    ///   not `Address::ZERO`.
    /// * [`Error::Forbidden`] - If `auth` is not `Address::ZERO` and `auth`
    ///   may not operate on the token.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    pub fn _update(
        &mut self,
        to: Address,
        token_id: U256,
        auth: Address,
    ) -> Result<Address, Error> {
        let from = self._owner_of(token_id);

        if !auth.is_zero() {
            self._check_authorized(from, auth, token_id)?;
        }

        if !from.is_zero() {
            // Clear approval. No need to emit the `Approval` event.
            self.token_approvals.setter(token_id).set(Address::ZERO);
            self.balances.setter(from).sub_assign_unchecked(U256::ONE);
        }

        if !to.is_zero() {
            self.balances.setter(to).add_assign_unchecked(U256::ONE);
        }

        self.owners.setter(token_id).set(to);
        evm::log(Transfer { from, to, token_id });
        Ok(from)
    }

    /// Mints `token_id` and transfers it to `to`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `to` - Account of the recipient.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `to` is `Address::ZERO`.
    /// * [`Error::InvalidToken`] - If `token_id` already exists.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    pub fn _mint(&mut self, to: Address, token_id: U256) -> Result<(), Error> {
        if to.is_zero() {
            return Err(Error::ZeroAddress);
        }

        if !self._owner_of(token_id).is_zero() {
            return Err(Error::InvalidToken);
        }

        self._update(to, token_id, Address::ZERO)?;
        Ok(())
    }

    /// Destroys `token_id`.
    ///
    /// The approval is cleared when the token is burned. This is an
    /// internal function that does not check if the sender is authorized
    /// to operate on the token.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidToken`] - If the token does not exist.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    pub fn _burn(&mut self, token_id: U256) -> Result<(), Error> {
        self._require_owned(token_id)?;
        self._update(Address::ZERO, token_id, Address::ZERO)?;
        Ok(())
    }

    /// Approve `to` to operate on `token_id`.
    ///
    /// The `auth` argument is optional. If the value passed is non-zero, then
    /// this function will check that `auth` may operate on the token and
    /// that `to` is not the owner itself.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `to` - Account to approve.
    /// * `token_id` - Token id as a number.
    /// * `auth` - Account used for authorization of the update.
    /// * `emit_event` - Emit an [`Approval`] event flag.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidToken`] - If the token does not exist.
    /// * [`Error::Forbidden`] - If `auth` may not operate on the token.
    /// * [`Error::OwnerApproval`] - If `auth` is set and `to` is the owner.
    ///
    /// # Events
    ///
    /// * [`Approval`].
    pub fn _approve(
        &mut self,
        to: Address,
        token_id: U256,
        auth: Address,
        emit_event: bool,
    ) -> Result<(), Error> {
        // Avoid reading the owner unless necessary.
        if emit_event || !auth.is_zero() {
            let owner = self._require_owned(token_id)?;

            if !auth.is_zero() {
                self._check_authorized(owner, auth, token_id)?;

                if to == owner {
                    return Err(Error::OwnerApproval);
                }
            }

            if emit_event {
                evm::log(Approval { owner, approved: to, token_id });
            }
        }

        self.token_approvals.setter(token_id).set(to);
        Ok(())
    }

    /// Approve `operator` to operate on all of `owner`'s tokens.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `owner` - Account of the tokens' owner.
    /// * `operator` - Account to add to the set of authorized operators.
    /// * `approved` - Whether permission is granted or revoked.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroAddress`] - If `operator` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`ApprovalForAll`].
    pub fn _set_approval_for_all(
        &mut self,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), Error> {
        if operator.is_zero() {
            return Err(Error::ZeroAddress);
        }

        self.operator_approvals.setter(owner).setter(operator).set(approved);
        evm::log(ApprovalForAll { owner, operator, approved });
        Ok(())
    }

    /// Reverts if the `token_id` doesn't have a current owner (it hasn't been
    /// minted, or it has been burned). Returns the owner.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidToken`] - If token does not exist.
    pub fn _require_owned(&self, token_id: U256) -> Result<Address, Error> {
        let owner = self._owner_of(token_id);
        if owner.is_zero() {
            return Err(Error::InvalidToken);
        }
        Ok(owner)
    }

    /// Performs an acceptance check for the provided `operator` by calling
    /// [`IErc721Receiver::on_erc721_received`] on the `to` address. The
    /// `operator` is generally the address that initiated the token transfer
    /// (i.e. `msg::sender()`).
    ///
    /// The acceptance call is not executed and treated as a no-op if the
    /// target address doesn't contain code (i.e. an EOA). Otherwise, the
    /// recipient must implement [`IErc721Receiver::on_erc721_received`] and
    /// return [`RECEIVER_FN_SELECTOR`] to accept the transfer.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `operator` - Account that initiated the transfer.
    /// * `from` - Account of the sender.
    /// * `to` - Account of the recipient.
    /// * `token_id` - Token id as a number.
    /// * `data` - Additional data with no specified format, sent in call to
    ///   `to`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidReceiver`] - If the receiver reverted, is missing the
    ///   callback, or returned anything but [`RECEIVER_FN_SELECTOR`].
    pub fn _check_on_erc721_received(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        token_id: U256,
        data: &Bytes,
    ) -> Result<(), Error> {
        if !to.has_code() {
            return Ok(());
        }

        let receiver = IErc721ReceiverInterface::new(to);
        let call = Call::new_in(self);
        let result = receiver.on_erc_721_received(
            call,
            operator,
            from,
            token_id,
            data.to_vec().into(),
        );

        match result {
            Ok(id) if id == RECEIVER_FN_SELECTOR => Ok(()),
            _ => Err(Error::InvalidReceiver),
        }
    }
}
