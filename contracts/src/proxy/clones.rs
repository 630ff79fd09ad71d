//! Deployment of [ERC-1167] minimal proxies ("clones").
//!
//! A clone is a tiny contract that forwards every call to a fixed
//! implementation with `DELEGATECALL`, so each clone keeps its own storage
//! while running the implementation's code. Clones are cheap to deploy and
//! must be set up through an initializer call instead of a constructor.
//!
//! [ERC-1167]: https://eips.ethereum.org/EIPS/eip-1167
use alloc::vec::Vec;

use alloy_primitives::{Address, U256};
use stylus_sdk::{call::MethodError, deploy::RawDeploy};

use crate::utils::revert;

/// Creation code prefix: copies the runtime code to memory and returns it.
const CREATION_PREFIX: [u8; 10] =
    [0x3d, 0x60, 0x2d, 0x80, 0x60, 0x0a, 0x3d, 0x39, 0x81, 0xf3];

/// Runtime code up to the `PUSH20` holding the implementation address.
const RUNTIME_PREFIX: [u8; 10] =
    [0x36, 0x3d, 0x3d, 0x37, 0x3d, 0x3d, 0x3d, 0x36, 0x3d, 0x73];

/// Runtime code after the implementation address: `DELEGATECALL` and bubble
/// up the result.
const RUNTIME_SUFFIX: [u8; 15] = [
    0x5a, 0xf4, 0x3d, 0x82, 0x80, 0x3e, 0x90, 0x3d, 0x91, 0x60, 0x2b, 0x57,
    0xfd, 0x5b, 0xf3,
];

/// Length of an encoded address.
const ADDRESS_LEN: usize = 20;

/// Length of the init code of a clone.
pub const INIT_CODE_LEN: usize = CREATION_PREFIX.len()
    + RUNTIME_PREFIX.len()
    + ADDRESS_LEN
    + RUNTIME_SUFFIX.len();

/// An error that occurred while deploying a clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The `CREATE` of the clone failed.
    DeploymentFailed,
}

impl Error {
    /// Returns the revert reason of this error.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Error::DeploymentFailed => revert::DEPLOYMENT_FAILED,
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

/// Returns the init code of a clone delegating to `implementation`.
///
/// # Arguments
///
/// * `implementation` - Address of the contract every call is forwarded to.
#[must_use]
pub fn init_code(implementation: Address) -> Vec<u8> {
    let mut code = Vec::with_capacity(INIT_CODE_LEN);
    code.extend_from_slice(&CREATION_PREFIX);
    code.extend_from_slice(&RUNTIME_PREFIX);
    code.extend_from_slice(implementation.as_slice());
    code.extend_from_slice(&RUNTIME_SUFFIX);
    code
}

/// Deploys a clone of `implementation` and returns its address.
///
/// The clone starts with empty storage. Callers are expected to initialize
/// it right away, in the same transaction.
///
/// # Arguments
///
/// * `implementation` - Address of the contract every call is forwarded to.
///
/// # Errors
///
/// * [`Error::DeploymentFailed`] - If the `CREATE` reverted.
pub fn clone(implementation: Address) -> Result<Address, Error> {
    let code = init_code(implementation);
    // SAFETY: no storage cache is held across the deployment, the clone's
    // init code runs no Stylus code.
    let deployed = unsafe { RawDeploy::new().deploy(&code, U256::ZERO) };
    deployed.map_err(|_| Error::DeploymentFailed)
}
