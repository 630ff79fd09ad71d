//! ERC-721 token with storage-based token URI management.
//!
//! Every token keeps the URI it was minted with until it is burned.
use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::U256;
use stylus_sdk::{
    prelude::*,
    storage::{StorageMap, StorageString},
};

use crate::token::erc721::{self, IErc721};

/// State of an [`Erc721UriStorage`] contract.
#[storage]
pub struct Erc721UriStorage {
    /// Mapping for token URIs.
    pub(crate) token_uris: StorageMap<U256, StorageString>,
}

impl Erc721UriStorage {
    /// Sets `token_uri` as the token URI of `token_id`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `token_id` - Id of a token.
    /// * `token_uri` - URI for the token.
    pub fn _set_token_uri(&mut self, token_id: U256, token_uri: String) {
        self.token_uris.setter(token_id).set_str(token_uri);
    }

    /// Removes the token URI of `token_id`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `token_id` - Id of a token.
    pub fn _clear_token_uri(&mut self, token_id: U256) {
        self.token_uris.delete(token_id);
    }

    /// Check [`super::IErc721Metadata::token_uri`] for more details.
    #[allow(clippy::missing_errors_doc)]
    pub fn token_uri(
        &self,
        token_id: U256,
        erc721: &impl IErc721<Error = erc721::Error>,
    ) -> Result<String, erc721::Error> {
        erc721.owner_of(token_id)?;
        Ok(self.token_uris.getter(token_id).get_string())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use alloy_primitives::{aliases::B32, uint, Address, U256};
    use motsu::prelude::*;
    use stylus_sdk::prelude::*;

    use super::*;
    use crate::{
        token::erc721::{
            self,
            extensions::{Erc721Metadata, IErc721Metadata},
            Erc721,
        },
        utils::introspection::erc165::{Erc165, IErc165},
    };

    const TOKEN_ID: U256 = uint!(1_U256);
    const TOKEN_URI: &str = "ipfs://QmChronicle/1.json";

    #[storage]
    struct Erc721MetadataExample {
        erc721: Erc721,
        metadata: Erc721Metadata,
        uri_storage: Erc721UriStorage,
    }

    #[public]
    #[implements(IErc721Metadata<Error = erc721::Error>, IErc165)]
    impl Erc721MetadataExample {
        #[constructor]
        fn constructor(&mut self, name: String, symbol: String) {
            self.metadata.constructor(name, symbol);
        }

        #[selector(name = "setTokenURI")]
        fn set_token_uri(&mut self, token_id: U256, token_uri: String) {
            self.uri_storage._set_token_uri(token_id, token_uri);
        }
    }

    #[public]
    impl IErc721Metadata for Erc721MetadataExample {
        type Error = erc721::Error;

        fn name(&self) -> String {
            self.metadata.name()
        }

        fn symbol(&self) -> String {
            self.metadata.symbol()
        }

        #[selector(name = "tokenURI")]
        fn token_uri(&self, token_id: U256) -> Result<String, erc721::Error> {
            self.uri_storage.token_uri(token_id, &self.erc721)
        }
    }

    #[public]
    impl IErc165 for Erc721MetadataExample {
        fn supports_interface(&self, interface_id: B32) -> bool {
            <Self as IErc721Metadata>::interface_id()
                == u32::from_be_bytes(*interface_id)
                || Erc165::supports_interface(interface_id)
        }
    }

    unsafe impl TopLevelStorage for Erc721MetadataExample {}

    #[motsu::test]
    fn interface_id() {
        let actual = <Erc721MetadataExample as IErc721Metadata>::interface_id();
        let expected = 0x5b5e_139f;
        assert_eq!(actual, expected);
    }

    #[motsu::test]
    fn supports_interface(
        contract: Contract<Erc721MetadataExample>,
        alice: Address,
    ) {
        assert!(contract.sender(alice).supports_interface(B32::from(
            <Erc721MetadataExample as IErc721Metadata>::interface_id()
        )));
        assert!(contract.sender(alice).supports_interface(B32::from(
            <Erc721MetadataExample as IErc165>::interface_id()
        )));

        let fake_interface_id: B32 = 0x1234_5678_u32.into();
        assert!(!contract.sender(alice).supports_interface(fake_interface_id));
    }

    #[motsu::test]
    fn token_uri_returns_stored_uri(
        contract: Contract<Erc721MetadataExample>,
        alice: Address,
    ) {
        contract
            .sender(alice)
            .constructor(String::from("NFT Chronicles"), String::from("NFTC"));
        contract
            .sender(alice)
            .erc721
            ._mint(alice, TOKEN_ID)
            .motsu_expect("should mint a token for Alice");
        contract.sender(alice).set_token_uri(TOKEN_ID, String::from(TOKEN_URI));

        let uri = contract
            .sender(alice)
            .token_uri(TOKEN_ID)
            .motsu_expect("should return the token URI");
        assert_eq!(uri, TOKEN_URI);
        assert_eq!(contract.sender(alice).name(), "NFT Chronicles");
        assert_eq!(contract.sender(alice).symbol(), "NFTC");
    }

    #[motsu::test]
    fn token_uri_reverts_for_nonexistent_token(
        contract: Contract<Erc721MetadataExample>,
        alice: Address,
    ) {
        contract.sender(alice).set_token_uri(TOKEN_ID, String::from(TOKEN_URI));

        let err = contract
            .sender(alice)
            .token_uri(TOKEN_ID)
            .motsu_expect_err("should return `Error::InvalidToken`");
        assert_eq!(err, erc721::Error::InvalidToken);
    }

    #[motsu::test]
    fn clears_token_uri(
        contract: Contract<Erc721MetadataExample>,
        alice: Address,
    ) {
        contract.sender(alice).erc721._mint(alice, TOKEN_ID).motsu_unwrap();
        contract.sender(alice).set_token_uri(TOKEN_ID, String::from(TOKEN_URI));

        contract.sender(alice).uri_storage._clear_token_uri(TOKEN_ID);

        let uri = contract.sender(alice).token_uri(TOKEN_ID).motsu_unwrap();
        assert_eq!(uri, "");
    }
}
