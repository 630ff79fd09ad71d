/*!
# NFT Chronicles contracts for Stylus

Reusable storage components for ownable, priced ERC-721 collections written
in Rust for [Arbitrum Stylus](https://docs.arbitrum.io/stylus/stylus-gentle-introduction),
plus the clone machinery used by the collection factory.

Contracts are assembled by embedding the components in an `#[entrypoint]`
storage struct and re-exporting their traits with `#[public]`:

```ignore
use chronicles_stylus::{
    access::ownable::Ownable,
    token::erc721::{self, Erc721, IErc721},
};
use stylus_sdk::prelude::*;

#[entrypoint]
#[storage]
struct Collection {
    erc721: Erc721,
    ownable: Ownable,
}

#[public]
#[implements(IErc721<Error = erc721::Error>)]
impl Collection {}
```

Every failure reverts with a Solidity `Error(string)` whose message is one
of the short reasons exposed by [`utils::revert`], e.g. `"Forbidden"` or
`"Invalid token"`.
*/

#![allow(clippy::module_name_repetitions)]
#![cfg_attr(not(any(test, feature = "export-abi")), no_std, no_main)]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

pub mod access;
pub mod finance;
pub mod proxy;
pub mod token;
pub mod utils;
