//! Procedural macros for the NFT Chronicles Stylus contracts.
extern crate proc_macro;
use proc_macro::TokenStream;

/// Shorthand to print nice errors.
macro_rules! error {
    ($tokens:expr, $($msg:expr),+ $(,)?) => {{
        let error = syn::Error::new(syn::spanned::Spanned::span(&$tokens), format!($($msg),+));
        return error.to_compile_error().into();
    }};
    (@ $tokens:expr, $($msg:expr),+ $(,)?) => {{
        return Err(syn::Error::new(syn::spanned::Spanned::span(&$tokens), format!($($msg),+)))
    }};
}

mod interface_id;

/// Computes the ERC-165 interface id of a trait and exposes it as the
/// associated function `interface_id()`.
///
/// The id is the XOR of the selectors of every function declared in the
/// trait. A function's Solidity name is its Rust name converted to camel
/// case, unless overridden with `#[selector(name = "...")]`. `self`
/// receivers are skipped.
///
/// The function is bounded by `Self: Sized`, so the trait stays usable as a
/// trait object.
///
/// # Examples
///
/// ```rust,ignore
/// #[interface_id]
/// pub trait IErc721Metadata {
///     fn name(&self) -> String;
///     fn symbol(&self) -> String;
///     #[selector(name = "tokenURI")]
///     fn token_uri(&self, token_id: U256) -> Result<String, Vec<u8>>;
/// }
///
/// assert_eq!(<Token as IErc721Metadata>::interface_id(), 0x5b5e139f);
/// ```
#[proc_macro_attribute]
pub fn interface_id(attr: TokenStream, input: TokenStream) -> TokenStream {
    interface_id::interface_id(&attr, input)
}
