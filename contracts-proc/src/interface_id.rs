//! Defines the `#[interface_id]` procedural macro.

use std::mem;

use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, FnArg, ItemTrait, LitStr, Result, Token, TraitItem,
    Type,
};

/// Computes an interface id as an associated function for the trait.
pub(crate) fn interface_id(
    _attr: &TokenStream,
    input: TokenStream,
) -> TokenStream {
    let mut input = parse_macro_input!(input as ItemTrait);

    let mut selectors = Vec::new();
    for item in &mut input.items {
        let TraitItem::Fn(func) = item else {
            continue;
        };

        let mut override_fn_name = None;
        for attr in mem::take(&mut func.attrs) {
            if attr.path().is_ident("selector") {
                if override_fn_name.is_some() {
                    error!(attr.path(), "more than one selector attribute");
                }
                let args: SelectorArgs = match attr.parse_args() {
                    Ok(args) => args,
                    Err(error) => error!(attr.path(), "{}", error),
                };
                override_fn_name = Some(args.name);
            } else {
                func.attrs.push(attr);
            }
        }

        let solidity_fn_name = override_fn_name.unwrap_or_else(|| {
            func.sig.ident.to_string().to_case(Case::Camel)
        });

        let arg_types = func.sig.inputs.iter().filter_map(|arg| match arg {
            FnArg::Typed(t) if is_abi_type(&t.ty) => Some(t.ty.clone()),
            _ => None,
        });

        selectors.push(quote! {
            u32::from_be_bytes(stylus_sdk::function_selector!(#solidity_fn_name #(, #arg_types )*))
        });
    }

    if selectors.is_empty() {
        error!(input.ident, "interface must declare at least one function");
    }

    let name = input.ident;
    let vis = input.vis;
    let attrs = input.attrs;
    let supertraits = input.supertraits;
    let colon = input.colon_token;
    let trait_items = input.items;
    let (_impl_generics, ty_generics, where_clause) =
        input.generics.split_for_impl();

    quote! {
        #(#attrs)*
        #vis trait #name #ty_generics #colon #supertraits #where_clause {
            #(#trait_items)*

            #[doc = concat!("Solidity interface id associated with ", stringify!(#name), " trait.")]
            #[doc = "Computed as a XOR of selectors for each function in the trait."]
            fn interface_id() -> u32
            where
                Self: Sized,
            {
                #(#selectors)^*
            }
        }
    }
    .into()
}

/// Tells whether an argument takes part in the Solidity signature.
///
/// References and slices only show up for storage handles passed to helper
/// functions, which are not ABI arguments.
fn is_abi_type(ty: &Type) -> bool {
    !matches!(ty, Type::Reference(_) | Type::Slice(_))
}

/// Contains arguments of the `#[selector(..)]` attribute.
struct SelectorArgs {
    name: String,
}

impl Parse for SelectorArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident: Ident = input.parse()?;

        if ident == "name" {
            let _: Token![=] = input.parse()?;
            let lit: LitStr = input.parse()?;
            Ok(SelectorArgs { name: lit.value() })
        } else {
            error!(@ident, "expected identifier 'name'")
        }
    }
}
