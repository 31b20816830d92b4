use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Derives `from_bytes` and `from_slice` constructors that decode a JSON
/// response body, mapping failures to `crate::Error::Decoding`.
///
/// Only meant to be used inside `oxygen-sdk`, since the generated code refers
/// to `crate::Result` and `crate::Error`.
#[proc_macro_derive(FromBytes)]
pub fn derive_from_bytes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(expand_from_bytes(&input))
}

fn expand_from_bytes(input: &DeriveInput) -> TokenStream2 {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Decodes a JSON response body.
            pub fn from_bytes(bytes: ::bytes::Bytes) -> crate::Result<Self> {
                Self::from_slice(&bytes)
            }

            /// Decodes a JSON response body from a borrowed slice.
            pub fn from_slice(bytes: &[u8]) -> crate::Result<Self> {
                ::serde_json::from_slice(bytes).map_err(crate::Error::Decoding)
            }
        }
    }
}
