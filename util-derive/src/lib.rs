use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident};

/// Derives `util::NamedEnum` for a field-less enum.
///
/// The expansion is table-driven: one name table in declaration order
/// shared by both lookup directions, plus a `FromStr` impl delegating to
/// `from_name`. Indexing by discriminant means the variants must be
/// declared in discriminant order, which the bytecode enums are anyway.
#[proc_macro_derive(NamedEnum)]
pub fn named_enum_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let ident = input.ident;
    let kind = ident.to_string();

    let data = match input.data {
        Data::Enum(data) => data,
        _ => panic!("NamedEnum can only be derived for enums."),
    };

    let mut names = Vec::with_capacity(data.variants.len());
    let mut variants: Vec<Ident> = Vec::with_capacity(data.variants.len());
    for variant in data.variants {
        match variant.fields {
            Fields::Unit => {}
            _ => panic!("NamedEnum requires all variants to be field-less."),
        }
        names.push(variant.ident.to_string());
        variants.push(variant.ident);
    }

    let expanded: proc_macro2::TokenStream = quote! {
        impl ::util::NamedEnum for #ident {
            const NAMES: &'static [&'static str] = &[#(#names),*];

            fn name(&self) -> &'static str {
                Self::NAMES[*self as usize]
            }

            fn from_name(token: &str) -> Result<Self, ::util::UnknownName> {
                const VALUES: &[#ident] = &[#(#ident::#variants),*];
                match #ident::NAMES.iter().position(|name| *name == token) {
                    Some(index) => Ok(VALUES[index]),
                    None => Err(::util::UnknownName {
                        token: token.to_owned(),
                        kind: #kind,
                    }),
                }
            }
        }

        impl ::core::str::FromStr for #ident {
            type Err = ::util::UnknownName;

            fn from_str(token: &str) -> Result<Self, Self::Err> {
                <#ident as ::util::NamedEnum>::from_name(token)
            }
        }
    };

    expanded.into()
}
