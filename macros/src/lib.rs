use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, ExprLit, Fields, Lit, parse_macro_input};

/// Derives the `SensorChannel` trait for enums.
///
/// Each variant becomes one valid sensor channel. The variant's discriminant
/// is the raw channel id (the analog pin or mux input) and the variant name is
/// its display label.
///
/// # Example
///
/// ```ignore
/// use lap_beam_macros::SensorChannel;
///
/// #[derive(Debug, Copy, Clone, PartialEq, Eq, SensorChannel)]
/// pub enum Lane {
///     Inner = 0,
///     Outer = 1,
/// }
/// ```
///
/// This generates:
///
/// ```ignore
/// impl SensorChannel for Lane {
///     fn from_id(id: u8) -> Option<Self> {
///         if id == Self::Inner as u8 {
///             return Some(Self::Inner);
///         }
///         if id == Self::Outer as u8 {
///             return Some(Self::Outer);
///         }
///         None
///     }
///
///     fn id(&self) -> u8 {
///         *self as u8
///     }
///
///     fn as_str(&self) -> &'static str {
///         match self {
///             Self::Inner => "Inner",
///             Self::Outer => "Outer",
///         }
///     }
/// }
/// ```
///
/// # Requirements
///
/// - The type must be an enum with at least one variant
/// - All variants must be unit variants (no fields)
/// - Every discriminant must fit in a `u8`
/// - The enum must be `Copy`
#[proc_macro_derive(SensorChannel)]
pub fn derive_sensor_channel(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_sensor_channel(&input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_sensor_channel(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let variants = match &input.data {
        Data::Enum(data_enum) => &data_enum.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "SensorChannel can only be derived for enums",
            ));
        }
    };

    if variants.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "SensorChannel requires at least one variant",
        ));
    }

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "SensorChannel can only be derived for enums with unit variants (no fields)",
            ));
        }

        if let Some((_, discriminant)) = &variant.discriminant {
            check_literal_id(discriminant)?;
        }
    }

    // Implicit or computed discriminants are checked at compile time instead
    let range_checks = variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let message = format!(
            "SensorChannel id of `{}::{}` must fit in a u8 (0..=255)",
            name, variant_name
        );
        quote! {
            const _: () = ::core::assert!(
                (#name::#variant_name as i128) >= 0 && (#name::#variant_name as i128) <= 255,
                #message
            );
        }
    });

    // Discriminants may be implicit, so compare through `as u8` casts
    let from_id_checks = variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        quote! {
            if id == Self::#variant_name as u8 {
                return Some(Self::#variant_name);
            }
        }
    });

    let as_str_arms = variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let variant_str = variant_name.to_string();
        quote! {
            Self::#variant_name => #variant_str
        }
    });

    Ok(quote! {
        #(#range_checks)*

        impl ::lap_beam::sensor::SensorChannel for #name {
            fn from_id(id: u8) -> Option<Self> {
                #(#from_id_checks)*
                None
            }

            fn id(&self) -> u8 {
                *self as u8
            }

            fn as_str(&self) -> &'static str {
                match self {
                    #(#as_str_arms,)*
                }
            }
        }
    })
}

/// Reject literal discriminants that would be truncated by `as u8`.
fn check_literal_id(discriminant: &Expr) -> syn::Result<()> {
    let Expr::Lit(ExprLit {
        lit: Lit::Int(lit), ..
    }) = discriminant
    else {
        return Ok(());
    };

    match lit.base10_parse::<u8>() {
        Ok(_) => Ok(()),
        Err(_) => Err(syn::Error::new_spanned(
            lit,
            "SensorChannel ids must fit in a u8 (0..=255)",
        )),
    }
}
