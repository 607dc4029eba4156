//! Derive macros for Feature Boundaries
//!
//! # Available Macros
//!
//! - `#[derive(FeatureAction)]` - Implements `feature_boundaries::FeatureAction`
//!   for a three-variant action enum
//!
//! # Example
//!
//! ```ignore
//! use feature_boundaries::FeatureAction;
//!
//! #[derive(FeatureAction, Clone, Debug)]
//! enum TodoAction {
//!     View(TodoViewAction),
//!     Internal(TodoInternalAction),
//!     Delegate(TodoDelegateAction),
//! }
//!
//! assert!(TodoAction::view(TodoViewAction::Tapped).is_view());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DataEnum, DeriveInput, Fields, Ident, Type, Variant};

/// Derive macro for feature action enums
///
/// Implements `FeatureAction` (constructors, decomposition into
/// `ActionBoundary`, and the provided helpers) for an enum with exactly three
/// single-field tuple variants.
///
/// # Attributes
///
/// - `#[view]` - The variant carrying view actions
/// - `#[internal]` - The variant carrying internal actions
/// - `#[delegate]` - The variant carrying delegate actions
///
/// Without attributes, the variants named `View`, `Internal`, and `Delegate`
/// are used.
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - The enum does not have exactly three variants
/// - A variant is not a single-field tuple variant
/// - A role is claimed by two variants, or by none
///
/// # Example
///
/// ```ignore
/// #[derive(FeatureAction, Clone, Debug)]
/// enum RowAction {
///     #[view]
///     Ui(RowViewAction),
///     #[internal]
///     Private(RowInternalAction),
///     #[delegate]
///     Parent(RowDelegateAction),
/// }
/// ```
#[proc_macro_derive(FeatureAction, attributes(view, internal, delegate))]
pub fn derive_feature_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Role {
    View,
    Internal,
    Delegate,
}

impl Role {
    const ALL: [Self; 3] = [Self::View, Self::Internal, Self::Delegate];

    const fn attribute(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Internal => "internal",
            Self::Delegate => "delegate",
        }
    }

    const fn variant_name(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Internal => "Internal",
            Self::Delegate => "Delegate",
        }
    }
}

/// A variant chosen for a role, with its payload type
struct Selected<'a> {
    ident: &'a Ident,
    payload: &'a Type,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(FeatureAction)] can only be used on enums",
        ));
    };

    if data_enum.variants.len() != 3 {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(FeatureAction)] requires exactly three variants: view, internal, and delegate",
        ));
    }

    let view = select(input, data_enum, Role::View)?;
    let internal = select(input, data_enum, Role::Internal)?;
    let delegate = select(input, data_enum, Role::Delegate)?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let (view_variant, view_ty) = (view.ident, view.payload);
    let (internal_variant, internal_ty) = (internal.ident, internal.payload);
    let (delegate_variant, delegate_ty) = (delegate.ident, delegate.payload);

    Ok(quote! {
        impl #impl_generics ::feature_boundaries::FeatureAction for #name #ty_generics #where_clause {
            type ViewAction = #view_ty;
            type InternalAction = #internal_ty;
            type DelegateAction = #delegate_ty;

            fn view(action: Self::ViewAction) -> Self {
                Self::#view_variant(action)
            }

            fn internal(action: Self::InternalAction) -> Self {
                Self::#internal_variant(action)
            }

            fn delegate(action: Self::DelegateAction) -> Self {
                Self::#delegate_variant(action)
            }

            fn into_boundary(
                self,
            ) -> ::feature_boundaries::ActionBoundary<Self::ViewAction, Self::InternalAction, Self::DelegateAction> {
                match self {
                    Self::#view_variant(action) => ::feature_boundaries::ActionBoundary::View(action),
                    Self::#internal_variant(action) => ::feature_boundaries::ActionBoundary::Internal(action),
                    Self::#delegate_variant(action) => ::feature_boundaries::ActionBoundary::Delegate(action),
                }
            }

            fn as_boundary(
                &self,
            ) -> ::feature_boundaries::ActionBoundary<&Self::ViewAction, &Self::InternalAction, &Self::DelegateAction> {
                match self {
                    Self::#view_variant(action) => ::feature_boundaries::ActionBoundary::View(action),
                    Self::#internal_variant(action) => ::feature_boundaries::ActionBoundary::Internal(action),
                    Self::#delegate_variant(action) => ::feature_boundaries::ActionBoundary::Delegate(action),
                }
            }
        }
    })
}

/// Pick the variant for `role`: the one carrying its attribute, else the one
/// with the conventional name and no role attribute
fn select<'a>(input: &DeriveInput, data_enum: &'a DataEnum, role: Role) -> syn::Result<Selected<'a>> {
    let mut marked = None;
    for variant in &data_enum.variants {
        let roles = roles_of(&variant.attrs);
        if roles.len() > 1 {
            return Err(syn::Error::new_spanned(
                variant,
                "a variant can carry only one of #[view], #[internal], #[delegate]",
            ));
        }
        if roles.first() == Some(&role) {
            if marked.is_some() {
                return Err(syn::Error::new_spanned(
                    variant,
                    format!("more than one variant is marked #[{}]", role.attribute()),
                ));
            }
            marked = Some(variant);
        }
    }

    let variant = match marked {
        Some(variant) => variant,
        None => data_enum
            .variants
            .iter()
            .find(|v| v.ident == role.variant_name() && roles_of(&v.attrs).is_empty())
            .ok_or_else(|| {
                syn::Error::new_spanned(
                    &input.ident,
                    format!(
                        "no {} variant: mark one with #[{}] or name it `{}`",
                        role.attribute(),
                        role.attribute(),
                        role.variant_name()
                    ),
                )
            })?,
    };

    Ok(Selected {
        ident: &variant.ident,
        payload: payload(variant)?,
    })
}

fn payload(variant: &Variant) -> syn::Result<&Type> {
    match &variant.fields {
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => Ok(&fields.unnamed[0].ty),
        _ => Err(syn::Error::new_spanned(
            variant,
            "FeatureAction variants must wrap exactly one payload, like `View(ViewAction)`",
        )),
    }
}

fn roles_of(attrs: &[Attribute]) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| has_attribute(attrs, role.attribute()))
        .collect()
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
