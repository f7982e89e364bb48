//! Procedural macros for tui-controls

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Group variants by the component they come from
    #[darling(default)]
    infer_categories: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Exclude from category inference
    #[darling(default)]
    skip_category: bool,
}

// Leading words that make a variant a plain command rather than a
// component-scoped action ("FocusNext", "Quit")
const COMMAND_VERBS: &[&str] = &[
    "Open", "Close", "Submit", "Confirm", "Cancel", "Next", "Prev", "Focus", "Quit", "Exit",
    "Show", "Hide", "Toggle", "Select", "Clear", "Reset", "Add", "Remove", "Load", "Save",
    "Scroll", "Did",
];

/// Split a PascalCase string into words
fn split_pascal_case(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, ch) in s.char_indices().skip(1) {
        if ch.is_uppercase() {
            parts.push(&s[start..i]);
            start = i;
        }
    }
    if start < s.len() {
        parts.push(&s[start..]);
    }
    parts
}

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

/// Category of a variant: its first word, when that word names a subject
///
/// `CountryChanged` and `CountrySearch` both land in `country`;
/// `FocusNext` and single-word variants stay uncategorized.
fn infer_category(name: &str) -> Option<String> {
    let parts = split_pascal_case(name);
    if parts.len() < 2 || COMMAND_VERBS.contains(&parts[0]) {
        return None;
    }
    Some(to_snake_case(parts[0]))
}

/// Derive macro for the Action trait
///
/// Generates `name()` returning the variant name.
///
/// With `#[action(infer_categories)]`, also generates:
/// - `category() -> Option<&'static str>`
/// - `is_{category}()` predicates for each category
/// - an `ActionCategory` impl
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum AppAction {
///     CountryChanged(DropdownValue<u32>),
///     CountrySearch(SearchInput),
///     DialogConfirm,
///     #[action(category = "dialog")]
///     Dismiss,
///     FocusNext,
/// }
///
/// assert_eq!(AppAction::DialogConfirm.category(), Some("dialog"));
/// assert!(AppAction::Dismiss.is_dialog());
/// assert_eq!(AppAction::FocusNext.category(), None);
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let variant_str = variant_name.to_string();

        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #variant_str
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #variant_str
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #variant_str
            },
        }
    });

    let mut expanded = quote! {
        impl ::tui_controls::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    if !opts.infer_categories {
        return TokenStream::from(expanded);
    }

    // Sorted so generated predicates come out in a stable order
    let mut categories: BTreeMap<String, Vec<&syn::Ident>> = BTreeMap::new();
    let mut category_arms = Vec::with_capacity(variants.len());

    for v in variants.iter() {
        let category = if v.skip_category {
            None
        } else {
            v.category.clone().or_else(|| infer_category(&v.ident.to_string()))
        };

        let variant = &v.ident;
        let category_expr = match &category {
            Some(c) => quote! { ::core::option::Option::Some(#c) },
            None => quote! { ::core::option::Option::None },
        };
        category_arms.push(quote! { #name::#variant { .. } => #category_expr });

        if let Some(category) = category {
            categories.entry(category).or_default().push(variant);
        }
    }

    let predicates = categories.iter().map(|(category, members)| {
        let predicate_name = format_ident!("is_{}", category);
        let doc = format!("Returns true if this action belongs to the `{}` category.", category);
        quote! {
            #[doc = #doc]
            pub fn #predicate_name(&self) -> bool {
                matches!(self, #(#name::#members { .. })|*)
            }
        }
    });

    expanded = quote! {
        #expanded

        impl #name {
            /// Get the action's category (if categorized)
            pub fn category(&self) -> ::core::option::Option<&'static str> {
                match self {
                    #(#category_arms,)*
                }
            }

            #(#predicates)*
        }

        impl ::tui_controls::ActionCategory for #name {
            fn category(&self) -> ::core::option::Option<&'static str> {
                #name::category(self)
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro for the BindingContext trait
///
/// Generates `name()`, `from_name()` and `all()`. Context names are the
/// variant names in snake_case; they are the table names in keybinding
/// config files.
///
/// # Example
/// ```ignore
/// #[derive(BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GalleryContext {
///     Form,
///     Dropdown,
///     ConfirmDialog,
/// }
///
/// assert_eq!(GalleryContext::ConfirmDialog.name(), "confirm_dialog");
/// assert_eq!(GalleryContext::from_name("form"), Some(GalleryContext::Form));
/// ```
#[proc_macro_derive(BindingContext)]
pub fn derive_binding_context(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let syn::Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input, "BindingContext can only be derived for enums")
            .to_compile_error()
            .into();
    };

    if let Some(variant) = data
        .variants
        .iter()
        .find(|variant| !matches!(variant.fields, syn::Fields::Unit))
    {
        return syn::Error::new_spanned(
            variant,
            "BindingContext can only be derived for enums with unit variants",
        )
        .to_compile_error()
        .into();
    }

    let variant_names: Vec<_> = data.variants.iter().map(|v| &v.ident).collect();
    let variant_strings: Vec<_> = variant_names
        .iter()
        .map(|v| to_snake_case(&v.to_string()))
        .collect();

    let expanded = quote! {
        impl ::tui_controls::BindingContext for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name::#variant_names => #variant_strings),*
                }
            }

            fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#variant_strings => ::core::option::Option::Some(#name::#variant_names),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn all() -> &'static [Self] {
                static ALL: &[#name] = &[#(#name::#variant_names),*];
                ALL
            }
        }
    };

    TokenStream::from(expanded)
}
