use proc_macro::TokenStream;
use quote::quote;
use syn::{Item, parse_macro_input};

/// Registers a connector node with the catalog.
///
/// Usage:
/// ```ignore
/// #[register_node]
/// #[derive(Default)]
/// pub struct MyNode {}
/// ```
///
/// The struct must implement `Default` and `linkflow::flow::node::NodeLogic`;
/// the surrounding crate must re-export `NodeConstructor` and `inventory`
/// from `linkflow-catalog-core`.
#[proc_macro_attribute]
pub fn register_node(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as Item);

    let name = match &input {
        Item::Struct(item_struct) => item_struct.ident.clone(),
        other => {
            return syn::Error::new_spanned(other, "register_node can only be used on structs")
                .to_compile_error()
                .into();
        }
    };

    let expanded = quote! {
        #input

        ::inventory::submit! {
            #[allow(clippy::redundant_closure)]
            crate::NodeConstructor::new(|| {
                ::std::sync::Arc::new(#name::default()) as ::std::sync::Arc<dyn ::linkflow::flow::node::NodeLogic>
            })
        }
    };

    TokenStream::from(expanded)
}
