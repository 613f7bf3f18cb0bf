use proc_macro::TokenStream;

mod patchable;
mod util;

/// Derive `FieldValues`, `Path` and `Patchable` for a struct with named fields.
///
/// Field attributes:
/// - `#[patch(ignore)]` never patched
/// - `#[patch(ignore_null)]` null values are dropped
/// - `#[patch(identity)]` listed in the schema's always-excluded set
/// - `#[patch(skip)]` left out of the schema entirely
/// - `#[patch(rename = "...")]` patch under a different name
///
/// Every non-skipped field type must implement `FieldValue`. 128-bit
/// integers have no `Value` representation; mark such fields `skip`.
#[proc_macro_derive(Patchable, attributes(patch))]
pub fn derive_patchable(input: TokenStream) -> TokenStream {
    patchable::derive_patchable(input.into()).into()
}
