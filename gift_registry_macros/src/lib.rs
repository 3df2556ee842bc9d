mod table_entity;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(TableEntity)]
// ============================================================================

/// Derive macro that maps a struct onto a (partition, row) key pair.
///
/// Implements `gift_registry::TableEntity` by pointing `partition_key()` and
/// `row_key()` at fields of the struct, or at a constant partition.
///
/// # Usage
///
/// Partition and row taken from fields:
/// ```ignore
/// #[derive(Serialize, Deserialize, Clone, TableEntity)]
/// struct GiftItem {
///     #[table(row)]
///     pub id: String,
///     #[table(partition)]
///     pub gift_list_id: String,
/// }
/// ```
///
/// Constant partition (every row shares one partition):
/// ```ignore
/// #[derive(Serialize, Deserialize, Clone, TableEntity)]
/// #[table(partition = "event")]
/// struct Event {
///     #[table(row)]
///     pub name: String,
/// }
/// ```
///
/// When no field is marked `#[table(row)]`, a field named `id` is used.
#[proc_macro_derive(TableEntity, attributes(table))]
pub fn derive_table_entity(input: TokenStream) -> TokenStream {
    table_entity::derive_table_entity(input)
}
