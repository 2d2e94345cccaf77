pub(super) mod dish;
pub(super) mod order;

/// keys of a table sorted by numeric value, which matches insertion
/// order since record IDs are generated monotonically
fn sort_keys_numerically(mut keys: Vec<String>) -> Vec<String> {
    keys.sort_by_key(|k| k.parse::<u64>().unwrap_or(u64::MAX));
    keys
}
