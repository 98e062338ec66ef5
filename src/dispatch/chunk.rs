//! Partition location lists into bounded chunks.

/// Split `locations` into ordered chunks of at most `size` elements.
///
/// Concatenating the chunks reproduces the input in order; only the final
/// chunk may hold fewer than `size` elements.
pub fn chunk_locations(locations: Vec<String>, size: usize) -> Vec<Vec<String>> {
    debug_assert!(size > 0);
    locations
        .chunks(size.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}
