use crate::models::{Census, LibraryName};

/// Count how many times each library name occurs.
///
/// The sum of all counts equals `libraries.len()`.
pub fn build_census(libraries: &[LibraryName]) -> Census {
    let mut census = Census::new();
    for lib in libraries {
        *census.entry(lib.clone()).or_insert(0) += 1;
    }
    census
}
