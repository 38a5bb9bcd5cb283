//! Account directory implementations

mod memory;

#[cfg(test)]
mod tests;

pub use memory::InMemoryAccountDirectory;
