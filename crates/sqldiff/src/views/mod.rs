//! View rendering modules

mod diff;
mod split;
mod table;

#[cfg(test)]
mod tests;

pub use diff::render_diff;
pub use split::render_split;
pub use table::render_table;
