pub mod asset;
pub mod identifier;

pub use asset::Asset;
pub use identifier::Identifier;
