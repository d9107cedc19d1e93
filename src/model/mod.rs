mod provider_kind;
mod resolver;

pub use provider_kind::ProviderKind;
pub use resolver::{resolve_key, resolve_selection};
