pub mod attachment;
pub mod custom_field;
pub mod enumerations;
pub mod group;
pub mod issue;
pub mod journal;
pub mod params;
pub mod project;
pub mod reference;
pub mod relation;
pub mod user;
pub mod version;
pub mod watcher;

pub use attachment::*;
pub use custom_field::*;
pub use enumerations::*;
pub use group::*;
pub use issue::*;
pub use journal::*;
pub use params::*;
pub use project::*;
pub use reference::*;
pub use relation::*;
pub use user::*;
pub use version::*;
pub use watcher::*;
