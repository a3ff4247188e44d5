pub mod artifact;
pub mod layout;
pub mod request;
pub mod script;

pub use artifact::*;
pub use layout::*;
pub use request::*;
pub use script::*;
