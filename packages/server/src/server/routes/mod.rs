// HTTP routes
pub mod health;
pub mod pages;
pub mod urls;

pub use health::*;
pub use pages::*;
pub use urls::*;
