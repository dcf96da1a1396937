//! Domain models for FarmCart Core

pub mod blog;
pub mod cart;
pub mod common;
pub mod content;
pub mod order;
pub mod payment;
pub mod product;
pub mod review;
pub mod seller;
pub mod user;

pub use blog::*;
pub use cart::*;
pub use common::{gen_id, now_iso};
pub use content::*;
pub use order::*;
pub use payment::*;
pub use product::*;
pub use review::*;
pub use seller::*;
pub use user::*;
