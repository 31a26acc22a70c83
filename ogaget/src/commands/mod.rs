pub mod extract;
pub mod keys;
pub mod list;
pub mod normalize;
pub mod show;
pub mod unpack;

pub use extract::run as extract;
pub use keys::run as keys;
pub use list::run as list;
pub use normalize::run as normalize;
pub use show::run as show;
pub use unpack::run as unpack;
