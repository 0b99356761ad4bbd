mod session;
mod token;

pub use session::Session;
pub use token::TokenStore;
