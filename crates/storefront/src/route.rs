//! Where the front end should go next.

use url::Url;

/// Navigation target returned by flows that end on another view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The cart view.
    Cart,
    /// The order history view.
    Orders,
    /// The login view.
    Login,
    /// A page outside the shop, such as a hosted payment page.
    External(Url),
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cart => f.write_str("/cart"),
            Self::Orders => f.write_str("/orders"),
            Self::Login => f.write_str("/login"),
            Self::External(url) => f.write_str(url.as_str()),
        }
    }
}
