//! Screen routes and navigation history.

use reqwest::Url;

use super::entities::ProductId;

const RESET_PATH: &str = "/auth/ForgotPasswordReset";

/// Admin console sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminRoute {
    Dashboard,
    Products,
    Categories,
    Orders,
}

impl AdminRoute {
    pub const ALL: [Self; 4] = [
        Self::Dashboard,
        Self::Products,
        Self::Categories,
        Self::Orders,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::Categories => "Categories",
            Self::Orders => "Orders",
        }
    }
}

/// Every screen the client can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Category,
    Cart,
    Profile,
    Shopping,
    About,
    ProductDetail(ProductId),
    Login,
    Register,
    ForgotPasswordEmail,
    ForgotPasswordReset { email: String },
    Admin(AdminRoute),
}

impl Route {
    /// Tabs reachable from the navigation bar, in display order.
    pub const TABS: [Self; 5] = [
        Self::Home,
        Self::Category,
        Self::Shopping,
        Self::Cart,
        Self::Profile,
    ];

    /// Path of the route in the router namespace.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Category => "/category".to_string(),
            Self::Cart => "/cart".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Shopping => "/shopping".to_string(),
            Self::About => "/about".to_string(),
            Self::ProductDetail(id) => format!("/product/{id}"),
            Self::Login => "/auth/LoginScreen".to_string(),
            Self::Register => "/auth/RegisterScreen".to_string(),
            Self::ForgotPasswordEmail => "/auth/ForgotPasswordEmail".to_string(),
            Self::ForgotPasswordReset { email } if email.is_empty() => RESET_PATH.to_string(),
            Self::ForgotPasswordReset { email } => {
                let query: String = Url::parse("route://kapee/").map_or_else(
                    |_| String::new(),
                    |mut url| {
                        url.query_pairs_mut().append_pair("email", email);
                        url.query().unwrap_or_default().to_string()
                    },
                );
                format!("{RESET_PATH}?{query}")
            }
            Self::Admin(AdminRoute::Dashboard) => "/admin".to_string(),
            Self::Admin(AdminRoute::Products) => "/admin/products".to_string(),
            Self::Admin(AdminRoute::Categories) => "/admin/categories".to_string(),
            Self::Admin(AdminRoute::Orders) => "/admin/orders".to_string(),
        }
    }

    /// Parses a router path. The query string is only read for the
    /// `email` parameter of the password reset route.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let trimmed = path.trim_end_matches('/');

        let route = match trimmed {
            "" => Self::Home,
            "/category" => Self::Category,
            "/cart" => Self::Cart,
            "/profile" => Self::Profile,
            "/shopping" => Self::Shopping,
            "/about" => Self::About,
            "/auth/LoginScreen" => Self::Login,
            "/auth/RegisterScreen" => Self::Register,
            "/auth/ForgotPasswordEmail" => Self::ForgotPasswordEmail,
            RESET_PATH => Self::ForgotPasswordReset {
                email: query_param(query, "email").unwrap_or_default(),
            },
            "/admin" => Self::Admin(AdminRoute::Dashboard),
            "/admin/products" => Self::Admin(AdminRoute::Products),
            "/admin/categories" => Self::Admin(AdminRoute::Categories),
            "/admin/orders" => Self::Admin(AdminRoute::Orders),
            other => {
                let id = other.strip_prefix("/product/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Self::ProductDetail(ProductId::from(id))
            }
        };

        Some(route)
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::Login | Self::Register | Self::ForgotPasswordEmail | Self::ForgotPasswordReset { .. }
        )
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Category => "Category",
            Self::Cart => "Cart",
            Self::Profile => "Profile",
            Self::Shopping => "Shopping",
            Self::About => "About",
            Self::ProductDetail(_) => "Product",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::ForgotPasswordEmail => "Forgot Password",
            Self::ForgotPasswordReset { .. } => "Reset Password",
            Self::Admin(section) => section.title(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

fn query_param(query: &str, name: &str) -> Option<String> {
    if query.is_empty() {
        return None;
    }
    let url = Url::parse(&format!("route://kapee/?{query}")).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Navigation history with push/replace/back semantics.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Home],
        }
    }

    #[must_use]
    pub fn current(&self) -> &Route {
        self.stack.last().unwrap_or(&Route::Home)
    }

    /// Opens `route` on top of the history.
    pub fn push(&mut self, route: Route) {
        if self.current() != &route {
            self.stack.push(route);
        }
    }

    /// Swaps the current entry for `route`.
    pub fn replace(&mut self, route: Route) {
        self.stack.pop();
        self.stack.push(route);
    }

    /// Goes back one entry; with nothing to go back to, resets to Home.
    pub fn back(&mut self) -> &Route {
        if self.can_go_back() {
            self.stack.pop();
        } else {
            self.stack = vec![Route::Home];
        }
        self.current()
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/" => Some(Route::Home) ; "home")]
    #[test_case("/cart" => Some(Route::Cart) ; "cart")]
    #[test_case("/admin/" => Some(Route::Admin(AdminRoute::Dashboard)) ; "admin trailing slash")]
    #[test_case("/admin/orders" => Some(Route::Admin(AdminRoute::Orders)) ; "admin orders")]
    #[test_case("/product/p1" => Some(Route::ProductDetail(ProductId::from("p1"))) ; "product")]
    #[test_case("/auth/LoginScreen?next=/cart" => Some(Route::Login) ; "query ignored")]
    #[test_case("/admin/tax" => None ; "unknown admin page")]
    #[test_case("/product/" => None ; "missing product id")]
    #[test_case("/auth/ForgotPasswordReset" => Some(Route::ForgotPasswordReset { email: String::new() }) ; "reset without email")]
    #[test_case("/auth/ForgotPasswordReset?email=a%40b.c" => Some(Route::ForgotPasswordReset { email: "a@b.c".to_string() }) ; "reset email decoded")]
    fn test_from_path(path: &str) -> Option<Route> {
        Route::from_path(path)
    }

    #[test]
    fn test_path_round_trip() {
        for route in Route::TABS {
            assert_eq!(Route::from_path(&route.path()), Some(route));
        }
        for section in AdminRoute::ALL {
            let route = Route::Admin(section);
            assert_eq!(Route::from_path(&route.path()), Some(route));
        }
        for email in ["a@b.c", "first+last@shop.io", "name with space@x.y"] {
            let route = Route::ForgotPasswordReset {
                email: email.to_string(),
            };
            assert_eq!(Route::from_path(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_reset_path_carries_email() {
        let route = Route::ForgotPasswordReset {
            email: "a@b.c".to_string(),
        };
        assert_eq!(route.path(), "/auth/ForgotPasswordReset?email=a%40b.c");
    }

    #[test]
    fn test_back_falls_back_to_home() {
        let mut nav = Navigator::new();
        nav.replace(Route::Profile);
        assert!(!nav.can_go_back());
        assert_eq!(nav.back(), &Route::Home);
    }

    #[test]
    fn test_push_and_back() {
        let mut nav = Navigator::new();
        nav.push(Route::Shopping);
        nav.push(Route::ProductDetail(ProductId::from("p1")));
        nav.push(Route::ProductDetail(ProductId::from("p1")));
        assert_eq!(nav.depth(), 3);

        assert_eq!(nav.back(), &Route::Shopping);
        assert_eq!(nav.back(), &Route::Home);
        assert_eq!(nav.back(), &Route::Home);
    }

    #[test]
    fn test_replace_keeps_depth() {
        let mut nav = Navigator::new();
        nav.push(Route::Login);
        nav.replace(Route::Profile);
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.current(), &Route::Profile);
    }

    #[test]
    fn test_route_kinds() {
        assert!(Route::Admin(AdminRoute::Products).is_admin());
        assert!(Route::ForgotPasswordReset { email: "a@b.c".into() }.is_auth());
        assert!(!Route::Cart.is_auth());
    }
}
