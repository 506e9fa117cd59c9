//! Session / Navigation State Machine
//!
//! A `Session` is the whole per-user state of the storefront: the cart, the
//! login status with its pending redirect, and the current view. Every
//! operation mutates the session synchronously and returns the `Effects` a
//! renderer needs (notifications, navigation, redraw request). Nothing here
//! knows about HTTP or widgets.
//!
//! ```text
//!                  auth button                 login ok
//!   LOGGED_OUT ───────────────► Login view ───────────────► LOGGED_IN
//!       ▲        checkout (redirect = Checkout)                  │
//!       │                                                        │
//!       └──────────────────── auth button ◄──────────────────────┘
//! ```

use std::sync::Arc;

use uuid::Uuid;

use super::models::{
    Credentials, Effects, NavigableView, Notification, OrderSnapshot, Redirect, SessionSnapshot,
    SessionState, View,
};
use crate::cart::helpers::{format_item_summary, format_money};
use crate::cart::models::{CartLineView, CartOutcome};
use crate::cart::Cart;
use crate::catalog::Product;

pub const MSG_SIGNED_OUT: &str = "You have been signed out.";
pub const MSG_CART_EMPTY: &str = "Your cart is empty. Please add products first.";
pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields.";
pub const MSG_LOGIN_TO_CHECKOUT: &str = "Login successful! Redirecting to Finalize Order.";
pub const MSG_LOGIN_WELCOME: &str = "Login successful! Welcome back.";
pub const MSG_SIGN_IN_TO_ORDER: &str = "Please sign in to place your order.";
pub const MSG_CHECKOUT_FIRST: &str = "Please proceed to checkout before placing your order.";
pub const MSG_ADD_STOCK_LIMIT: &str = "Cannot add more; reached available stock limit";
pub const MSG_STOCK_LIMIT: &str = "Reached available stock limit";
pub const MSG_CONTACT_SENT: &str = "Message sent! Thank you.";
pub const MSG_PAST_ORDERS: &str = "Past orders feature not implemented.";

/// Per-user storefront state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    cart: Cart,
    view: View,
}

impl Session {
    /// Logged out, empty cart, on the home view.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Adds one unit of `product` to the cart.
    pub fn add_to_cart(&mut self, product: Arc<Product>) -> Effects {
        let name = product.name.clone();
        let outcome = self.cart.add(product);
        tracing::debug!(product = %name, ?outcome, "add to cart");

        match outcome {
            CartOutcome::StockLimit { .. } => {
                Effects::none().notify(Notification::warning(MSG_ADD_STOCK_LIMIT))
            }
            _ => Effects::none()
                .notify(Notification::success(format!("Added {name} to cart!")))
                .changed(),
        }
    }

    /// Moves a line's quantity by `delta` (+1 or -1).
    pub fn change_quantity(&mut self, product_id: &str, delta: i32) -> Effects {
        let outcome = self.cart.change_quantity(product_id, delta);
        tracing::debug!(product_id, delta, ?outcome, "change quantity");

        match outcome {
            CartOutcome::Missing => Effects::none(),
            CartOutcome::StockLimit { .. } => {
                Effects::none().notify(Notification::warning(MSG_STOCK_LIMIT))
            }
            _ => Effects::none().changed(),
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Header "Sign In" / "Logout" button.
    pub fn auth_button(&mut self) -> Effects {
        if self.state.logged_in {
            self.state.logged_in = false;
            tracing::info!("session signed out");
            self.navigate_to(View::Home)
                .notify(Notification::success(MSG_SIGNED_OUT))
                .changed()
        } else {
            self.state.pending_redirect = Redirect::Home;
            self.navigate_to(View::Login)
        }
    }

    /// "Checkout" / "Proceed to Payment" button.
    pub fn request_checkout(&mut self) -> Effects {
        if self.cart.is_empty() {
            return Effects::none().notify(Notification::warning(MSG_CART_EMPTY));
        }

        if self.state.logged_in {
            self.navigate_to(View::PlaceOrder)
        } else {
            self.state.pending_redirect = Redirect::Checkout;
            self.navigate_to(View::Login)
        }
    }

    /// Simulated login: any complete credential set succeeds.
    pub fn login(&mut self, credentials: &Credentials) -> Effects {
        if !credentials.is_complete() {
            return Effects::none().notify(Notification::error(MSG_FILL_ALL_FIELDS));
        }

        self.state.logged_in = true;
        tracing::info!(
            username = %credentials.username,
            redirect = ?self.state.pending_redirect,
            "session signed in"
        );

        let redirect = self.state.pending_redirect;
        let effects = match redirect {
            Redirect::Checkout => self
                .navigate_to(View::PlaceOrder)
                .notify(Notification::success(MSG_LOGIN_TO_CHECKOUT)),
            Redirect::Home => self
                .navigate_to(View::Home)
                .notify(Notification::success(MSG_LOGIN_WELCOME)),
        };

        self.state.pending_redirect = Redirect::Home;
        effects.changed()
    }

    /// "Place Order Now": snapshots the total, clears the cart and shows the
    /// confirmation. Only accepted from the place-order view.
    pub fn place_order(&mut self) -> Effects {
        if !self.state.logged_in {
            return Effects::none().notify(Notification::error(MSG_SIGN_IN_TO_ORDER));
        }
        if self.view != View::PlaceOrder {
            return Effects::none().notify(Notification::error(MSG_CHECKOUT_FIRST));
        }
        if self.cart.is_empty() {
            return Effects::none().notify(Notification::warning(MSG_CART_EMPTY));
        }

        // The snapshot must be taken before the clear resets the totals.
        let grand_total = self.cart.totals().grand_total;
        let order = OrderSnapshot {
            order_number: new_order_number(),
            grand_total,
            total_charged: format_money(grand_total),
        };

        tracing::info!(
            order = %order.order_number,
            total = %order.total_charged,
            items = %format_item_summary(self.cart.lines()),
            "order placed"
        );

        let confirmation = Notification::success(format!(
            "Order #{} confirmed! Thank you for shopping with EMA-JOHN.",
            order.order_number
        ));

        self.cart.clear();

        self.navigate_to(View::OrderConfirmation { order })
            .notify(confirmation)
            .changed()
    }

    /// Opens one of the freely reachable views.
    pub fn navigate(&mut self, view: NavigableView) -> Effects {
        self.navigate_to(view.into())
    }

    pub fn send_contact_message(&self) -> Effects {
        Effects::none().notify(Notification::info(MSG_CONTACT_SENT))
    }

    pub fn view_past_orders(&self) -> Effects {
        Effects::none().notify(Notification::info(MSG_PAST_ORDERS))
    }

    fn navigate_to(&mut self, view: View) -> Effects {
        self.view = view.clone();
        Effects {
            navigated_to: Some(view),
            ..Effects::none()
        }
    }

    // -------------------------------------------------------------------------
    // Read model
    // -------------------------------------------------------------------------

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            view: self.view.clone(),
            logged_in: self.state.logged_in,
            pending_redirect: self.state.pending_redirect,
            auth_button_label: if self.state.logged_in { "Logout" } else { "Sign In" },
            cart: self.cart.lines().iter().map(CartLineView::from).collect(),
            cart_count: self.cart.len(),
            cart_is_empty: self.cart.is_empty(),
            totals: self.cart.totals().into(),
        }
    }
}

fn new_order_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::fallback_products;
    use crate::session::models::Severity;
    use rust_decimal::Decimal;

    fn product(id: &str, price: i64, shipping: i64, stock: u32) -> Arc<Product> {
        let mut p = fallback_products().remove(0);
        p.id = id.to_string();
        p.name = format!("Product {id}");
        p.price = Decimal::from(price);
        p.shipping = Decimal::from(shipping);
        p.stock = stock;
        Arc::new(p)
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "ema".into(),
            email: "ema@example.com".into(),
            password: "secret".into(),
        }
    }

    fn session_with_cart() -> Session {
        let mut session = Session::new();
        let a = product("a", 10, 1, 5);
        session.add_to_cart(a.clone());
        session.add_to_cart(a);
        session.add_to_cart(product("b", 5, 0, 5));
        session
    }

    #[test]
    fn test_initial_state() {
        let session = Session::new();
        assert_eq!(
            session.state(),
            SessionState {
                logged_in: false,
                pending_redirect: Redirect::Home
            }
        );
        assert_eq!(session.view(), &View::Home);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_add_to_cart_notifies() {
        let mut session = Session::new();

        let effects = session.add_to_cart(product("a", 10, 1, 1));
        assert!(effects.changed);
        assert_eq!(effects.notifications[0].severity, Severity::Success);
        assert_eq!(effects.notifications[0].message, "Added Product a to cart!");

        let effects = session.add_to_cart(product("a", 10, 1, 1));
        assert!(!effects.changed);
        assert_eq!(effects.notifications, [Notification::warning(MSG_ADD_STOCK_LIMIT)]);
    }

    #[test]
    fn test_zero_stock_add_warns_and_leaves_cart() {
        let mut session = Session::new();
        let effects = session.add_to_cart(product("z", 10, 1, 0));

        assert_eq!(effects.notifications, [Notification::warning(MSG_ADD_STOCK_LIMIT)]);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_change_quantity_effects() {
        let mut session = session_with_cart();

        assert_eq!(session.change_quantity("missing", 1), Effects::none());

        let effects = session.change_quantity("b", -1);
        assert!(effects.changed);
        assert!(effects.notifications.is_empty());
        assert_eq!(session.cart().len(), 1);
    }

    #[test]
    fn test_checkout_with_empty_cart_is_rejected() {
        let mut session = Session::new();
        let before = session.state();

        let effects = session.request_checkout();

        assert_eq!(effects.notifications, [Notification::warning(MSG_CART_EMPTY)]);
        assert_eq!(effects.navigated_to, None);
        assert_eq!(session.state(), before);
        assert_eq!(session.view(), &View::Home);
    }

    #[test]
    fn test_checkout_logged_out_goes_to_login() {
        let mut session = session_with_cart();

        let effects = session.request_checkout();

        assert_eq!(effects.navigated_to, Some(View::Login));
        assert_eq!(session.state().pending_redirect, Redirect::Checkout);
    }

    #[test]
    fn test_login_after_checkout_resumes_checkout() {
        let mut session = session_with_cart();
        session.request_checkout();

        let effects = session.login(&credentials());

        assert!(session.state().logged_in);
        assert_eq!(effects.navigated_to, Some(View::PlaceOrder));
        assert_eq!(effects.notifications, [Notification::success(MSG_LOGIN_TO_CHECKOUT)]);
        assert_eq!(session.state().pending_redirect, Redirect::Home);
    }

    #[test]
    fn test_login_from_header_goes_home() {
        let mut session = Session::new();
        assert_eq!(session.auth_button().navigated_to, Some(View::Login));

        let effects = session.login(&credentials());

        assert_eq!(effects.navigated_to, Some(View::Home));
        assert_eq!(effects.notifications, [Notification::success(MSG_LOGIN_WELCOME)]);
        assert_eq!(session.state().pending_redirect, Redirect::Home);
    }

    #[test]
    fn test_header_button_resets_pending_checkout() {
        let mut session = session_with_cart();
        session.request_checkout();
        session.auth_button();

        let effects = session.login(&credentials());
        assert_eq!(effects.navigated_to, Some(View::Home));
    }

    #[test]
    fn test_login_with_blank_field_is_rejected() {
        let mut session = session_with_cart();
        session.request_checkout();

        let mut creds = credentials();
        creds.email = "  ".into();
        let effects = session.login(&creds);

        assert_eq!(effects.notifications, [Notification::error(MSG_FILL_ALL_FIELDS)]);
        assert_eq!(effects.navigated_to, None);
        assert!(!session.state().logged_in);
        assert_eq!(session.state().pending_redirect, Redirect::Checkout);
        assert_eq!(session.view(), &View::Login);
    }

    #[test]
    fn test_checkout_when_logged_in_skips_login() {
        let mut session = session_with_cart();
        session.auth_button();
        session.login(&credentials());

        let effects = session.request_checkout();
        assert_eq!(effects.navigated_to, Some(View::PlaceOrder));
    }

    #[test]
    fn test_logout() {
        let mut session = Session::new();
        session.auth_button();
        session.login(&credentials());

        let effects = session.auth_button();

        assert!(!session.state().logged_in);
        assert_eq!(effects.navigated_to, Some(View::Home));
        assert_eq!(effects.notifications, [Notification::success(MSG_SIGNED_OUT)]);
        assert_eq!(session.snapshot().auth_button_label, "Sign In");
    }

    #[test]
    fn test_place_order_snapshots_total_before_clear() {
        let mut session = session_with_cart();
        session.request_checkout();
        session.login(&credentials());

        let expected = session.cart().totals().grand_total;
        assert_eq!(expected, Decimal::from(27));

        let effects = session.place_order();

        let order = match effects.navigated_to {
            Some(View::OrderConfirmation { order }) => order,
            other => panic!("expected confirmation view, got {other:?}"),
        };
        assert_eq!(order.grand_total, expected);
        assert_eq!(order.total_charged, "€27.00");
        assert_eq!(order.order_number.len(), 8);
        assert!(session.cart().is_empty());
        assert_eq!(session.cart().totals().grand_total, Decimal::ZERO);
        assert!(effects.notifications[0]
            .message
            .contains(&format!("Order #{}", order.order_number)));
    }

    #[test]
    fn test_place_order_requires_login_and_items() {
        let mut session = session_with_cart();
        let effects = session.place_order();
        assert_eq!(effects.notifications, [Notification::error(MSG_SIGN_IN_TO_ORDER)]);
        assert_eq!(session.cart().len(), 2);

        // Reached the place-order view, then emptied the cart from the panel
        let mut session = session_with_cart();
        session.request_checkout();
        session.login(&credentials());
        session.change_quantity("a", -1);
        session.change_quantity("a", -1);
        session.change_quantity("b", -1);
        let effects = session.place_order();
        assert_eq!(effects.notifications, [Notification::warning(MSG_CART_EMPTY)]);
        assert_eq!(effects.navigated_to, None);
        assert_eq!(session.view(), &View::PlaceOrder);
    }

    #[test]
    fn test_place_order_outside_place_order_view_is_rejected() {
        let mut session = session_with_cart();
        session.auth_button();
        session.login(&credentials());
        assert_eq!(session.view(), &View::Home);

        let effects = session.place_order();
        assert_eq!(effects.notifications, [Notification::error(MSG_CHECKOUT_FIRST)]);
        assert_eq!(effects.navigated_to, None);
        assert!(!effects.changed);
        assert_eq!(session.cart().len(), 2);

        session.navigate(NavigableView::OrderReview);
        let effects = session.place_order();
        assert_eq!(effects.notifications, [Notification::error(MSG_CHECKOUT_FIRST)]);
        assert_eq!(session.view(), &View::OrderReview);
        assert_eq!(session.cart().len(), 2);
    }

    #[test]
    fn test_snapshot_with_huge_price_saturates() {
        let record = serde_json::json!({ "id": "big", "price": 4e28, "stock": 10 });
        let product = Arc::new(Product::from_record(0, record.as_object().unwrap()));

        let mut session = Session::new();
        session.add_to_cart(product.clone());
        session.add_to_cart(product);

        let snap = session.snapshot();
        assert_eq!(snap.cart[0].qty, 2);
        assert_eq!(snap.totals.grand_total, Decimal::MAX);
        assert!(!snap.totals.grand_total_display.is_empty());
    }

    #[test]
    fn test_navigate_and_info_actions() {
        let mut session = Session::new();

        let effects = session.navigate(NavigableView::About);
        assert_eq!(effects.navigated_to, Some(View::About));
        assert_eq!(session.view(), &View::About);

        assert_eq!(
            session.send_contact_message().notifications,
            [Notification::info(MSG_CONTACT_SENT)]
        );
        assert_eq!(
            session.view_past_orders().notifications,
            [Notification::info(MSG_PAST_ORDERS)]
        );
    }

    #[test]
    fn test_snapshot_reflects_cart() {
        let session = session_with_cart();
        let snap = session.snapshot();

        assert_eq!(snap.cart_count, 2);
        assert!(!snap.cart_is_empty);
        assert_eq!(snap.cart[0].qty, 2);
        assert_eq!(snap.totals.subtotal_display, "€25.00");
        assert_eq!(snap.totals.shipping_display, "€2.00");
        assert_eq!(snap.totals.grand_total_display, "€27.00");
    }
}
