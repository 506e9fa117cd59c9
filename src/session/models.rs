//! Session Domain Models
//!
//! This module contains the data structures of the login/checkout flow: the
//! session state, views, notifications and the read model of a session.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::models::{CartLineView, TotalsView};

// =============================================================================
// Session State
// =============================================================================

/// Where to go after a successful login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Redirect {
    #[default]
    Home,
    Checkout,
}

/// Login status and pending redirect of one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub logged_in: bool,
    pub pending_redirect: Redirect,
}

/// Login form contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    /// True when every field has non-whitespace content.
    pub fn is_complete(&self) -> bool {
        [&self.username, &self.email, &self.password]
            .iter()
            .all(|f| !f.trim().is_empty())
    }
}

// =============================================================================
// Views
// =============================================================================

/// Grand total captured at order placement, before the cart is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub order_number: String,
    pub grand_total: Decimal,

    /// Display form of `grand_total`, e.g. `"€27.00"`
    pub total_charged: String,
}

/// The screen a session is on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum View {
    #[default]
    Home,
    OrderReview,
    Login,
    PlaceOrder,
    OrderConfirmation { order: OrderSnapshot },
    Contact,
    About,
}

/// Views a client may open directly. The others are entered only through
/// the login and checkout transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigableView {
    Home,
    OrderReview,
    Contact,
    About,
}

impl From<NavigableView> for View {
    fn from(v: NavigableView) -> Self {
        match v {
            NavigableView::Home => View::Home,
            NavigableView::OrderReview => View::OrderReview,
            NavigableView::Contact => View::Contact,
            NavigableView::About => View::About,
        }
    }
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

/// Everything one session operation produced, for the renderer to act on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Effects {
    /// Messages to show, in order
    pub notifications: Vec<Notification>,

    /// View entered by this operation, if it navigated
    pub navigated_to: Option<View>,

    /// State changed and dependent views must be redrawn
    pub changed: bool,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notify(mut self, notification: Notification) -> Self {
        self.notifications.push(notification);
        self
    }

    pub fn changed(mut self) -> Self {
        self.changed = true;
        self
    }
}

// =============================================================================
// Read Model
// =============================================================================

/// Immutable view of a session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub view: View,
    pub logged_in: bool,
    pub pending_redirect: Redirect,

    /// Header button caption: `Sign In` or `Logout`
    pub auth_button_label: &'static str,

    pub cart: Vec<CartLineView>,
    pub cart_count: usize,
    pub cart_is_empty: bool,
    pub totals: TotalsView,
}
