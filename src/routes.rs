//! The storefront's route table.
//!
//! Only the goods detail view ships in the initial bundle; every other view
//! is fetched the first time its route is visited. No not-found route is
//! declared, so unknown paths resolve to `RouteError::NotFound`.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::router::{RouteError, Router, ViewComponent, ViewId, ViewLoader};

pub const ABOUT: &str = "about";
pub const SIGN_UP: &str = "sign_up";
pub const SIGN_IN: &str = "signIn";
pub const GOODS_LIST: &str = "goodsList";
pub const GOODS_DETAIL: &str = "goodsDetail";

/// Build the application router, with lazy views fetched through `loader`.
///
/// # Errors
///
/// Returns a [`RouteError`] if the table is malformed.
pub fn app_router(config: &AppConfig, loader: Arc<dyn ViewLoader>) -> Result<Router, RouteError> {
    let timeout = config.lazy_load_timeout();
    let lazy = |view| ViewComponent::lazy(view, Arc::clone(&loader), timeout);

    Router::builder(&config.base_url)
        .route("/about", ABOUT, lazy(ViewId::About))
        .route("/sign_up", SIGN_UP, lazy(ViewId::SignUp))
        .route("/sign_in", SIGN_IN, lazy(ViewId::SignIn))
        .route("/", GOODS_LIST, lazy(ViewId::GoodsList))
        .route("/goods_detail/:id", GOODS_DETAIL, ViewComponent::eager(ViewId::GoodsDetail))
        .build()
}
