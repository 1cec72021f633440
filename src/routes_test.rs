use std::collections::HashSet;

use super::*;
use crate::router::test_helpers::MockLoader;
use crate::router::{NavigationError, Params};

fn router_with(loader: Arc<MockLoader>) -> Router {
    app_router(&AppConfig::default(), loader).unwrap()
}

#[test]
fn route_names_are_pairwise_distinct() {
    let router = router_with(MockLoader::new());
    let names: HashSet<&str> = router.routes().iter().map(|r| r.name()).collect();
    assert_eq!(names.len(), router.routes().len());
    assert_eq!(router.routes().len(), 5);
}

#[test]
fn routes_are_declared_in_order() {
    let router = router_with(MockLoader::new());
    let declared: Vec<(&str, &str)> = router.routes().iter().map(|r| (r.pattern().as_str(), r.name())).collect();
    assert_eq!(
        declared,
        vec![
            ("/about", ABOUT),
            ("/sign_up", SIGN_UP),
            ("/sign_in", SIGN_IN),
            ("/", GOODS_LIST),
            ("/goods_detail/:id", GOODS_DETAIL),
        ]
    );
}

#[test]
fn only_goods_detail_is_eager() {
    let router = router_with(MockLoader::new());
    for route in router.routes() {
        assert_eq!(route.component().is_lazy(), route.name() != GOODS_DETAIL, "route {}", route.name());
    }
    assert!(router.is_loaded(GOODS_DETAIL));
}

#[test]
fn goods_detail_path_extracts_id() {
    let router = router_with(MockLoader::new());
    let matched = router.resolve("/goods_detail/42").unwrap();
    assert_eq!(matched.view(), ViewId::GoodsDetail);
    assert_eq!(matched.param("id"), Some("42"));
}

#[test]
fn root_resolves_to_goods_list() {
    let router = router_with(MockLoader::new());
    let matched = router.resolve("/").unwrap();
    assert_eq!(matched.name(), GOODS_LIST);
    assert_eq!(matched.view(), ViewId::GoodsList);
    assert!(matched.params.is_empty());
}

#[test]
fn sign_routes_resolve_to_their_views() {
    let router = router_with(MockLoader::new());
    assert_eq!(router.resolve("/sign_in").unwrap().view(), ViewId::SignIn);
    assert_eq!(router.resolve("/sign_up").unwrap().view(), ViewId::SignUp);
    assert_eq!(router.resolve("/about").unwrap().view(), ViewId::About);
}

#[test]
fn unknown_path_is_not_found() {
    let router = router_with(MockLoader::new());
    assert!(matches!(router.resolve("/orders").unwrap_err(), RouteError::NotFound(_)));
}

#[tokio::test]
async fn goods_list_is_loaded_on_first_visit_and_cached() {
    let loader = MockLoader::new();
    let router = router_with(loader.clone());
    assert!(!router.is_loaded(GOODS_LIST));

    router.navigate("/").await.unwrap();
    assert_eq!(loader.calls(), 1);

    router.navigate("/").await.unwrap();
    assert_eq!(loader.calls(), 1);
    assert!(router.is_loaded(GOODS_LIST));
}

#[tokio::test]
async fn each_lazy_view_loads_independently() {
    let loader = MockLoader::new();
    let router = router_with(loader.clone());

    router.navigate("/about").await.unwrap();
    router.navigate("/sign_in").await.unwrap();
    router.navigate("/about").await.unwrap();

    assert_eq!(loader.calls(), 2);
    assert!(!router.is_loaded(SIGN_UP));
}

#[tokio::test(start_paused = true)]
async fn configured_deadline_applies_to_lazy_views() {
    let config = AppConfig { lazy_load_timeout_secs: Some(1), ..AppConfig::default() };
    let router = app_router(&config, MockLoader::slow(std::time::Duration::from_secs(30))).unwrap();

    let err = router.navigate("/sign_up").await.unwrap_err();
    assert!(matches!(err, NavigationError::Load(crate::router::LoadError::TimedOut { .. })));
}

#[test]
fn href_for_goods_detail_uses_configured_base() {
    let config = AppConfig { base_url: "/shop/".to_owned(), ..AppConfig::default() };
    let router = app_router(&config, MockLoader::new()).unwrap();
    let params: Params = [("id".to_owned(), "42".to_owned())].into_iter().collect();
    assert_eq!(router.href(GOODS_DETAIL, &params).unwrap(), "/shop/goods_detail/42");
}
