use crate::{Route, RouteClass};

#[test]
fn given_named_paths_when_parsed_then_round_trip_through_path() {
    for route in Route::ALL {
        assert_eq!(Route::parse(route.path()), route);
    }
}

#[test]
fn given_trailing_slash_query_and_fragment_when_parsed_then_ignored() {
    assert_eq!(Route::parse("/dashboard/"), Route::Dashboard);
    assert_eq!(Route::parse("/login?next=/help"), Route::Login);
    assert_eq!(Route::parse("/help#contact"), Route::Help);
    assert_eq!(Route::parse(""), Route::Landing);
    assert_eq!(Route::parse("/?ref=ad"), Route::Landing);
}

#[test]
fn given_unknown_or_differently_cased_path_when_parsed_then_not_found() {
    assert_eq!(
        Route::parse("/Dashboard"),
        Route::NotFound("/Dashboard".to_string())
    );
    assert_eq!(
        Route::parse("/settings/"),
        Route::NotFound("/settings".to_string())
    );
}

#[test]
fn given_routes_when_classified_then_match_access_classes() {
    assert_eq!(Route::Landing.class(), RouteClass::Landing);
    assert_eq!(Route::Login.class(), RouteClass::Anonymous);
    assert_eq!(Route::Signup.class(), RouteClass::Anonymous);
    assert_eq!(Route::Onboarding.class(), RouteClass::Onboarding);
    assert!(Route::Companion.is_protected());
    assert!(!Route::NotFound("/x".into()).is_protected());
}

#[test]
fn given_route_when_serialized_then_is_its_path() {
    let json = serde_json::to_string(&Route::Progress).unwrap();

    assert_eq!(json, "\"/progress\"");
}
