//! Built-in F1 route table.

use crate::config::RouteConfig;

/// (name, local path, upstream template)
const F1_ROUTES: &[(&str, &str, &str)] = &[
    ("race_calendar", "/api/f1/get_race_calendar", "/api/f1/get_race_calendar"),
    (
        "race_calendar_by_year",
        "/api/f1/get_race_calendar/:year",
        "/api/f1/get_race_calendar/{year}",
    ),
    ("driver_standings", "/api/f1/get_driver_standings", "/api/f1/get_driver_standings"),
    ("driver_stats", "/api/f1/get_driver_stats", "/api/f1/get_driver_stats"),
    (
        "constructor_standings",
        "/api/f1/get_constructor_standings",
        "/api/f1/get_constructor_standings",
    ),
    ("constructor_stats", "/api/f1/get_constructor_stats", "/api/f1/get_constructor_stats"),
    ("champions", "/api/f1/get_champions", "/api/f1/get_champions"),
    ("previous_champions", "/api/f1/get_previous_champions", "/api/f1/get_previous_champions"),
    ("next_event", "/api/f1/get_next_event", "/api/f1/get_next_event"),
    (
        "next_event_countdown",
        "/api/f1/get_next_event_countdown",
        "/api/f1/get_next_event_countdown",
    ),
    ("drivers", "/api/f1/get_drivers", "/api/f1/get_drivers"),
    ("circuits", "/api/f1/get_circuits", "/api/f1/get_circuits"),
    ("seasons", "/api/f1/get_seasons", "/api/f1/get_seasons"),
    ("recent_race_winners", "/api/f1/get_recent_rWinners", "/api/f1/get_recent_rWinners"),
    ("driver_points", "/api/f1/get_driver_points/:year", "/api/f1/get_driver_points/{year}"),
    (
        "constructor_points",
        "/api/f1/get_constructor_points/:year",
        "/api/f1/get_constructor_points/{year}",
    ),
    (
        "race_results",
        "/api/f1/get_race_results/:year/:round",
        "/api/f1/get_race_results/{year}/{round}",
    ),
    (
        "qualifying_results",
        "/api/f1/get_qualifying_results/:year/:round",
        "/api/f1/get_qualifying_results/{year}/{round}",
    ),
    (
        "sprint_results",
        "/api/f1/get_sprint_results/:year/:round",
        "/api/f1/get_sprint_results/{year}/{round}",
    ),
    // The upstream serves event details from its drivers endpoint.
    ("event", "/api/f1/get_event/:year/:event", "/api/f1/get_drivers/{year}/{event}"),
];

/// The default route table used when the config file defines no routes.
pub fn default_routes() -> Vec<RouteConfig> {
    F1_ROUTES
        .iter()
        .map(|(name, path, upstream)| RouteConfig::new(*name, *path, *upstream))
        .collect()
}
