//! Ascent-route reference catalog: huts per route and trailhead elevations.
use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_TRAILHEAD_ELEVATION_M;

const DEFAULT_ROUTE_DATA: &str = include_str!("../assets/data/huts.json");

/// A mountain hut on an ascent route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hut {
    pub name: String,
    pub elevation_m: i32,
}

/// One named ascent route: its fifth-station trailhead elevation and the
/// huts along it, ordered by elevation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RouteEntry {
    pub name: String,
    pub trailhead_elevation_m: i32,
    #[serde(default)]
    pub huts: Vec<Hut>,
}

/// Read-only catalog of the known ascent routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RouteCatalog {
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteCatalog {
    /// Load the catalog embedded in the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_ROUTE_DATA).unwrap_or_default()
    }

    /// Default catalog used by the planner.
    #[must_use]
    pub fn default_catalog() -> Self {
        Self::load_from_static()
    }

    /// Look up a route by its display name.
    #[must_use]
    pub fn route(&self, name: &str) -> Option<&RouteEntry> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// The huts along a route, if the route is known.
    #[must_use]
    pub fn huts_for(&self, route: &str) -> Option<&[Hut]> {
        self.route(route).map(|r| r.huts.as_slice())
    }

    /// Find a specific hut on a route.
    #[must_use]
    pub fn find_hut(&self, route: &str, hut_name: &str) -> Option<&Hut> {
        self.huts_for(route)?.iter().find(|h| h.name == hut_name)
    }

    /// Trailhead elevation for a route. Unknown route names fall back to
    /// the Yoshida-route trailhead.
    #[must_use]
    pub fn trailhead_elevation_safe(&self, route: &str) -> i32 {
        self.route(route)
            .map_or(FALLBACK_TRAILHEAD_ELEVATION_M, |r| r.trailhead_elevation_m)
    }

    /// Names of every known route, in catalog order.
    pub fn route_names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.name.as_str())
    }
}
