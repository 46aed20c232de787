//! Sidebar routes.

use serde::Serialize;

/// Top-level screens, one per route.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Dashboard,
    Doctors,
    Patients,
    Appointments,
    Search,
    Reports,
}

impl Route {
    /// Menu order.
    pub const ALL: [Route; 6] = [
        Route::Dashboard,
        Route::Doctors,
        Route::Patients,
        Route::Appointments,
        Route::Search,
        Route::Reports,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Doctors => "/doctors",
            Route::Patients => "/patients",
            Route::Appointments => "/appointments",
            Route::Search => "/search",
            Route::Reports => "/reports",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Doctors => "Médicos",
            Route::Patients => "Pacientes",
            Route::Appointments => "Consultas",
            Route::Search => "Pesquisar",
            Route::Reports => "Relatórios",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MenuItem {
    pub route: Route,
    pub path: &'static str,
    pub label: &'static str,
    /// Highlighted: the current path equals this route's path exactly
    pub active: bool,
}

/// Sidebar entries for the page at `current_path`.
pub fn menu(current_path: &str) -> Vec<MenuItem> {
    Route::ALL
        .into_iter()
        .map(|route| MenuItem {
            route,
            path: route.path(),
            label: route.label(),
            active: route.path() == current_path,
        })
        .collect()
}
