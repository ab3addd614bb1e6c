//! Client-side routes
//!
//! Pure path parsing and access rules; the app component owns history.

use task_hub_core::EntityId;

#[derive(Clone, Debug, PartialEq)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
    Projects,
    TaskBoard(EntityId),
    TaskDetail(EntityId),
    /// `/` and anything unrecognized
    Root,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            ["login"] => Route::Login,
            ["signup"] => Route::Signup,
            ["dashboard"] => Route::Dashboard,
            ["projects"] => Route::Projects,
            ["projects", id, "tasks"] => EntityId::parse(id).map(Route::TaskBoard).unwrap_or(Route::Root),
            ["tasks", id] => EntityId::parse(id).map(Route::TaskDetail).unwrap_or(Route::Root),
            _ => Route::Root,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::TaskBoard(id) => format!("/projects/{}/tasks", id),
            Route::TaskDetail(id) => format!("/tasks/{}", id),
            Route::Root => "/".to_string(),
        }
    }

    fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }

    /// Where the user actually lands. Signed-in users skip the auth pages,
    /// everyone else is sent to login.
    pub fn resolve(self, authenticated: bool) -> Self {
        match (self, authenticated) {
            (Route::Root, true) => Route::Dashboard,
            (Route::Root, false) => Route::Login,
            (route, true) if route.is_public() => Route::Dashboard,
            (route, false) if !route.is_public() => Route::Login,
            (route, _) => route,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/projects/"), Route::Projects);
        assert_eq!(Route::parse("/projects/12/tasks"), Route::TaskBoard(EntityId::Int(12)));
        assert_eq!(
            Route::parse("/tasks/9b2f-uuid"),
            Route::TaskDetail(EntityId::Text("9b2f-uuid".into()))
        );
        assert_eq!(Route::parse("/dashboard?tab=1"), Route::Dashboard);
    }

    #[test]
    fn test_unknown_is_root() {
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse("/nope/at/all"), Route::Root);
        assert_eq!(Route::parse("/projects/7"), Route::Root);
    }

    #[test]
    fn test_path_round_trip() {
        for route in [Route::Projects, Route::TaskBoard(EntityId::Int(3)), Route::TaskDetail(EntityId::Int(4))] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Route::Root.resolve(true), Route::Dashboard);
        assert_eq!(Route::Root.resolve(false), Route::Login);
        assert_eq!(Route::Login.resolve(true), Route::Dashboard);
        assert_eq!(Route::Signup.resolve(false), Route::Signup);
        assert_eq!(Route::Projects.resolve(false), Route::Login);
        assert_eq!(Route::Projects.resolve(true), Route::Projects);
    }
}
