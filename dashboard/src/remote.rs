use crate::dashboard::{Dashboard, Notice};
use crate::route::Route;
use crate::update::UpdateSender;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::thread;
use thiserror::Error;

const REMOTE: &str = "remote";

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("route server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("route server returned {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    Search {
        origin: String,
        destination: String,
        budget: f64,
    },
    Recommend {
        origin: String,
        budget: f64,
    },
}

impl Query {
    fn describe(&self) -> &'static str {
        match self {
            Query::Search { .. } => "search",
            Query::Recommend { .. } => "recommend",
        }
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    origin: &'a str,
    destination: &'a str,
    budget: f64,
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
    origin: &'a str,
    budget: f64,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    all_routes: Vec<Route>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendResponse {
    #[serde(default)]
    recommendations: Vec<Route>,
}

/// Blocking client for the route server. Each query runs on its own
/// spawned thread and resolves into a queued dashboard update.
#[derive(Clone)]
pub struct SearchClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl SearchClient {
    pub fn new(base_url: String) -> SearchClient {
        SearchClient {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn run(&self, query: &Query) -> Result<Vec<Route>, RemoteError> {
        match query {
            Query::Search {
                origin,
                destination,
                budget,
            } => self.search(origin, destination, *budget),
            Query::Recommend { origin, budget } => self.recommend(origin, *budget),
        }
    }

    pub fn search(
        &self,
        origin: &str,
        destination: &str,
        budget: f64,
    ) -> Result<Vec<Route>, RemoteError> {
        let response: Option<SearchResponse> = self.post(
            "/api/search",
            &SearchRequest {
                origin,
                destination,
                budget,
            },
        )?;
        Ok(response.map(|response| response.all_routes).unwrap_or_default())
    }

    pub fn recommend(&self, origin: &str, budget: f64) -> Result<Vec<Route>, RemoteError> {
        let response: Option<RecommendResponse> =
            self.post("/api/recommend", &RecommendRequest { origin, budget })?;
        Ok(response
            .map(|response| response.recommendations)
            .unwrap_or_default())
    }

    fn post<B, R>(&self, path: &str, body: &B) -> Result<R, RemoteError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }
        Ok(response.json()?)
    }
}

/// Runs `query` off-thread and queues its continuation. When two queries
/// are in flight the last response to be processed wins the working set;
/// there is no request token ordering them.
pub fn spawn_query(client: SearchClient, query: Query, dashboard_tx: &UpdateSender<Dashboard>) {
    let dashboard_tx = dashboard_tx.clone_with_handle(REMOTE);
    thread::spawn(move || {
        let outcome = client.run(&query);
        dashboard_tx.update(move |dashboard| apply_outcome(dashboard, &query, outcome));
    });
}

/// Maps a query outcome onto the dashboard: transport failures leave the
/// working set untouched behind a generic notice; an empty search rebuilds
/// it empty, an empty recommendation leaves it alone, and each posts its
/// own notice.
pub fn apply_outcome(
    dashboard: &mut Dashboard,
    query: &Query,
    outcome: Result<Vec<Route>, RemoteError>,
) {
    match outcome {
        Err(error) => {
            warn!("{} failed: {}", query.describe(), error);
            dashboard.post_notice(Notice::TransportFailure);
        }
        Ok(routes) => {
            if !routes.is_empty() {
                dashboard.update_routes(routes);
            } else if let Query::Search { .. } = query {
                dashboard.update_routes(vec![]);
                dashboard.post_notice(Notice::NoFeasibleRoute);
            } else {
                dashboard.post_notice(Notice::NoRecommendations);
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cities::CityCoords;
    use crate::dashboard::{CaptureEvent, DashboardEvent, DashboardEventConsumer, DashboardState};
    use std::sync::{Arc, Mutex};

    struct NoticeRecorder {
        notices: Arc<Mutex<Vec<Notice>>>,
    }

    impl DashboardEventConsumer for NoticeRecorder {
        fn name(&self) -> &'static str {
            "notice_recorder"
        }

        fn consume_dashboard_event(
            &mut self,
            _: &DashboardState,
            event: &DashboardEvent,
        ) -> CaptureEvent {
            if let DashboardEvent::NoticePosted(notice) = event {
                self.notices.lock().unwrap().push(*notice);
            }
            CaptureEvent::No
        }

        fn consume_canvas_event(
            &mut self,
            _: &DashboardState,
            _: Arc<canvas::Event>,
        ) -> CaptureEvent {
            CaptureEvent::No
        }
    }

    fn route(path: &[&str]) -> Route {
        Route {
            path: path.iter().map(|city| city.to_string()).collect(),
            total_distance_km: Some(100.0),
            total_cost: Some(25.0),
            total_duration_h: Some(2.0),
            total_co2: Some(15.0),
        }
    }

    fn dashboard_with_recorder() -> (Dashboard, Arc<Mutex<Vec<Notice>>>) {
        let mut dashboard = Dashboard::new(CityCoords::builtin());
        let notices = Arc::new(Mutex::new(vec![]));
        dashboard.add_consumer(NoticeRecorder {
            notices: notices.clone(),
        });
        (dashboard, notices)
    }

    fn search_query() -> Query {
        Query::Search {
            origin: "Lima".to_string(),
            destination: "Cusco".to_string(),
            budget: 500.0,
        }
    }

    fn recommend_query() -> Query {
        Query::Recommend {
            origin: "Lima".to_string(),
            budget: 500.0,
        }
    }

    #[test]
    fn missing_result_array_reads_as_no_routes() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.all_routes.is_empty());
        let response: RecommendResponse = serde_json::from_str("{}").unwrap();
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn null_response_reads_as_no_routes() {
        let response: Option<SearchResponse> = serde_json::from_str("null").unwrap();
        assert!(response.is_none());
    }

    #[test]
    fn routes_deserialize_with_missing_measures() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"all_routes": [{"path": ["Lima", "Cusco"], "total_cost": 30.0}]}"#,
        )
        .unwrap();
        assert_eq!(response.all_routes.len(), 1);
        assert_eq!(response.all_routes[0].total_cost, Some(30.0));
        assert_eq!(response.all_routes[0].total_duration_h, None);
    }

    #[test]
    fn successful_search_installs_the_working_set() {
        let (mut dashboard, notices) = dashboard_with_recorder();
        apply_outcome(
            &mut dashboard,
            &search_query(),
            Ok(vec![route(&["Lima", "Cusco"]), route(&["Lima", "Cusco"])]),
        );
        assert_eq!(dashboard.state().working_set.len(), 1);
        assert!(notices.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_search_rebuilds_empty_and_posts_notice() {
        let (mut dashboard, notices) = dashboard_with_recorder();
        apply_outcome(&mut dashboard, &search_query(), Ok(vec![route(&["Lima", "Cusco"])]));
        apply_outcome(&mut dashboard, &search_query(), Ok(vec![]));
        assert!(dashboard.state().working_set.is_empty());
        assert_eq!(*notices.lock().unwrap(), vec![Notice::NoFeasibleRoute]);
    }

    #[test]
    fn empty_recommendation_keeps_prior_results_visible() {
        let (mut dashboard, notices) = dashboard_with_recorder();
        apply_outcome(
            &mut dashboard,
            &search_query(),
            Ok(vec![route(&["Lima", "Cusco"])]),
        );
        apply_outcome(&mut dashboard, &recommend_query(), Ok(vec![]));
        assert_eq!(dashboard.state().working_set.len(), 1);
        assert_eq!(*notices.lock().unwrap(), vec![Notice::NoRecommendations]);
    }

    #[test]
    fn transport_failure_keeps_prior_results_visible() {
        let (mut dashboard, notices) = dashboard_with_recorder();
        apply_outcome(
            &mut dashboard,
            &search_query(),
            Ok(vec![route(&["Lima", "Cusco"])]),
        );
        apply_outcome(
            &mut dashboard,
            &search_query(),
            Err(RemoteError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)),
        );
        assert_eq!(dashboard.state().working_set.len(), 1);
        assert_eq!(*notices.lock().unwrap(), vec![Notice::TransportFailure]);
    }
}
