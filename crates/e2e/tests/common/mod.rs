#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use vista_e2e::driver::{BrowserDriver, DomEvent, ElementInfo, InterceptedRequest, RouteMock};
use vista_e2e::{E2eConfig, E2eError, E2eResult};

pub const BASE_URL: &str = "http://localhost:5173";

/// Config with a short timeout so failing waits finish quickly.
pub fn test_config() -> E2eConfig {
    E2eConfig {
        base_url: BASE_URL.to_string(),
        api_url: "http://localhost:3000/api/v1".to_string(),
        user_email: "default@e2e.test".to_string(),
        user_password: "default-password".to_string(),
        timeout_ms: 50,
    }
}

/// Every driver call that changes the page, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Visit(String),
    Click(String),
    Clear(String),
    Type(String, String),
    Trigger(String, DomEvent),
    Intercept(String),
}

#[derive(Default)]
struct FakeState {
    url: String,
    actions: Vec<Action>,
    missing: HashSet<String>,
    texts: HashMap<String, String>,
    elements: HashMap<String, Vec<ElementInfo>>,
    navigations: HashMap<String, String>,
    routes: HashMap<String, RouteMock>,
    hits: HashMap<String, InterceptedRequest>,
    storage: HashMap<String, String>,
}

/// In-memory browser that records actions and answers from canned state.
///
/// Waits never sleep: a wait succeeds if the condition already holds and
/// fails with a timeout otherwise.
#[derive(Default)]
pub struct FakeDriver {
    state: Mutex<FakeState>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clicking `selector` navigates to `url`.
    pub fn navigate_on_click(self, selector: &str, url: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .navigations
            .insert(selector.to_string(), url.to_string());
        self
    }

    pub fn with_text(self, selector: &str, text: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .texts
            .insert(selector.to_string(), text.to_string());
        self
    }

    pub fn with_elements(self, selector: &str, elements: Vec<ElementInfo>) -> Self {
        self.state
            .lock()
            .unwrap()
            .elements
            .insert(selector.to_string(), elements);
        self
    }

    /// `selector` never appears on the page.
    pub fn without(self, selector: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .missing
            .insert(selector.to_string());
        self
    }

    /// Simulate the page issuing a request against a mocked route.
    pub fn hit(&self, alias: &str, method: &str, url: &str, body: Option<serde_json::Value>) {
        let mut state = self.state.lock().unwrap();
        let status = state.routes.get(alias).map_or(404, |route| route.status);
        state.hits.insert(
            alias.to_string(),
            InterceptedRequest {
                method: method.to_string(),
                url: url.to_string(),
                body,
                response_status: status,
            },
        );
    }

    pub fn actions(&self) -> Vec<Action> {
        self.state.lock().unwrap().actions.clone()
    }

    pub fn route(&self, alias: &str) -> Option<RouteMock> {
        self.state.lock().unwrap().routes.get(alias).cloned()
    }

    fn record(&self, action: Action) {
        self.state.lock().unwrap().actions.push(action);
    }
}

fn timeout(what: String, timeout: Duration) -> E2eError {
    E2eError::Timeout {
        what,
        timeout_ms: timeout.as_millis() as u64,
    }
}

#[async_trait]
impl BrowserDriver for FakeDriver {
    async fn visit(&self, url: &str) -> E2eResult<()> {
        let mut state = self.state.lock().unwrap();
        state.url = url.to_string();
        state.actions.push(Action::Visit(url.to_string()));
        Ok(())
    }

    async fn current_url(&self) -> E2eResult<String> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn click(&self, selector: &str) -> E2eResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.missing.contains(selector) {
            return Err(E2eError::Driver(format!("no element matches {selector}")));
        }
        state.actions.push(Action::Click(selector.to_string()));
        if let Some(url) = state.navigations.get(selector).cloned() {
            state.url = url;
        }
        Ok(())
    }

    async fn clear(&self, selector: &str) -> E2eResult<()> {
        self.record(Action::Clear(selector.to_string()));
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> E2eResult<()> {
        self.record(Action::Type(selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn wait_for_element(&self, selector: &str, wait: Duration) -> E2eResult<()> {
        if self.state.lock().unwrap().missing.contains(selector) {
            return Err(timeout(selector.to_string(), wait));
        }
        Ok(())
    }

    async fn wait_for_text(&self, selector: &str, text: &str, wait: Duration) -> E2eResult<()> {
        let state = self.state.lock().unwrap();
        match state.texts.get(selector) {
            Some(current) if current.contains(text) => Ok(()),
            _ => Err(timeout(format!("'{text}' in {selector}"), wait)),
        }
    }

    async fn query_all(&self, selector: &str) -> E2eResult<Vec<ElementInfo>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .elements
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }

    async fn trigger(&self, selector: &str, event: DomEvent) -> E2eResult<()> {
        self.record(Action::Trigger(selector.to_string(), event));
        Ok(())
    }

    async fn intercept(&self, route: RouteMock) -> E2eResult<()> {
        let mut state = self.state.lock().unwrap();
        state.actions.push(Action::Intercept(route.alias.clone()));
        state.routes.insert(route.alias.clone(), route);
        Ok(())
    }

    async fn wait_for_intercept(
        &self,
        alias: &str,
        wait: Duration,
    ) -> E2eResult<InterceptedRequest> {
        let state = self.state.lock().unwrap();
        if !state.routes.contains_key(alias) {
            return Err(E2eError::UnknownAlias(alias.to_string()));
        }
        state
            .hits
            .get(alias)
            .cloned()
            .ok_or_else(|| timeout(format!("@{alias}"), wait))
    }

    async fn local_storage_get(&self, key: &str) -> E2eResult<Option<String>> {
        Ok(self.state.lock().unwrap().storage.get(key).cloned())
    }

    async fn local_storage_set(&self, key: &str, value: &str) -> E2eResult<()> {
        self.state
            .lock()
            .unwrap()
            .storage
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn local_storage_clear(&self) -> E2eResult<()> {
        self.state.lock().unwrap().storage.clear();
        Ok(())
    }
}
