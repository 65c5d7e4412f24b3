// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for handler tests

use crate::{App, AppOptions};
use filer_adapters::CredentialResolver;
use filer_core::{Inventory, TargetDescriptor};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) const CLUSTER: &str = "c1";

pub(crate) fn fast_options() -> AppOptions {
    AppOptions::default()
        .with_poll_interval(Duration::from_millis(20))
        .with_job_timeout(Duration::from_secs(2))
}

pub(crate) fn target(server: &MockServer) -> TargetDescriptor {
    TargetDescriptor::new(CLUSTER, server.uri()).with_login("admin", "secret")
}

pub(crate) fn app_with(server: &MockServer, options: AppOptions) -> App {
    let inventory = Inventory::from_targets([target(server)]);
    App::new(&inventory, CredentialResolver::default(), options).unwrap()
}

pub(crate) fn app(server: &MockServer) -> App {
    app_with(server, fast_options())
}

/// Collection response with one record per `(uuid, name)`
pub(crate) fn records(rows: &[(&str, &str)]) -> Value {
    let records: Vec<Value> = rows
        .iter()
        .map(|(uuid, name)| json!({ "uuid": uuid, "name": name }))
        .collect();
    json!({ "records": records, "num_records": rows.len() })
}

pub(crate) async fn mock_get(server: &MockServer, at: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Job `j-1` that reports `running` once and then `state`
pub(crate) async fn mock_job(server: &MockServer, state: Value) {
    Mock::given(method("GET"))
        .and(path("/api/cluster/jobs/j-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "running" })))
        .up_to_n_times(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cluster/jobs/j-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(state))
        .mount(server)
        .await;
}

pub(crate) fn accepted() -> ResponseTemplate {
    ResponseTemplate::new(202).set_body_json(json!({ "job": { "uuid": "j-1" } }))
}

/// Number of requests the server saw with this method
pub(crate) async fn sent(server: &MockServer, verb: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.method.as_str() == verb)
        .count()
}
