// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::script::FakeScriptRunner;
use crate::testing::{invocations, write_script};
use filer_core::Secret;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Script that appends to `count` and prints a different password each run
fn counting_script(dir: &TempDir) -> (PathBuf, PathBuf) {
    let counter = dir.path().join("count");
    let body = format!(
        "echo run >> '{counter}'\nn=$(wc -l < '{counter}' | tr -d ' ')\necho \"password: pass-$n\"",
        counter = counter.display()
    );
    let script = write_script(dir.path(), "creds.sh", &body);
    (script, counter)
}

fn scripted_target(name: &str, script: PathBuf, schedule: &str) -> TargetDescriptor {
    TargetDescriptor::new(name, "10.0.0.1")
        .with_username("admin")
        .with_script(CredentialsScript {
            path: script,
            schedule: schedule.to_string(),
            timeout: None,
        })
}

#[tokio::test]
async fn always_schedule_reruns_script() {
    let dir = TempDir::new().unwrap();
    let (script, counter) = counting_script(&dir);
    let target = scripted_target("c1", script, "always");
    let resolver = CredentialResolver::default();

    let first = resolver.resolve(&target).await.unwrap();
    let second = resolver.resolve(&target).await.unwrap();

    assert_eq!(invocations(&counter), 2);
    assert_eq!(first.secret, Secret::Password("pass-1".into()));
    assert_eq!(second.secret, Secret::Password("pass-2".into()));
}

#[tokio::test]
async fn hourly_schedule_serves_cache() {
    let dir = TempDir::new().unwrap();
    let (script, counter) = counting_script(&dir);
    let target = scripted_target("c1", script, "1h");
    let resolver = CredentialResolver::default();

    let first = resolver.resolve(&target).await.unwrap();
    let second = resolver.resolve(&target).await.unwrap();

    assert_eq!(invocations(&counter), 1);
    assert_eq!(first, second);
    assert_eq!(first.username.as_deref(), Some("admin"));
}

#[tokio::test]
async fn expired_cache_refreshes() {
    let dir = TempDir::new().unwrap();
    let (script, counter) = counting_script(&dir);
    let target = scripted_target("c1", script, "100ms");
    let resolver = CredentialResolver::default();

    resolver.resolve(&target).await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    let refreshed = resolver.resolve(&target).await.unwrap();

    assert_eq!(invocations(&counter), 2);
    assert_eq!(refreshed.secret, Secret::Password("pass-2".into()));
}

#[tokio::test]
async fn cache_is_per_target() {
    let runner = FakeScriptRunner::new();
    runner.push_password("p");
    let resolver = CredentialResolver::new(runner.clone());
    let script = PathBuf::from("/bin/creds");

    resolver.resolve(&scripted_target("c1", script.clone(), "1h")).await.unwrap();
    resolver.resolve(&scripted_target("c2", script.clone(), "1h")).await.unwrap();
    resolver.resolve(&scripted_target("c1", script, "1h")).await.unwrap();

    assert_eq!(runner.calls().len(), 2);
}

#[tokio::test]
async fn clones_share_the_cache() {
    let runner = FakeScriptRunner::new();
    runner.push_password("p");
    let resolver = CredentialResolver::new(runner.clone());
    let target = scripted_target("c1", PathBuf::from("/bin/creds"), "1h");

    resolver.resolve(&target).await.unwrap();
    resolver.clone().resolve(&target).await.unwrap();

    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_resolutions_run_script_once() {
    let runner = FakeScriptRunner::new();
    runner.push_password("p");
    let resolver = CredentialResolver::new(runner.clone());
    let target = scripted_target("c1", PathBuf::from("/bin/creds"), "1h");

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let resolver = resolver.clone();
            let target = target.clone();
            tokio::spawn(async move { resolver.resolve(&target).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn script_receives_inline_username() {
    let runner = FakeScriptRunner::new();
    runner.push_password("p");
    let resolver = CredentialResolver::new(runner.clone());

    resolver
        .resolve(&scripted_target("c1", PathBuf::from("/bin/creds"), "always"))
        .await
        .unwrap();

    let call = &runner.calls()[0];
    assert_eq!(call.addr, "10.0.0.1");
    assert_eq!(call.username.as_deref(), Some("admin"));
}

#[tokio::test]
async fn failed_script_is_not_cached() {
    let runner = FakeScriptRunner::new();
    let resolver = CredentialResolver::new(runner.clone());
    let target = scripted_target("c1", PathBuf::from("/bin/creds"), "1h");

    assert!(resolver.resolve(&target).await.is_err());
    runner.push_password("p");
    let creds = resolver.resolve(&target).await.unwrap();

    assert_eq!(creds.secret, Secret::Password("p".into()));
    assert_eq!(runner.calls().len(), 2);
}

#[tokio::test]
async fn script_takes_priority_over_file_and_inline() {
    let runner = FakeScriptRunner::new();
    runner.push_password("from-script");
    let resolver = CredentialResolver::new(runner);
    let target = scripted_target("c1", PathBuf::from("/bin/creds"), "always")
        .with_login("admin", "inline")
        .with_credentials_file("/nonexistent/creds.yaml");

    let creds = resolver.resolve(&target).await.unwrap();
    assert_eq!(creds.secret, Secret::Password("from-script".into()));
}

#[tokio::test]
async fn file_credentials_are_read_each_call() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("creds.yaml");
    std::fs::write(&path, "targets:\n  c1:\n    username: svc\n    password: one\n").unwrap();
    let target = TargetDescriptor::new("c1", "h")
        .with_login("admin", "inline")
        .with_credentials_file(&path);
    let resolver = CredentialResolver::default();

    let first = resolver.resolve(&target).await.unwrap();
    assert_eq!(first, Credentials::password(Some("svc".into()), "one"));

    std::fs::write(&path, "targets:\n  c1:\n    password: two\n").unwrap();
    let second = resolver.resolve(&target).await.unwrap();
    assert_eq!(second, Credentials::password(Some("admin".into()), "two"));
}

#[tokio::test]
async fn file_without_target_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("creds.yaml");
    std::fs::write(&path, "targets:\n  other:\n    password: x\n").unwrap();
    let target = TargetDescriptor::new("c1", "h").with_credentials_file(&path);

    let err = CredentialResolver::default().resolve(&target).await.unwrap_err();
    assert!(matches!(err, CredentialError::TargetNotInFile { ref target, .. } if target == "c1"));
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let target = TargetDescriptor::new("c1", "h").with_credentials_file("/nonexistent/creds.yaml");
    let err = CredentialResolver::default().resolve(&target).await.unwrap_err();
    assert!(matches!(err, CredentialError::FileRead { .. }));
}

#[tokio::test]
async fn malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("creds.yaml");
    std::fs::write(&path, "targets: [unterminated\n").unwrap();
    let target = TargetDescriptor::new("c1", "h").with_credentials_file(&path);

    let err = CredentialResolver::default().resolve(&target).await.unwrap_err();
    assert!(matches!(err, CredentialError::FileParse { .. }));
}

#[tokio::test]
async fn inline_login_is_the_fallback() {
    let target = TargetDescriptor::new("c1", "h").with_login("admin", "secret");
    let creds = CredentialResolver::default().resolve(&target).await.unwrap();
    assert_eq!(creds, Credentials::password(Some("admin".into()), "secret"));
}

#[tokio::test]
async fn dropped_resolution_kills_script() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("finished");
    let body = format!(
        "sleep 2\ntouch '{}'\necho 'password: late'",
        marker.display()
    );
    let script = write_script(dir.path(), "slow.sh", &body);
    let target = scripted_target("c1", script, "always");
    let resolver = CredentialResolver::default();

    let result = tokio::time::timeout(Duration::from_millis(200), resolver.resolve(&target)).await;
    assert!(result.is_err());

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(!marker.exists());
}
