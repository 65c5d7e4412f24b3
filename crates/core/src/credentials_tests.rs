// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    always = { "always", RefreshSchedule::Always },
    empty = { "", RefreshSchedule::Always },
    whitespace = { "  ", RefreshSchedule::Always },
    one_hour = { "1h", RefreshSchedule::Every(Duration::from_secs(3600)) },
    minutes = { "30m", RefreshSchedule::Every(Duration::from_secs(1800)) },
    compound = { "1h 30m", RefreshSchedule::Every(Duration::from_secs(5400)) },
    fractional_hours = { "1.5h", RefreshSchedule::Every(Duration::from_secs(5400)) },
    fractional_mixed = { "1h0.5m", RefreshSchedule::Every(Duration::from_secs(3630)) },
    garbage = { "whenever", RefreshSchedule::Every(DEFAULT_REFRESH) },
    unit_only = { "h", RefreshSchedule::Every(DEFAULT_REFRESH) },
    no_unit = { "1.5", RefreshSchedule::Every(DEFAULT_REFRESH) },
    unknown_unit = { "1.5d", RefreshSchedule::Every(DEFAULT_REFRESH) },
)]
fn parse_schedule(input: &str, expected: RefreshSchedule) {
    assert_eq!(RefreshSchedule::parse(input), expected);
}

#[test]
fn always_is_never_fresh() {
    let now = Instant::now();
    assert!(!RefreshSchedule::Always.is_fresh(now, now));
}

#[test]
fn every_is_fresh_strictly_inside_window() {
    let schedule = RefreshSchedule::Every(Duration::from_secs(60));
    let resolved_at = Instant::now();

    assert!(schedule.is_fresh(resolved_at, resolved_at));
    assert!(schedule.is_fresh(resolved_at, resolved_at + Duration::from_secs(59)));
    assert!(!schedule.is_fresh(resolved_at, resolved_at + Duration::from_secs(60)));
    assert!(!schedule.is_fresh(resolved_at, resolved_at + Duration::from_secs(61)));
}

#[test]
fn script_output_with_password() {
    let output = ScriptOutput::parse("username: svc\npassword: hunter2\n").unwrap();
    let creds = output.into_credentials(Some("inline"));
    assert_eq!(creds, Credentials::password(Some("svc".into()), "hunter2"));
}

#[test]
fn script_output_falls_back_to_inline_username() {
    let output = ScriptOutput::parse("password: hunter2\n").unwrap();
    let creds = output.into_credentials(Some("admin"));
    assert_eq!(creds.username.as_deref(), Some("admin"));
    assert_eq!(creds.username_or_empty(), "admin");
}

#[test]
fn script_output_token_wins_over_password() {
    let output = ScriptOutput::parse("password: p\nauthToken: tok\n").unwrap();
    let creds = output.into_credentials(None);
    assert_eq!(creds.secret, Secret::Token("tok".into()));
    assert_eq!(creds.username_or_empty(), "");
}

#[parameterized(
    nothing = { "username: svc\n" },
    empty_values = { "password: ''\nauthToken: ''\n" },
)]
fn script_output_without_secret_is_rejected(stdout: &str) {
    assert!(matches!(
        ScriptOutput::parse(stdout),
        Err(CredentialError::MissingSecret)
    ));
}

#[test]
fn malformed_script_output_is_rejected() {
    assert!(matches!(
        ScriptOutput::parse("password: [unterminated\n"),
        Err(CredentialError::ScriptOutput(_))
    ));
}

#[test]
fn debug_redacts_secret() {
    let creds = Credentials::password(Some("admin".into()), "hunter2");
    let rendered = format!("{:?}", creds);
    assert!(rendered.contains("admin"));
    assert!(!rendered.contains("hunter2"));
}

#[test]
fn timeout_error_names_duration() {
    let err = CredentialError::ScriptTimeout {
        path: PathBuf::from("/bin/slow"),
        timeout: Duration::from_secs(10),
    };
    assert_eq!(err.to_string(), "credentials_script timed out after 10s");
}
