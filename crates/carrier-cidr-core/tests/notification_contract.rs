//! Contract Test: Notification Gating
//!
//! Constraints verified:
//! - No recipients => the transport is never called
//! - One message per changed carrier, none for unchanged ones
//! - The payload carries the element-level diff
//! - A failing transport never rolls back the committed snapshot
//!
//! If this test fails, notification is either leaking or load-bearing.

mod common;

use carrier_cidr_core::{CarrierId, Recipients, UpdateConfig, UpdatePipeline};
use common::*;
use tempfile::tempdir;

fn recipients() -> Recipients {
    Recipients::new(
        Some("cidr-watch@example.jp".to_string()),
        vec!["ops@example.jp".to_string(), "noc@example.jp".to_string()],
    )
}

#[tokio::test]
async fn empty_recipient_list_never_calls_transport() {
    let dir = tempdir().unwrap();
    let transport = RecordingTransport::new();
    let counters = RecordingTransport::sharing_counters_with(&transport);

    let report = UpdatePipeline::new(
        UpdateConfig::new(dir.path()),
        boxed(vec![
            ScriptedSource::always(CarrierId::DoCoMo, entries(&["210.153.84.0/24"])),
            ScriptedSource::always(CarrierId::EZWeb, entries(&["210.230.128.224/28"])),
            ScriptedSource::always(CarrierId::ThirdForce, entries(&["123.108.236.0/24"])),
        ]),
        Box::new(transport),
    )
    .unwrap()
    .run()
    .await;

    assert_eq!(report.changed.len(), 3);
    assert_eq!(counters.send_call_count(), 0);
}

#[tokio::test]
async fn one_message_per_changed_carrier() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("ezweb"), "210.230.128.224/28\n").unwrap();

    let transport = RecordingTransport::new();
    let counters = RecordingTransport::sharing_counters_with(&transport);

    let report = UpdatePipeline::new(
        UpdateConfig::new(dir.path())
            .with_carriers(vec![CarrierId::DoCoMo, CarrierId::EZWeb])
            .with_recipients(recipients()),
        boxed(vec![
            ScriptedSource::always(CarrierId::DoCoMo, entries(&["210.153.84.0/24"])),
            ScriptedSource::always(CarrierId::EZWeb, entries(&["210.230.128.224/28"])),
        ]),
        Box::new(transport),
    )
    .unwrap()
    .run()
    .await;

    assert_eq!(report.changed, vec!["docomo"]);
    assert_eq!(counters.send_call_count(), 1);

    let sent = counters.sent();
    assert_eq!(sent[0].subject, "[carrier-cidr] docomo gateway CIDR changed");
    assert_eq!(sent[0].from.as_deref(), Some("cidr-watch@example.jp"));
    assert_eq!(sent[0].to.len(), 2);
}

#[tokio::test]
async fn payload_carries_element_level_diff() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("docomo"),
        "1.1.1.0/24\n2.2.2.0/24\n3.3.3.0/24\n",
    )
    .unwrap();

    let transport = RecordingTransport::new();
    let counters = RecordingTransport::sharing_counters_with(&transport);

    UpdatePipeline::new(
        UpdateConfig::new(dir.path())
            .with_carriers(vec![CarrierId::DoCoMo])
            .with_recipients(recipients()),
        boxed(vec![ScriptedSource::always(
            CarrierId::DoCoMo,
            entries(&["4.4.4.0/24", "1.1.1.0/24", "3.3.3.0/24"]),
        )]),
        Box::new(transport),
    )
    .unwrap()
    .run()
    .await;

    let body = &counters.sent()[0].body;
    let parsed: serde_yaml_ng::Value = serde_yaml_ng::from_str(body).unwrap();
    let docomo = &parsed["docomo"];

    assert_eq!(docomo["url"].as_str(), Some("http://example.invalid/DoCoMo"));
    assert_eq!(docomo["old"].as_sequence().unwrap().len(), 3);
    assert_eq!(docomo["new"].as_sequence().unwrap().len(), 3);
    assert_eq!(docomo["added"][0].as_str(), Some("4.4.4.0/24"));
    assert_eq!(docomo["deleted"][0].as_str(), Some("2.2.2.0/24"));
    assert_eq!(docomo["added"].as_sequence().unwrap().len(), 1);
    assert_eq!(docomo["deleted"].as_sequence().unwrap().len(), 1);
}

#[tokio::test]
async fn first_snapshot_reports_everything_added() {
    let dir = tempdir().unwrap();
    let transport = RecordingTransport::new();
    let counters = RecordingTransport::sharing_counters_with(&transport);

    UpdatePipeline::new(
        UpdateConfig::new(dir.path())
            .with_carriers(vec![CarrierId::ThirdForce])
            .with_recipients(recipients()),
        boxed(vec![ScriptedSource::always(
            CarrierId::ThirdForce,
            entries(&["123.108.236.0/24", "123.108.237.0/27"]),
        )]),
        Box::new(transport),
    )
    .unwrap()
    .run()
    .await;

    let parsed: serde_yaml_ng::Value = serde_yaml_ng::from_str(&counters.sent()[0].body).unwrap();
    let softbank = &parsed["softbank"];

    assert_eq!(softbank["old"].as_sequence().unwrap().len(), 0);
    assert_eq!(softbank["added"].as_sequence().unwrap().len(), 2);
    assert!(softbank.get("deleted").is_none());
}

#[tokio::test]
async fn transport_failure_does_not_roll_back_snapshot() {
    let dir = tempdir().unwrap();
    let transport = RecordingTransport::failing();
    let counters = RecordingTransport::sharing_counters_with(&transport);

    let report = UpdatePipeline::new(
        UpdateConfig::new(dir.path())
            .with_carriers(vec![CarrierId::DoCoMo])
            .with_recipients(recipients()),
        boxed(vec![ScriptedSource::always(
            CarrierId::DoCoMo,
            entries(&["210.153.84.0/24"]),
        )]),
        Box::new(transport),
    )
    .unwrap()
    .run()
    .await;

    assert_eq!(counters.send_call_count(), 1, "no retry");
    assert_eq!(report.changed, vec!["docomo"]);
    assert!(report.notify_failed.contains_key("docomo"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("docomo")).unwrap(),
        "210.153.84.0/24\n"
    );
}
