use pretty_assertions::assert_eq;
use sched_telemetry::{Event, InboundMessage, MetricsSnapshot, SliceDetail};
use telemetry_channel::{encode_inbound, parse_inbound, ChannelError};

#[test]
fn metrics_frame_parses_with_details() {
    let text = r#"{
        "event": "metrics",
        "algorithm": "rr",
        "average_turnaround_time": 6.5,
        "average_waiting_time": 2.0,
        "process_count": 2,
        "details": [
            {"pid": 1, "arrival": 0, "burst": 5, "start": 0, "finish": 5, "turnaround": 5, "waiting": 0},
            {"pid": 2, "arrival": 0, "burst": 3, "start": 5, "finish": 8}
        ]
    }"#;

    let InboundMessage::Metrics(snapshot) = parse_inbound(text).expect("metrics frame") else {
        panic!("expected metrics");
    };
    assert_eq!(snapshot.algorithm, "rr");
    assert_eq!(snapshot.process_count, 2);
    assert_eq!(snapshot.details[0].turnaround, Some(5));
    assert_eq!(snapshot.details[1].waiting, None);
}

#[test]
fn unknown_discriminator_is_malformed() {
    let error = parse_inbound(r#"{"event":"preempt","pid":1,"time":3}"#)
        .expect_err("unknown event should fail");
    assert!(matches!(error, ChannelError::MalformedPayload(_)));
}

#[test]
fn missing_discriminator_is_malformed() {
    assert!(matches!(
        parse_inbound(r#"{"pid":1,"time":3}"#),
        Err(ChannelError::MalformedPayload(_))
    ));
}

#[test]
fn encoded_messages_parse_back_to_the_same_value() {
    let snapshot = MetricsSnapshot {
        algorithm: "fcfs".to_string(),
        average_turnaround_time: 4.0,
        average_waiting_time: 1.0,
        process_count: 1,
        details: vec![SliceDetail {
            pid: 1,
            arrival: 0,
            burst: 4,
            start: 0,
            finish: 4,
            turnaround: None,
            waiting: None,
        }],
    };
    for message in [
        InboundMessage::Event(Event::start(3, 7)),
        InboundMessage::Metrics(snapshot),
    ] {
        let text = encode_inbound(&message).expect("encode");
        assert_eq!(parse_inbound(&text).expect("parse"), message);
    }
}
