use block_profiler::collector::{
    BlockCollector, CollectStatus, DataCollector, RequestContext, ResponseContext,
};
use block_profiler::parser::{StaticTraceProvider, TraceMap};
use block_profiler::utils::config::ContainerTypes;
use block_profiler::utils::error::DecodeError;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn map(value: Value) -> TraceMap {
    value.as_object().cloned().unwrap()
}

fn collected(trace: Value, containers: &[&str]) -> BlockCollector<StaticTraceProvider> {
    let provider = StaticTraceProvider::new(map(trace));
    let mut collector = BlockCollector::new(provider, ContainerTypes::new(containers.iter().copied()));
    collector.collect(
        &RequestContext::new("GET", "/page"),
        &ResponseContext::default(),
        None,
    );
    collector
}

fn empty_collector() -> BlockCollector<StaticTraceProvider> {
    BlockCollector::new(StaticTraceProvider::default(), ContainerTypes::default())
}

#[test]
fn test_partition_counts() {
    let collector = collected(
        json!({
            "c1": {"type": "container", "name": "header"},
            "b1": {"type": "text"},
            "c2": {"type": "slideshow"},
            "b2": {"type": "menu"},
            "b3": {"type": "rss"},
        }),
        &["container", "slideshow"],
    );

    assert_eq!(collector.containers().len(), 2);
    assert_eq!(collector.real_blocks().len(), 3);
    assert_eq!(collector.total_blocks(), 5);

    // containers and real blocks partition every non-event key
    for id in collector.blocks().keys() {
        let in_containers = collector.containers().contains_key(id);
        let in_real = collector.real_blocks().contains_key(id);
        assert!(in_containers != in_real, "{} must be in exactly one subset", id);
    }
}

#[test]
fn test_events_are_extracted() {
    let collector = collected(
        json!({
            "a": {"type": "text"},
            "_events": {
                "e1": {"event_name": "sonata.block.event.footer"},
                "e2": {"event_name": "sonata.block.event.header"},
                "e3": {"event_name": "sonata.block.event.sidebar"},
            },
        }),
        &["container"],
    );

    assert_eq!(collector.events().len(), 3);
    assert_eq!(collector.total_blocks(), 1);
    assert!(!collector.containers().contains_key("_events"));
    assert!(!collector.real_blocks().contains_key("_events"));
    assert!(collector.blocks().contains_key("_events"));
}

#[test]
fn test_concrete_scenario() {
    let collector = collected(
        json!({
            "a": {"type": "container"},
            "b": {"type": "text"},
            "_events": {"e1": {"listeners": []}},
        }),
        &["container"],
    );

    assert_eq!(collector.containers(), &map(json!({"a": {"type": "container"}})));
    assert_eq!(collector.real_blocks(), &map(json!({"b": {"type": "text"}})));
    assert_eq!(collector.events(), &map(json!({"e1": {"listeners": []}})));
    assert_eq!(collector.total_blocks(), 2);
}

#[test]
fn test_empty_trace() {
    let collector = collected(json!({}), &["container"]);

    assert!(collector.containers().is_empty());
    assert!(collector.real_blocks().is_empty());
    assert!(collector.events().is_empty());
    assert_eq!(collector.total_blocks(), 0);
    assert_eq!(collector.status(), &CollectStatus::Complete);
}

#[test]
fn test_reset_from_every_state() {
    let mut fresh = empty_collector();
    fresh.reset();
    assert!(fresh.snapshot().is_empty());

    let mut populated = collected(
        json!({"a": {"type": "container"}, "_events": {"e": {}}}),
        &["container"],
    );
    populated.reset();
    assert!(populated.blocks().is_empty());
    assert!(populated.containers().is_empty());
    assert!(populated.real_blocks().is_empty());
    assert!(populated.events().is_empty());
    assert_eq!(populated.total_blocks(), 0);

    let mut partial = collected(json!({"a": {"type": "text"}, "b": 1}), &[]);
    partial.reset();
    assert!(partial.snapshot().is_empty());
    assert_eq!(partial.status(), &CollectStatus::Empty);
}

#[test]
fn test_serialize_round_trip() {
    let source = collected(
        json!({
            "a": {"type": "container", "settings": {"code": "main"}},
            "b": {"type": "text", "cache": {"ttl": 60}},
            "_events": {"e1": {"blocks": ["a", "b"]}},
        }),
        &["container"],
    );

    let data = source.serialize().unwrap();

    let mut restored = empty_collector();
    restored.deserialize(&data).unwrap();

    assert_eq!(restored.blocks(), source.blocks());
    assert_eq!(restored.containers(), source.containers());
    assert_eq!(restored.real_blocks(), source.real_blocks());
    assert_eq!(restored.events(), source.events());
    assert_eq!(restored.total_blocks(), 2);
}

#[test]
fn test_serialize_preserves_trace_order() {
    let source = collected(
        json!({"z": {"type": "text"}, "m": {"type": "text"}, "a": {"type": "text"}}),
        &[],
    );

    let mut restored = empty_collector();
    restored.deserialize(&source.serialize().unwrap()).unwrap();

    let ids: Vec<&String> = restored.real_blocks().keys().collect();
    assert_eq!(ids, vec!["z", "m", "a"]);
}

#[test]
fn test_deserialize_rejects_bad_data() {
    let mut collector = empty_collector();

    assert!(matches!(
        collector.deserialize(b"garbage"),
        Err(DecodeError::Json(_))
    ));
    assert!(matches!(
        collector.deserialize(br#"{"blocks": {}, "containers": {}, "realBlocks": {}}"#),
        Err(DecodeError::MissingField("events"))
    ));
}

#[test]
fn test_malformed_entry_does_not_propagate() {
    let collector = collected(
        json!({
            "a": {"type": "text"},
            "_events": {"e1": {}},
            "broken": null,
            "c": {"type": "container"},
        }),
        &["container"],
    );

    assert_eq!(collector.real_blocks().len(), 1);
    assert_eq!(collector.events().len(), 1);
    assert!(collector.containers().is_empty());
    assert!(matches!(
        collector.status(),
        CollectStatus::Partial { malformed_id } if malformed_id == "broken"
    ));
}

#[test]
fn test_malformed_events_entry_aborts() {
    let collector = collected(
        json!({"_events": "nope", "a": {"type": "text"}}),
        &[],
    );

    assert!(collector.events().is_empty());
    assert!(collector.real_blocks().is_empty());
    assert_eq!(collector.blocks().len(), 2);
}

#[test]
fn test_name_in_every_state() {
    let mut collector = empty_collector();
    assert_eq!(collector.name(), "block");

    collector.collect(&RequestContext::default(), &ResponseContext::default(), None);
    assert_eq!(collector.name(), "block");

    collector.reset();
    assert_eq!(collector.name(), "block");
}

#[test]
fn test_collect_through_trait_object() {
    let provider = StaticTraceProvider::new(map(json!({"a": {"type": "text"}})));
    let mut collector = BlockCollector::new(provider, ContainerTypes::default());

    {
        let dyn_collector: &mut dyn DataCollector = &mut collector;
        let err = std::io::Error::new(std::io::ErrorKind::Other, "template failed");
        dyn_collector.collect(
            &RequestContext::new("POST", "/form"),
            &ResponseContext { status: 500 },
            Some(&err),
        );
    }

    assert_eq!(collector.total_blocks(), 1);
}
