mod support;

use eflr::{
    Error,
    avec::{
        Stream,
        slice::{Options, decode_with},
    },
    sans::{
        representation::{Standard, Value},
        set::SetKind,
    },
};
use support::*;

fn channels(role: u8, objects: &[(&str, &str)]) -> Body {
    let mut body = Body::new()
        .set(role, "CHANNEL", "MAIN")
        .column("LONG-NAME");

    for (name, long_name) in objects {
        body = body.object(0, 0, name).byte(ATTRIB | VALUE).ident(long_name);
    }

    body
}

fn long_names(stream: &Stream) -> Vec<(String, Value)> {
    let eflr = stream.get("CHANNEL", "MAIN").unwrap();
    eflr.objects
        .iter()
        .map(|o| (o.name.identifier.clone(), o.attributes[0].value.clone()))
        .collect()
}

fn string(s: &str) -> Value {
    Value::String(s.into())
}

#[test]
fn redundant_set_keeps_first_objects() {
    let mut stream = Stream::new();
    stream
        .push(channels(SET, &[("DEPT", "Depth")]).bytes())
        .unwrap();
    stream
        .push(channels(RDSET, &[("DEPT", "Other"), ("GR", "Gamma")]).bytes())
        .unwrap();

    assert_eq!(stream.sets().len(), 1);
    assert_eq!(
        long_names(&stream),
        vec![
            ("DEPT".into(), string("Depth")),
            ("GR".into(), string("Gamma")),
        ]
    );
    assert_eq!(stream.open_set().unwrap().kind, SetKind::Redundant);
}

#[test]
fn replacement_set_supersedes_objects() {
    let mut stream = Stream::new();
    stream
        .push(channels(SET, &[("DEPT", "Depth"), ("GR", "Gamma")]).bytes())
        .unwrap();

    let replacement = Body::new()
        .set(RSET, "CHANNEL", "MAIN")
        .column("LONG-NAME")
        .column("UNITS")
        .object(0, 0, "GR")
        .byte(ATTRIB | VALUE)
        .ident("Gamma ray");
    stream.push(replacement.bytes()).unwrap();

    let eflr = stream.get("CHANNEL", "MAIN").unwrap();
    assert_eq!(eflr.template.len(), 2);
    assert_eq!(eflr.objects.len(), 2);
    for object in &eflr.objects {
        assert_eq!(object.attributes.len(), eflr.template.len());
    }
    assert_eq!(eflr.objects[0].attributes[1].label, "UNITS");
    assert_eq!(eflr.objects[0].attributes[1].value, Value::Absent);
    assert_eq!(
        long_names(&stream),
        vec![
            ("DEPT".into(), string("Depth")),
            ("GR".into(), string("Gamma ray")),
        ]
    );
}

#[test]
fn replacement_template_realigns_kept_objects() {
    let original = Body::new()
        .set(SET, "CHANNEL", "MAIN")
        .column("LONG-NAME")
        .column("UNITS")
        .column("DIMENSION")
        .object(0, 0, "DEPT")
        .byte(ATTRIB | VALUE)
        .ident("Depth")
        .byte(ATTRIB | VALUE)
        .ident("m");

    let replacement = Body::new()
        .set(RSET, "CHANNEL", "MAIN")
        .byte(ATTRIB | LABEL | VALUE)
        .ident("PROPERTIES")
        .ident("BASIC")
        .column("UNITS")
        .column("LONG-NAME")
        .object(0, 0, "GR");

    let mut stream = Stream::new();
    stream.push(original.bytes()).unwrap();
    stream.push(replacement.bytes()).unwrap();

    let eflr = stream.get("CHANNEL", "MAIN").unwrap();
    let dept = eflr.object("DEPT").unwrap();
    let labels = dept
        .attributes
        .iter()
        .map(|a| a.label.as_str())
        .collect::<Vec<_>>();

    assert_eq!(labels, ["PROPERTIES", "UNITS", "LONG-NAME"]);
    assert_eq!(dept.attributes[0].value, string("BASIC"));
    assert_eq!(dept.attributes[1].value, string("m"));
    assert_eq!(dept.attributes[2].value, string("Depth"));
    assert_eq!(eflr.object("GR").unwrap().attributes.len(), 3);
}

#[test]
fn replacement_without_earlier_set_is_kept() {
    let mut stream = Stream::new();
    stream
        .push(channels(RSET, &[("DEPT", "Depth")]).bytes())
        .unwrap();

    assert_eq!(stream.sets().len(), 1);
    assert_eq!(stream.sets()[0].set.kind, SetKind::Replacement);
}

#[test]
fn sets_of_other_identity_are_separate() {
    let mut stream = Stream::new();
    stream
        .push(channels(SET, &[("DEPT", "Depth")]).bytes())
        .unwrap();
    stream
        .push(Body::new().set(SET, "FRAME", "60B").bytes())
        .unwrap();
    stream
        .push(channels(SET, &[("GR", "Gamma")]).bytes())
        .unwrap();

    assert_eq!(stream.sets().len(), 3);
    assert_eq!(long_names(&stream), vec![("GR".into(), string("Gamma"))]);
}

#[test]
fn redundant_set_must_match_open_set() {
    let mut stream = Stream::new();
    stream
        .push(Body::new().set(SET, "FRAME", "60B").bytes())
        .unwrap();

    let failure = stream
        .push(channels(RDSET, &[("DEPT", "Depth")]).bytes())
        .unwrap_err();

    assert_eq!(
        failure.error,
        Error::InconsistentRedundantSet {
            open: ("FRAME".into(), "60B".into()),
            found: ("CHANNEL".into(), "MAIN".into()),
        }
    );
    assert!(failure.partial.is_none());
    assert_eq!(stream.sets().len(), 1);
    assert_eq!(stream.open_set().unwrap().set_type, "FRAME");
}

#[test]
fn first_redundant_set_is_reported() {
    let mut stream = Stream::new();
    let mut recorder = Recorder::default();

    stream
        .push_with(
            channels(RDSET, &[("DEPT", "Depth")]).bytes(),
            &Standard,
            &mut recorder,
            &Options::default(),
        )
        .unwrap();

    assert_eq!(recorder.warnings.len(), 1);
    assert_eq!(stream.sets().len(), 1);
}

#[test]
fn stream_open_set_overrides_options() {
    let open = decode_with(
        Body::new().set(SET, "FRAME", "60B").bytes(),
        &Standard,
        &mut (),
        &Options::default(),
    )
    .unwrap()
    .set;

    let options = Options {
        open_set: Some(&open),
        ..Default::default()
    };

    let mut stream = Stream::new();
    stream
        .push(channels(SET, &[("DEPT", "Depth")]).bytes())
        .unwrap();
    stream
        .push_with(
            channels(RDSET, &[]).bytes(),
            &Standard,
            &mut (),
            &options,
        )
        .unwrap();

    assert_eq!(stream.into_sets().len(), 1);
}
