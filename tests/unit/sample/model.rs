use super::*;

#[test]
fn recorder_document_parses_with_extra_fields() {
    let json = r#"{
        "label": "a",
        "device": "tablet",
        "timestamp": "2024-05-01T10:00:00.000Z",
        "sampling_rate": "120.00",
        "strokes": [
            {
                "stroke_id": 1,
                "points": [
                    {"x": 1.0, "y": 2.0, "t": 0.5, "p": 0.25, "tiltX": 3, "pointerType": "pen",
                     "velocity": null, "pen_down": true},
                    {"x": 3.0, "y": 4.0, "t": 0.6, "p": null, "pen_down": false}
                ]
            }
        ]
    }"#;

    let s = Sample::from_slice(json.as_bytes()).unwrap();
    assert_eq!(s.label, "a");
    assert_eq!(s.device.as_deref(), Some("tablet"));
    assert_eq!(s.strokes.len(), 1);
    assert_eq!(s.strokes[0].id, serde_json::json!(1));

    let p = &s.strokes[0].points;
    assert_eq!(p[0].pressure, 0.25);
    assert_eq!(p[0].timestamp, Some(0.5));
    assert!(p[0].pen_down);
    assert_eq!(p[1].pressure, 1.0);
    assert!(!p[1].pen_down);
}

#[test]
fn pressure_defaults_to_one_for_absent_zero_and_booleans() {
    for raw in ["", r#", "p": 0"#, r#", "p": false"#, r#", "p": true"#, r#", "p": null"#] {
        let json = format!(r#"{{"x": 0, "y": 0{raw}}}"#);
        let pt: StrokePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(pt.pressure, 1.0, "input: {json}");
        assert!(pt.pen_down);
        assert_eq!(pt.timestamp, None);
    }
}

#[test]
fn pressure_rejects_strings() {
    let err = serde_json::from_str::<StrokePoint>(r#"{"x": 0, "y": 0, "p": "hard"}"#);
    assert!(err.is_err());
}

#[test]
fn missing_required_fields_are_malformed() {
    let err = Sample::from_slice(br#"{"label": "a"}"#).unwrap_err();
    assert!(matches!(err, InkError::MalformedDocument(_)));

    let err = Sample::from_slice(br#"{"label": "a", "strokes": [{"points": [{"y": 1}]}]}"#)
        .unwrap_err();
    assert!(matches!(err, InkError::MalformedDocument(_)));

    let err = Sample::from_slice(br#"{"label": 3, "strokes": []}"#).unwrap_err();
    assert!(matches!(err, InkError::MalformedDocument(_)));
}

#[test]
fn degenerate_strokes_are_kept_but_not_renderable() {
    let s = Sample::new(
        "x",
        vec![
            Stroke::new(1, vec![StrokePoint::new(0.0, 0.0)]),
            Stroke::new(2, vec![StrokePoint::new(0.0, 0.0), StrokePoint::new(1.0, 1.0)]),
            Stroke::new(3, vec![]),
        ],
    );
    assert_eq!(s.strokes.len(), 3);
    let ids: Vec<_> = s.renderable_strokes().map(|st| st.id.clone()).collect();
    assert_eq!(ids, vec![serde_json::json!(2)]);
}

#[test]
fn from_path_classifies_missing_file() {
    let err = Sample::from_path("target/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, InkError::InputNotFound { .. }));
}
