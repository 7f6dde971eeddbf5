use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_pipeline").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn parse_threads_accepts_positive_and_rejects_garbage() {
    assert_eq!(parse_threads(" 4 ").unwrap(), 4);
    assert!(matches!(parse_threads("four"), Err(InkError::InvalidConfig(_))));
    assert!(matches!(parse_threads("-1"), Err(InkError::InvalidConfig(_))));
}

#[test]
fn zero_threads_is_rejected() {
    assert!(matches!(build_thread_pool(Some(0)), Err(InkError::InvalidConfig(_))));
    assert_eq!(build_thread_pool(Some(2)).unwrap().current_num_threads(), 2);
}

#[test]
fn jobs_for_dir_picks_sorted_json_files_only() {
    let dir = scratch("jobs");
    for name in ["b.json", "a.JSON", "notes.txt", "c.json"] {
        std::fs::write(dir.join(name), b"{}").unwrap();
    }
    std::fs::create_dir_all(dir.join("nested.json")).unwrap();

    let out = Path::new("out");
    let jobs = jobs_for_dir(&dir, out, Some(Path::new("vec"))).unwrap();
    let inputs: Vec<_> = jobs
        .iter()
        .map(|j| j.input.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(inputs, ["a.JSON", "b.json", "c.json"]);
    assert_eq!(jobs[1].raster_out, out.join("b.png"));
    assert_eq!(jobs[1].vector_out.as_deref(), Some(Path::new("vec/b.svg")));

    let raster_only = jobs_for_dir(&dir, out, None).unwrap();
    assert!(raster_only.iter().all(|j| j.vector_out.is_none()));
}

#[test]
fn jobs_for_missing_dir_is_input_not_found() {
    let err = jobs_for_dir(Path::new("target/definitely/missing"), Path::new("o"), None).unwrap_err();
    assert!(matches!(err, InkError::InputNotFound { .. }));
}

#[test]
fn render_file_writes_nothing_for_malformed_input() {
    let dir = scratch("malformed");
    let input = dir.join("bad.json");
    std::fs::write(&input, br#"{"strokes": []}"#).unwrap();
    let job = RenderJob::new(&input, dir.join("bad.png")).with_vector_out(dir.join("bad.svg"));

    let err = render_file(&job, &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, InkError::MalformedDocument(_)));
    assert!(!job.raster_out.exists());
    assert!(!dir.join("bad.svg").exists());
}

#[test]
fn vector_write_failure_keeps_raster() {
    let dir = scratch("vector_fail");
    let input = dir.join("s.json");
    std::fs::write(
        &input,
        br#"{"label":"a","strokes":[{"stroke_id":0,"points":[{"x":0,"y":0},{"x":10,"y":5}]}]}"#,
    )
    .unwrap();
    let blocker = dir.join("blocker");
    std::fs::write(&blocker, b"x").unwrap();

    let cfg = RenderConfig::default().with_sizes(256, 64);
    let job = RenderJob::new(&input, dir.join("s.png")).with_vector_out(blocker.join("s.svg"));
    let err = render_file(&job, &cfg).unwrap_err();
    assert!(matches!(err, InkError::VectorExport(_)));
    assert!(job.raster_out.exists());
}

#[test]
fn dotted_stems_keep_distinct_outputs() {
    let dir = scratch("dotted");
    for name in ["sample.v1.json", "sample.v2.json"] {
        std::fs::write(dir.join(name), b"{}").unwrap();
    }

    let out = Path::new("out");
    let jobs = jobs_for_dir(&dir, out, Some(Path::new("vec"))).unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].raster_out, out.join("sample.v1.png"));
    assert_eq!(jobs[1].raster_out, out.join("sample.v2.png"));
    assert_eq!(jobs[0].vector_out.as_deref(), Some(Path::new("vec/sample.v1.svg")));
    assert_eq!(jobs[1].vector_out.as_deref(), Some(Path::new("vec/sample.v2.svg")));
}

#[test]
fn dotted_stems_render_side_by_side_in_a_batch() {
    let dir = scratch("dotted_batch");
    let input = dir.join("in");
    std::fs::create_dir_all(&input).unwrap();
    for (name, dx) in [("sample.v1.json", 10), ("sample.v2.json", 40)] {
        let json = format!(
            r#"{{"label": "s", "strokes": [{{"stroke_id": 0, "points": [
                {{"x": 0, "y": 0}}, {{"x": {dx}, "y": 5}}, {{"x": 3, "y": 20}}
            ]}}]}}"#
        );
        std::fs::write(input.join(name), json).unwrap();
    }

    let jobs = jobs_for_dir(&input, &dir.join("out"), None).unwrap();
    let cfg = RenderConfig::default().with_sizes(256, 32);
    for r in render_batch(&jobs, &cfg, Some(2)).unwrap() {
        r.unwrap();
    }

    let written: Vec<_> = std::fs::read_dir(dir.join("out"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written.len(), 2);
    assert!(jobs.iter().all(|j| j.raster_out.exists()));
}

#[test]
fn oversized_blur_is_rejected_before_rendering() {
    let cfg = RenderConfig::default()
        .with_sizes(64, 16)
        .with_blur_sigma(1e9);
    let err = render_raster(&Sample::new("x", vec![]), &cfg).unwrap_err();
    assert!(matches!(err, InkError::InvalidConfig(_)));
}
