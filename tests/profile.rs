mod common;

use chrono::{TimeZone, Utc};
use covview::annotate::AnnotateOptions;
use covview::html::escape_html;
use covview::input::{FileList, SourceView};
use covview::model::{CoverageClass, CoverageRange};
use covview::profile::{read_profiles, Format};

#[test]
fn lcov_report_to_tree() {
    let (format, profiles) = read_profiles(&common::fixture("sample.lcov"), None).unwrap();
    assert_eq!(format, Format::Lcov);
    assert_eq!(profiles.len(), 2);

    let lib = &profiles[0];
    assert_eq!(
        lib.blocks,
        vec![
            CoverageRange::new(1, 2, 5),
            CoverageRange::new(3, 4, 0),
            CoverageRange::new(6, 6, 2),
        ]
    );
    assert_eq!((lib.hits, lib.lines), (3, 5));

    let time = Utc.with_ymd_and_hms(2023, 7, 1, 0, 0, 0).unwrap();
    let list = FileList::from_profiles(&profiles, "v1", time);
    let view = list.tree_view();
    let src = view.tree().node(view.tree().find("src").unwrap());
    assert_eq!((src.hits, src.lines), (5, 7));
    // root -> src is a single-child chain.
    assert!(src.expanded);
    assert_eq!(view.visible_rows().len(), 3);
}

#[test]
fn gocover_report_feeds_annotation() {
    let (format, profiles) = read_profiles(&common::fixture("main.gocov"), Option::None).unwrap();
    assert_eq!(format, Format::Gocover);

    let markup = std::fs::read_to_string(common::fixture("highlighted.html")).unwrap();
    let view = SourceView::for_file(&profiles, "main.go", markup).unwrap();
    assert_eq!(
        view.blocks,
        vec![CoverageRange::new(7, 10, 1), CoverageRange::new(11, 12, 0)]
    );
    assert_eq!(view.totals(), (4, 6));

    let lines = view.annotate(&AnnotateOptions::default());
    let classes: Vec<CoverageClass> = lines.iter().map(|l| l.coverage_class).collect();
    use CoverageClass::*;
    assert_eq!(
        classes,
        vec![None, None, None, None, None, None, Hit, Hit, Hit, Hit, Miss, Miss, None]
    );
}

#[test]
fn format_override_and_unknown_format() {
    let (_dir, path) = common::write_temp("coverage.txt", "SF:a.rs\nDA:1,1\nend_of_record\n");
    let (format, profiles) = read_profiles(&path, Some("lcov")).unwrap();
    assert_eq!(format, Format::Lcov);
    assert_eq!(profiles[0].filename, "a.rs");

    let (_dir, path) = common::write_temp("notes.txt", "just some text\n");
    assert!(read_profiles(&path, None).is_err());
}

#[test]
fn plain_source_is_escaped_before_annotation() {
    let code = escape_html("a <b> c\n");
    let view = SourceView {
        filename: "x.rs".to_string(),
        code,
        blocks: vec![CoverageRange::new(1, 1, 0)],
    };
    let lines = view.annotate(&AnnotateOptions::default());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].markup.contains("a &lt;b&gt; c"));
    assert_eq!(common::span_counts(&lines[0].markup), (1, 1));
}
