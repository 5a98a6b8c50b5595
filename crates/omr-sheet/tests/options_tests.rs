use omr_sheet::*;

#[test]
fn test_request_validation_accepts_bounds() {
    assert!(SheetRequest::new("School", 1, 2, false).validate().is_ok());
    assert!(SheetRequest::new("School", 100, 6, true).validate().is_ok());
}

#[test]
fn test_request_validation_has_no_question_ceiling() {
    for total in [10_000, 10_001, 250_000] {
        assert!(
            SheetRequest::new("School", total, 4, false).validate().is_ok(),
            "{}",
            total
        );
    }
}

#[test]
fn test_request_validation_rejects_zero_questions() {
    let result = SheetRequest::new("School", 0, 4, false).validate();
    match result {
        Err(SheetError::Validation(errors)) => {
            assert_eq!(errors.fields().collect::<Vec<_>>(), ["total_questions"]);
        }
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_request_validation_rejects_option_counts_outside_range() {
    for options in [0, 1, 7, 26] {
        let errors = SheetRequest::new("School", 10, options, false).violations();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["options_per_question"]);
        assert_eq!(errors.0[0].kind, FieldErrorKind::Range);
    }
}

#[test]
fn test_request_validation_reports_every_field() {
    let errors = SheetRequest::new("School", 0, 9, false).violations();
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        ["total_questions", "options_per_question"]
    );
    assert!(errors.to_string().contains("total_questions"));
}

#[test]
fn test_paper_size_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(PaperSize::Letter.dimensions_mm(), (215.9, 279.4));
    assert_eq!(PaperSize::Legal.dimensions_mm(), (215.9, 355.6));
    let custom = PaperSize::Custom {
        width_mm: 250.0,
        height_mm: 350.0,
    };
    assert_eq!(custom.dimensions_mm(), (250.0, 350.0));

    let (w, h) = PaperSize::A4.dimensions_pt();
    assert!((w - 595.28).abs() < 0.01);
    assert!((h - 841.89).abs() < 0.01);
}

#[test]
fn test_default_layout_is_valid() {
    let layout = SheetLayout::default();
    assert!(layout.validate().is_ok());
    assert!(layout.widest_row_pt() <= layout.column_width_pt());
}

#[test]
fn test_layout_rejects_bubbles_wider_than_column() {
    let layout = SheetLayout {
        bubble_spacing_pt: 24.0,
        bubble_radius_pt: 7.0,
        ..Default::default()
    };
    match layout.validate() {
        Err(SheetError::Config(msg)) => assert!(msg.contains("bubbles need")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_layout_rejects_non_positive_sizes() {
    let layout = SheetLayout {
        row_height_pt: 0.0,
        ..Default::default()
    };
    assert!(layout.validate().is_err());

    let layout = SheetLayout {
        bubble_radius_pt: -1.0,
        ..Default::default()
    };
    assert!(layout.validate().is_err());
}

#[test]
fn test_layout_rejects_grid_above_title() {
    let layout = SheetLayout {
        grid_top_offset_pt: 30.0,
        ..Default::default()
    };
    assert!(layout.validate().is_err());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_layout() {
    use tempfile::NamedTempFile;

    let layout = SheetLayout {
        paper: PaperSize::Letter,
        row_height_pt: 18.0,
        ..Default::default()
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    layout.save(path).await.unwrap();
    let loaded = SheetLayout::load(path).await.unwrap();

    assert_eq!(loaded, layout);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_layout_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    tokio::fs::write(&path, r#"{ "row_height_pt": 20.0 }"#)
        .await
        .unwrap();

    let loaded = SheetLayout::load(&path).await.unwrap();
    assert_eq!(loaded.row_height_pt, 20.0);
    assert_eq!(loaded.paper, PaperSize::A4);
    assert_eq!(loaded.bubble_radius_pt, 6.0);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_rejects_invalid_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    tokio::fs::write(&path, "not json").await.unwrap();
    assert!(matches!(
        SheetLayout::load(&path).await,
        Err(SheetError::Config(_))
    ));
}
