use skill_journal_schemas::{EntryId, FieldKind, ReflectionView, SkillId};
use skill_journal_store::{Database, StoreError};
use tempfile::TempDir;

/// Test that a generic reflection can be saved and read back
#[test]
fn test_generic_reflection_round_trip() {
    // Setup temporary database
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let id = db
        .save_generic_reflection("Felt focused this morning")
        .unwrap();

    let views = db.list_reflections(None, 100).unwrap();
    assert_eq!(views.len(), 1);
    match &views[0] {
        ReflectionView::Generic(reflection) => {
            assert_eq!(reflection.id, id);
            assert_eq!(reflection.content, "Felt focused this morning");
        }
        other => panic!("Expected generic reflection, got {:?}", other),
    }
}

/// Test that blank generic content is rejected
#[test]
fn test_empty_generic_content_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let err = db.save_generic_reflection("").unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = db.save_generic_reflection("   ").unwrap_err();
    assert!(
        matches!(err, StoreError::Validation(_)),
        "Whitespace-only content is empty after trim"
    );

    assert_eq!(db.count_generic_reflections().unwrap(), 0);
}

/// Test that a skill reflection stores its entries in field creation order
#[test]
fn test_skill_reflection_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let skill_id = db.create_skill("Guitar Practice", "", "").unwrap();
    let minutes = db
        .add_form_field(&skill_id, "Minutes", FieldKind::Number)
        .unwrap();
    let rating = db
        .add_form_field(&skill_id, "Rating", FieldKind::Rating1to5)
        .unwrap();

    let entries = vec![(minutes, "30".to_string()), (rating, "4".to_string())];
    let reflection_id = db.save_skill_reflection(&skill_id, &entries).unwrap();

    let views = db.list_reflections(Some(&skill_id), 100).unwrap();
    assert_eq!(views.len(), 1);
    match &views[0] {
        ReflectionView::Skill(reflection) => {
            assert_eq!(reflection.id, reflection_id);
            assert_eq!(reflection.skill_name, "Guitar Practice");
            let pairs: Vec<(&str, &str)> = reflection
                .entries
                .iter()
                .map(|entry| (entry.field_name.as_str(), entry.value.as_str()))
                .collect();
            assert_eq!(
                pairs,
                vec![("Minutes", "30"), ("Rating", "4")],
                "Entries should match the submitted pairs in field creation order"
            );
        }
        other => panic!("Expected skill reflection, got {:?}", other),
    }
}

/// Test that invalid field values reject the whole submission
#[test]
fn test_invalid_values_leave_no_rows() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let skill_id = db.create_skill("Running", "", "").unwrap();
    let distance = db
        .add_form_field(&skill_id, "Distance", FieldKind::Number)
        .unwrap();
    let rating = db
        .add_form_field(&skill_id, "Rating", FieldKind::Rating1to5)
        .unwrap();

    let err = db
        .save_skill_reflection(&skill_id, &[(distance, "five km".to_string())])
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = db
        .save_skill_reflection(&skill_id, &[(rating, "6".to_string())])
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    assert_eq!(
        db.count_skill_reflections().unwrap(),
        0,
        "Failed saves should write nothing"
    );
    assert!(db.list_reflections(Some(&skill_id), 100).unwrap().is_empty());
}

/// Test that an empty entry set is allowed only for all-text forms
#[test]
fn test_empty_entry_set_policy() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    // A form of only text fields can be submitted blank.
    let journaling = db.create_skill("Journaling", "", "").unwrap();
    db.add_form_field(&journaling, "Notes", FieldKind::Text)
        .unwrap();
    db.save_skill_reflection(&journaling, &[]).unwrap();

    // A number field demands entries.
    let workouts = db.create_skill("Workouts", "", "").unwrap();
    db.add_form_field(&workouts, "Reps", FieldKind::Number)
        .unwrap();
    let err = db.save_skill_reflection(&workouts, &[]).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

/// Test that entries must reference active fields of the target skill
#[test]
fn test_entries_must_reference_active_fields() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let guitar = db.create_skill("Guitar", "", "").unwrap();
    let chess = db.create_skill("Chess", "", "").unwrap();
    let chess_minutes = db
        .add_form_field(&chess, "Minutes", FieldKind::Number)
        .unwrap();

    // Another skill's field is invisible here.
    let err = db
        .save_skill_reflection(&guitar, &[(chess_minutes, "10".to_string())])
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    // A soft-deleted field of the right skill is rejected too.
    let guitar_minutes = db
        .add_form_field(&guitar, "Minutes", FieldKind::Number)
        .unwrap();
    db.soft_delete_field(&guitar_minutes).unwrap();
    let err = db
        .save_skill_reflection(&guitar, &[(guitar_minutes, "10".to_string())])
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    let err = db
        .save_skill_reflection(&SkillId("skill_missing".to_string()), &[])
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

/// Test that a field may appear at most once per submission
#[test]
fn test_duplicate_field_in_submission_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let skill_id = db.create_skill("Running", "", "").unwrap();
    let minutes = db
        .add_form_field(&skill_id, "Minutes", FieldKind::Number)
        .unwrap();

    let entries = vec![(minutes.clone(), "10".to_string()), (minutes, "20".to_string())];
    let err = db.save_skill_reflection(&skill_id, &entries).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(db.count_skill_reflections().unwrap(), 0);
}

/// Test that history keeps entries for fields deleted after the fact
#[test]
fn test_history_survives_soft_delete() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let skill_id = db.create_skill("Meditation", "", "").unwrap();
    let rating = db
        .add_form_field(&skill_id, "Rating", FieldKind::Rating1to5)
        .unwrap();
    db.save_skill_reflection(&skill_id, &[(rating.clone(), "5".to_string())])
        .unwrap();

    db.soft_delete_field(&rating).unwrap();

    let views = db.list_reflections(Some(&skill_id), 100).unwrap();
    match &views[0] {
        ReflectionView::Skill(reflection) => {
            assert_eq!(reflection.entries.len(), 1);
            assert_eq!(reflection.entries[0].field_name, "Rating");
            assert_eq!(reflection.entries[0].field_kind, FieldKind::Rating1to5);
            assert_eq!(reflection.entries[0].value, "5");
        }
        other => panic!("Expected skill reflection, got {:?}", other),
    }
}

/// Test that stored entry values can be edited without re-validation
#[test]
fn test_entry_edits_are_permissive() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let skill_id = db.create_skill("Running", "", "").unwrap();
    let minutes = db
        .add_form_field(&skill_id, "Minutes", FieldKind::Number)
        .unwrap();
    db.save_skill_reflection(&skill_id, &[(minutes, "30".to_string())])
        .unwrap();

    let views = db.list_reflections(Some(&skill_id), 100).unwrap();
    let entry_id = match &views[0] {
        ReflectionView::Skill(reflection) => reflection.entries[0].entry_id.clone(),
        other => panic!("Expected skill reflection, got {:?}", other),
    };

    // Edits bypass kind validation; the old value was valid, the new one need not be.
    db.update_entry_value(&entry_id, "about forty").unwrap();

    let views = db.list_reflections(Some(&skill_id), 100).unwrap();
    match &views[0] {
        ReflectionView::Skill(reflection) => {
            assert_eq!(reflection.entries[0].value, "about forty");
        }
        other => panic!("Expected skill reflection, got {:?}", other),
    }

    let err = db
        .update_entry_value(&EntryId("entry_missing".to_string()), "x")
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

/// Test that generic reflections can be edited and deleted
#[test]
fn test_generic_update_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let id = db.save_generic_reflection("Draft thought").unwrap();
    db.update_generic_content(&id, "Polished thought").unwrap();

    let views = db.list_reflections(None, 100).unwrap();
    match &views[0] {
        ReflectionView::Generic(reflection) => {
            assert_eq!(reflection.content, "Polished thought");
        }
        other => panic!("Expected generic reflection, got {:?}", other),
    }

    db.delete_generic_reflection(&id).unwrap();
    assert_eq!(db.count_generic_reflections().unwrap(), 0);

    let err = db.delete_generic_reflection(&id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

/// Test that deleting a skill reflection removes its entries
#[test]
fn test_deleting_reflection_cascades_entries() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let skill_id = db.create_skill("Guitar", "", "").unwrap();
    let minutes = db
        .add_form_field(&skill_id, "Minutes", FieldKind::Number)
        .unwrap();
    let reflection_id = db
        .save_skill_reflection(&skill_id, &[(minutes, "30".to_string())])
        .unwrap();

    let views = db.list_reflections(Some(&skill_id), 100).unwrap();
    let entry_id = match &views[0] {
        ReflectionView::Skill(reflection) => reflection.entries[0].entry_id.clone(),
        other => panic!("Expected skill reflection, got {:?}", other),
    };

    db.delete_skill_reflection(&reflection_id).unwrap();
    assert_eq!(db.count_skill_reflections().unwrap(), 0);

    let err = db.update_entry_value(&entry_id, "x").unwrap_err();
    assert!(
        matches!(err, StoreError::NotFound(_)),
        "Entries should be cascade-deleted with their reflection"
    );
}

/// Test that the merged history is newest-first and truncates after merging
#[test]
fn test_merged_stream_orders_and_truncates() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let skill_id = db.create_skill("Reading", "", "").unwrap();

    db.save_generic_reflection("First note").unwrap();
    db.save_skill_reflection(&skill_id, &[]).unwrap();
    db.save_generic_reflection("Second note").unwrap();
    db.save_skill_reflection(&skill_id, &[]).unwrap();
    db.save_generic_reflection("Third note").unwrap();

    let views = db.list_reflections(None, 100).unwrap();
    assert_eq!(views.len(), 5);

    let timestamps: Vec<&str> = views.iter().map(|view| view.timestamp()).collect();
    let mut sorted = timestamps.clone();
    sorted.sort();
    sorted.reverse();
    assert_eq!(
        timestamps, sorted,
        "Merged stream should be timestamp-descending"
    );

    // The limit applies to the combined stream, not to each source.
    let top = db.list_reflections(None, 3).unwrap();
    assert_eq!(top.len(), 3);
    match &top[0] {
        ReflectionView::Generic(reflection) => {
            assert_eq!(reflection.content, "Third note");
        }
        other => panic!("Expected the newest generic reflection, got {:?}", other),
    }
}

/// Test that a skill-scoped listing excludes generic reflections
#[test]
fn test_skill_filter_excludes_generics() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path).unwrap();

    let skill_id = db.create_skill("Chess", "", "").unwrap();
    db.save_skill_reflection(&skill_id, &[]).unwrap();
    db.save_generic_reflection("Unrelated note").unwrap();

    let views = db.list_reflections(Some(&skill_id), 100).unwrap();
    assert_eq!(views.len(), 1);
    assert!(views.iter().all(|view| matches!(view, ReflectionView::Skill(_))));
}
