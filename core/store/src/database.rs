use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use skill_journal_schemas::{
    generate_entry_id, generate_field_id, generate_generic_reflection_id, generate_reflection_id,
    generate_skill_id, EntryId, EntryView, FieldId, FieldKind, FormField, GenericReflection,
    GenericReflectionId, Reflection, ReflectionEntry, ReflectionId, ReflectionView, Skill, SkillId,
    SkillReflectionView,
};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, error, info};

use crate::error::{Result, StoreError};

/// Cap on non-deleted fields per skill; soft-deleted fields do not count.
pub const MAX_ACTIVE_FIELDS: usize = 5;

/// Default page size for reflection history queries.
pub const DEFAULT_REFLECTION_LIMIT: usize = 100;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the journal database and apply the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "busy_timeout", 5000)?;

        let db = Self { conn };
        if let Err(err) = db.init_schema() {
            error!("Schema initialization failed: {}", err);
            return Err(err);
        }

        info!("Database initialized");
        Ok(db)
    }

    /// Check if a column exists in a table
    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        let query = format!("PRAGMA table_info({})", table);
        let mut stmt = self.conn.prepare(&query)?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns.contains(&column.to_string()))
    }

    /// Create all tables and indexes
    fn init_schema(&self) -> Result<()> {
        // Skills (journal subjects)
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS skills (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                description TEXT DEFAULT '',
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        // Form fields (per-skill reflection form slots)
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS form_fields (
                id TEXT PRIMARY KEY,
                skill_id TEXT NOT NULL,
                name TEXT NOT NULL,
                kind TEXT NOT NULL CHECK(kind IN ('text', 'number', 'rating1-5')),
                created_at TEXT NOT NULL,
                FOREIGN KEY (skill_id) REFERENCES skills(id) ON DELETE CASCADE
            )",
            [],
        )?;

        // Structured reflections (one per submitted form)
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS reflections (
                id TEXT PRIMARY KEY,
                skill_id TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                FOREIGN KEY (skill_id) REFERENCES skills(id) ON DELETE CASCADE
            )",
            [],
        )?;

        // One row per (reflection, field) pair submitted with the form
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS reflection_entries (
                id TEXT PRIMARY KEY,
                reflection_id TEXT NOT NULL,
                field_id TEXT NOT NULL,
                value TEXT,
                FOREIGN KEY (reflection_id) REFERENCES reflections(id) ON DELETE CASCADE,
                FOREIGN KEY (field_id) REFERENCES form_fields(id) ON DELETE CASCADE
            )",
            [],
        )?;

        // Free-text reflections, independent of any skill
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS generic_reflections (
                id TEXT PRIMARY KEY,
                timestamp TEXT NOT NULL,
                content TEXT NOT NULL
            )",
            [],
        )?;

        // Additive column migrations (idempotent with IF NOT EXISTS equivalent)
        // SQLite doesn't have IF NOT EXISTS for ALTER COLUMN, so we check column existence
        let has_deleted_at = self.has_column("form_fields", "deleted_at")?;
        if !has_deleted_at {
            self.conn.execute(
                "ALTER TABLE form_fields ADD COLUMN deleted_at TEXT DEFAULT NULL",
                [],
            )?;
        }

        let has_plan = self.has_column("skills", "plan")?;
        if !has_plan {
            self.conn
                .execute("ALTER TABLE skills ADD COLUMN plan TEXT DEFAULT ''", [])?;
        }

        // Indexes for performance
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_form_fields_active ON form_fields(skill_id, deleted_at)",
            [],
        )?;

        // Active names are unique per skill; a soft-deleted name may be reused
        self.conn.execute(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_form_fields_active_name
             ON form_fields(skill_id, name) WHERE deleted_at IS NULL",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_reflections_skill ON reflections(skill_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_reflections_timestamp ON reflections(timestamp DESC)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_generic_timestamp ON generic_reflections(timestamp DESC)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_entries_reflection ON reflection_entries(reflection_id)",
            [],
        )?;

        debug!("Database schema initialized");
        Ok(())
    }

    // ========== SKILL REGISTRY ==========

    /// Create a new skill, failing on a duplicate name.
    pub fn create_skill(&self, name: &str, description: &str, plan: &str) -> Result<SkillId> {
        if name.trim().is_empty() {
            return Err(StoreError::Validation(
                "Skill name cannot be empty".to_string(),
            ));
        }

        let id = generate_skill_id();
        let result = self.conn.execute(
            "INSERT INTO skills (id, name, description, plan, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id.0, name, description, plan, Utc::now().to_rfc3339()],
        );

        match result {
            Ok(_) => {
                info!("Created skill: {} ({})", name, id.0);
                Ok(id)
            }
            Err(err) if is_unique_violation(&err) => Err(StoreError::Constraint(format!(
                "Skill '{}' already exists",
                name
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// List all skills as (id, name), ordered by name.
    pub fn list_skills(&self) -> Result<Vec<(SkillId, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM skills ORDER BY name")?;

        let skills = stmt
            .query_map([], |row| {
                Ok((SkillId(row.get(0)?), row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(skills)
    }

    /// Get a skill by ID
    pub fn get_skill(&self, id: &SkillId) -> Result<Option<Skill>> {
        let skill = self
            .conn
            .query_row(
                "SELECT id, name, description, plan, created_at FROM skills WHERE id = ?1",
                params![id.0],
                |row| {
                    Ok(Skill {
                        id: SkillId(row.get(0)?),
                        name: row.get(1)?,
                        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        plan: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(skill)
    }

    /// Overwrite a skill's plan text. No validation on content.
    pub fn update_skill_plan(&self, id: &SkillId, new_plan: &str) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE skills SET plan = ?1 WHERE id = ?2",
            params![new_plan, id.0],
        )?;

        if rows == 0 {
            return Err(StoreError::NotFound(format!("Skill '{}' not found", id.0)));
        }

        debug!("Updated plan for skill {}", id.0);
        Ok(())
    }

    // ========== FORM SCHEMA MANAGER ==========

    /// Add a form field to a skill. The active-field cap and the active-name
    /// uniqueness check run in the same transaction as the insert.
    pub fn add_form_field(
        &self,
        skill_id: &SkillId,
        name: &str,
        kind: FieldKind,
    ) -> Result<FieldId> {
        if name.trim().is_empty() {
            return Err(StoreError::Validation(
                "Field name cannot be empty".to_string(),
            ));
        }

        let tx = self.conn.unchecked_transaction()?;

        let skill_exists: Option<String> = tx
            .query_row(
                "SELECT id FROM skills WHERE id = ?1",
                params![skill_id.0],
                |row| row.get(0),
            )
            .optional()?;
        if skill_exists.is_none() {
            return Err(StoreError::NotFound(format!(
                "Skill '{}' not found",
                skill_id.0
            )));
        }

        let active_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM form_fields WHERE skill_id = ?1 AND deleted_at IS NULL",
            params![skill_id.0],
            |row| row.get(0),
        )?;
        if active_count as usize >= MAX_ACTIVE_FIELDS {
            return Err(StoreError::Constraint(format!(
                "A skill cannot have more than {} active form fields",
                MAX_ACTIVE_FIELDS
            )));
        }

        let duplicate: Option<String> = tx
            .query_row(
                "SELECT id FROM form_fields
                 WHERE skill_id = ?1 AND name = ?2 AND deleted_at IS NULL",
                params![skill_id.0, name],
                |row| row.get(0),
            )
            .optional()?;
        if duplicate.is_some() {
            return Err(StoreError::Constraint(format!(
                "An active field named '{}' already exists for this skill",
                name
            )));
        }

        let id = generate_field_id();
        tx.execute(
            "INSERT INTO form_fields (id, skill_id, name, kind, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id.0, skill_id.0, name, kind.as_str(), Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;

        info!("Created form field: {} ({})", name, id.0);
        Ok(id)
    }

    /// List a skill's form fields in creation order.
    pub fn list_form_fields(
        &self,
        skill_id: &SkillId,
        include_deleted: bool,
    ) -> Result<Vec<FormField>> {
        // rowid follows insertion order, so listings come back in creation order
        let query = if include_deleted {
            "SELECT id, skill_id, name, kind, created_at, deleted_at
             FROM form_fields WHERE skill_id = ?1 ORDER BY rowid"
        } else {
            "SELECT id, skill_id, name, kind, created_at, deleted_at
             FROM form_fields WHERE skill_id = ?1 AND deleted_at IS NULL ORDER BY rowid"
        };

        let mut stmt = self.conn.prepare(query)?;
        let fields = stmt
            .query_map(params![skill_id.0], |row| {
                Ok(FormField {
                    id: FieldId(row.get(0)?),
                    skill_id: SkillId(row.get(1)?),
                    name: row.get(2)?,
                    kind: parse_field_kind(&row.get::<_, String>(3)?),
                    created_at: row.get(4)?,
                    deleted_at: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(fields)
    }

    /// Soft-delete a field. Entries referencing it stay readable; calling
    /// this twice just re-stamps the deletion timestamp.
    pub fn soft_delete_field(&self, field_id: &FieldId) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE form_fields SET deleted_at = ?1 WHERE id = ?2",
            params![Utc::now().to_rfc3339(), field_id.0],
        )?;

        if rows == 0 {
            return Err(StoreError::NotFound(format!(
                "Field '{}' not found",
                field_id.0
            )));
        }

        debug!("Soft-deleted form field {}", field_id.0);
        Ok(())
    }

    // ========== REFLECTION STORE ==========

    /// Save a free-text reflection.
    pub fn save_generic_reflection(&self, content: &str) -> Result<GenericReflectionId> {
        if content.trim().is_empty() {
            return Err(StoreError::Validation(
                "Reflection content cannot be empty".to_string(),
            ));
        }

        let reflection = GenericReflection {
            id: generate_generic_reflection_id(),
            timestamp: Utc::now().to_rfc3339(),
            content: content.to_string(),
        };

        self.conn.execute(
            "INSERT INTO generic_reflections (id, timestamp, content) VALUES (?1, ?2, ?3)",
            params![reflection.id.0, reflection.timestamp, reflection.content],
        )?;

        debug!("Saved generic reflection {}", reflection.id.0);
        Ok(reflection.id)
    }

    /// Save a structured reflection and its entries in one transaction.
    ///
    /// Every submitted value is validated against the skill's active fields
    /// before any write, so a failure leaves no partial row set behind.
    pub fn save_skill_reflection(
        &self,
        skill_id: &SkillId,
        entries: &[(FieldId, String)],
    ) -> Result<ReflectionId> {
        let tx = self.conn.unchecked_transaction()?;

        let skill_exists: Option<String> = tx
            .query_row(
                "SELECT id FROM skills WHERE id = ?1",
                params![skill_id.0],
                |row| row.get(0),
            )
            .optional()?;
        if skill_exists.is_none() {
            return Err(StoreError::NotFound(format!(
                "Skill '{}' not found",
                skill_id.0
            )));
        }

        let active_fields: HashMap<String, FieldKind> = {
            let mut stmt = tx.prepare(
                "SELECT id, kind FROM form_fields WHERE skill_id = ?1 AND deleted_at IS NULL",
            )?;
            let fields = stmt
                .query_map(params![skill_id.0], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        parse_field_kind(&row.get::<_, String>(1)?),
                    ))
                })?
                .collect::<Result<HashMap<_, _>, _>>()?;
            fields
        };

        let mut seen: HashSet<&str> = HashSet::new();
        for (field_id, value) in entries {
            if !seen.insert(field_id.0.as_str()) {
                return Err(StoreError::Validation(format!(
                    "Field '{}' appears more than once in this reflection",
                    field_id.0
                )));
            }

            let kind = active_fields.get(&field_id.0).ok_or_else(|| {
                StoreError::NotFound(format!(
                    "Field '{}' is not an active field of skill '{}'",
                    field_id.0, skill_id.0
                ))
            })?;
            kind.validate_value(value).map_err(StoreError::Validation)?;
        }

        // An empty submission is only meaningful for an all-text form.
        if entries.is_empty() && active_fields.values().any(|kind| *kind != FieldKind::Text) {
            return Err(StoreError::Validation(
                "This skill's form has fields that require values".to_string(),
            ));
        }

        let reflection = Reflection {
            id: generate_reflection_id(),
            skill_id: skill_id.clone(),
            timestamp: Utc::now().to_rfc3339(),
        };

        tx.execute(
            "INSERT INTO reflections (id, skill_id, timestamp) VALUES (?1, ?2, ?3)",
            params![reflection.id.0, reflection.skill_id.0, reflection.timestamp],
        )?;

        for (field_id, value) in entries {
            let entry = ReflectionEntry {
                id: generate_entry_id(),
                reflection_id: reflection.id.clone(),
                field_id: field_id.clone(),
                value: value.clone(),
            };
            tx.execute(
                "INSERT INTO reflection_entries (id, reflection_id, field_id, value)
                 VALUES (?1, ?2, ?3, ?4)",
                params![entry.id.0, entry.reflection_id.0, entry.field_id.0, entry.value],
            )?;
        }

        tx.commit()?;

        info!(
            "Saved reflection for skill {} ({} entries)",
            skill_id.0,
            entries.len()
        );
        Ok(reflection.id)
    }

    /// Overwrite one entry's value in place. The value is not re-checked
    /// against the field's kind; edits are permissive.
    pub fn update_entry_value(&self, entry_id: &EntryId, new_value: &str) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE reflection_entries SET value = ?1 WHERE id = ?2",
            params![new_value, entry_id.0],
        )?;

        if rows == 0 {
            return Err(StoreError::NotFound(format!(
                "Entry '{}' not found",
                entry_id.0
            )));
        }

        debug!("Updated reflection entry {}", entry_id.0);
        Ok(())
    }

    /// Overwrite a free-text reflection's content.
    pub fn update_generic_content(
        &self,
        id: &GenericReflectionId,
        new_content: &str,
    ) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE generic_reflections SET content = ?1 WHERE id = ?2",
            params![new_content, id.0],
        )?;

        if rows == 0 {
            return Err(StoreError::NotFound(format!(
                "Generic reflection '{}' not found",
                id.0
            )));
        }

        debug!("Updated generic reflection {}", id.0);
        Ok(())
    }

    /// Delete a free-text reflection.
    pub fn delete_generic_reflection(&self, id: &GenericReflectionId) -> Result<()> {
        let rows = self.conn.execute(
            "DELETE FROM generic_reflections WHERE id = ?1",
            params![id.0],
        )?;

        if rows == 0 {
            return Err(StoreError::NotFound(format!(
                "Generic reflection '{}' not found",
                id.0
            )));
        }

        debug!("Deleted generic reflection {}", id.0);
        Ok(())
    }

    /// Delete a structured reflection. Its entries go with it via the
    /// cascading foreign key.
    pub fn delete_skill_reflection(&self, id: &ReflectionId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM reflections WHERE id = ?1", params![id.0])?;

        if rows == 0 {
            return Err(StoreError::NotFound(format!(
                "Reflection '{}' not found",
                id.0
            )));
        }

        debug!("Deleted skill reflection {}", id.0);
        Ok(())
    }

    /// List reflection history, newest first.
    ///
    /// Without a skill filter, free-text and structured reflections are
    /// merged into one timestamp-ordered stream truncated to `limit`. With a
    /// filter, only that skill's structured reflections are returned.
    pub fn list_reflections(
        &self,
        skill_id: Option<&SkillId>,
        limit: usize,
    ) -> Result<Vec<ReflectionView>> {
        let mut views: Vec<ReflectionView> = Vec::new();

        if skill_id.is_none() {
            let mut stmt = self.conn.prepare(
                "SELECT id, timestamp, content FROM generic_reflections
                 ORDER BY timestamp DESC LIMIT ?1",
            )?;
            let generics = stmt
                .query_map(params![limit as i64], |row| {
                    Ok(GenericReflection {
                        id: GenericReflectionId(row.get(0)?),
                        timestamp: row.get(1)?,
                        content: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            views.extend(generics.into_iter().map(ReflectionView::Generic));
        }

        let skill_rows: Vec<(String, String, String, String)> = match skill_id {
            Some(skill_id) => {
                let mut stmt = self.conn.prepare(
                    "SELECT r.id, r.timestamp, r.skill_id, s.name
                     FROM reflections r
                     JOIN skills s ON r.skill_id = s.id
                     WHERE r.skill_id = ?1
                     ORDER BY r.timestamp DESC LIMIT ?2",
                )?;
                let rows = stmt
                    .query_map(params![skill_id.0, limit as i64], |row| {
                        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT r.id, r.timestamp, r.skill_id, s.name
                     FROM reflections r
                     JOIN skills s ON r.skill_id = s.id
                     ORDER BY r.timestamp DESC LIMIT ?1",
                )?;
                let rows = stmt
                    .query_map(params![limit as i64], |row| {
                        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };

        for (id, timestamp, owner_id, skill_name) in skill_rows {
            let reflection_id = ReflectionId(id);
            let entries = self.entries_for_reflection(&reflection_id)?;
            views.push(ReflectionView::Skill(SkillReflectionView {
                id: reflection_id,
                skill_id: SkillId(owner_id),
                skill_name,
                timestamp,
                entries,
            }));
        }

        // Stable merge of both streams: parsed timestamps, newest first,
        // truncated only after the merge.
        views.sort_by_key(|view| std::cmp::Reverse(parse_timestamp(view.timestamp())));
        views.truncate(limit);

        Ok(views)
    }

    /// Entries for one reflection joined with field name and kind, in the
    /// owning fields' creation order.
    fn entries_for_reflection(&self, reflection_id: &ReflectionId) -> Result<Vec<EntryView>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.field_id, f.name, f.kind, e.value
             FROM reflection_entries e
             JOIN form_fields f ON e.field_id = f.id
             WHERE e.reflection_id = ?1
             ORDER BY f.rowid",
        )?;

        let entries = stmt
            .query_map(params![reflection_id.0], |row| {
                Ok(EntryView {
                    entry_id: EntryId(row.get(0)?),
                    field_id: FieldId(row.get(1)?),
                    field_name: row.get(2)?,
                    field_kind: parse_field_kind(&row.get::<_, String>(3)?),
                    value: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    // ========== AGGREGATION QUERIES ==========

    /// Count total structured reflections
    pub fn count_skill_reflections(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reflections", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count total free-text reflections
    pub fn count_generic_reflections(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM generic_reflections", [], |row| {
                    row.get(0)
                })?;
        Ok(count as usize)
    }

    /// Raw reflection timestamps on or after `since` (a `YYYY-MM-DD` date
    /// string). Free-text reflections are included only when no skill filter
    /// is given.
    pub fn reflection_timestamps_since(
        &self,
        skill_id: Option<&SkillId>,
        since: &str,
    ) -> Result<Vec<String>> {
        let mut timestamps: Vec<String> = Vec::new();

        match skill_id {
            Some(skill_id) => {
                let mut stmt = self.conn.prepare(
                    "SELECT timestamp FROM reflections WHERE skill_id = ?1 AND timestamp >= ?2",
                )?;
                let rows = stmt
                    .query_map(params![skill_id.0, since], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                timestamps.extend(rows);
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare("SELECT timestamp FROM reflections WHERE timestamp >= ?1")?;
                let rows = stmt
                    .query_map(params![since], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                timestamps.extend(rows);

                let mut stmt = self
                    .conn
                    .prepare("SELECT timestamp FROM generic_reflections WHERE timestamp >= ?1")?;
                let rows = stmt
                    .query_map(params![since], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                timestamps.extend(rows);
            }
        }

        Ok(timestamps)
    }

    /// Average of all values recorded against an active rating field named
    /// "Rating", scoped to one skill when given. `None` when no entries match.
    pub fn rating_average(&self, skill_id: Option<&SkillId>) -> Result<Option<f64>> {
        let base = "SELECT AVG(CAST(e.value AS REAL))
             FROM reflection_entries e
             JOIN form_fields f ON e.field_id = f.id
             JOIN reflections r ON e.reflection_id = r.id
             WHERE f.name = 'Rating' AND f.kind = 'rating1-5' AND f.deleted_at IS NULL";

        let average: Option<f64> = match skill_id {
            Some(skill_id) => self.conn.query_row(
                &format!("{} AND r.skill_id = ?1", base),
                params![skill_id.0],
                |row| row.get(0),
            )?,
            None => self.conn.query_row(base, [], |row| row.get(0))?,
        };

        Ok(average)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    err.to_string().contains("UNIQUE")
}


fn parse_field_kind(raw: &str) -> FieldKind {
    match raw {
        "text" => FieldKind::Text,
        "number" => FieldKind::Number,
        "rating1-5" => FieldKind::Rating1to5,
        other => {
            debug!("Unknown field kind '{}', defaulting to Text", other);
            FieldKind::Text
        }
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(_) => {
            debug!("Unparseable timestamp '{}', sorting as oldest", raw);
            DateTime::<Utc>::MIN_UTC
        }
    }
}
