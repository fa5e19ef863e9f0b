use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ULID and ID Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReflectionId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericReflectionId(pub String);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ReflectionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GenericReflectionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Skill Schema
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    pub plan: String,
    pub created_at: String, // RFC3339
}

// ============================================================================
// Form Field Schema
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "text")]
    Text,          // free text, accepts anything
    #[serde(rename = "number")]
    Number,        // must parse as a real when non-empty
    #[serde(rename = "rating1-5")]
    Rating1to5,    // "1".."5" when non-empty
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Rating1to5 => "rating1-5",
        }
    }

    /// Checks one submitted value against this kind. Empty values pass for
    /// every kind; the empty-form rule is enforced per reflection, not here.
    pub fn validate_value(&self, value: &str) -> Result<(), String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        match self {
            FieldKind::Text => Ok(()),
            FieldKind::Number => {
                if trimmed.parse::<f64>().is_ok() {
                    Ok(())
                } else {
                    Err(format!("'{}' is not a valid number", value))
                }
            }
            FieldKind::Rating1to5 => match trimmed {
                "1" | "2" | "3" | "4" | "5" => Ok(()),
                _ => Err(format!("'{}' is not a rating between 1 and 5", value)),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub id: FieldId,
    pub skill_id: SkillId,
    pub name: String,
    pub kind: FieldKind,
    pub created_at: String,         // RFC3339
    pub deleted_at: Option<String>, // RFC3339, set on soft delete
}

impl FormField {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

// ============================================================================
// Reflection Schemas
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reflection {
    pub id: ReflectionId,
    pub skill_id: SkillId,
    pub timestamp: String, // RFC3339
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectionEntry {
    pub id: EntryId,
    pub reflection_id: ReflectionId,
    pub field_id: FieldId,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericReflection {
    pub id: GenericReflectionId,
    pub timestamp: String, // RFC3339
    pub content: String,
}

// ============================================================================
// History View Types
// ============================================================================

// Entry joined with its field's name and kind, so history stays renderable
// after the field is soft-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryView {
    pub entry_id: EntryId,
    pub field_id: FieldId,
    pub field_name: String,
    pub field_kind: FieldKind,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillReflectionView {
    pub id: ReflectionId,
    pub skill_id: SkillId,
    pub skill_name: String,
    pub timestamp: String, // RFC3339
    pub entries: Vec<EntryView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReflectionView {
    #[serde(rename = "generic")]
    Generic(GenericReflection),
    #[serde(rename = "skill")]
    Skill(SkillReflectionView),
}

impl ReflectionView {
    pub fn timestamp(&self) -> &str {
        match self {
            ReflectionView::Generic(g) => &g.timestamp,
            ReflectionView::Skill(s) => &s.timestamp,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

pub fn generate_skill_id() -> SkillId {
    SkillId(format!("skill_{}", ulid::Ulid::new()))
}

pub fn generate_field_id() -> FieldId {
    FieldId(format!("field_{}", ulid::Ulid::new()))
}

pub fn generate_reflection_id() -> ReflectionId {
    ReflectionId(format!("refl_{}", ulid::Ulid::new()))
}

pub fn generate_entry_id() -> EntryId {
    EntryId(format!("entry_{}", ulid::Ulid::new()))
}

pub fn generate_generic_reflection_id() -> GenericReflectionId {
    GenericReflectionId(format!("gen_{}", ulid::Ulid::new()))
}
