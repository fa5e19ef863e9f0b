/// Journal Report - Inspect a skill journal database
///
/// This tool:
/// 1. Opens the database at DB_PATH (default: skill_journal.db)
/// 2. Lists skills with their active form fields and average rating
/// 3. Prints the merged reflection history
/// 4. Prints the dashboard summary as JSON

use anyhow::Result;
use skill_journal_schemas::ReflectionView;
use skill_journal_store::{dashboard, Database, DEFAULT_REFLECTION_LIMIT};
use std::path::PathBuf;
use tracing::{info, Level};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("═══════════════════════════════════════════════════════════");
    info!("Skill Journal - Database Report");
    info!("═══════════════════════════════════════════════════════════");
    info!("");

    // Database path
    let db_path = PathBuf::from(
        std::env::var("DB_PATH").unwrap_or_else(|_| "skill_journal.db".to_string()),
    );

    if !db_path.exists() {
        anyhow::bail!("Database not found at {}", db_path.display());
    }

    info!("Database: {}", db_path.display());
    info!("");

    let db = Database::new(&db_path)?;

    info!("SKILLS");
    info!("─────────────────────────────────────────────────────────");
    match db.list_skills() {
        Ok(skills) if skills.is_empty() => info!("  No skills recorded yet"),
        Ok(skills) => {
            for (i, (skill_id, name)) in skills.iter().enumerate() {
                info!("  {}. {} ({})", i + 1, name, skill_id.0);

                match db.list_form_fields(skill_id, false) {
                    Ok(fields) => {
                        for field in &fields {
                            info!("     - {} [{}]", field.name, field.kind.as_str());
                        }
                    }
                    Err(e) => info!("     Could not list fields: {}", e),
                }

                match dashboard::average_rating(&db, Some(skill_id)) {
                    Ok(Some(avg)) => info!("     Average rating: {:.2}", avg),
                    Ok(None) => {}
                    Err(e) => info!("     Could not compute average rating: {}", e),
                }
            }
        }
        Err(e) => info!("  Could not list skills: {}", e),
    }
    info!("");

    info!("REFLECTION HISTORY");
    info!("─────────────────────────────────────────────────────────");
    match db.list_reflections(None, DEFAULT_REFLECTION_LIMIT) {
        Ok(views) if views.is_empty() => info!("  No reflections recorded yet"),
        Ok(views) => {
            info!("  {} reflections in the merged stream (showing first 10):", views.len());
            for (i, view) in views.iter().take(10).enumerate() {
                match view {
                    ReflectionView::Generic(generic) => {
                        // Use char-aware truncation to handle Unicode correctly
                        let preview: String = generic.content.chars().take(60).collect();
                        let preview = if generic.content.chars().count() > 60 {
                            format!("{}...", preview)
                        } else {
                            preview
                        };
                        info!("  {}. [generic] {}", i + 1, generic.timestamp);
                        info!("     {}", preview);
                    }
                    ReflectionView::Skill(reflection) => {
                        info!(
                            "  {}. [{}] {}",
                            i + 1,
                            reflection.skill_name,
                            reflection.timestamp
                        );
                        for entry in &reflection.entries {
                            info!("     {}: {}", entry.field_name, entry.value);
                        }
                    }
                }
            }
        }
        Err(e) => info!("  Could not list reflections: {}", e),
    }
    info!("");

    info!("DASHBOARD");
    info!("─────────────────────────────────────────────────────────");
    match dashboard::summary(&db, None) {
        Ok(summary) => {
            info!("  Overall reflections: {}", summary.overall_count);
            for week in &summary.weekly_counts {
                info!("  {}: {}", week.label, week.count);
            }
            match summary.average_rating {
                Some(avg) => info!("  Average rating: {:.2}", avg),
                None => info!("  Average rating: n/a"),
            }
            info!("");
            info!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Err(e) => info!("  Could not compute dashboard summary: {}", e),
    }
    info!("═══════════════════════════════════════════════════════════");

    Ok(())
}
