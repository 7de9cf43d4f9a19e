//! The three-phase seeding pipeline: Concepts, Descriptions,
//! Relationships, plus the non-fatal Verification pass.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use snomed_checkpoint::{CheckpointStore, Phase, SnomedSeedOptions};
use snomed_graph::{GraphRepository, PropertyFilter, PropertyMap, PropertyValue};
use snomed_rf2::Rf2Stream;
use snomed_types::{well_known, DescriptionType, Rf2Concept, Rf2Description, Rf2LanguageRefsetMember, Rf2Relationship, SctId};

use crate::error::PipelineResult;
use crate::model::{SnomedSeedResult, SnomedSeedVerification};

/// A fixed ceiling on concurrent upserts within a single Phase 1 flush.
const FLUSH_CONCURRENCY: usize = 16;

struct PhaseRunOutcome {
    processed: u64,
    paused: bool,
}

/// Runs (or resumes) a full seed against `rf2_directory`.
///
/// Mirrors the orchestration in `snomed_checkpoint`: obtains or creates
/// a checkpoint, works out which phase to resume into, runs the
/// remaining phases in order, and normalizes both cooperative pause and
/// hard failure into a single [`SnomedSeedResult`].
pub async fn run_seed(
    graph: Arc<dyn GraphRepository>,
    checkpoint_store: Arc<CheckpointStore>,
    rf2_directory: String,
    options: SnomedSeedOptions,
    force_restart: bool,
    cancel: CancellationToken,
) -> SnomedSeedResult {
    let start = Instant::now();

    if force_restart {
        checkpoint_store.clear_checkpoint(&rf2_directory).await;
    }

    let checkpoint = checkpoint_store.get_or_create(&rf2_directory, options).await;
    let original_phase = checkpoint.phase;
    let options = checkpoint.options.clone();

    let files = match snomed_rf2::discover_rf2_files(&rf2_directory) {
        Ok(files) => files,
        Err(e) => {
            let elapsed = start.elapsed().as_millis() as u64;
            checkpoint_store.mark_failed(e.to_string(), elapsed).await;
            return SnomedSeedResult {
                ok: false,
                error: Some(e.to_string()),
                concepts: checkpoint.concepts_seeded,
                descriptions: checkpoint.descriptions_processed,
                relationships: checkpoint.relationships_seeded,
                duration_ms: elapsed,
            };
        }
    };

    let resume_phase = match original_phase {
        Phase::NotStarted => Phase::Concepts,
        Phase::Paused | Phase::Failed => {
            if checkpoint.relationships_seeded > 0 {
                Phase::Relationships
            } else if checkpoint.descriptions_processed > 0 {
                Phase::Descriptions
            } else {
                Phase::Concepts
            }
        }
        other => other,
    };

    let mut concepts_seeded = checkpoint.concepts_seeded;
    let mut descriptions_processed = checkpoint.descriptions_processed;
    let mut relationships_seeded = checkpoint.relationships_seeded;
    let resume_from_line = checkpoint.last_processed_line;

    for phase in [Phase::Concepts, Phase::Descriptions, Phase::Relationships] {
        if resume_phase > phase {
            continue;
        }
        let phase_resume_from_line = if resume_phase == phase { resume_from_line } else { 0 };
        checkpoint_store.advance_phase(phase).await;

        let outcome = match phase {
            Phase::Concepts => {
                run_concepts_phase(
                    &graph,
                    &checkpoint_store,
                    &files.concept_file,
                    &options,
                    phase_resume_from_line,
                    concepts_seeded,
                    &cancel,
                )
                .await
            }
            Phase::Descriptions => {
                run_descriptions_phase(&graph, &checkpoint_store, &files, &options, concepts_seeded, &cancel).await
            }
            Phase::Relationships => {
                run_relationships_phase(
                    &graph,
                    &checkpoint_store,
                    &files.relationship_file,
                    &options,
                    phase_resume_from_line,
                    concepts_seeded,
                    descriptions_processed,
                    relationships_seeded,
                    &cancel,
                )
                .await
            }
            _ => unreachable!("loop only iterates Concepts/Descriptions/Relationships"),
        };

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                let elapsed = start.elapsed().as_millis() as u64;
                checkpoint_store.mark_failed(e.to_string(), elapsed).await;
                return SnomedSeedResult {
                    ok: false,
                    error: Some(e.to_string()),
                    concepts: concepts_seeded,
                    descriptions: descriptions_processed,
                    relationships: relationships_seeded,
                    duration_ms: elapsed,
                };
            }
        };

        match phase {
            Phase::Concepts => concepts_seeded = outcome.processed,
            Phase::Descriptions => descriptions_processed = outcome.processed,
            Phase::Relationships => relationships_seeded = outcome.processed,
            _ => {}
        }

        if outcome.paused {
            let elapsed = start.elapsed().as_millis() as u64;
            checkpoint_store.mark_paused(elapsed).await;
            return SnomedSeedResult {
                ok: true,
                error: Some("Paused".to_string()),
                concepts: concepts_seeded,
                descriptions: descriptions_processed,
                relationships: relationships_seeded,
                duration_ms: elapsed,
            };
        }
    }

    if options.verify_after_seed {
        checkpoint_store.advance_phase(Phase::Verification).await;
        let verification = run_verification(&graph).await;
        if !verification.errors.is_empty() {
            tracing::warn!(errors = ?verification.errors, "seed verification reported issues");
        }
    }

    let elapsed = start.elapsed().as_millis() as u64;
    checkpoint_store.mark_completed(elapsed).await;
    SnomedSeedResult {
        ok: true,
        error: None,
        concepts: concepts_seeded,
        descriptions: descriptions_processed,
        relationships: relationships_seeded,
        duration_ms: elapsed,
    }
}

fn concept_properties(concept: &Rf2Concept) -> PropertyMap {
    let mut props = PropertyMap::new();
    props.insert("conceptId".to_string(), PropertyValue::from(concept.id.to_string()));
    props.insert("active".to_string(), PropertyValue::from(concept.active));
    props.insert("moduleId".to_string(), PropertyValue::from(concept.module_id.to_string()));
    props.insert("effectiveTime".to_string(), PropertyValue::from(concept.effective_time));
    props
}

#[allow(clippy::too_many_arguments)]
async fn run_concepts_phase(
    graph: &Arc<dyn GraphRepository>,
    checkpoint_store: &CheckpointStore,
    concept_file: &Path,
    options: &SnomedSeedOptions,
    resume_from_line: u64,
    seeded_so_far: u64,
    cancel: &CancellationToken,
) -> PipelineResult<PhaseRunOutcome> {
    let mut stream = Rf2Stream::<Rf2Concept>::open(concept_file, cancel.clone());
    let mut batch: Vec<(SctId, PropertyMap)> = Vec::with_capacity(options.batch_size);
    let mut seeded = seeded_so_far;
    let mut last_line_number = resume_from_line;

    while let Some(row) = stream.next().await {
        let row = row?;
        let line_number = row.line_number;
        last_line_number = line_number;

        if line_number <= resume_from_line {
            continue;
        }

        if checkpoint_store.is_pause_requested().await || cancel.is_cancelled() {
            seeded += flush_concepts_batch(graph, std::mem::take(&mut batch)).await?;
            checkpoint_store.update_progress(line_number - 1, seeded, 0, 0).await;
            return Ok(PhaseRunOutcome { processed: seeded, paused: true });
        }

        let concept = row.record;
        if options.active_only && !concept.active {
            continue;
        }

        batch.push((concept.id, concept_properties(&concept)));

        if batch.len() >= options.batch_size {
            let before = seeded;
            seeded += flush_concepts_batch(graph, std::mem::take(&mut batch)).await?;
            checkpoint_store.update_progress(line_number, seeded, 0, 0).await;
            if crossed_interval(before, seeded, options.progress_log_interval) {
                tracing::info!(seeded, "concept seeding progress");
            }
        }
    }

    if !batch.is_empty() {
        seeded += flush_concepts_batch(graph, std::mem::take(&mut batch)).await?;
        checkpoint_store.update_progress(last_line_number, seeded, 0, 0).await;
    }

    Ok(PhaseRunOutcome { processed: seeded, paused: false })
}

fn crossed_interval(before: u64, after: u64, interval: u64) -> bool {
    interval > 0 && before / interval != after / interval
}

async fn flush_concepts_batch(
    graph: &Arc<dyn GraphRepository>,
    batch: Vec<(SctId, PropertyMap)>,
) -> PipelineResult<u64> {
    if batch.is_empty() {
        return Ok(0);
    }

    let semaphore = Arc::new(Semaphore::new(FLUSH_CONCURRENCY));
    let mut tasks = JoinSet::new();
    for (concept_id, props) in batch {
        let graph = graph.clone();
        let semaphore = semaphore.clone();
        let key = concept_id.to_string();
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore is never closed");
            graph.upsert_vertex_and_return_id("SnomedConcept", "conceptId", &key, props).await
        });
    }

    let mut flushed = 0u64;
    while let Some(joined) = tasks.join_next().await {
        joined.expect("upsert task panicked")?;
        flushed += 1;
    }
    Ok(flushed)
}

async fn run_descriptions_phase(
    graph: &Arc<dyn GraphRepository>,
    checkpoint_store: &CheckpointStore,
    files: &snomed_rf2::Rf2FileSet,
    options: &SnomedSeedOptions,
    concepts_total: u64,
    cancel: &CancellationToken,
) -> PipelineResult<PhaseRunOutcome> {
    let mut preferred_description_ids: HashSet<SctId> = HashSet::new();
    if let Some(language_refset_file) = &files.language_refset_file {
        let mut stream = Rf2Stream::<Rf2LanguageRefsetMember>::open(language_refset_file, cancel.clone());
        while let Some(row) = stream.next().await {
            let member = row?.record;
            if checkpoint_store.is_pause_requested().await || cancel.is_cancelled() {
                checkpoint_store.update_progress(0, concepts_total, 0, 0).await;
                return Ok(PhaseRunOutcome { processed: 0, paused: true });
            }
            if member.active
                && member.refset_id == options.dialect_refset_id
                && member.acceptability_id == Rf2LanguageRefsetMember::PREFERRED_ID
            {
                preferred_description_ids.insert(member.referenced_component_id);
            }
        }
    }

    let mut concept_descriptions: HashMap<SctId, (Option<String>, Option<String>)> = HashMap::new();
    let mut processed = 0u64;
    let mut stream = Rf2Stream::<Rf2Description>::open(&files.description_file, cancel.clone());
    while let Some(row) = stream.next().await {
        let description = row?.record;
        if checkpoint_store.is_pause_requested().await || cancel.is_cancelled() {
            checkpoint_store.update_progress(processed, concepts_total, processed, 0).await;
            return Ok(PhaseRunOutcome { processed, paused: true });
        }
        if options.active_only && !description.active {
            continue;
        }
        processed += 1;

        let slot = concept_descriptions.entry(description.concept_id).or_insert((None, None));
        if description.type_id == DescriptionType::FSN_ID {
            slot.0 = Some(description.term);
        } else if description.type_id == DescriptionType::SYNONYM_ID
            && preferred_description_ids.contains(&description.id)
        {
            slot.1 = Some(description.term);
        }
    }

    for (concept_id, (fsn, preferred_term)) in &concept_descriptions {
        if fsn.is_none() && preferred_term.is_none() {
            continue;
        }
        if checkpoint_store.is_pause_requested().await || cancel.is_cancelled() {
            checkpoint_store.update_progress(processed, concepts_total, processed, 0).await;
            return Ok(PhaseRunOutcome { processed, paused: true });
        }

        let key = concept_id.to_string();
        let Some(vertex_id) = graph.get_vertex_id_by_label_and_property("SnomedConcept", "conceptId", &key).await?
        else {
            continue;
        };

        let mut props = PropertyMap::new();
        if let Some(fsn) = fsn {
            props.insert("fsn".to_string(), PropertyValue::from(fsn.clone()));
        }
        if let Some(preferred_term) = preferred_term {
            props.insert("preferredTerm".to_string(), PropertyValue::from(preferred_term.clone()));
        }
        graph.update_vertex_properties(vertex_id, props).await?;
    }

    checkpoint_store.update_progress(processed, concepts_total, processed, 0).await;
    Ok(PhaseRunOutcome { processed, paused: false })
}

#[allow(clippy::too_many_arguments)]
async fn run_relationships_phase(
    graph: &Arc<dyn GraphRepository>,
    checkpoint_store: &CheckpointStore,
    relationship_file: &Path,
    options: &SnomedSeedOptions,
    resume_from_line: u64,
    concepts_total: u64,
    descriptions_total: u64,
    seeded_so_far: u64,
    cancel: &CancellationToken,
) -> PipelineResult<PhaseRunOutcome> {
    let mut stream = Rf2Stream::<Rf2Relationship>::open(relationship_file, cancel.clone());
    let mut seeded = seeded_so_far;
    let mut skipped = 0u64;
    let mut last_line_number = resume_from_line;

    while let Some(row) = stream.next().await {
        let row = row?;
        let line_number = row.line_number;
        last_line_number = line_number;

        if line_number <= resume_from_line {
            continue;
        }

        if checkpoint_store.is_pause_requested().await || cancel.is_cancelled() {
            checkpoint_store
                .update_progress(line_number - 1, concepts_total, descriptions_total, seeded)
                .await;
            return Ok(PhaseRunOutcome { processed: seeded, paused: true });
        }

        let relationship = row.record;
        if options.active_only && !relationship.active {
            continue;
        }
        if !relationship.is_inferred() {
            continue;
        }

        let source_key = relationship.source_id.to_string();
        let dest_key = relationship.destination_id.to_string();
        let source_id = graph
            .get_vertex_id_by_label_and_property("SnomedConcept", "conceptId", &source_key)
            .await?;
        let dest_id = graph
            .get_vertex_id_by_label_and_property("SnomedConcept", "conceptId", &dest_key)
            .await?;
        let (Some(source_id), Some(dest_id)) = (source_id, dest_id) else {
            skipped += 1;
            continue;
        };

        if relationship.is_is_a() {
            graph.add_edge("IS_A", source_id, dest_id, None).await?;
        } else {
            let mut props = PropertyMap::new();
            props.insert(
                "relationshipTypeId".to_string(),
                PropertyValue::from(relationship.type_id.to_string()),
            );
            graph.add_edge("DEFINING_REL", source_id, dest_id, Some(props)).await?;
        }
        seeded += 1;

        if options.progress_log_interval > 0 && seeded % options.progress_log_interval == 0 {
            checkpoint_store
                .update_progress(line_number, concepts_total, descriptions_total, seeded)
                .await;
            tracing::info!(relationships_seeded = seeded, skipped, "relationship seeding progress");
        }
    }

    checkpoint_store
        .update_progress(last_line_number, concepts_total, descriptions_total, seeded)
        .await;
    tracing::info!(relationships_seeded = seeded, skipped, "relationship phase complete");
    Ok(PhaseRunOutcome { processed: seeded, paused: false })
}

/// Checks graph-level invariants after a seed completes. Never fails:
/// anything that doesn't hold is appended to `errors`.
pub async fn run_verification(graph: &Arc<dyn GraphRepository>) -> SnomedSeedVerification {
    let mut verification = SnomedSeedVerification::default();

    match graph.count_vertices_by_label("SnomedConcept", None).await {
        Ok(count) => verification.total_concepts = count,
        Err(e) => verification.errors.push(format!("failed to count concepts: {e}")),
    }

    let active_filter = PropertyFilter {
        key: "active".to_string(),
        value: PropertyValue::from(true),
    };
    match graph.count_vertices_by_label("SnomedConcept", Some(active_filter)).await {
        Ok(count) => verification.active_concepts = count,
        Err(e) => verification.errors.push(format!("failed to count active concepts: {e}")),
    }

    let root_id = well_known::SNOMED_CT_ROOT.to_string();
    match graph
        .get_vertex_id_by_label_and_property("SnomedConcept", "conceptId", &root_id)
        .await
    {
        Ok(Some(_)) => verification.has_root_concept = true,
        Ok(None) => verification.errors.push("SNOMED root concept 138875005 not present".to_string()),
        Err(e) => verification.errors.push(format!("failed to check root concept: {e}")),
    }

    let clinical_finding_id = well_known::CLINICAL_FINDING.to_string();
    match graph
        .get_vertex_id_by_label_and_property("SnomedConcept", "conceptId", &clinical_finding_id)
        .await
    {
        Ok(Some(_)) => verification.has_clinical_finding = true,
        Ok(None) => verification.errors.push("Clinical finding concept 404684003 not present".to_string()),
        Err(e) => verification.errors.push(format!("failed to check Clinical finding: {e}")),
    }

    verification
}

#[cfg(test)]
mod tests {
    use super::*;
    use snomed_graph::InMemoryGraph;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_terminology(root: &Path) -> snomed_rf2::Rf2FileSet {
        let terminology = root.join("Terminology");
        fs::create_dir_all(&terminology).unwrap();

        let mut concepts = fs::File::create(terminology.join("sct2_Concept_Snapshot_INT.txt")).unwrap();
        writeln!(concepts, "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId").unwrap();
        writeln!(concepts, "138875005\t20020131\t1\t900000000000207008\t900000000000074008").unwrap();
        writeln!(concepts, "404684003\t20020131\t1\t900000000000207008\t900000000000074008").unwrap();
        writeln!(concepts, "73211009\t20020131\t0\t900000000000207008\t900000000000074008").unwrap();

        let mut descriptions = fs::File::create(terminology.join("sct2_Description_Snapshot_INT.txt")).unwrap();
        writeln!(
            descriptions,
            "id\teffectiveTime\tactive\tmoduleId\tconceptId\tlanguageCode\ttypeId\tterm\tcaseSignificanceId"
        )
        .unwrap();
        writeln!(
            descriptions,
            "3000001\t20020131\t1\t900000000000207008\t404684003\ten\t900000000000003001\tClinical finding (finding)\t900000000000448009"
        )
        .unwrap();

        let mut relationships = fs::File::create(terminology.join("sct2_Relationship_Snapshot_INT.txt")).unwrap();
        writeln!(
            relationships,
            "id\teffectiveTime\tactive\tmoduleId\tsourceId\tdestinationId\trelationshipGroup\ttypeId\tcharacteristicTypeId\tmodifierId"
        )
        .unwrap();
        writeln!(
            relationships,
            "4000001\t20020131\t1\t900000000000207008\t404684003\t138875005\t0\t116680003\t900000000000011006\t900000000000451002"
        )
        .unwrap();

        snomed_rf2::discover_rf2_files(root).unwrap()
    }

    #[tokio::test]
    async fn test_full_seed_creates_concepts_and_is_a_edge() {
        let root = tempdir().unwrap();
        write_terminology(root.path());

        let graph: Arc<dyn GraphRepository> = Arc::new(InMemoryGraph::new());
        let checkpoint_store = Arc::new(CheckpointStore::new());
        let options = SnomedSeedOptions {
            active_only: true,
            ..SnomedSeedOptions::default()
        };

        let result = run_seed(
            graph.clone(),
            checkpoint_store,
            root.path().to_string_lossy().to_string(),
            options,
            false,
            CancellationToken::new(),
        )
        .await;

        assert!(result.ok);
        assert_eq!(result.concepts, 2);
        assert_eq!(result.relationships, 1);

        let in_memory = graph.as_ref();
        let fsn_vertex = in_memory
            .get_vertex_by_label_and_property("SnomedConcept", "conceptId", "404684003")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            fsn_vertex.properties.get("fsn"),
            Some(&PropertyValue::from("Clinical finding (finding)".to_string()))
        );
    }

    #[tokio::test]
    async fn test_active_only_excludes_inactive_concept() {
        let root = tempdir().unwrap();
        write_terminology(root.path());

        let graph: Arc<dyn GraphRepository> = Arc::new(InMemoryGraph::new());
        let checkpoint_store = Arc::new(CheckpointStore::new());

        let result = run_seed(
            graph.clone(),
            checkpoint_store,
            root.path().to_string_lossy().to_string(),
            SnomedSeedOptions::default(),
            false,
            CancellationToken::new(),
        )
        .await;

        assert!(result.ok);
        let missing = graph
            .get_vertex_id_by_label_and_property("SnomedConcept", "conceptId", "73211009")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_relationship_with_missing_endpoint_is_skipped_not_error() {
        let root = tempdir().unwrap();
        let terminology = root.path().join("Terminology");
        fs::create_dir_all(&terminology).unwrap();

        let mut concepts = fs::File::create(terminology.join("sct2_Concept_Snapshot_INT.txt")).unwrap();
        writeln!(concepts, "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId").unwrap();
        writeln!(concepts, "1\t20020131\t1\t900000000000207008\t900000000000074008").unwrap();

        let mut descriptions = fs::File::create(terminology.join("sct2_Description_Snapshot_INT.txt")).unwrap();
        writeln!(
            descriptions,
            "id\teffectiveTime\tactive\tmoduleId\tconceptId\tlanguageCode\ttypeId\tterm\tcaseSignificanceId"
        )
        .unwrap();

        let mut relationships = fs::File::create(terminology.join("sct2_Relationship_Snapshot_INT.txt")).unwrap();
        writeln!(
            relationships,
            "id\teffectiveTime\tactive\tmoduleId\tsourceId\tdestinationId\trelationshipGroup\ttypeId\tcharacteristicTypeId\tmodifierId"
        )
        .unwrap();
        writeln!(
            relationships,
            "4000001\t20020131\t1\t900000000000207008\t1\t2\t0\t116680003\t900000000000011006\t900000000000451002"
        )
        .unwrap();

        let graph: Arc<dyn GraphRepository> = Arc::new(InMemoryGraph::new());
        let checkpoint_store = Arc::new(CheckpointStore::new());

        let result = run_seed(
            graph,
            checkpoint_store,
            root.path().to_string_lossy().to_string(),
            SnomedSeedOptions::default(),
            false,
            CancellationToken::new(),
        )
        .await;

        assert!(result.ok);
        assert_eq!(result.relationships, 0);
    }

    #[tokio::test]
    async fn test_verification_reports_missing_root() {
        let graph: Arc<dyn GraphRepository> = Arc::new(InMemoryGraph::new());
        let verification = run_verification(&graph).await;
        assert!(!verification.has_root_concept);
        assert!(!verification.errors.is_empty());
    }

    #[tokio::test]
    async fn test_defining_relationship_creates_edge_with_type_property() {
        let root = tempdir().unwrap();
        let terminology = root.path().join("Terminology");
        fs::create_dir_all(&terminology).unwrap();

        let mut concepts = fs::File::create(terminology.join("sct2_Concept_Snapshot_INT.txt")).unwrap();
        writeln!(concepts, "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId").unwrap();
        writeln!(concepts, "138875005\t20020131\t1\t900000000000207008\t900000000000074008").unwrap();
        writeln!(concepts, "404684003\t20020131\t1\t900000000000207008\t900000000000074008").unwrap();

        let mut descriptions = fs::File::create(terminology.join("sct2_Description_Snapshot_INT.txt")).unwrap();
        writeln!(
            descriptions,
            "id\teffectiveTime\tactive\tmoduleId\tconceptId\tlanguageCode\ttypeId\tterm\tcaseSignificanceId"
        )
        .unwrap();

        let mut relationships = fs::File::create(terminology.join("sct2_Relationship_Snapshot_INT.txt")).unwrap();
        writeln!(
            relationships,
            "id\teffectiveTime\tactive\tmoduleId\tsourceId\tdestinationId\trelationshipGroup\ttypeId\tcharacteristicTypeId\tmodifierId"
        )
        .unwrap();
        writeln!(
            relationships,
            "4000001\t20020131\t1\t900000000000207008\t404684003\t138875005\t0\t363698007\t900000000000011006\t900000000000451002"
        )
        .unwrap();

        let graph: Arc<dyn GraphRepository> = Arc::new(InMemoryGraph::new());
        let checkpoint_store = Arc::new(CheckpointStore::new());

        let result = run_seed(
            graph.clone(),
            checkpoint_store,
            root.path().to_string_lossy().to_string(),
            SnomedSeedOptions::default(),
            false,
            CancellationToken::new(),
        )
        .await;

        assert!(result.ok);
        assert_eq!(result.relationships, 1);

        let in_memory = graph.as_ref();
        assert_eq!(in_memory.edges_with_label("IS_A").await.len(), 0);
        let defining = in_memory.edges_with_label("DEFINING_REL").await;
        assert_eq!(defining.len(), 1);
        assert_eq!(
            defining[0].properties.get("relationshipTypeId"),
            Some(&PropertyValue::from("363698007".to_string()))
        );
    }

    #[tokio::test]
    async fn test_stated_relationship_is_skipped() {
        let root = tempdir().unwrap();
        let terminology = root.path().join("Terminology");
        fs::create_dir_all(&terminology).unwrap();

        let mut concepts = fs::File::create(terminology.join("sct2_Concept_Snapshot_INT.txt")).unwrap();
        writeln!(concepts, "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId").unwrap();
        writeln!(concepts, "138875005\t20020131\t1\t900000000000207008\t900000000000074008").unwrap();
        writeln!(concepts, "404684003\t20020131\t1\t900000000000207008\t900000000000074008").unwrap();

        let mut descriptions = fs::File::create(terminology.join("sct2_Description_Snapshot_INT.txt")).unwrap();
        writeln!(
            descriptions,
            "id\teffectiveTime\tactive\tmoduleId\tconceptId\tlanguageCode\ttypeId\tterm\tcaseSignificanceId"
        )
        .unwrap();

        let mut relationships = fs::File::create(terminology.join("sct2_Relationship_Snapshot_INT.txt")).unwrap();
        writeln!(
            relationships,
            "id\teffectiveTime\tactive\tmoduleId\tsourceId\tdestinationId\trelationshipGroup\ttypeId\tcharacteristicTypeId\tmodifierId"
        )
        .unwrap();
        writeln!(
            relationships,
            "4000001\t20020131\t1\t900000000000207008\t404684003\t138875005\t0\t116680003\t900000000000010007\t900000000000451002"
        )
        .unwrap();

        let graph: Arc<dyn GraphRepository> = Arc::new(InMemoryGraph::new());
        let checkpoint_store = Arc::new(CheckpointStore::new());

        let result = run_seed(
            graph.clone(),
            checkpoint_store,
            root.path().to_string_lossy().to_string(),
            SnomedSeedOptions::default(),
            false,
            CancellationToken::new(),
        )
        .await;

        assert!(result.ok);
        assert_eq!(result.relationships, 0);
        let in_memory = graph.as_ref();
        assert_eq!(in_memory.edge_count().await, 0);
    }

    #[tokio::test]
    async fn test_preferred_synonym_becomes_preferred_term() {
        let root = tempdir().unwrap();
        let terminology = root.path().join("Terminology");
        fs::create_dir_all(&terminology).unwrap();

        let mut concepts = fs::File::create(terminology.join("sct2_Concept_Snapshot_INT.txt")).unwrap();
        writeln!(concepts, "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId").unwrap();
        writeln!(concepts, "404684003\t20020131\t1\t900000000000207008\t900000000000074008").unwrap();

        let mut descriptions = fs::File::create(terminology.join("sct2_Description_Snapshot_INT.txt")).unwrap();
        writeln!(
            descriptions,
            "id\teffectiveTime\tactive\tmoduleId\tconceptId\tlanguageCode\ttypeId\tterm\tcaseSignificanceId"
        )
        .unwrap();
        writeln!(
            descriptions,
            "3000001\t20020131\t1\t900000000000207008\t404684003\ten\t900000000000003001\tClinical finding (finding)\t900000000000448009"
        )
        .unwrap();
        writeln!(
            descriptions,
            "3000002\t20020131\t1\t900000000000207008\t404684003\ten\t900000000000013009\tClinical finding\t900000000000448009"
        )
        .unwrap();

        let mut relationships = fs::File::create(terminology.join("sct2_Relationship_Snapshot_INT.txt")).unwrap();
        writeln!(
            relationships,
            "id\teffectiveTime\tactive\tmoduleId\tsourceId\tdestinationId\trelationshipGroup\ttypeId\tcharacteristicTypeId\tmodifierId"
        )
        .unwrap();

        let refset_dir = root.path().join("Refset").join("Language");
        fs::create_dir_all(&refset_dir).unwrap();
        let mut language_refset =
            fs::File::create(refset_dir.join("der2_cRefset_LanguageSnapshot-en_INT.txt")).unwrap();
        writeln!(
            language_refset,
            "id\teffectiveTime\tactive\tmoduleId\trefsetId\treferencedComponentId\tacceptabilityId"
        )
        .unwrap();
        writeln!(
            language_refset,
            "5000001\t20020131\t1\t900000000000207008\t900000000000509007\t3000002\t900000000000548007"
        )
        .unwrap();

        let graph: Arc<dyn GraphRepository> = Arc::new(InMemoryGraph::new());
        let checkpoint_store = Arc::new(CheckpointStore::new());

        let result = run_seed(
            graph.clone(),
            checkpoint_store,
            root.path().to_string_lossy().to_string(),
            SnomedSeedOptions::default(),
            false,
            CancellationToken::new(),
        )
        .await;

        assert!(result.ok);

        let vertex = graph
            .get_vertex_by_label_and_property("SnomedConcept", "conceptId", "404684003")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            vertex.properties.get("fsn"),
            Some(&PropertyValue::from("Clinical finding (finding)".to_string()))
        );
        assert_eq!(
            vertex.properties.get("preferredTerm"),
            Some(&PropertyValue::from("Clinical finding".to_string()))
        );
    }

    #[tokio::test]
    async fn test_pause_mid_batch_then_resume_completes_all_concepts() {
        let root = tempdir().unwrap();
        let terminology = root.path().join("Terminology");
        fs::create_dir_all(&terminology).unwrap();

        let mut concepts = fs::File::create(terminology.join("sct2_Concept_Snapshot_INT.txt")).unwrap();
        writeln!(concepts, "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId").unwrap();
        for i in 0..3000u64 {
            writeln!(
                concepts,
                "{}\t20020131\t1\t900000000000207008\t900000000000074008",
                2_000_000 + i
            )
            .unwrap();
        }

        let mut descriptions = fs::File::create(terminology.join("sct2_Description_Snapshot_INT.txt")).unwrap();
        writeln!(
            descriptions,
            "id\teffectiveTime\tactive\tmoduleId\tconceptId\tlanguageCode\ttypeId\tterm\tcaseSignificanceId"
        )
        .unwrap();

        let mut relationships = fs::File::create(terminology.join("sct2_Relationship_Snapshot_INT.txt")).unwrap();
        writeln!(
            relationships,
            "id\teffectiveTime\tactive\tmoduleId\tsourceId\tdestinationId\trelationshipGroup\ttypeId\tcharacteristicTypeId\tmodifierId"
        )
        .unwrap();

        let rf2_directory = root.path().to_string_lossy().to_string();
        let graph: Arc<dyn GraphRepository> = Arc::new(InMemoryGraph::new());
        let checkpoint_store = Arc::new(CheckpointStore::new());
        let options = SnomedSeedOptions {
            verify_after_seed: false,
            ..SnomedSeedOptions::default()
        };

        let seed_task = tokio::spawn({
            let graph = graph.clone();
            let checkpoint_store = checkpoint_store.clone();
            let rf2_directory = rf2_directory.clone();
            let options = options.clone();
            async move {
                run_seed(graph, checkpoint_store, rf2_directory, options, false, CancellationToken::new()).await
            }
        });

        let mut attempts = 0;
        loop {
            if let Some(status) = checkpoint_store.get_status(&rf2_directory).await {
                if status.concepts_seeded >= 1000 {
                    break;
                }
            }
            attempts += 1;
            assert!(attempts < 10_000, "concept batch never reached 1000 seeded");
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }
        checkpoint_store.request_pause().await;

        let paused = seed_task.await.unwrap();
        assert!(paused.ok);
        assert_eq!(paused.error.as_deref(), Some("Paused"));
        assert!(paused.concepts >= 1000 && paused.concepts < 3000);

        let status = checkpoint_store.get_status(&rf2_directory).await.unwrap();
        assert!(status.is_paused);
        assert!(status.last_processed_line >= 1000 && status.last_processed_line < 2000);

        let resumed = run_seed(
            graph.clone(),
            checkpoint_store,
            rf2_directory,
            options,
            false,
            CancellationToken::new(),
        )
        .await;

        assert!(resumed.ok);
        assert_eq!(resumed.concepts, 3000);
        assert_eq!(graph.count_vertices_by_label("SnomedConcept", None).await.unwrap(), 3000);
    }
}
