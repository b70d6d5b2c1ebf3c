use crate::config::CollisionPolicy;
use crate::planner::{CompanionRename, RenameCandidate, RenamePlan};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameOperation {
    pub from: PathBuf,
    pub to: PathBuf,
    pub companion: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApplyResult {
    pub applied: usize,
    pub companions: usize,
    pub skipped: usize,
}

/// Renames candidates one after another. A failed primary rename stops the
/// run; renames already done stay done.
pub fn apply_plan<F>(plan: &RenamePlan, mut on_renamed: F) -> Result<ApplyResult>
where
    F: FnMut(&RenameOperation),
{
    let mut result = ApplyResult::default();

    for candidate in &plan.candidates {
        let Some(op) = rename_primary(candidate, plan.collision)? else {
            result.skipped += 1;
            continue;
        };
        log::info!("リネーム: {} -> {}", op.from.display(), op.to.display());
        on_renamed(&op);
        result.applied += 1;

        if let Some(companion) = &candidate.companion {
            if let Some(op) = rename_companion(companion, plan.collision) {
                on_renamed(&op);
                result.companions += 1;
            }
        }
    }

    Ok(result)
}

fn rename_primary(
    candidate: &RenameCandidate,
    collision: CollisionPolicy,
) -> Result<Option<RenameOperation>> {
    let from = &candidate.original_path;
    let to = &candidate.target_path;

    if to != from && to.exists() {
        match collision {
            CollisionPolicy::Fail => bail!(
                "リネーム先が既に存在します: {} -> {}",
                from.display(),
                to.display()
            ),
            CollisionPolicy::Skip => {
                log::warn!(
                    "リネーム先が既に存在するためスキップしました: {} -> {}",
                    from.display(),
                    to.display()
                );
                return Ok(None);
            }
            CollisionPolicy::Overwrite => {}
        }
    }

    fs::rename(from, to).with_context(|| {
        format!(
            "リネームに失敗しました: {} -> {}",
            from.display(),
            to.display()
        )
    })?;

    Ok(Some(RenameOperation {
        from: from.clone(),
        to: to.clone(),
        companion: false,
    }))
}

/// Any failure here is ignored; the companion may already be gone.
fn rename_companion(
    companion: &CompanionRename,
    collision: CollisionPolicy,
) -> Option<RenameOperation> {
    let from = &companion.original_path;
    let to = &companion.target_path;

    if collision != CollisionPolicy::Overwrite && to.exists() {
        log::debug!("ペア動画のリネーム先が既に存在します: {}", to.display());
        return None;
    }

    match fs::rename(from, to) {
        Ok(()) => Some(RenameOperation {
            from: from.clone(),
            to: to.clone(),
            companion: true,
        }),
        Err(err) => {
            log::debug!("ペア動画のリネームを無視しました: {} ({err})", from.display());
            None
        }
    }
}
