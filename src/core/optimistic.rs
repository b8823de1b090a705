use crate::core::models::{BaseEntity, Lead};
use crate::core::repository::{LeadBoard, Repository};
use crate::core::types::LeadStatus;
use crate::errors::Result;
use crate::logging::{LogTarget, Logger};

/// One local mutation awaiting server confirmation.
///
/// `begin` snapshots the entity and applies the change immediately; the
/// caller then either `commit`s (keep the local state) or `rollback`s
/// (restore the snapshot). Dropping without either leaves the local change
/// in place.
pub struct OptimisticUpdate<T: BaseEntity + Clone> {
    id: String,
    snapshot: T,
}

impl<T: BaseEntity + Clone> OptimisticUpdate<T> {
    pub fn begin<F>(repo: &mut Repository<T>, id: &str, mutate: F) -> Result<Self>
    where
        F: FnOnce(&mut T),
    {
        let entity = repo.get_mut(id)?;
        let snapshot = entity.clone();
        mutate(entity);
        Ok(Self {
            id: id.to_string(),
            snapshot,
        })
    }

    pub fn commit(self) {}

    pub fn rollback(self, repo: &mut Repository<T>) {
        repo.upsert(self.snapshot);
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Apply `mutate` locally, then run `confirm`. If `confirm` fails the entity
/// is restored and the error returned. No retry.
pub fn apply_optimistic<T, F, C>(
    repo: &mut Repository<T>,
    id: &str,
    mutate: F,
    confirm: C,
    logger: &Logger,
) -> Result<()>
where
    T: BaseEntity + Clone,
    F: FnOnce(&mut T),
    C: FnOnce(&T) -> Result<()>,
{
    let update = OptimisticUpdate::begin(repo, id, mutate)?;
    let outcome = confirm(repo.get(id)?);
    match outcome {
        Ok(()) => {
            update.commit();
            Ok(())
        }
        Err(e) => {
            logger.warn(
                format!("Reverting local change to '{}': {}", update.id(), e),
                LogTarget::FileOnly,
            );
            update.rollback(repo);
            Err(e)
        }
    }
}

/// Drag a lead card to another kanban column.
pub fn move_lead<C>(
    board: &mut LeadBoard,
    lead_id: &str,
    to: LeadStatus,
    confirm: C,
    logger: &Logger,
) -> Result<()>
where
    C: FnOnce(&Lead) -> Result<()>,
{
    if board.get(lead_id)?.status == to {
        return Ok(());
    }
    apply_optimistic(board, lead_id, |lead| lead.status = to, confirm, logger)
}
