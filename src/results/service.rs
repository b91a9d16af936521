use tracing::{debug, warn};

use super::error::RedeemError;
use crate::store::{CardUpdate, ResultStore, ScratchCard};

/// Scratch-card PINs are printed as 12 characters.
pub const PIN_LENGTH: usize = 12;

/// How many times a conflicted commit is re-resolved before giving up. A
/// conflict means another redemption landed between our read and our write,
/// and each retry re-reads, so contention on one card burns down fast.
const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// A request that passed field validation. `student_id` is trimmed;
/// the PIN is kept exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCheck {
    pub student_id: String,
    pub pin: String,
}

/// Field checks, no store access. Student-id problems are reported before
/// PIN problems.
pub fn validate_request(student_id: &str, pin: &str) -> Result<ValidatedCheck, RedeemError> {
    let student_id = student_id.trim();
    if student_id.is_empty() {
        return Err(RedeemError::MissingStudentId);
    }
    if pin.chars().count() != PIN_LENGTH {
        return Err(RedeemError::MalformedPin);
    }
    Ok(ValidatedCheck {
        student_id: student_id.to_string(),
        pin: pin.to_string(),
    })
}

/// Decides whether the pair may redeem right now. Checks run in a fixed
/// order (student existence, card existence, binding, remaining uses) and
/// the first failure wins. Reporting an unknown student before an unknown
/// PIN avoids confirming live PINs to callers who cannot even name a
/// student.
async fn resolve_entitlement(
    store: &dyn ResultStore,
    check: &ValidatedCheck,
) -> Result<ScratchCard, RedeemError> {
    if store.find_student(&check.student_id).await?.is_none() {
        return Err(RedeemError::StudentNotFound);
    }

    let card = store
        .find_card_by_pin(&check.pin)
        .await?
        .ok_or(RedeemError::InvalidPin)?;

    if let Some(owner) = card.student_id.as_deref() {
        if owner != check.student_id {
            return Err(RedeemError::PinNotAssignedToStudent);
        }
    }

    if card.uses <= 0 {
        return Err(RedeemError::CardExhausted);
    }

    Ok(card)
}

/// The full redemption flow: validate, resolve, then consume one use with a
/// compare-and-commit write. A conflicted write means a concurrent
/// redemption got there first; the card is re-resolved from a fresh read, so
/// a racer that lost the last unit surfaces as `CardExhausted` rather than a
/// double spend. Nothing is written on any validation or entitlement
/// failure.
pub async fn redeem(
    store: &dyn ResultStore,
    student_id: &str,
    pin: &str,
) -> Result<(), RedeemError> {
    let check = validate_request(student_id, pin)?;

    for attempt in 1..=MAX_COMMIT_ATTEMPTS {
        let card = resolve_entitlement(store, &check).await?;

        match store.consume_card_use(&card.pin, card.uses).await? {
            CardUpdate::Applied { remaining } => {
                debug!(
                    student_id = %check.student_id,
                    card_id = %card.id,
                    remaining,
                    "scratch card use consumed"
                );
                return Ok(());
            }
            CardUpdate::Conflict => {
                warn!(
                    student_id = %check.student_id,
                    card_id = %card.id,
                    attempt,
                    "scratch card updated concurrently, re-checking"
                );
            }
        }
    }

    Err(RedeemError::Store(anyhow::anyhow!(
        "scratch card update conflicted {MAX_COMMIT_ATTEMPTS} times"
    )))
}
