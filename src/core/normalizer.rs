use crate::core::error::MatchError;
use crate::models::{BudgetRange, Complexity, MatchCriteria, MatchRequest, ProjectType, Timeline};

/// Validate a raw match request and bring it into canonical form
///
/// Missing or blank `blockchain` means "no preference" and an unknown
/// `projectType` key is dropped; neither is an error. Budget bounds and
/// the timeline/complexity enums are checked strictly.
pub fn normalize_request(request: &MatchRequest) -> Result<MatchCriteria, MatchError> {
    let budget_range = validate_budget(request.budget_range)?;

    let timeline = Timeline::parse(&request.timeline).ok_or_else(|| {
        MatchError::InvalidCriteria(format!(
            "timeline must be one of asap, normal, flexible (got {:?})",
            request.timeline
        ))
    })?;

    let complexity = Complexity::parse(&request.complexity).ok_or_else(|| {
        MatchError::InvalidCriteria(format!(
            "complexity must be one of low, medium, high (got {:?})",
            request.complexity
        ))
    })?;

    let blockchain = request
        .blockchain
        .as_deref()
        .map(str::trim)
        .filter(|chain| !chain.is_empty())
        .map(str::to_string);

    let project_type = request.project_type.as_deref().and_then(|key| {
        let parsed = ProjectType::from_key(key);
        if parsed.is_none() && !key.trim().is_empty() {
            tracing::debug!("Unknown project type {:?}, ignoring", key);
        }
        parsed
    });

    Ok(MatchCriteria {
        blockchain,
        project_type,
        budget_range,
        timeline,
        complexity,
    })
}

fn validate_budget(range: BudgetRange) -> Result<BudgetRange, MatchError> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(MatchError::InvalidCriteria(
            "budgetRange bounds must be finite numbers".to_string(),
        ));
    }
    if range.min < 0.0 || range.max < 0.0 {
        return Err(MatchError::InvalidCriteria(format!(
            "budgetRange bounds must not be negative (got [{}, {}])",
            range.min, range.max
        )));
    }
    if range.min > range.max {
        return Err(MatchError::InvalidCriteria(format!(
            "budgetRange.min {} exceeds budgetRange.max {}",
            range.min, range.max
        )));
    }
    Ok(range)
}
