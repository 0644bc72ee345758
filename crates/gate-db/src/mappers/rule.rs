//! Rule entity <-> model mapper

use gate_core::entities::{Rule, RuleAction};
use gate_core::DomainError;

use crate::models::RuleModel;

use super::bad_column;

impl TryFrom<RuleModel> for Rule {
    type Error = DomainError;

    fn try_from(model: RuleModel) -> Result<Self, Self::Error> {
        let action = model
            .action
            .parse::<RuleAction>()
            .map_err(|_| bad_column("rules", "action", &model.action))?;

        Ok(Rule {
            id: model.id,
            pattern: model.pattern,
            action,
            description: model.description,
            priority: model.priority,
            created_at: model.created_at,
            created_by: model.created_by,
        })
    }
}
